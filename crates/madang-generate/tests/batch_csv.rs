use madang_core::NewCustomer;
use madang_generate::output::csv::write_batch_csv;

#[test]
fn writes_header_and_blank_field_for_absent_phone() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("customers.csv");
    let customers = vec![
        NewCustomer {
            name: "Ana Souza".to_string(),
            address: "Rua das Flores, 12 - Recife/PE, 50000-000".to_string(),
            phone: Some("(81) 5555-0101".to_string()),
        },
        NewCustomer {
            name: "John Park".to_string(),
            address: "4 Elm St, Dayton, OH 45402".to_string(),
            phone: None,
        },
    ];

    let bytes = write_batch_csv(&path, &customers).expect("write csv");
    let content = std::fs::read_to_string(&path).expect("read csv");
    assert_eq!(bytes, content.len() as u64);

    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "name,address,phone");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with(",(81) 5555-0101"));
    assert!(lines[2].ends_with("OH 45402\","));
}
