use chrono::NaiveDate;
use madang_core::{
    BookRef, CustomerRef, NewOrder, Prerequisites, Record, Role, RoleAssignments, SqlValue,
};

#[test]
fn role_assignments_fill_missing_sections_with_defaults() {
    let assignments: RoleAssignments =
        serde_json::from_str(r#"{"manager_ids": [8, 9]}"#).expect("parse assignments");
    assert_eq!(assignments.admin_ids, vec![2]);
    assert_eq!(assignments.manager_ids, vec![8, 9]);
    assert!(assignments.publisher_ids.is_empty());
}

#[test]
fn roles_serialize_as_lowercase_strings() {
    let encoded = serde_json::to_string(&[Role::Admin, Role::Customer]).expect("encode roles");
    assert_eq!(encoded, r#"["admin","customer"]"#);
}

#[test]
fn prerequisites_preserve_store_order() {
    let prereqs = Prerequisites::new(
        vec![
            BookRef {
                id: 2,
                list_price: 13000,
            },
            BookRef {
                id: 1,
                list_price: 7000,
            },
        ],
        vec![CustomerRef { id: 3 }],
    );
    let encoded = serde_json::to_value(&prereqs).expect("encode prerequisites");
    assert_eq!(encoded["books"][0]["id"], 2);
    assert_eq!(prereqs.book(1).map(|book| book.list_price), Some(7000));
    assert!(prereqs.has_customer(3));
    assert!(!prereqs.has_customer(1));
}

#[test]
fn order_rows_follow_table_column_order() {
    let order = NewOrder {
        customer_id: 3,
        book_id: 1,
        sale_price: 6000,
        order_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap_or_default(),
    };
    let values = order.values();
    assert_eq!(values[0], SqlValue::Int(3));
    assert_eq!(values[1], SqlValue::Int(1));
    assert_eq!(values[2].as_i64(), Some(6000));
    assert_eq!(values[3].to_csv(), "2025-03-14");
}
