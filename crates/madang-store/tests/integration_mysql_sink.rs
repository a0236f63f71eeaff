use anyhow::{Context, Result};
use chrono::NaiveDate;
use madang_core::{
    BOOK_TABLE, CUSTOMER_TABLE, NewCustomer, NewOrder, Role, Sink, SqlValue, insert_records,
};
use madang_store::{MySqlSink, SinkConfig};
use std::{env, fs};

const FIXTURE_PATH: &str = "fixtures/sql/mysql/001_schema.sql";

fn database_url() -> Result<String> {
    env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .context("set TEST_DATABASE_URL or DATABASE_URL for integration tests")
}

async fn reset_fixtures(sink: &MySqlSink) -> Result<()> {
    let script = fs::read_to_string(FIXTURE_PATH)
        .with_context(|| format!("reading fixture {FIXTURE_PATH}"))?;

    for statement in script.split(';') {
        let sql = statement.trim();
        if sql.is_empty() {
            continue;
        }

        sqlx::query(sql)
            .execute(sink.pool())
            .await
            .with_context(|| format!("executing fixture {FIXTURE_PATH}"))?;
    }

    Ok(())
}

async fn connect() -> Result<MySqlSink> {
    let sink = MySqlSink::connect(&SinkConfig::with_url(database_url()?))
        .await
        .context("connecting to MySQL")?;
    reset_fixtures(&sink).await?;
    Ok(sink)
}

#[tokio::test]
#[ignore = "requires a MySQL database at TEST_DATABASE_URL"]
async fn loads_prerequisites_in_identity_order() -> Result<()> {
    let sink = connect().await?;

    let prereqs = sink.load_prerequisites().await?;
    let books: Vec<(i64, i64)> = prereqs
        .books
        .iter()
        .map(|book| (book.id, book.list_price))
        .collect();
    assert_eq!(books, vec![(1, 7000), (2, 13000)]);
    let customers: Vec<i64> = prereqs.customers.iter().map(|c| c.id).collect();
    assert_eq!(customers, vec![1, 2, 3]);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a MySQL database at TEST_DATABASE_URL"]
async fn inserts_batches_and_keeps_null_phones() -> Result<()> {
    let sink = connect().await?;

    let customers = vec![
        NewCustomer {
            name: "추신수".to_string(),
            address: "미국 클리블랜드".to_string(),
            phone: Some("000-8000-0001".to_string()),
        },
        NewCustomer {
            name: "박세리".to_string(),
            address: "대한민국 대전".to_string(),
            phone: None,
        },
    ];
    assert_eq!(insert_records(&sink, &customers).await?, 2);

    let nulls: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Customer WHERE phone IS NULL")
        .fetch_one(sink.pool())
        .await?;
    assert_eq!(nulls, 2);

    let orders = vec![NewOrder {
        customer_id: 5,
        book_id: 2,
        sale_price: 11000,
        order_date: NaiveDate::from_ymd_opt(2025, 7, 1).context("date")?,
    }];
    assert_eq!(insert_records(&sink, &orders).await?, 1);

    let too_wide = vec![vec![SqlValue::Int(1); BOOK_TABLE.columns.len() + 1]];
    assert!(sink.insert_batch(&CUSTOMER_TABLE, &too_wide).await.is_err());

    Ok(())
}

#[tokio::test]
#[ignore = "requires a MySQL database at TEST_DATABASE_URL"]
async fn assigns_roles_and_reports_distribution() -> Result<()> {
    let sink = connect().await?;

    assert_eq!(sink.assign_role(Role::Admin, &[2]).await?, 1);
    assert_eq!(sink.assign_role(Role::Manager, &[3, 42]).await?, 1);
    assert_eq!(sink.assign_role(Role::Publisher, &[]).await?, 0);

    let distribution = sink.role_distribution().await?;
    assert_eq!(
        distribution,
        vec![
            (Role::Admin, 1),
            (Role::Manager, 1),
            (Role::Publisher, 0),
            (Role::Customer, 1),
        ]
    );

    let staff: Vec<(i64, Role)> = sink
        .staff()
        .await?
        .into_iter()
        .map(|member| (member.id, member.role))
        .collect();
    assert_eq!(staff, vec![(2, Role::Admin), (3, Role::Manager)]);

    Ok(())
}
