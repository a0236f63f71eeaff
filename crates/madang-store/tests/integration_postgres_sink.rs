use anyhow::{Context, Result};
use chrono::NaiveDate;
use madang_core::{
    BOOK_TABLE, NewBook, NewCustomer, NewOrder, Role, Sink, SqlValue, insert_records,
};
use madang_store::{PostgresSink, SinkConfig};
use std::{env, fs};

const FIXTURE_PATHS: &[&str] = &[
    "fixtures/sql/postgres/001_schema.sql",
    "fixtures/sql/postgres/002_data.sql",
];

fn database_url() -> Result<String> {
    env::var("TEST_POSTGRES_URL")
        .or_else(|_| env::var("TEST_DATABASE_URL"))
        .context("set TEST_POSTGRES_URL or TEST_DATABASE_URL for integration tests")
}

async fn run_fixture(sink: &PostgresSink, path: &str) -> Result<()> {
    let script = fs::read_to_string(path).with_context(|| format!("reading fixture {path}"))?;

    for statement in script.split(';') {
        let sql = statement.trim();
        if sql.is_empty() {
            continue;
        }

        sqlx::query(sql)
            .execute(sink.pool())
            .await
            .with_context(|| format!("executing fixture {path}"))?;
    }

    Ok(())
}

async fn connect() -> Result<PostgresSink> {
    let sink = PostgresSink::connect(&SinkConfig::with_url(database_url()?))
        .await
        .context("connecting to Postgres")?;
    for path in FIXTURE_PATHS {
        run_fixture(&sink, path).await?;
    }
    Ok(sink)
}

#[tokio::test]
#[ignore = "requires a Postgres database at TEST_POSTGRES_URL"]
async fn loads_prerequisites_in_identity_order() -> Result<()> {
    let sink = connect().await?;
    assert_eq!(sink.engine(), "postgres");

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
#[ignore = "requires a Postgres database at TEST_POSTGRES_URL"]
async fn int8_binds_land_in_integer_columns_and_nulls_stay_null() -> Result<()> {
    let sink = connect().await?;

    let customers = vec![NewCustomer {
        name: "박세리".to_string(),
        address: "대한민국 대전".to_string(),
        phone: None,
    }];
    assert_eq!(insert_records(&sink, &customers).await?, 1);

    let nulls: i64 = sqlx::query_scalar("select count(*) from customer where phone is null")
        .fetch_one(sink.pool())
        .await?;
    assert_eq!(nulls, 2);

    let order_date = NaiveDate::from_ymd_opt(2025, 7, 1).context("date")?;
    let orders = vec![NewOrder {
        customer_id: 4,
        book_id: 2,
        sale_price: 11000,
        order_date,
    }];
    assert_eq!(insert_records(&sink, &orders).await?, 1);

    let stored: (i32, i32, i32, NaiveDate) =
        sqlx::query_as("select custid, bookid, saleprice, orderdate from orders")
            .fetch_one(sink.pool())
            .await?;
    assert_eq!(stored, (4, 2, 11000, order_date));

    let dangling = vec![NewOrder {
        customer_id: 99,
        book_id: 1,
        sale_price: 5000,
        order_date,
    }];
    assert!(insert_records(&sink, &dangling).await.is_err());

    let too_wide = vec![vec![SqlValue::Int(1); BOOK_TABLE.columns.len() + 1]];
    assert!(sink.insert_batch(&BOOK_TABLE, &too_wide).await.is_err());

    Ok(())
}

#[tokio::test]
#[ignore = "requires a Postgres database at TEST_POSTGRES_URL"]
async fn inserts_more_rows_than_one_statement_holds() -> Result<()> {
    let sink = connect().await?;

    let books: Vec<NewBook> = (0..1201)
        .map(|idx| NewBook {
            title: format!("야구 교본 {idx}"),
            publisher: "이상미디어".to_string(),
            price: 5000 + (idx % 46) * 1000,
        })
        .collect();
    assert_eq!(insert_records(&sink, &books).await?, 1201);

    let prereqs = sink.load_prerequisites().await?;
    assert_eq!(prereqs.books.len(), 1203);
    assert!(prereqs.books.windows(2).all(|pair| pair[0].id < pair[1].id));

    Ok(())
}

#[tokio::test]
#[ignore = "requires a Postgres database at TEST_POSTGRES_URL"]
async fn assigns_roles_and_lists_staff() -> Result<()> {
    let sink = connect().await?;

    assert_eq!(sink.assign_role(Role::Admin, &[2]).await?, 1);
    assert_eq!(sink.assign_role(Role::Manager, &[3, 42]).await?, 1);
    assert_eq!(sink.assign_role(Role::Publisher, &[]).await?, 0);

    assert_eq!(
        sink.role_distribution().await?,
        vec![
            (Role::Admin, 1),
            (Role::Manager, 1),
            (Role::Publisher, 0),
            (Role::Customer, 1),
        ]
    );

    let staff: Vec<(i64, Option<String>, Role)> = sink
        .staff()
        .await?
        .into_iter()
        .map(|member| (member.id, member.name, member.role))
        .collect();
    assert_eq!(
        staff,
        vec![
            (2, Some("김연아".to_string()), Role::Admin),
            (3, Some("김연경".to_string()), Role::Manager),
        ]
    );

    Ok(())
}
