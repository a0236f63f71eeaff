use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::pool::PoolOptions;
use sqlx::{
    Database, Encode, Executor, FromRow, IntoArguments, MySql, Pool, Postgres, QueryBuilder, Type,
};
use tracing::{info, warn};

use madang_core::{
    BookRef, CustomerRef, Error, Prerequisites, Result, Role, Sink, SqlValue, StaffMember,
    TableMapping, redact_connection_string,
};

use crate::options::SinkConfig;
use crate::rows::{ROWS_PER_STATEMENT, check_row_widths, tally_roles, write_failed};

mod dialect;

pub use dialect::Dialect;

/// Sink backed by a `sqlx` pool; the engine contributes only its [`Dialect`].
#[derive(Debug)]
pub struct SqlxSink<DB: Database> {
    pool: Pool<DB>,
}

/// Sink for MySQL/MariaDB.
pub type MySqlSink = SqlxSink<MySql>;
/// Sink for PostgreSQL.
pub type PostgresSink = SqlxSink<Postgres>;

impl<DB: Dialect> SqlxSink<DB> {
    /// Create a sink using a pre-configured pool.
    pub fn new(pool: Pool<DB>) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &SinkConfig) -> Result<Self> {
        config.validate()?;
        let pool = PoolOptions::<DB>::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|err| {
                Error::SinkConnectivity(format!(
                    "connecting to {}: {err}",
                    redact_connection_string(&config.url).redacted
                ))
            })?;
        info!(event = "sink_connected", engine = DB::ENGINE);
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &Pool<DB> {
        &self.pool
    }
}

impl<DB> SqlxSink<DB>
where
    DB: Dialect,
    for<'c> &'c mut DB::Connection: Executor<'c, Database = DB>,
    for<'a, 'b> DB::Arguments<'a>: IntoArguments<'b, DB>,
    for<'r> (i64,): FromRow<'r, DB::Row>,
    for<'r> (i64, i64): FromRow<'r, DB::Row>,
    for<'r> (Option<String>, i64): FromRow<'r, DB::Row>,
    for<'r> (i64, Option<String>, Option<String>, Option<String>): FromRow<'r, DB::Row>,
    for<'q> i64: Encode<'q, DB> + Type<DB>,
    for<'q> String: Encode<'q, DB> + Type<DB>,
    for<'q> Option<String>: Encode<'q, DB> + Type<DB>,
    for<'q> NaiveDate: Encode<'q, DB> + Type<DB>,
{
    async fn fetch_prerequisites(&self) -> Result<Prerequisites> {
        let books = sqlx::query_as::<DB, (i64, i64)>(DB::SELECT_BOOKS)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| Error::PrerequisiteUnavailable(format!("loading books: {err}")))?;
        let customers = sqlx::query_as::<DB, (i64,)>(DB::SELECT_CUSTOMERS)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| Error::PrerequisiteUnavailable(format!("loading customers: {err}")))?;

        Ok(Prerequisites::new(
            books
                .into_iter()
                .map(|(id, list_price)| BookRef { id, list_price })
                .collect(),
            customers.into_iter().map(|(id,)| CustomerRef { id }).collect(),
        ))
    }

    /// Insert all rows in one transaction, chunked into multi-row statements.
    async fn insert_rows(&self, mapping: &TableMapping, rows: &[Vec<SqlValue>]) -> Result<u64> {
        check_row_widths(mapping, rows)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|err| write_failed(mapping, "starting transaction for", err))?;
        let mut inserted = 0;

        for chunk in rows.chunks(ROWS_PER_STATEMENT) {
            let mut builder = QueryBuilder::<DB>::new(mapping.insert_prefix());
            builder.push_values(chunk, |mut row, values| {
                for value in values {
                    match value {
                        SqlValue::Null => row.push_bind(None::<String>),
                        SqlValue::Int(value) => row.push_bind(*value),
                        SqlValue::Text(value) => row.push_bind(value.clone()),
                        SqlValue::Date(value) => row.push_bind(*value),
                    };
                }
            });
            let result = builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|err| write_failed(mapping, "inserting into", err))?;
            inserted += DB::rows_affected(&result);
        }

        tx.commit()
            .await
            .map_err(|err| write_failed(mapping, "committing", err))?;
        Ok(inserted)
    }

    async fn update_roles(&self, role: Role, ids: &[i64]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut builder = QueryBuilder::<DB>::new("UPDATE Customer SET role = ");
        builder.push_bind(role.as_str().to_string());
        DB::push_customer_filter(&mut builder, ids);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|err| Error::WriteFailed(format!("assigning role {role}: {err}")))?;
        Ok(DB::rows_affected(&result))
    }

    async fn count_roles(&self) -> Result<Vec<(Role, u64)>> {
        let rows = sqlx::query_as::<DB, (Option<String>, i64)>(DB::COUNT_ROLES)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| Error::Db(format!("counting roles: {err}")))?;
        Ok(tally_roles(rows))
    }

    async fn fetch_staff(&self) -> Result<Vec<StaffMember>> {
        let rows = sqlx::query_as::<DB, (i64, Option<String>, Option<String>, Option<String>)>(
            DB::SELECT_STAFF,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| Error::Db(format!("listing staff: {err}")))?;

        let mut staff = Vec::with_capacity(rows.len());
        for (id, name, address, role) in rows {
            match role.as_deref().unwrap_or_default().parse::<Role>() {
                Ok(role) => staff.push(StaffMember {
                    id,
                    name,
                    address,
                    role,
                }),
                Err(err) => warn!(custid = id, error = %err, "skipping staff row"),
            }
        }
        Ok(staff)
    }
}

macro_rules! impl_sink {
    ($db:ty) => {
        #[async_trait]
        impl Sink for SqlxSink<$db> {
            fn engine(&self) -> &'static str {
                <$db as Dialect>::ENGINE
            }

            async fn load_prerequisites(&self) -> Result<Prerequisites> {
                self.fetch_prerequisites().await
            }

            async fn insert_batch(
                &self,
                mapping: &TableMapping,
                rows: &[Vec<SqlValue>],
            ) -> Result<u64> {
                self.insert_rows(mapping, rows).await
            }

            async fn assign_role(&self, role: Role, ids: &[i64]) -> Result<u64> {
                self.update_roles(role, ids).await
            }

            async fn role_distribution(&self) -> Result<Vec<(Role, u64)>> {
                self.count_roles().await
            }

            async fn staff(&self) -> Result<Vec<StaffMember>> {
                self.fetch_staff().await
            }
        }
    };
}

impl_sink!(MySql);
impl_sink!(Postgres);
