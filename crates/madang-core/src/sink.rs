use async_trait::async_trait;

use crate::error::Result;
use crate::model::Prerequisites;
use crate::roles::{Role, StaffMember};
use crate::row::{Record, SqlValue, TableMapping};

/// Write/read boundary to the relational store.
///
/// Adapters own connection handling and transaction semantics. Callers issue
/// at most one prerequisite read and one batch write per run and never retry.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Returns the engine identifier (e.g. `mysql`).
    fn engine(&self) -> &'static str;

    /// Load all persisted books as `(id, list_price)` and customers as `id`.
    async fn load_prerequisites(&self) -> Result<Prerequisites>;

    /// Append `rows` to `mapping.table` and report how many rows were written.
    async fn insert_batch(&self, mapping: &TableMapping, rows: &[Vec<SqlValue>]) -> Result<u64>;

    /// Set `role` on every customer in `ids`; returns the number of rows updated.
    async fn assign_role(&self, role: Role, ids: &[i64]) -> Result<u64>;

    /// Customer counts per role in [`Role::REPORT_ORDER`].
    async fn role_distribution(&self) -> Result<Vec<(Role, u64)>>;

    /// Admins and managers ordered by id.
    async fn staff(&self) -> Result<Vec<StaffMember>>;
}

/// Flatten `records` with their table mapping and hand them to `sink`.
///
/// An empty slice is not sent to the store.
pub async fn insert_records<S, R>(sink: &S, records: &[R]) -> Result<u64>
where
    S: Sink + ?Sized,
    R: Record + Sync,
{
    if records.is_empty() {
        return Ok(0);
    }
    let rows: Vec<Vec<SqlValue>> = records.iter().map(Record::values).collect();
    sink.insert_batch(&R::MAPPING, &rows).await
}
