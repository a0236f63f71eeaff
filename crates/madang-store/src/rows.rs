use std::collections::BTreeMap;

use tracing::warn;

use madang_core::{Error, Result, Role, SqlValue, TableMapping};

/// Rows per `INSERT` statement; keeps bind counts well under driver limits.
pub(crate) const ROWS_PER_STATEMENT: usize = 500;

pub(crate) fn check_row_widths(mapping: &TableMapping, rows: &[Vec<SqlValue>]) -> Result<()> {
    let width = mapping.columns.len();
    if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
        return Err(Error::WriteFailed(format!(
            "row {idx} for {} has {} values, expected {width}",
            mapping.table,
            row.len()
        )));
    }
    Ok(())
}

/// Fold `(role, count)` rows into one count per known role, in report order.
///
/// A `NULL` role counts as `customer`.
pub(crate) fn tally_roles(rows: Vec<(Option<String>, i64)>) -> Vec<(Role, u64)> {
    let mut counts: BTreeMap<Role, u64> = BTreeMap::new();
    for (role, count) in rows {
        let role = match role.as_deref().map(str::parse::<Role>) {
            None => Role::Customer,
            Some(Ok(role)) => role,
            Some(Err(err)) => {
                warn!(error = %err, count, "skipping unknown role");
                continue;
            }
        };
        *counts.entry(role).or_insert(0) += count.unsigned_abs();
    }
    Role::REPORT_ORDER
        .iter()
        .map(|role| (*role, counts.get(role).copied().unwrap_or(0)))
        .collect()
}

pub(crate) fn write_failed(
    mapping: &TableMapping,
    step: &str,
    err: impl std::fmt::Display,
) -> Error {
    Error::WriteFailed(format!("{step} {}: {err}", mapping.table))
}
