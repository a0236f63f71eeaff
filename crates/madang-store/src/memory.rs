use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use madang_core::{
    BOOK_TABLE, BookRef, CUSTOMER_TABLE, CustomerRef, Error, ORDERS_TABLE, Prerequisites, Result,
    Role, Sink, SqlValue, StaffMember, TableMapping,
};

use crate::rows::{check_row_widths, tally_roles};

/// In-process sink for tests and offline runs.
///
/// Assigns identities on insert, keeps books and customers available as
/// prerequisites, and rejects orders that reference unknown rows.
#[derive(Debug, Default)]
pub struct MemorySink {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    books: Vec<BookRef>,
    customers: Vec<CustomerRef>,
    roles: BTreeMap<i64, Role>,
    /// `(name, address)` of customers inserted through this sink.
    profiles: BTreeMap<i64, (Option<String>, Option<String>)>,
    tables: BTreeMap<&'static str, Vec<Vec<SqlValue>>>,
    unavailable: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing population. New rows continue after the largest id.
    pub fn with_prerequisites(prereqs: Prerequisites) -> Self {
        let roles = prereqs
            .customers
            .iter()
            .map(|customer| (customer.id, Role::Customer))
            .collect();
        Self {
            state: Mutex::new(MemoryState {
                books: prereqs.books,
                customers: prereqs.customers,
                roles,
                ..MemoryState::default()
            }),
        }
    }

    /// A sink whose every call fails as if the store were unreachable.
    pub fn unavailable() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                unavailable: true,
                ..MemoryState::default()
            }),
        }
    }

    /// Rows appended to `table` so far, in insertion order.
    pub fn rows(&self, table: &str) -> Vec<Vec<SqlValue>> {
        self.state()
            .ok()
            .and_then(|state| state.tables.get(table).cloned())
            .unwrap_or_default()
    }

    pub fn role_of(&self, id: i64) -> Option<Role> {
        self.state().ok().and_then(|state| state.roles.get(&id).copied())
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| Error::Db("memory sink poisoned".to_string()))
    }

    fn available(&self) -> Result<MutexGuard<'_, MemoryState>> {
        let state = self.state()?;
        if state.unavailable {
            return Err(Error::SinkConnectivity("memory sink is offline".to_string()));
        }
        Ok(state)
    }
}

#[async_trait]
impl Sink for MemorySink {
    fn engine(&self) -> &'static str {
        "memory"
    }

    async fn load_prerequisites(&self) -> Result<Prerequisites> {
        let state = self
            .available()
            .map_err(|err| Error::PrerequisiteUnavailable(format!("loading books: {err}")))?;
        Ok(Prerequisites::new(state.books.clone(), state.customers.clone()))
    }

    async fn insert_batch(&self, mapping: &TableMapping, rows: &[Vec<SqlValue>]) -> Result<u64> {
        let mut state = self.available().map_err(|err| {
            Error::WriteFailed(format!("inserting into {}: {err}", mapping.table))
        })?;
        check_row_widths(mapping, rows)?;
        let table = known_table(mapping)?;

        // Validate the whole batch before appending anything.
        let mut staged_books = Vec::new();
        let mut staged_customers = Vec::new();
        let mut staged_profiles = Vec::new();
        let mut next_book = state.books.iter().map(|book| book.id).max().unwrap_or(0);
        let mut next_customer = state.customers.iter().map(|c| c.id).max().unwrap_or(0);
        for (idx, row) in rows.iter().enumerate() {
            match table {
                "Book" => {
                    next_book += 1;
                    let list_price = int_column(&BOOK_TABLE, row, "price", idx)?;
                    staged_books.push(BookRef {
                        id: next_book,
                        list_price,
                    });
                }
                "Customer" => {
                    next_customer += 1;
                    staged_customers.push(CustomerRef { id: next_customer });
                    staged_profiles.push((
                        next_customer,
                        (
                            text_column(&CUSTOMER_TABLE, row, "name"),
                            text_column(&CUSTOMER_TABLE, row, "address"),
                        ),
                    ));
                }
                _ => {
                    let custid = int_column(&ORDERS_TABLE, row, "custid", idx)?;
                    let bookid = int_column(&ORDERS_TABLE, row, "bookid", idx)?;
                    if !state.customers.iter().any(|c| c.id == custid) {
                        return Err(Error::WriteFailed(format!(
                            "row {idx}: custid {custid} does not exist"
                        )));
                    }
                    if !state.books.iter().any(|b| b.id == bookid) {
                        return Err(Error::WriteFailed(format!(
                            "row {idx}: bookid {bookid} does not exist"
                        )));
                    }
                }
            }
        }

        for customer in &staged_customers {
            state.roles.insert(customer.id, Role::Customer);
        }
        state.profiles.extend(staged_profiles);
        state.books.extend(staged_books);
        state.customers.extend(staged_customers);
        state
            .tables
            .entry(table)
            .or_default()
            .extend(rows.iter().cloned());
        Ok(rows.len() as u64)
    }

    async fn assign_role(&self, role: Role, ids: &[i64]) -> Result<u64> {
        let mut state = self
            .available()
            .map_err(|err| Error::WriteFailed(format!("assigning role {role}: {err}")))?;
        let mut updated = 0;
        for id in ids {
            if let Some(current) = state.roles.get_mut(id) {
                *current = role;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn role_distribution(&self) -> Result<Vec<(Role, u64)>> {
        let state = self.available()?;
        let mut counts: BTreeMap<Role, i64> = BTreeMap::new();
        for role in state.roles.values() {
            *counts.entry(*role).or_insert(0) += 1;
        }
        Ok(tally_roles(
            counts
                .into_iter()
                .map(|(role, count)| (Some(role.as_str().to_string()), count))
                .collect(),
        ))
    }

    async fn staff(&self) -> Result<Vec<StaffMember>> {
        let state = self.available()?;
        Ok(state
            .roles
            .iter()
            .filter(|(_, role)| role.is_staff())
            .map(|(id, role)| {
                let (name, address) = state.profiles.get(id).cloned().unwrap_or_default();
                StaffMember {
                    id: *id,
                    name,
                    address,
                    role: *role,
                }
            })
            .collect())
    }
}

fn text_column(mapping: &TableMapping, row: &[SqlValue], column: &str) -> Option<String> {
    match mapping.column_index(column).and_then(|pos| row.get(pos)) {
        Some(SqlValue::Text(value)) => Some(value.clone()),
        _ => None,
    }
}

fn known_table(mapping: &TableMapping) -> Result<&'static str> {
    [BOOK_TABLE, CUSTOMER_TABLE, ORDERS_TABLE]
        .into_iter()
        .find(|known| known == mapping)
        .map(|known| known.table)
        .ok_or_else(|| Error::Unsupported(format!("memory sink has no table {}", mapping.table)))
}

fn int_column(mapping: &TableMapping, row: &[SqlValue], column: &str, idx: usize) -> Result<i64> {
    mapping
        .column_index(column)
        .and_then(|pos| row.get(pos))
        .and_then(SqlValue::as_i64)
        .ok_or_else(|| Error::WriteFailed(format!("row {idx}: {column} is not an integer")))
}
