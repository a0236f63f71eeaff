use chrono::NaiveDate;

use crate::model::{NewBook, NewCustomer, NewOrder};

/// Value bound into a single column of an insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Text(String),
    Date(NaiveDate),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Render for CSV export. `Null` becomes an empty field.
    pub fn to_csv(&self) -> String {
        match self {
            SqlValue::Null => String::new(),
            SqlValue::Int(value) => value.to_string(),
            SqlValue::Text(value) => value.clone(),
            SqlValue::Date(value) => value.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        value.map(SqlValue::Text).unwrap_or(SqlValue::Null)
    }
}

/// Target table and the ordered columns a batch writes.
///
/// Identity columns are never listed; the store assigns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableMapping {
    pub table: &'static str,
    pub columns: &'static [&'static str],
}

impl TableMapping {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| *column == name)
    }

    /// `INSERT INTO <table> (<columns>) ` ready for a `VALUES` list.
    pub fn insert_prefix(&self) -> String {
        format!("INSERT INTO {} ({}) ", self.table, self.columns.join(", "))
    }
}

pub const BOOK_TABLE: TableMapping = TableMapping {
    table: "Book",
    columns: &["bookname", "publisher", "price"],
};

pub const CUSTOMER_TABLE: TableMapping = TableMapping {
    table: "Customer",
    columns: &["name", "address", "phone"],
};

pub const ORDERS_TABLE: TableMapping = TableMapping {
    table: "Orders",
    columns: &["custid", "bookid", "saleprice", "orderdate"],
};

/// An entity that can be flattened into one row of its table.
pub trait Record {
    const MAPPING: TableMapping;

    /// Values in `MAPPING.columns` order.
    fn values(&self) -> Vec<SqlValue>;
}

impl Record for NewBook {
    const MAPPING: TableMapping = BOOK_TABLE;

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(self.title.clone()),
            SqlValue::Text(self.publisher.clone()),
            SqlValue::Int(self.price),
        ]
    }
}

impl Record for NewCustomer {
    const MAPPING: TableMapping = CUSTOMER_TABLE;

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(self.name.clone()),
            SqlValue::Text(self.address.clone()),
            SqlValue::from(self.phone.clone()),
        ]
    }
}

impl Record for NewOrder {
    const MAPPING: TableMapping = ORDERS_TABLE;

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Int(self.customer_id),
            SqlValue::Int(self.book_id),
            SqlValue::Int(self.sale_price),
            SqlValue::Date(self.order_date),
        ]
    }
}
