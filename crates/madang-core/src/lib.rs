//! Core contracts shared by the Madang seeding crates.
//!
//! This crate defines the bookstore entities, the row model handed to a sink,
//! the [`Sink`] boundary itself, role administration types, and connection
//! helpers used by the adapters and the CLI.

pub mod engine;
pub mod error;
pub mod model;
pub mod redaction;
pub mod roles;
pub mod row;
pub mod sink;

pub use engine::Engine;
pub use error::{Error, Result};
pub use model::{BookRef, CustomerRef, NewBook, NewCustomer, NewOrder, Prerequisites};
pub use redaction::{RedactedConnection, redact_connection_string};
pub use roles::{Role, RoleAssignments, RoleUpdate, StaffMember};
pub use row::{BOOK_TABLE, CUSTOMER_TABLE, ORDERS_TABLE, Record, SqlValue, TableMapping};
pub use sink::{Sink, insert_records};

/// Smallest sale price an order may carry.
pub const MIN_SALE_PRICE: i64 = 1000;
