//! Sink adapters for the Madang bookstore database.

pub mod connect;
pub mod memory;
pub mod options;
mod rows;
pub mod sql;

pub use connect::connect;
pub use memory::MemorySink;
pub use options::SinkConfig;
pub use sql::{Dialect, MySqlSink, PostgresSink, SqlxSink};

pub use madang_core::Sink;
