use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Relational engines a sink can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    MySql,
    Postgres,
}

impl Engine {
    /// Detect the engine from a connection URL scheme.
    pub fn detect(url: &str) -> Result<Self> {
        let scheme = url.split_once("://").map(|(scheme, _)| scheme).unwrap_or("");
        match scheme {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(Error::Unsupported(format!(
                "connection scheme '{scheme}' (expected mysql:// or postgres://)"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
