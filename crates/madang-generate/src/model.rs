use std::fmt;

use serde::{Deserialize, Serialize};

use madang_core::{BOOK_TABLE, CUSTOMER_TABLE, ORDERS_TABLE, TableMapping};

use crate::errors::GenerationError;
use crate::faker_rs::LocaleKey;
use crate::popularity::WeightDecay;

/// Number of records to synthesize in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BatchSize(usize);

impl BatchSize {
    /// Validate a requested count. Negative values are rejected before any work.
    pub fn new(requested: i64) -> Result<Self, GenerationError> {
        usize::try_from(requested)
            .map(Self)
            .map_err(|_| GenerationError::InvalidCount(requested))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<usize> for BatchSize {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// Options for the generation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Probability that an optional field (customer phone) is left absent.
    pub null_probability: f64,
    /// Popularity weighting applied to order prerequisites.
    pub weight_decay: WeightDecay,
    /// Locale for synthesized names, addresses and phone numbers.
    pub locale: LocaleKey,
    /// Fixed seed for reproducible runs; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            null_probability: 0.1,
            weight_decay: WeightDecay::Linear,
            locale: LocaleKey::EnUs,
            seed: None,
        }
    }
}

impl GenerateOptions {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if !(0.0..=1.0).contains(&self.null_probability) {
            return Err(GenerationError::InvalidOptions(format!(
                "null_probability must be within [0, 1], got {}",
                self.null_probability
            )));
        }
        Ok(())
    }
}

/// Entity produced by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Book,
    Customer,
    Order,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Customer => "customer",
            Self::Order => "order",
        }
    }

    pub fn mapping(self) -> TableMapping {
        match self {
            Self::Book => BOOK_TABLE,
            Self::Customer => CUSTOMER_TABLE,
            Self::Order => ORDERS_TABLE,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub entity: EntityKind,
    pub table: String,
    pub rows_requested: u64,
    pub rows_generated: u64,
    pub rows_inserted: u64,
    /// Optional fields written as `NULL`.
    pub nulls_injected: u64,
    pub dry_run: bool,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(entity: EntityKind, requested: BatchSize) -> Self {
        Self {
            entity,
            table: entity.mapping().table.to_string(),
            rows_requested: requested.get() as u64,
            rows_generated: 0,
            rows_inserted: 0,
            nulls_injected: 0,
            dry_run: false,
            duration_ms: 0,
        }
    }
}
