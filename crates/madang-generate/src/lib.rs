//! Synthetic data generation for the Madang bookstore schema.
//!
//! Books and customers are synthesized from vocabularies and a locale-aware
//! person faker. Orders are drawn from the books and customers already in the
//! store, biased toward earlier rows by a [`PopularityPolicy`].

pub mod books;
pub mod customers;
pub mod engine;
pub mod errors;
pub mod faker_rs;
pub mod model;
pub mod orders;
pub mod output;
pub mod popularity;
pub mod seed;
pub mod vocab;

pub use books::BookSynthesizer;
pub use customers::CustomerSynthesizer;
pub use engine::{SeedEngine, SeedOutcome, WriteMode};
pub use errors::GenerationError;
pub use faker_rs::{LocaleKey, PersonFaker};
pub use model::{BatchSize, EntityKind, GenerateOptions, GenerationReport};
pub use orders::OrderSynthesizer;
pub use output::csv::write_batch_csv;
pub use popularity::{PopularityPolicy, WeightDecay, WeightedSampler};
