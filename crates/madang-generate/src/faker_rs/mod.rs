//! Locale-aware person fields backed by the `fake` crate.

pub mod locales;
pub mod person;

pub use locales::LocaleKey;
pub use person::PersonFaker;
