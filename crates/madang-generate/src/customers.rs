use rand::Rng;

use madang_core::NewCustomer;

use crate::errors::GenerationError;
use crate::faker_rs::{LocaleKey, PersonFaker};
use crate::model::BatchSize;

/// Builds customer records with an optional phone.
#[derive(Debug, Clone)]
pub struct CustomerSynthesizer {
    person: PersonFaker,
    null_probability: f64,
}

impl CustomerSynthesizer {
    pub fn new(locale: LocaleKey, null_probability: f64) -> Result<Self, GenerationError> {
        if !(0.0..=1.0).contains(&null_probability) {
            return Err(GenerationError::InvalidOptions(format!(
                "null_probability must be within [0, 1], got {null_probability}"
            )));
        }
        Ok(Self {
            person: PersonFaker::new(locale),
            null_probability,
        })
    }

    pub fn synthesize<R: Rng + ?Sized>(&self, count: BatchSize, rng: &mut R) -> Vec<NewCustomer> {
        (0..count.get()).map(|_| self.customer(rng)).collect()
    }

    fn customer<R: Rng + ?Sized>(&self, rng: &mut R) -> NewCustomer {
        let name = self.person.name(rng);
        let address = self.person.address(rng);
        let phone = if rng.random_bool(self.null_probability) {
            None
        } else {
            Some(self.person.phone(rng))
        };
        NewCustomer {
            name,
            address,
            phone,
        }
    }
}
