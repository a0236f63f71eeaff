use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Assigns a sampling weight to each candidate by its position.
///
/// Position 0 is the first row the store returned. Implementations should be
/// non-increasing so earlier rows are at least as popular as later ones.
pub trait PopularityPolicy: Send + Sync {
    fn id(&self) -> &'static str;

    /// One weight per candidate. Every weight must be positive.
    fn weights(&self, len: usize) -> Vec<u64>;
}

/// Built-in weight decay shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightDecay {
    /// First of `len` candidates weighs `len`, the last weighs 1.
    #[default]
    Linear,
}

impl PopularityPolicy for WeightDecay {
    fn id(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
        }
    }

    fn weights(&self, len: usize) -> Vec<u64> {
        match self {
            Self::Linear => (1..=len as u64).rev().collect(),
        }
    }
}

/// Draws candidates with replacement, proportionally to policy weights.
#[derive(Debug, Clone)]
pub struct WeightedSampler<'a, T> {
    items: &'a [T],
    index: WeightedIndex<u64>,
}

impl<'a, T> WeightedSampler<'a, T> {
    pub fn new(items: &'a [T], policy: &dyn PopularityPolicy) -> Result<Self, GenerationError> {
        let weights = policy.weights(items.len());
        if weights.len() != items.len() {
            return Err(GenerationError::Sampling(format!(
                "policy '{}' returned {} weights for {} candidates",
                policy.id(),
                weights.len(),
                items.len()
            )));
        }
        let index = WeightedIndex::new(&weights).map_err(|err| {
            GenerationError::Sampling(format!("policy '{}': {err}", policy.id()))
        })?;
        Ok(Self { items, index })
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a T {
        &self.items[self.index.sample(rng)]
    }

    /// `count` independent draws.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<&'a T> {
        (0..count).map(|_| self.draw(rng)).collect()
    }
}
