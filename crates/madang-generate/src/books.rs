use rand::Rng;

use madang_core::NewBook;

use crate::model::BatchSize;
use crate::vocab::{PUBLISHERS, TITLE_TEMPLATES, TOPIC_KEYWORDS, TitleTemplate, pick};

pub const MIN_LIST_PRICE: i64 = 5000;
pub const MAX_LIST_PRICE: i64 = 50000;
pub const PRICE_STEP: i64 = 1000;

/// Builds standalone book records from keyword, template and publisher vocabularies.
#[derive(Debug, Clone)]
pub struct BookSynthesizer {
    keywords: &'static [&'static str],
    templates: &'static [TitleTemplate],
    publishers: &'static [&'static str],
}

impl Default for BookSynthesizer {
    fn default() -> Self {
        Self {
            keywords: TOPIC_KEYWORDS,
            templates: TITLE_TEMPLATES,
            publishers: PUBLISHERS,
        }
    }
}

impl BookSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn synthesize<R: Rng + ?Sized>(&self, count: BatchSize, rng: &mut R) -> Vec<NewBook> {
        (0..count.get()).map(|_| self.book(rng)).collect()
    }

    fn book<R: Rng + ?Sized>(&self, rng: &mut R) -> NewBook {
        let keyword = pick(self.keywords, rng);
        let template = pick(self.templates, rng);
        let publisher = pick(self.publishers, rng);
        NewBook {
            title: template.render(keyword),
            publisher: (*publisher).to_string(),
            price: list_price(rng),
        }
    }
}

/// Uniform over the multiples of `PRICE_STEP` in `[MIN_LIST_PRICE, MAX_LIST_PRICE]`.
pub fn list_price<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    let steps = (MAX_LIST_PRICE - MIN_LIST_PRICE) / PRICE_STEP;
    MIN_LIST_PRICE + rng.random_range(0..=steps) * PRICE_STEP
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn synthesizes_exact_count() {
        let synthesizer = BookSynthesizer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(synthesizer.synthesize(BatchSize::from(0), &mut rng).is_empty());
        assert_eq!(synthesizer.synthesize(BatchSize::from(17), &mut rng).len(), 17);
    }

    #[test]
    fn prices_are_whole_thousands_within_range() {
        let synthesizer = BookSynthesizer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let books = synthesizer.synthesize(BatchSize::from(2000), &mut rng);
        let mut seen = BTreeSet::new();
        for book in &books {
            assert_eq!(book.price % PRICE_STEP, 0);
            assert!((MIN_LIST_PRICE..=MAX_LIST_PRICE).contains(&book.price));
            seen.insert(book.price);
        }
        // 46 representable prices; 2000 draws should hit both ends.
        assert!(seen.contains(&MIN_LIST_PRICE));
        assert!(seen.contains(&MAX_LIST_PRICE));
        assert_eq!(seen.len(), 46);
    }

    #[test]
    fn titles_and_publishers_come_from_vocabulary() {
        let synthesizer = BookSynthesizer::new();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for book in synthesizer.synthesize(BatchSize::from(200), &mut rng) {
            assert!(PUBLISHERS.contains(&book.publisher.as_str()));
            assert!(
                TOPIC_KEYWORDS
                    .iter()
                    .any(|keyword| TITLE_TEMPLATES
                        .iter()
                        .any(|template| template.render(keyword) == book.title))
            );
        }
    }
}
