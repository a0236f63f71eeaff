use chrono::{Days, Months, NaiveDate};
use rand::Rng;
use tracing::warn;

use madang_core::{BookRef, MIN_SALE_PRICE, NewOrder, Prerequisites};

use crate::errors::GenerationError;
use crate::model::BatchSize;
use crate::popularity::{PopularityPolicy, WeightDecay, WeightedSampler};
use crate::vocab::pick;

/// Discounts subtracted from the list price, chosen uniformly.
pub const DISCOUNT_STEPS: [i64; 4] = [0, 1000, 2000, 3000];

/// Order dates fall within this many months before `today`, inclusive.
pub const ORDER_WINDOW_MONTHS: u32 = 24;

/// Builds orders that reference books and customers already in the store.
pub struct OrderSynthesizer {
    policy: Box<dyn PopularityPolicy>,
    today: NaiveDate,
}

impl OrderSynthesizer {
    pub fn new(today: NaiveDate) -> Self {
        Self::with_policy(Box::new(WeightDecay::Linear), today)
    }

    pub fn with_policy(policy: Box<dyn PopularityPolicy>, today: NaiveDate) -> Self {
        Self { policy, today }
    }

    /// Draw `count` orders from `prereqs`.
    ///
    /// Books and customers are sampled as two independent weighted streams.
    /// Fails before touching `rng` when either candidate set is empty.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        count: BatchSize,
        prereqs: &Prerequisites,
        rng: &mut R,
    ) -> Result<Vec<NewOrder>, GenerationError> {
        let books = eligible_books(&prereqs.books);
        if books.is_empty() {
            return Err(GenerationError::prerequisite_unavailable(format!(
                "no books priced at or above {MIN_SALE_PRICE} to order"
            )));
        }
        if prereqs.customers.is_empty() {
            return Err(GenerationError::prerequisite_unavailable("no customers to place orders"));
        }
        let (window_start, span_days) = order_window(self.today)?;
        if count.is_empty() {
            return Ok(Vec::new());
        }

        let book_sampler = WeightedSampler::new(&books, self.policy.as_ref())?;
        let customer_sampler = WeightedSampler::new(&prereqs.customers, self.policy.as_ref())?;
        let picked_books = book_sampler.sample(count.get(), rng);
        let picked_customers = customer_sampler.sample(count.get(), rng);

        picked_books
            .into_iter()
            .zip(picked_customers)
            .map(|(book, customer)| {
                let discount = *pick(&DISCOUNT_STEPS, rng);
                let offset = rng.random_range(0..=span_days);
                let order_date = window_start
                    .checked_add_days(Days::new(offset))
                    .ok_or_else(|| {
                        GenerationError::InvalidOptions(format!(
                            "order date out of range: {window_start} + {offset} days"
                        ))
                    })?;
                Ok(NewOrder {
                    customer_id: customer.id,
                    book_id: book.id,
                    sale_price: sale_price(book.list_price, discount),
                    order_date,
                })
            })
            .collect()
    }
}

/// `list_price - discount`, floored at [`MIN_SALE_PRICE`].
pub fn sale_price(list_price: i64, discount: i64) -> i64 {
    (list_price - discount).max(MIN_SALE_PRICE)
}

/// First day of the order window ending at `today`, and its length in days.
pub fn order_window(today: NaiveDate) -> Result<(NaiveDate, u64), GenerationError> {
    let start = today
        .checked_sub_months(Months::new(ORDER_WINDOW_MONTHS))
        .ok_or_else(|| {
            GenerationError::InvalidOptions(format!("order window underflows before {today}"))
        })?;
    let span = (today - start).num_days();
    Ok((start, span.unsigned_abs()))
}

fn eligible_books(books: &[BookRef]) -> Vec<BookRef> {
    let eligible: Vec<BookRef> = books
        .iter()
        .copied()
        .filter(|book| book.list_price >= MIN_SALE_PRICE)
        .collect();
    let skipped = books.len() - eligible.len();
    if skipped > 0 {
        warn!(
            skipped,
            min_price = MIN_SALE_PRICE,
            "books below minimum sale price excluded from ordering"
        );
    }
    eligible
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use madang_core::{CustomerRef, Error};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap_or_default()
    }

    #[test]
    fn sale_price_never_drops_below_floor() {
        assert_eq!(sale_price(7000, 3000), 4000);
        assert_eq!(sale_price(2500, 3000), MIN_SALE_PRICE);
        assert_eq!(sale_price(1000, 0), 1000);
    }

    #[test]
    fn window_spans_two_calendar_years() {
        let (start, span) = order_window(today()).expect("window");
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 10, 18).unwrap_or_default());
        assert_eq!(span, 730);
    }

    #[test]
    fn cheap_books_are_not_candidates() {
        let prereqs = Prerequisites::new(
            vec![BookRef {
                id: 1,
                list_price: 500,
            }],
            vec![CustomerRef { id: 1 }],
        );
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result =
            OrderSynthesizer::new(today()).synthesize(BatchSize::from(3), &prereqs, &mut rng);
        assert!(matches!(
            result,
            Err(GenerationError::Core(Error::PrerequisiteUnavailable(_)))
        ));
    }

    #[test]
    fn zero_count_leaves_rng_untouched() {
        let prereqs = Prerequisites::new(
            vec![BookRef {
                id: 1,
                list_price: 7000,
            }],
            vec![CustomerRef { id: 1 }],
        );
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let orders = OrderSynthesizer::new(today())
            .synthesize(BatchSize::from(0), &prereqs, &mut rng)
            .expect("orders");
        assert!(orders.is_empty());
        let mut fresh = ChaCha8Rng::seed_from_u64(77);
        assert_eq!(rng.random::<u64>(), fresh.random::<u64>());
    }

    #[test]
    fn empty_customers_fail_before_sampling() {
        let prereqs = Prerequisites::new(
            vec![BookRef {
                id: 1,
                list_price: 7000,
            }],
            Vec::new(),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let result =
            OrderSynthesizer::new(today()).synthesize(BatchSize::from(4), &prereqs, &mut rng);
        assert!(matches!(
            result,
            Err(GenerationError::Core(Error::PrerequisiteUnavailable(_)))
        ));
        let mut fresh = ChaCha8Rng::seed_from_u64(31);
        assert_eq!(rng.random::<u64>(), fresh.random::<u64>());
    }
}
