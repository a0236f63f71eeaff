use std::time::Instant;

use chrono::NaiveDate;
use tracing::{info, warn};

use madang_core::{NewBook, NewCustomer, NewOrder, Prerequisites, Record, Sink, insert_records};

use crate::books::BookSynthesizer;
use crate::customers::CustomerSynthesizer;
use crate::errors::GenerationError;
use crate::model::{BatchSize, EntityKind, GenerateOptions, GenerationReport};
use crate::orders::OrderSynthesizer;
use crate::seed::entity_rng;

/// Whether synthesized rows are handed to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Insert,
    DryRun,
}

/// Records synthesized by a run together with its report.
#[derive(Debug, Clone)]
pub struct SeedOutcome<R> {
    pub records: Vec<R>,
    pub report: GenerationReport,
}

/// Entry point for one seeding run: fetch prerequisites, synthesize, deliver.
///
/// Holds no state between runs beyond its options.
#[derive(Debug, Clone)]
pub struct SeedEngine {
    options: GenerateOptions,
    today: NaiveDate,
}

impl SeedEngine {
    pub fn new(options: GenerateOptions) -> Result<Self, GenerationError> {
        options.validate()?;
        Ok(Self {
            options,
            today: chrono::Local::now().date_naive(),
        })
    }

    /// Pin the last day of the order window.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn synthesize_books(&self, count: BatchSize) -> Vec<NewBook> {
        let mut rng = entity_rng(self.options.seed, EntityKind::Book);
        BookSynthesizer::new().synthesize(count, &mut rng)
    }

    pub fn synthesize_customers(
        &self,
        count: BatchSize,
    ) -> Result<Vec<NewCustomer>, GenerationError> {
        let synthesizer =
            CustomerSynthesizer::new(self.options.locale, self.options.null_probability)?;
        let mut rng = entity_rng(self.options.seed, EntityKind::Customer);
        Ok(synthesizer.synthesize(count, &mut rng))
    }

    pub fn synthesize_orders(
        &self,
        count: BatchSize,
        prereqs: &Prerequisites,
    ) -> Result<Vec<NewOrder>, GenerationError> {
        let synthesizer =
            OrderSynthesizer::with_policy(Box::new(self.options.weight_decay), self.today);
        let mut rng = entity_rng(self.options.seed, EntityKind::Order);
        synthesizer.synthesize(count, prereqs, &mut rng)
    }

    pub async fn seed_books<S: Sink + ?Sized>(
        &self,
        sink: &S,
        count: BatchSize,
        mode: WriteMode,
    ) -> Result<SeedOutcome<NewBook>, GenerationError> {
        let start = Instant::now();
        let mut report = GenerationReport::new(EntityKind::Book, count);
        info!(entity = "book", rows = count.get(), "synthesis started");

        let records = self.synthesize_books(count);
        report.rows_generated = records.len() as u64;
        deliver(sink, &records, mode, &mut report).await?;
        Ok(finish(records, report, start))
    }

    pub async fn seed_customers<S: Sink + ?Sized>(
        &self,
        sink: &S,
        count: BatchSize,
        mode: WriteMode,
    ) -> Result<SeedOutcome<NewCustomer>, GenerationError> {
        let start = Instant::now();
        let mut report = GenerationReport::new(EntityKind::Customer, count);
        info!(
            entity = "customer",
            rows = count.get(),
            locale = %self.options.locale,
            null_probability = self.options.null_probability,
            "synthesis started"
        );

        let records = self.synthesize_customers(count)?;
        report.rows_generated = records.len() as u64;
        report.nulls_injected = records.iter().filter(|c| c.phone.is_none()).count() as u64;
        deliver(sink, &records, mode, &mut report).await?;
        Ok(finish(records, report, start))
    }

    /// Orders read the current books and customers from `sink` first.
    /// A dry run still performs that read.
    pub async fn seed_orders<S: Sink + ?Sized>(
        &self,
        sink: &S,
        count: BatchSize,
        mode: WriteMode,
    ) -> Result<SeedOutcome<NewOrder>, GenerationError> {
        let start = Instant::now();
        let mut report = GenerationReport::new(EntityKind::Order, count);

        let prereqs = sink.load_prerequisites().await?;
        info!(
            event = "prerequisites_loaded",
            engine = sink.engine(),
            books = prereqs.books.len(),
            customers = prereqs.customers.len()
        );

        let records = self.synthesize_orders(count, &prereqs).inspect_err(|err| {
            warn!(entity = "order", error = %err, "order synthesis rejected");
        })?;
        report.rows_generated = records.len() as u64;
        deliver(sink, &records, mode, &mut report).await?;
        Ok(finish(records, report, start))
    }
}

async fn deliver<S, R>(
    sink: &S,
    records: &[R],
    mode: WriteMode,
    report: &mut GenerationReport,
) -> Result<(), GenerationError>
where
    S: Sink + ?Sized,
    R: Record + Sync,
{
    let table = R::MAPPING.table;
    match mode {
        WriteMode::DryRun => {
            report.dry_run = true;
            info!(table, rows = records.len(), "dry run, batch not written");
        }
        WriteMode::Insert if records.is_empty() => {
            info!(table, "empty batch, nothing to insert");
        }
        WriteMode::Insert => {
            let inserted = insert_records(sink, records).await.inspect_err(|err| {
                warn!(table, error = %err, "batch insert failed");
            })?;
            report.rows_inserted = inserted;
            info!(table, rows_inserted = inserted, engine = sink.engine(), "batch inserted");
        }
    }
    Ok(())
}

fn finish<R>(records: Vec<R>, mut report: GenerationReport, start: Instant) -> SeedOutcome<R> {
    report.duration_ms = start.elapsed().as_millis() as u64;
    SeedOutcome { records, report }
}
