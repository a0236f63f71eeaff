mod config;
mod registry;

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use config::{AppConfig, ConfigError};
use madang_core::{
    Engine, Error as CoreError, Record, Role, StaffMember, redact_connection_string,
};
use madang_generate::{
    BatchSize, EntityKind, GenerationError, GenerationReport, SeedEngine, SeedOutcome, WriteMode,
    write_batch_csv,
};
use madang_store::{MemorySink, Sink, connect};
use registry::{RunContext, RunOptions, RunPaths, init_run_logging, start_run, write_report};

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

#[derive(Parser, Debug)]
#[command(
    name = "madang-seed",
    version,
    about = "Fill the Madang bookstore database with synthetic rows"
)]
struct Cli {
    /// TOML config file (defaults to ./madang-seed.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Database connection string; overrides `[sink].url`.
    #[arg(long, global = true, env = "DATABASE_URL", value_name = "CONNECTION_STRING")]
    conn: Option<String>,
    /// Output directory for runs.
    #[arg(long, global = true, default_value = "runs")]
    run_dir: PathBuf,
    /// Seed for reproducible output; overrides `[generate].seed`.
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert N synthetic books.
    Books(CountArgs),
    /// Insert N synthetic customers.
    Customers(CountArgs),
    /// Insert N orders over the books and customers already stored.
    Orders(CountArgs),
    /// Apply the configured role assignments and print the role distribution.
    Roles,
}

#[derive(Args, Debug)]
struct CountArgs {
    /// Number of rows to generate.
    #[arg(short = 'n', long = "number", allow_negative_numbers = true)]
    number: i64,
    /// Synthesize and report without writing to the database.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    /// Also write the synthesized batch to this CSV file.
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Books(args) => run_seed(&cli, EntityKind::Book, args).await,
        Command::Customers(args) => run_seed(&cli, EntityKind::Customer, args).await,
        Command::Orders(args) => run_seed(&cli, EntityKind::Order, args).await,
        Command::Roles => run_roles(&cli).await,
    }
}

async fn run_seed(cli: &Cli, entity: EntityKind, args: &CountArgs) -> Result<(), CliError> {
    let count = BatchSize::new(args.number)?;

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_overrides(cli.conn.clone(), cli.seed);
    let seeder = SeedEngine::new(config.generate.clone())?;
    let engine = Engine::detect(&config.sink.url)?;

    let ctx = RunContext {
        run_id: Uuid::new_v4().to_string(),
        started_at: Utc::now(),
        engine: engine.to_string(),
        run_dir: cli.run_dir.clone(),
        options: RunOptions {
            command: entity.to_string(),
            rows_requested: Some(count.get() as u64),
            dry_run: args.dry_run,
            csv: args.csv.clone(),
            generate: config.generate.clone(),
            roles: None,
        },
        connection: redact_connection_string(&config.sink.url),
    };
    let paths = start_run(&ctx)?;
    init_run_logging(&paths.logs_path)?;
    info!(
        event = "run_started",
        run_id = %ctx.run_id,
        entity = %entity,
        rows = count.get(),
        dry_run = args.dry_run,
        connection = %ctx.connection.redacted
    );

    let mode = if args.dry_run {
        WriteMode::DryRun
    } else {
        WriteMode::Insert
    };

    // Leaf dry runs never touch the store.
    let sink: Box<dyn Sink> = if args.dry_run && entity != EntityKind::Order {
        Box::new(MemorySink::new())
    } else {
        connect(&config.sink).await.inspect_err(|err| {
            error!(event = "sink_unavailable", error = %err);
        })?
    };

    let report = match entity {
        EntityKind::Book => {
            let outcome = seeder.seed_books(sink.as_ref(), count, mode).await?;
            export(outcome, args.csv.as_deref())?
        }
        EntityKind::Customer => {
            let outcome = seeder.seed_customers(sink.as_ref(), count, mode).await?;
            export(outcome, args.csv.as_deref())?
        }
        EntityKind::Order => {
            let outcome = seeder.seed_orders(sink.as_ref(), count, mode).await?;
            export(outcome, args.csv.as_deref())?
        }
    };

    write_report(&paths, &report)?;
    info!(event = "run_finished", run_id = %ctx.run_id, duration_ms = report.duration_ms);
    print_summary(&report, &paths);
    Ok(())
}

fn export<R: Record>(
    outcome: SeedOutcome<R>,
    csv: Option<&Path>,
) -> Result<GenerationReport, GenerationError> {
    if let Some(path) = csv {
        let written = write_batch_csv(path, &outcome.records)?;
        info!(event = "csv_written", path = %path.display(), rows = written);
    }
    Ok(outcome.report)
}

fn print_summary(report: &GenerationReport, paths: &RunPaths) {
    if report.dry_run {
        println!(
            "{}: generated {} of {} rows (dry run, nothing written)",
            report.table, report.rows_generated, report.rows_requested
        );
    } else {
        println!(
            "{}: inserted {} rows ({} requested, {} generated)",
            report.table, report.rows_inserted, report.rows_requested, report.rows_generated
        );
    }
    if report.nulls_injected > 0 {
        println!("  absent optional fields: {}", report.nulls_injected);
    }
    println!("  run: {}", paths.root.display());
}

#[derive(Debug, Serialize)]
struct RoleUpdateReport {
    role: Role,
    ids: Vec<i64>,
    rows_updated: u64,
}

#[derive(Debug, Serialize)]
struct RolesReport {
    updates: Vec<RoleUpdateReport>,
    distribution: Vec<RoleCount>,
    staff: Vec<StaffMember>,
}

#[derive(Debug, Serialize)]
struct RoleCount {
    role: Role,
    count: u64,
}

async fn run_roles(cli: &Cli) -> Result<(), CliError> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_overrides(cli.conn.clone(), cli.seed);
    let engine = Engine::detect(&config.sink.url)?;

    let ctx = RunContext {
        run_id: Uuid::new_v4().to_string(),
        started_at: Utc::now(),
        engine: engine.to_string(),
        run_dir: cli.run_dir.clone(),
        options: RunOptions {
            command: "roles".to_string(),
            rows_requested: None,
            dry_run: false,
            csv: None,
            generate: config.generate.clone(),
            roles: Some(config.roles.clone()),
        },
        connection: redact_connection_string(&config.sink.url),
    };
    let paths = start_run(&ctx)?;
    init_run_logging(&paths.logs_path)?;

    let sink = connect(&config.sink).await.inspect_err(|err| {
        error!(event = "sink_unavailable", error = %err);
    })?;

    let mut updates = Vec::new();
    for update in config.roles.plan() {
        let rows_updated = sink.assign_role(update.role, &update.ids).await?;
        info!(event = "role_assigned", role = %update.role, ids = ?update.ids, rows_updated);
        updates.push(RoleUpdateReport {
            role: update.role,
            ids: update.ids,
            rows_updated,
        });
    }

    let distribution: Vec<RoleCount> = sink
        .role_distribution()
        .await?
        .into_iter()
        .map(|(role, count)| RoleCount { role, count })
        .collect();

    let staff = sink.staff().await?;

    println!("role distribution:");
    for entry in &distribution {
        println!("  {:<10} {}", entry.role.as_str(), entry.count);
    }
    println!("staff:");
    for member in &staff {
        println!(
            "  {:>5}  {:<20} {:<30} {}",
            member.id,
            member.name.as_deref().unwrap_or("-"),
            member.address.as_deref().unwrap_or("-"),
            member.role.as_str()
        );
    }
    println!("  run: {}", paths.root.display());

    write_report(
        &paths,
        &RolesReport {
            updates,
            distribution,
            staff,
        },
    )?;
    Ok(())
}
