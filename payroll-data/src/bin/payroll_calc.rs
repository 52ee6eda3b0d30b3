use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use payroll_core::{CompensationCalculator, PayrollService};
use payroll_data::{
    AppConfig, MemoryStore, OutputFormat, kpi_loader, sheet_loader, write_kpi_results,
    write_payslips,
};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Monthly payroll calculator.
///
/// Reads salary sheets (and optionally KPI score sheets) from CSV, computes
/// payslips or KPI verdicts, and prints them to stdout.
#[derive(Debug, Parser)]
#[command(name = "payroll-calc", version, about, long_about = None)]
struct Cli {
    /// TOML settings file with statutory rates and output defaults.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Output format. Overrides the config file.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Print full-precision values instead of rounding money to whole units.
    #[arg(long, default_value_t = false)]
    exact: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the payslip for every row of a salary sheet.
    Payslip {
        /// Salary sheet CSV.
        #[arg(short, long)]
        sheets: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Evaluate monthly KPI scores against the salary sheets.
    Kpi {
        /// Salary sheet CSV, for basic salary and the recorded KPI bonus.
        #[arg(short, long)]
        sheets: PathBuf,

        /// KPI score sheet CSV.
        #[arg(long)]
        scores: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Otherwise uses `log_filter` from the config, then `info`.
/// * Writes to stderr so stdout carries only the report.
fn init_tracing(fallback: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback.unwrap_or("info")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

async fn load_store(sheets: &Path) -> Result<MemoryStore> {
    let rows = sheet_loader::load_from_file(sheets)
        .with_context(|| format!("Failed to load salary sheets: {}", sheets.display()))?;
    info!("parsed {} salary sheets from {}", rows.len(), sheets.display());

    let store = MemoryStore::new();
    store
        .insert_sheets(rows)
        .await
        .context("Failed to store salary sheets")?;
    Ok(store)
}

// ─── subcommands ─────────────────────────────────────────────────────────────

async fn run_payslips(
    service: &PayrollService<MemoryStore>,
    format: OutputFormat,
    rounded: bool,
) -> Result<()> {
    let mut records = Vec::new();
    let mut failed = 0usize;

    for period in service.store().periods().await {
        for sheet in service.store().sheets_for(period).await {
            match service.run_payslip(&sheet.employee_code, period).await {
                Ok(record) => records.push(record),
                Err(err) => {
                    error!(employee = %sheet.employee_code, %period, "payslip failed: {err}");
                    failed += 1;
                }
            }
        }
    }

    write_payslips(std::io::stdout().lock(), &records, format, rounded)
        .context("Failed to write payslips")?;

    if failed > 0 {
        bail!("{failed} of {} payslips could not be computed", records.len() + failed);
    }
    Ok(())
}

async fn run_kpi(
    service: &PayrollService<MemoryStore>,
    scores: &Path,
    format: OutputFormat,
    rounded: bool,
) -> Result<()> {
    let submissions = kpi_loader::load_from_file(scores)
        .with_context(|| format!("Failed to load KPI scores: {}", scores.display()))?;
    info!("parsed {} KPI score rows from {}", submissions.len(), scores.display());

    let mut records = Vec::new();
    let mut failed = 0usize;

    for submission in submissions {
        let code = submission.employee_code;
        let period = submission.period;
        match service.evaluate_kpi(&code, period, submission.scores).await {
            Ok(record) => records.push(record),
            Err(err) => {
                error!(employee = %code, %period, "KPI evaluation failed: {err}");
                failed += 1;
            }
        }
    }

    let gaps = records.iter().filter(|r| r.result.has_kpi_gap).count();
    if gaps > 0 {
        info!("{gaps} employees have a KPI bonus gap");
    }

    write_kpi_results(std::io::stdout().lock(), &records, format, rounded)
        .context("Failed to write KPI results")?;

    if failed > 0 {
        bail!("{failed} of {} KPI rows could not be evaluated", records.len() + failed);
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(config.log_filter.as_deref());

    let calculator =
        CompensationCalculator::new(config.rates).context("Invalid statutory rates in config")?;
    debug!(rates = ?calculator.rates(), "using statutory rates");

    match cli.command {
        Command::Payslip { sheets, output } => {
            let store = load_store(&sheets).await?;
            let service = PayrollService::with_calculator(store, calculator);
            run_payslips(
                &service,
                output.format.unwrap_or(config.format),
                !output.exact,
            )
            .await
        }
        Command::Kpi {
            sheets,
            scores,
            output,
        } => {
            let store = load_store(&sheets).await?;
            let service = PayrollService::with_calculator(store, calculator);
            run_kpi(
                &service,
                &scores,
                output.format.unwrap_or(config.format),
                !output.exact,
            )
            .await
        }
    }
}
