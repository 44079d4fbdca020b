//! Project a financial model forward and print the results
//!
//! Loads a model snapshot (or the built-in sample), runs the projection and
//! prints dashboard metrics, balance changes, alerts and the monthly table.

use std::fs::{self, File};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};

use cashflow_projection::analysis::{alerts, horizon_label, BalanceSummary, DashboardMetrics};
use cashflow_projection::model::{load_model, FinancialModel, YearMonth};
use cashflow_projection::projection::{ProjectionConfig, ProjectionEngine, ScheduleMode, HORIZON_PRESETS};

#[derive(Debug, Parser)]
#[command(name = "project", version, about = "Monthly cash flow projection")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a projection
    Run {
        /// Model snapshot (JSON). Uses the built-in sample if omitted.
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Projection config (JSON); flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Months to project (presets: 12, 24, 60)
        #[arg(short = 'n', long)]
        months: Option<i32>,

        /// First month, YYYY-MM (default: current month)
        #[arg(short, long)]
        start: Option<YearMonth>,

        /// When raises and transfer increases take effect
        #[arg(long, value_enum)]
        schedule: Option<ScheduleArg>,

        /// Also write the monthly table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Also write the records as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Write the model to a date-stamped snapshot file
    Export {
        /// Model snapshot to re-export. Uses the built-in sample if omitted.
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScheduleArg {
    Exact,
    Sticky,
}

impl From<ScheduleArg> for ScheduleMode {
    fn from(arg: ScheduleArg) -> Self {
        match arg {
            ScheduleArg::Exact => ScheduleMode::ExactMonth,
            ScheduleArg::Sticky => ScheduleMode::StickyFromMonth,
        }
    }
}

fn load_or_sample(path: Option<&PathBuf>) -> Result<FinancialModel> {
    match path {
        Some(path) => load_model(path).with_context(|| format!("Error importing model from {}", path.display())),
        None => Ok(FinancialModel::sample()),
    }
}

fn money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", -value)
    } else {
        format!("${value:.2}")
    }
}

fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{}", money(value))
    } else {
        money(value)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run { model, config, months, start, schedule, csv, json } => {
            let model = load_or_sample(model.as_ref())?;

            let mut config = match config {
                Some(path) => {
                    let text = fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read config {}", path.display()))?;
                    serde_json::from_str::<ProjectionConfig>(&text)
                        .with_context(|| format!("Invalid config {}", path.display()))?
                }
                None => ProjectionConfig::default(),
            };
            if let Some(months) = months {
                config.horizon_months = months;
            }
            if start.is_some() {
                config.start_month = start;
            }
            if let Some(schedule) = schedule {
                config.schedule_mode = schedule.into();
            }

            run(&model, config, csv, json)
        }
        Command::Export { model, dir } => {
            let model = load_or_sample(model.as_ref())?;
            let path = model
                .export_to_dir(&dir, Local::now().date_naive())
                .with_context(|| format!("Failed to export model to {}", dir.display()))?;
            println!("Model written to {}", path.display());
            Ok(())
        }
    }
}

fn run(model: &FinancialModel, config: ProjectionConfig, csv: Option<PathBuf>, json: Option<PathBuf>) -> Result<()> {
    if !HORIZON_PRESETS.contains(&config.horizon_months) {
        log::warn!(
            "Horizon of {} months is not one of the presets {:?}",
            config.horizon_months,
            HORIZON_PRESETS
        );
    }
    let label = horizon_label(config.horizon_months);
    let engine = ProjectionEngine::new(config);

    let start = Instant::now();
    let result = engine.project(model);
    let records = &result.records;

    // Metrics
    let metrics = DashboardMetrics::from_projection(records);
    println!("Monthly Income:   {}", money(metrics.income));
    println!("Monthly Expenses: {}", money(metrics.expenses));
    println!("Net Cash Flow:    {}", money(metrics.net_flow));
    println!("Savings Rate:     {:.1}%", metrics.savings_rate);

    // Balances
    if let Some(summary) = BalanceSummary::from_projection(model, records) {
        println!("\nAccount Balances (in {label}):");
        for account in &summary.accounts {
            println!(
                "  {:<20} {:<10} now {:>14}  projected {:>14}  ({})",
                account.name,
                account.account_type.as_str(),
                money(account.current),
                money(account.projected),
                signed(account.change)
            );
        }
        println!(
            "  {:<31} now {:>14}  projected {:>14}  ({})",
            "Total Assets",
            money(summary.total_current),
            money(summary.total_projected),
            signed(summary.total_change)
        );
    }

    // Alerts
    println!("\nAlerts:");
    for alert in alerts(model, records) {
        println!("  [{:?}] {}: {}", alert.severity(), alert.title(), alert);
    }

    // Monthly table
    println!("\n{label} Monthly Projections:");
    print!("{:<10} {:>12} {:>12} {:>12}", "Month", "Income", "Expenses", "Net Flow");
    for account in &model.accounts {
        print!(" {:>14}", account.name);
    }
    println!();
    for record in records {
        print!(
            "{:<10} {:>12.2} {:>12.2} {:>12.2}",
            record.month_label, record.income, record.expenses, record.net_flow
        );
        for account in &model.accounts {
            print!(" {:>14.2}", record.balance(&account.id));
        }
        println!();
    }

    if let Some(path) = csv {
        let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        result.write_csv(model, file)?;
        println!("\nCSV written to {}", path.display());
    }
    if let Some(path) = json {
        let text = serde_json::to_string_pretty(records)?;
        fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("JSON written to {}", path.display());
    }

    log::info!("Projected {} months in {:?}", records.len(), start.elapsed());
    Ok(())
}
