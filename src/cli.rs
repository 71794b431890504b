//! `finance_os [--db PATH] [--json] [YYYY-MM-DD]`: prints the dashboard and
//! the default forecast for the reference date.

use std::{fmt::Write as _, path::PathBuf};

use chrono::NaiveDate;
use colored::Colorize;
use serde::Serialize;

use fos_config::ConfigManager;
use fos_core::{CashFlowForecast, DashboardSnapshot, FixedClock, SpendingStatus};
use fos_domain::calendar;

use crate::{
    errors::{FinanceError, Result},
    utils, FinanceOs,
};

const USAGE: &str = "usage: finance_os [--db PATH] [--json] [YYYY-MM-DD]";

/// Parsed command-line arguments.
#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    pub db: Option<PathBuf>,
    pub reference: Option<NaiveDate>,
    pub json: bool,
    pub help: bool,
}

/// Machine-readable form of the report.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub dashboard: &'a DashboardSnapshot,
    pub forecast: &'a CashFlowForecast,
}

impl CliArgs {
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => parsed.help = true,
                "--json" => parsed.json = true,
                "--db" => {
                    let path = args
                        .next()
                        .ok_or_else(|| FinanceError::Usage(format!("--db needs a path; {USAGE}")))?;
                    parsed.db = Some(PathBuf::from(path));
                }
                flag if flag.starts_with('-') => {
                    return Err(FinanceError::Usage(format!("unknown option `{flag}`; {USAGE}")));
                }
                raw if parsed.reference.is_none() => {
                    parsed.reference = Some(calendar::parse_date(raw)?);
                }
                extra => {
                    return Err(FinanceError::Usage(format!(
                        "unexpected argument `{extra}`; {USAGE}"
                    )));
                }
            }
        }
        Ok(parsed)
    }
}

/// Entry point of the binary.
pub fn run_cli() -> Result<()> {
    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let manager = ConfigManager::with_base_dir(utils::app_data_dir())?;
    let config = manager.load()?;
    crate::init(&config.log_filter);

    let db_path = args.db.unwrap_or_else(|| manager.database_path(&config));
    let mut app = FinanceOs::open(&db_path)?.with_defaults((&config).into());
    if let Some(reference) = args.reference {
        app = app.with_clock(FixedClock::new(reference));
    }

    let snapshot = app.dashboard(None)?;
    let forecast = app.default_forecast()?;
    if args.json {
        let report = Report {
            dashboard: &snapshot,
            forecast: &forecast,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&snapshot, &forecast));
    }
    Ok(())
}

/// Plain-text report; status labels are colored when the terminal allows it.
pub fn render_report(snapshot: &DashboardSnapshot, forecast: &CashFlowForecast) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", "Week".bold(), snapshot.week);
    match &snapshot.operational {
        Some(account) => {
            let _ = writeln!(out, "Operational account: {} ({})", account.name, account.id);
        }
        None => {
            let _ = writeln!(out, "Operational account: none");
        }
    }
    if let Some(spending) = &snapshot.spending {
        let _ = writeln!(
            out,
            "Spent this week: {:.2} of {:.2} ({:.1}%) {}",
            spending.spent,
            spending.cap,
            spending.utilization,
            paint_status(spending.status)
        );
    }
    let _ = writeln!(out, "Total cash: {:.2}", snapshot.total_cash);
    let _ = writeln!(
        out,
        "Week reconciled: {}",
        if snapshot.week_reconciled { "yes" } else { "no" }
    );
    let _ = writeln!(out, "{} ({} days)", "Forecast".bold(), forecast.days);
    let _ = writeln!(out, "  Current cash:        {:>12.2}", forecast.current_cash);
    let _ = writeln!(out, "  Fixed obligations:   {:>12.2}", forecast.planned_fixed_expenses);
    let _ = writeln!(out, "  Variable spending:   {:>12.2}", forecast.projected_variable_expenses);
    let _ = writeln!(out, "  Forecasted cash:     {:>12.2}", forecast.forecasted_cash);
    out
}

fn paint_status(status: SpendingStatus) -> String {
    let label = status.to_string();
    match status {
        SpendingStatus::NoCap => label.dimmed().to_string(),
        SpendingStatus::WithinPlan => label.green().to_string(),
        SpendingStatus::NearLimit => label.yellow().to_string(),
        SpendingStatus::OverLimit => label.red().bold().to_string(),
    }
}
