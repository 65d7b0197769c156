//! Command-line entry point for one-shot scheduling runs.
//!
//! # Responsibility
//! - Load a JSON day plan into a fresh dashboard session.
//! - Generate the assignment draft and print the dashboard views as JSON.
//! - Keep the core crate wiring checkable without a UI.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;
use orsched_core::board::or_groups::OrGroup;
use orsched_core::board::roster::{OrManagementPage, ShiftGroup};
use orsched_core::board::unit_board::UnitBoard;
use orsched_core::{
    init_logging_with, DashboardSession, NewNurse, NewOperatingRoom, NewSurgery, ScheduleDraft,
    SchedulerSettings, Unit,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "orsched", about = "OR nurse scheduling dashboard core", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate assignments for a day plan and print the dashboard views.
    Plan {
        /// JSON file with `ors`, `nurses` and `surgeries`.
        plan: PathBuf,
        /// Selected date (YYYY-MM-DD). Overrides the plan's `date`.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Fixed generator seed.
        #[arg(long)]
        seed: Option<u64>,
        /// JSON settings file.
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, env = "ORSCHED_LOG_DIR")]
        log_dir: Option<String>,
        #[arg(long, env = "ORSCHED_LOG_LEVEL")]
        log_level: Option<String>,
    },
    /// Print crate versions.
    Version,
}

/// Day plan input. Records without a date land on the selected date.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DayPlan {
    date: Option<NaiveDate>,
    ors: Vec<NewOperatingRoom>,
    nurses: Vec<NewNurse>,
    surgeries: Vec<NewSurgery>,
}

#[derive(Debug, Serialize)]
struct PlanReport {
    date: NaiveDate,
    draft: ScheduleDraft,
    or_groups: Vec<OrGroup>,
    unit_boards: Vec<UnitBoard>,
    nurse_roster: Vec<ShiftGroup>,
    or_management: OrManagementPage,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Plan {
            plan,
            date,
            seed,
            config,
            log_dir,
            log_level,
        } => {
            let mut settings = match config {
                Some(path) => SchedulerSettings::load(&path)
                    .with_context(|| format!("failed to load settings `{}`", path.display()))?,
                None => SchedulerSettings::default(),
            };
            if seed.is_some() {
                settings.rng_seed = seed;
            }
            if log_dir.is_some() {
                settings.log_dir = log_dir;
            }
            if let Some(level) = log_level {
                settings.log_level = level;
            }
            settings.validate().context("invalid settings")?;
            init_logging_with(&settings).context("failed to initialize logging")?;

            let report = run_plan(&plan, date, settings)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Version => {
            println!("orsched_cli version={}", env!("CARGO_PKG_VERSION"));
            println!("orsched_core version={}", orsched_core::core_version());
        }
    }
    Ok(())
}

fn run_plan(
    path: &Path,
    date_override: Option<NaiveDate>,
    settings: SchedulerSettings,
) -> Result<PlanReport> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read plan `{}`", path.display()))?;
    let plan: DayPlan = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse plan `{}`", path.display()))?;

    let mut session = match date_override.or(plan.date) {
        Some(date) => DashboardSession::open_on(settings, date),
        None => DashboardSession::open(settings),
    }
    .context("failed to open session store")?;

    for room in plan.ors {
        session.add_or(room).context("failed to add OR")?;
    }
    for nurse in plan.nurses {
        session.add_nurse(nurse).context("failed to add nurse")?;
    }
    for surgery in plan.surgeries {
        session.add_surgery(surgery).context("failed to add surgery")?;
    }
    info!(
        "event=plan_load module=cli status=ok date={}",
        session.selected_date()
    );

    let draft = session
        .generate_schedule()
        .context("failed to generate schedule")?
        .clone();
    let unit_boards = Unit::ALL
        .into_iter()
        .map(|unit| session.unit_board(unit))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PlanReport {
        date: session.selected_date(),
        draft,
        or_groups: session.or_groups()?,
        unit_boards,
        nurse_roster: session.nurse_roster()?,
        or_management: session.or_management_page(1)?,
    })
}

#[cfg(test)]
mod tests {
    use super::{run_plan, DayPlan};
    use orsched_core::SchedulerSettings;
    use std::path::PathBuf;

    fn demo_plan() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/plan.json")
    }

    #[test]
    fn demo_plan_parses() {
        let text = std::fs::read_to_string(demo_plan()).unwrap();
        let plan: DayPlan = serde_json::from_str(&text).unwrap();
        assert_eq!(plan.ors.len(), 4);
        assert_eq!(plan.nurses.len(), 3);
        assert_eq!(plan.surgeries.len(), 3);
        assert!(!plan.ors[3].is_active);
    }

    #[test]
    fn demo_plan_report_covers_every_surgery() {
        let settings = SchedulerSettings {
            rng_seed: Some(1),
            ..SchedulerSettings::default()
        };
        let report = run_plan(&demo_plan(), None, settings).unwrap();

        assert_eq!(report.date.to_string(), "2025-03-04");
        assert_eq!(report.draft.len(), 3);
        assert_eq!(report.or_groups[0].rooms.len(), 2);
        assert_eq!(report.or_groups[2].rooms.len(), 1);
        assert_eq!(report.or_management.total, 4);
        let board_rows: usize = report.unit_boards.iter().map(|board| board.rows.len()).sum();
        assert_eq!(board_rows, 3);
    }
}
