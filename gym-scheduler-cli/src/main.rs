/*
 * Copyright (c) 2025 Clément GRENNERAT
 *
 * This program is free software: you can redistribute it and/or modify it under the terms of the
 * GNU General Public License as published by the Free Software Foundation, version 3.
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without
 * even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
 * See the GNU General Public License for more details.
 * You should have received a copy of the GNU General Public License along with this program.
 * If not, see https://www.gnu.org/licenses/.
 *
 */

mod gantt;
mod io;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use gym_scheduler_core::error::Error;
use gym_scheduler_core::platform::RunContext;
use log::{error, info};
use prettytable::{format, row, Table};

/// Allocates a shared gymnasium among competing teams for one calendar month.
#[derive(Parser, Debug)]
#[command(name = "gym-scheduler", version, about)]
struct Cli {
    /// Configuration document (YAML).
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Selects the input folder under `data/` (YYYY-MM). Defaults to the
    /// configuration's own year/month.
    #[arg(long)]
    data_tag: Option<String>,

    /// Overrides the input folder directly, bypassing `--data-tag`.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Output root; per-run outputs land under `<out>/<YYYY-MM>/`.
    #[arg(long, default_value = "output")]
    out: PathBuf,

    /// Suppress the optional Gantt chart image artifact.
    #[arg(long)]
    no_gantt: bool,

    /// Log file location. Logs always go to stderr; when set, they are
    /// also mirrored to this file.
    #[arg(long)]
    log: Option<PathBuf>,
}

/// Exit codes distinguish failure classes for calling scripts, matching
/// `gym_scheduler_core::error::Error`'s variants one for one.
fn exit_code_for(err: &Error) -> u8 {
    match err {
        Error::Configuration(_) => 2,
        Error::InputFileMissing { .. } => 3,
        Error::Yaml { .. } | Error::Json { .. } => 4,
        Error::Io { .. } => 5,
        Error::NoSolution => 6,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log.as_deref());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(core_err) = err.downcast_ref::<Error>() {
                error!("{core_err}");
                ExitCode::from(exit_code_for(core_err))
            } else {
                error!("{err:#}");
                ExitCode::from(1)
            }
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = gym_scheduler_core::io::documents::load_configuration(&cli.config)?;
    info!("loaded configuration for {}-{:02}", config.year, config.month);

    let data_tag = cli.data_tag.clone().unwrap_or_else(|| format!("{:04}-{:02}", config.year, config.month));
    let data_dir = cli.data_dir.clone().unwrap_or_else(|| PathBuf::from("data").join(&data_tag));
    let out_dir = cli.out.join(&data_tag);

    let preferences_path = data_dir.join("preferences.json");
    let events_path = data_dir.join("events.json");
    let raw_preferences = gym_scheduler_core::io::documents::load_preferences(&preferences_path)?;
    let raw_events = gym_scheduler_core::io::documents::load_events(&events_path)?;

    let mut ctx = RunContext::new(data_dir.clone(), out_dir.clone());
    let result = gym_scheduler_core::run_allocation(&config, &raw_preferences, &raw_events, &mut ctx)?;

    std::fs::create_dir_all(&out_dir)?;
    io::snapshot_inputs(&cli.config, &preferences_path, &events_path, &out_dir)?;
    io::write_schedule_csv(&out_dir, &result.schedule)?;
    io::write_by_team_csv(&out_dir, &result.by_team)?;
    io::write_summary_csv(&out_dir, &result.model, &result.objective, &result.status)?;

    if !cli.no_gantt {
        gantt::render(&out_dir, &result.schedule)?;
    }

    print_zone_table(&result.model);
    println!("{}", format!("schedule written to {}", out_dir.display()).green());
    Ok(())
}

/// Prints per-team, per-zone monthly totals to the terminal alongside the
/// files written to `out_dir`.
fn print_zone_table(model: &gym_scheduler_core::scheduler::model_builder::ScheduleModel) {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.add_row(row!["Team", "Morning", "Daytime", "Evening", "Night"]);
    for (team, zones) in gym_scheduler_core::scheduler::objective::team_zone_totals(model) {
        table.add_row(row![team, zones[0], zones[1], zones[2], zones[3]]);
    }
    table.printstd();
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_YAML: &str = "year: 2026\nmonth: 1\nmin_slots: 2\nmax_solve_seconds: 1\navailability:\n  \"10\": [\"18:00\", \"20:00\", null, null]\n";
    const PREFERENCES_JSON: &str = r#"{"A": ["2026-01-10"]}"#;
    const EVENTS_JSON: &str = "[]";

    #[test]
    fn parses_default_flags() {
        let cli = Cli::parse_from(["gym-scheduler"]);
        assert_eq!(cli.config, PathBuf::from("config.yaml"));
        assert_eq!(cli.data_tag, None);
        assert_eq!(cli.data_dir, None);
        assert_eq!(cli.out, PathBuf::from("output"));
        assert!(!cli.no_gantt);
        assert_eq!(cli.log, None);
    }

    #[test]
    fn parses_every_flag() {
        let cli = Cli::parse_from([
            "gym-scheduler",
            "--config",
            "custom.yaml",
            "--data-tag",
            "2026-03",
            "--data-dir",
            "/tmp/custom-data",
            "--out",
            "/tmp/custom-out",
            "--no-gantt",
            "--log",
            "/tmp/run.log",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.yaml"));
        assert_eq!(cli.data_tag, Some("2026-03".to_string()));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/custom-data")));
        assert_eq!(cli.out, PathBuf::from("/tmp/custom-out"));
        assert!(cli.no_gantt);
        assert_eq!(cli.log, Some(PathBuf::from("/tmp/run.log")));
    }

    /// Builds a temp directory holding a valid config/preferences/events
    /// fixture, returning (tempdir, cli) with `out` pointed inside it.
    fn fixture(no_gantt: bool) -> (tempfile::TempDir, Cli) {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let data_dir = dir.path().join("inputs-data");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(&config_path, CONFIG_YAML).unwrap();
        std::fs::write(data_dir.join("preferences.json"), PREFERENCES_JSON).unwrap();
        std::fs::write(data_dir.join("events.json"), EVENTS_JSON).unwrap();

        let cli = Cli {
            config: config_path,
            data_tag: Some("ignored-tag".to_string()),
            data_dir: Some(data_dir),
            out: dir.path().join("output"),
            no_gantt,
            log: None,
        };
        (dir, cli)
    }

    #[test]
    fn data_dir_overrides_data_tag() {
        // `data_tag` names a folder (`data/ignored-tag`) that does not exist;
        // the run must still succeed because `data_dir` takes precedence.
        let (_dir, cli) = fixture(true);
        run(&cli).unwrap();
    }

    #[test]
    fn no_gantt_suppresses_image_but_keeps_csvs() {
        let (_dir, cli) = fixture(true);
        run(&cli).unwrap();

        let out_dir = cli.out.join(cli.data_tag.as_ref().unwrap());
        assert!(out_dir.join("schedule.csv").is_file());
        assert!(out_dir.join("by_team.csv").is_file());
        assert!(out_dir.join("summary.csv").is_file());
        assert!(!out_dir.join("gantt.png").exists());
    }

    #[test]
    fn gantt_written_when_not_suppressed() {
        let (_dir, cli) = fixture(false);
        run(&cli).unwrap();

        let out_dir = cli.out.join(cli.data_tag.as_ref().unwrap());
        assert!(out_dir.join("gantt.png").is_file());
    }

    #[test]
    fn snapshot_inputs_are_byte_identical_copies() {
        let (_dir, cli) = fixture(true);
        run(&cli).unwrap();

        let out_dir = cli.out.join(cli.data_tag.as_ref().unwrap());
        let inputs_dir = out_dir.join("inputs");
        assert_eq!(std::fs::read_to_string(inputs_dir.join("config.yaml")).unwrap(), CONFIG_YAML);
        assert_eq!(std::fs::read_to_string(inputs_dir.join("preferences.json")).unwrap(), PREFERENCES_JSON);
        assert_eq!(std::fs::read_to_string(inputs_dir.join("events.json")).unwrap(), EVENTS_JSON);
    }
}
