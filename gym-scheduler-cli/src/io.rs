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

use std::fs;
use std::path::Path;

use anyhow::Result;
use gym_scheduler_core::io::time::format_hhmm;
use gym_scheduler_core::scheduler::materializer::{ByTeamRow, DayStatus, ScheduleRow};
use gym_scheduler_core::scheduler::model_builder::ScheduleModel;
use gym_scheduler_core::scheduler::objective::{self, ObjectiveBreakdown};
use gym_scheduler_core::scheduler::solver::SolverStatus;

/// Copies the three input documents into `<out>/inputs/` for provenance.
pub fn snapshot_inputs(config: &Path, preferences: &Path, events: &Path, out_dir: &Path) -> Result<()> {
    let inputs_dir = out_dir.join("inputs");
    fs::create_dir_all(&inputs_dir)?;
    fs::copy(config, inputs_dir.join("config.yaml"))?;
    fs::copy(preferences, inputs_dir.join("preferences.json"))?;
    fs::copy(events, inputs_dir.join("events.json"))?;
    Ok(())
}

fn status_label(status: &DayStatus) -> &'static str {
    match status {
        DayStatus::Unusable => "unusable",
        DayStatus::PrefZero => "pref_zero",
        DayStatus::Normal => "normal",
    }
}

pub fn write_schedule_csv(out_dir: &Path, rows: &[ScheduleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(out_dir.join("schedule.csv"))?;
    writer.write_record(["date", "day_of_month", "status", "blocks"])?;
    for row in rows {
        let blocks = row
            .blocks
            .iter()
            .map(|b| format!("{} {}-{}", b.label, format_hhmm(b.start), format_hhmm(b.end)))
            .collect::<Vec<_>>()
            .join("; ");
        writer.write_record([row.date.to_string(), row.day_of_month.to_string(), status_label(&row.status).to_string(), blocks])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_by_team_csv(out_dir: &Path, rows: &[ByTeamRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(out_dir.join("by_team.csv"))?;
    writer.write_record(["team", "date", "start", "end", "duration_hours"])?;
    for row in rows {
        let duration_hours = (row.end - row.start) as f64 / 60.0;
        writer.write_record([
            row.team.clone(),
            row.date.to_string(),
            format_hhmm(row.start),
            format_hhmm(row.end),
            format!("{duration_hours:.1}"),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the monthly summary: the objective breakdown followed by a
/// per-team, per-zone totals section, per the output contract for
/// `summary.csv`.
pub fn write_summary_csv(out_dir: &Path, model: &ScheduleModel, objective: &ObjectiveBreakdown, status: &SolverStatus) -> Result<()> {
    let mut writer = csv::Writer::from_path(out_dir.join("summary.csv"))?;
    writer.write_record(["metric", "value"])?;
    writer.write_record(["solver_status", &format!("{status:?}")])?;
    writer.write_record(["team_participation", &objective.team_participation.to_string()])?;
    writer.write_record(["daily_spread_non_event", &objective.daily_spread_non_event.to_string()])?;
    writer.write_record(["daily_spread_event_day", &objective.daily_spread_event_day.to_string()])?;
    writer.write_record(["monthly_fairness", &objective.monthly_fairness.to_string()])?;
    writer.write_record(["morning_burden_spread", &objective.morning_burden_spread.to_string()])?;
    writer.write_record(["zone_fairness", &objective.zone_fairness.to_string()])?;
    writer.write_record(["idle_slots", &objective.idle_slots.to_string()])?;
    writer.write_record(["weighted_total", &format!("{:.1}", objective.weighted_total)])?;

    writer.write_record(["", ""])?;
    writer.write_record(["team", "morning/daytime/evening/night"])?;
    for (team, zones) in objective::team_zone_totals(model) {
        writer.write_record([team, format!("{}/{}/{}/{}", zones[0], zones[1], zones[2], zones[3])])?;
    }

    writer.flush()?;
    Ok(())
}
