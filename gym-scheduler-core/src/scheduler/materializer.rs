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

//! Collapses the solved slot-level assignment into human-readable blocks
//! (§4.7): a canonical day-by-day schedule table and a per-team breakdown.

use chrono::NaiveDate;

use crate::scheduler::model_builder::ScheduleModel;

pub const UNUSABLE_LABEL: &str = "(利用不可)";
pub const PREF_ZERO_LABEL: &str = "希望団体0";
pub const UNASSIGNED_LABEL: &str = "(未割当)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayStatus {
    Unusable,
    PrefZero,
    Normal,
}

#[derive(Debug, Clone)]
pub struct Block {
    pub label: String,
    pub start: i32,
    pub end: i32,
}

#[derive(Debug, Clone)]
pub struct ScheduleRow {
    pub date: NaiveDate,
    pub day_of_month: u32,
    pub status: DayStatus,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone)]
pub struct ByTeamRow {
    pub team: String,
    pub date: NaiveDate,
    pub start: i32,
    pub end: i32,
}

fn collapse_blocks(model: &ScheduleModel, day_idx: usize) -> Vec<Block> {
    let day = &model.days[day_idx];
    let mut blocks: Vec<Block> = Vec::new();
    for (i, &minute) in day.slots.iter().enumerate() {
        let label = match model.assignment[day_idx][i] {
            Some(team) => model.team_name(team).to_string(),
            None => UNASSIGNED_LABEL.to_string(),
        };
        match blocks.last_mut() {
            Some(last) if last.label == label && last.end == minute => last.end = minute + 30,
            _ => blocks.push(Block { label, start: minute, end: minute + 30 }),
        }
    }
    blocks
}

pub fn materialize(model: &ScheduleModel) -> (Vec<ScheduleRow>, Vec<ByTeamRow>) {
    let mut rows = Vec::with_capacity(model.days.len());
    let mut by_team = Vec::new();

    for day_idx in 0..model.days.len() {
        let day = &model.days[day_idx];

        if !day.is_usable() {
            rows.push(ScheduleRow { date: day.date, day_of_month: day.day_of_month, status: DayStatus::Unusable, blocks: Vec::new() });
            continue;
        }

        let has_events = model.event_index.teams_on(day.date).is_some();
        let eligible = model.eligible_non_event_teams(day_idx);
        if !has_events && eligible.is_empty() {
            rows.push(ScheduleRow { date: day.date, day_of_month: day.day_of_month, status: DayStatus::PrefZero, blocks: Vec::new() });
            continue;
        }

        let blocks = collapse_blocks(model, day_idx);
        for block in &blocks {
            if block.label != UNASSIGNED_LABEL {
                by_team.push(ByTeamRow { team: block.label.clone(), date: day.date, start: block.start, end: block.end });
            }
        }
        rows.push(ScheduleRow { date: day.date, day_of_month: day.day_of_month, status: DayStatus::Normal, blocks });
    }

    by_team.sort_by(|a, b| a.team.cmp(&b.team).then(a.date.cmp(&b.date)));
    (rows, by_team)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::Configuration;
    use crate::scheduler::availability::build_days;
    use crate::scheduler::events_integrator;
    use crate::scheduler::validator::ValidatedInputs;
    use indexmap::{IndexMap, IndexSet};

    #[test]
    fn collapses_contiguous_same_team_runs() {
        let cfg = Configuration::from_yaml_str(
            "year: 2026\nmonth: 1\nmin_slots: 3\nmax_solve_seconds: 60\navailability:\n  \"10\": [\"18:00\", \"20:00\", null, null]\n",
        )
        .unwrap();
        let days = build_days(&cfg);
        let event_index = events_integrator::build(&[], &days);
        let mut teams = IndexSet::new();
        teams.insert("A".to_string());
        let mut preferences = IndexMap::new();
        preferences.insert("A".to_string(), IndexSet::from([days[9].date]));
        let inputs = ValidatedInputs { teams, preferences, events: vec![] };
        let mut model = ScheduleModel::new(inputs, days, event_index);
        model.assignment[9] = vec![Some(0), Some(0), Some(0), Some(0)];

        let (rows, by_team) = materialize(&model);
        assert_eq!(rows[9].status, DayStatus::Normal);
        assert_eq!(rows[9].blocks.len(), 1);
        assert_eq!(rows[9].blocks[0].label, "A");
        assert_eq!(by_team.len(), 1);
        assert_eq!(by_team[0].start, 1080);
        assert_eq!(by_team[0].end, 1200);
    }
}
