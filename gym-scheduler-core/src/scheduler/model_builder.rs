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

//! The decision-variable structure the solver fills in, plus the predicate
//! helpers that express the hard-constraint contracts (§4.4) so both the
//! solver and the tests can check them by name instead of re-deriving the
//! logic inline.

use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};

use crate::model::day::Day;
use crate::model::event::EventRecord;
use crate::model::team::TeamId;
use crate::scheduler::events_integrator::EventIndex;
use crate::scheduler::validator::ValidatedInputs;

/// One team index per occupied slot; `None` means the slot is idle.
/// Indexed `[day_index][slot_index_within_day]`, a dense array rather than a
/// sparse (day,slot)->team map, so a day with no possible assignment costs
/// nothing beyond its `Vec::new()`.
pub type DaySlots = Vec<Option<usize>>;

pub struct ScheduleModel {
    pub teams: IndexSet<TeamId>,
    pub preferences: IndexMap<TeamId, IndexSet<NaiveDate>>,
    pub days: Vec<Day>,
    pub events: Vec<EventRecord>,
    pub event_index: EventIndex,
    pub assignment: Vec<DaySlots>,
}

impl ScheduleModel {
    pub fn new(inputs: ValidatedInputs, days: Vec<Day>, event_index: EventIndex) -> Self {
        let assignment = days.iter().map(|d| vec![None; d.slot_count()]).collect();
        ScheduleModel {
            teams: inputs.teams,
            preferences: inputs.preferences,
            days,
            events: inputs.events,
            event_index,
            assignment,
        }
    }

    pub fn team_index(&self, team: &str) -> Option<usize> {
        self.teams.get_index_of(team)
    }

    pub fn team_name(&self, index: usize) -> &str {
        self.teams.get_index(index).expect("team index in range")
    }

    /// Number of in-month preference days surviving validation for this team.
    pub fn pref_count(&self, team_idx: usize) -> u32 {
        let name = self.team_name(team_idx);
        self.preferences.get(name).map(|dates| dates.len() as u32).unwrap_or(0)
    }

    pub fn prefers(&self, team_idx: usize, date: NaiveDate) -> bool {
        let name = self.team_name(team_idx);
        self.preferences.get(name).is_some_and(|dates| dates.contains(&date))
    }

    /// Teams eligible for the non-event slots of `day_idx`: they prefer the
    /// day and do not already own an event on it (an event-owning team uses
    /// only its event that day, per the event-pinning contract).
    pub fn eligible_non_event_teams(&self, day_idx: usize) -> Vec<usize> {
        let date = self.days[day_idx].date;
        let event_teams = self.event_index.teams_on(date);
        (0..self.teams.len())
            .filter(|&t| self.prefers(t, date))
            .filter(|&t| event_teams.is_none_or(|teams| !teams.contains(self.team_name(t))))
            .collect()
    }

    /// Total assigned slots for `team_idx` on day `day_idx`.
    pub fn usage(&self, day_idx: usize, team_idx: usize) -> u32 {
        self.assignment[day_idx].iter().filter(|&&t| t == Some(team_idx)).count() as u32
    }

    /// First assigned slot-start minute for `team_idx` on day `day_idx`, if any.
    pub fn start_time(&self, day_idx: usize, team_idx: usize) -> i32 {
        self.days[day_idx]
            .slots
            .iter()
            .zip(&self.assignment[day_idx])
            .find(|(_, &t)| t == Some(team_idx))
            .map(|(&m, _)| m)
            .unwrap_or(0)
    }

    /// Teams with at least one assigned slot on day `day_idx`.
    pub fn active_teams(&self, day_idx: usize) -> Vec<usize> {
        let mut teams: Vec<usize> = self.assignment[day_idx].iter().flatten().copied().collect();
        teams.sort_unstable();
        teams.dedup();
        teams
    }

    /// Invariant (4): at most one contiguous assigned run per team per day.
    pub fn has_single_block_per_team(&self, day_idx: usize) -> bool {
        let slots = &self.assignment[day_idx];
        let mut starts: std::collections::HashMap<usize, u32> = std::collections::HashMap::new();
        for i in 0..slots.len() {
            if let Some(team) = slots[i] {
                let prev_same = i > 0 && slots[i - 1] == Some(team);
                if !prev_same {
                    *starts.entry(team).or_insert(0) += 1;
                }
            }
        }
        starts.values().all(|&count| count <= 1)
    }

    /// Invariant (3): any team with usage on a day used at least `min_slots`
    /// contiguous slots.
    pub fn respects_min_session(&self, day_idx: usize, min_slots: u32) -> bool {
        for team in self.active_teams(day_idx) {
            if self.usage(day_idx, team) < min_slots {
                return false;
            }
        }
        true
    }
}
