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

//! Derives per-day event ownership and identifies days fully saturated by
//! events (no slack left for the fairness terms).

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use range_set_blaze::RangeSetBlaze;

use crate::model::day::Day;
use crate::model::event::EventRecord;
use crate::model::team::TeamId;

pub struct EventIndex {
    pub event_teams_per_day: HashMap<NaiveDate, HashSet<TeamId>>,
    pub full_event_days: HashSet<NaiveDate>,
}

impl EventIndex {
    pub fn teams_on(&self, date: NaiveDate) -> Option<&HashSet<TeamId>> {
        self.event_teams_per_day.get(&date)
    }

    pub fn is_full_event_day(&self, date: NaiveDate) -> bool {
        self.full_event_days.contains(&date)
    }
}

pub fn build(events: &[EventRecord], days: &[Day]) -> EventIndex {
    let mut event_teams_per_day: HashMap<NaiveDate, HashSet<TeamId>> = HashMap::new();
    let mut covered: HashMap<NaiveDate, RangeSetBlaze<i32>> = HashMap::new();

    for e in events {
        event_teams_per_day.entry(e.date).or_default().insert(e.team.clone());
        let entry = covered.entry(e.date).or_insert_with(RangeSetBlaze::new);
        *entry |= RangeSetBlaze::from_iter([e.start..=(e.end - 1)]);
    }

    let mut full_event_days = HashSet::new();
    for day in days {
        if !day.is_usable() {
            continue;
        }
        if let Some(cov) = covered.get(&day.date) {
            if day.slots.iter().all(|&t| cov.contains(t)) {
                full_event_days.insert(day.date);
            }
        }
    }

    EventIndex { event_teams_per_day, full_event_days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::Configuration;
    use crate::scheduler::availability::build_days;

    #[test]
    fn detects_full_event_day() {
        let cfg = Configuration::from_yaml_str(
            "year: 2026\nmonth: 1\nmin_slots: 3\nmax_solve_seconds: 60\navailability:\n  \"15\": [\"18:00\", \"20:00\", null, null]\n",
        )
        .unwrap();
        let days = build_days(&cfg);
        let date = days[14].date;
        let events = vec![EventRecord { team: "A".to_string(), date, start: 1080, end: 1200, note: None }];
        let index = build(&events, &days);
        assert!(index.is_full_event_day(date));
        assert!(index.teams_on(date).unwrap().contains("A"));
    }

    #[test]
    fn partial_event_is_not_full() {
        let cfg = Configuration::from_yaml_str(
            "year: 2026\nmonth: 1\nmin_slots: 3\nmax_solve_seconds: 60\navailability:\n  \"15\": [\"18:00\", \"22:00\", null, null]\n",
        )
        .unwrap();
        let days = build_days(&cfg);
        let date = days[14].date;
        let events = vec![EventRecord { team: "A".to_string(), date, start: 1080, end: 1200, note: None }];
        let index = build(&events, &days);
        assert!(!index.is_full_event_day(date));
    }
}
