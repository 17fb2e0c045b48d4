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

//! Normalizes the preferences and events documents against the built day
//! list, dropping anything malformed or out of scope. Never aborts the run:
//! every rejection becomes a warning on the `RunContext` and the cleaned
//! data is what the rest of the pipeline sees.

use chrono::{Datelike, NaiveDate};
use indexmap::{IndexMap, IndexSet};

use crate::error::{Error, Result};
use crate::io::time::{is_on_grid, parse_hhmm};
use crate::model::day::Day;
use crate::model::event::{EventRecord, RawEventEntry};
use crate::model::team::{team_universe, TeamId};
use crate::platform::RunContext;

pub struct ValidatedInputs {
    pub teams: IndexSet<TeamId>,
    pub preferences: IndexMap<TeamId, IndexSet<NaiveDate>>,
    pub events: Vec<EventRecord>,
}

fn day_by_date<'a>(days: &'a [Day], date: NaiveDate) -> Option<&'a Day> {
    days.iter().find(|d| d.date == date)
}

/// Drops preference dates outside the target month or on a day pruned to no
/// usable slots (§3): such a date must never inflate `pref_count`, since that
/// feeds directly into the monthly/zone fairness terms.
fn validate_preferences(
    raw: &IndexMap<String, Vec<String>>,
    days: &[Day],
    year: i32,
    month: u32,
    ctx: &mut RunContext,
) -> IndexMap<TeamId, IndexSet<NaiveDate>> {
    let mut preferences = IndexMap::with_capacity(raw.len());
    for (team, dates) in raw {
        let mut kept = IndexSet::new();
        for date_str in dates {
            match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
                Ok(date) if date.year() == year && date.month() == month => match day_by_date(days, date) {
                    Some(day) if day.is_usable() => {
                        kept.insert(date);
                    }
                    _ => {
                        ctx.warn(format!("preferences: team '{team}' prefers '{date_str}', which has no usable slots, dropped"));
                    }
                },
                Ok(_) => {
                    // Out-of-month preference date: silently dropped, matching the
                    // reference behavior (no warning on this particular filter).
                }
                Err(_) => {
                    ctx.warn(format!("preferences: team '{team}' has an unparseable date '{date_str}', dropped"));
                }
            }
        }
        preferences.insert(team.clone(), kept);
    }
    preferences
}

/// Validates the events document, dropping malformed entries with a warning.
/// An event that overlaps, on the same day, with an already-accepted event
/// for a *different* team is a conflicting hard pin (invariant 2 can't hold
/// for both teams at once) and aborts the run with `Error::NoSolution`,
/// matching what a real constraint solver would report for an infeasible
/// pin set (§4.6/§7).
fn validate_events(raw: &[RawEventEntry], days: &[Day], year: i32, month: u32, ctx: &mut RunContext) -> Result<Vec<EventRecord>> {
    let mut events: Vec<EventRecord> = Vec::with_capacity(raw.len());

    for (index, entry) in raw.iter().enumerate() {
        let reject = |reason: String, ctx: &mut RunContext| {
            ctx.warn(format!(
                "events[{index}]: team '{}' date '{}' start '{}' duration_hours {} rejected: {reason}",
                entry.team, entry.date, entry.start, entry.duration_hours
            ));
        };

        if entry.team.trim().is_empty() {
            reject("team name is empty".to_string(), ctx);
            continue;
        }

        let date = match NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => {
                reject("date is not a valid YYYY-MM-DD string".to_string(), ctx);
                continue;
            }
        };
        if date.year() != year || date.month() != month {
            reject("date is outside the target month".to_string(), ctx);
            continue;
        }

        let Some(day) = day_by_date(days, date) else {
            reject("date could not be resolved against the calendar".to_string(), ctx);
            continue;
        };
        if !day.is_usable() {
            reject("day has no usable slots".to_string(), ctx);
            continue;
        }

        if entry.duration_hours <= 0.0 {
            reject("duration_hours must be positive".to_string(), ctx);
            continue;
        }

        let start = match parse_hhmm(&entry.start) {
            Ok(m) => m,
            Err(e) => {
                reject(format!("start time invalid: {e}"), ctx);
                continue;
            }
        };
        let end = start + (entry.duration_hours * 60.0).round() as i32;

        if !is_on_grid(start) || !is_on_grid(end) {
            reject("start/end must align to the 30-minute grid".to_string(), ctx);
            continue;
        }
        if end <= start {
            reject("end must be after start".to_string(), ctx);
            continue;
        }

        let mut t = start;
        let mut covers_all = true;
        while t < end {
            if day.slot_index(t).is_none() {
                covers_all = false;
                break;
            }
            t += 30;
        }
        if !covers_all {
            reject("event falls outside the day's available windows".to_string(), ctx);
            continue;
        }

        let conflict = events.iter().any(|e| e.date == date && e.team != entry.team && start < e.end && e.start < end);
        if conflict {
            ctx.warn(format!(
                "events[{index}]: team '{}' on '{}' [{}-{}) conflicts with another team's event in the same window; no feasible schedule",
                entry.team, entry.date, start, end
            ));
            return Err(Error::NoSolution);
        }

        events.push(EventRecord { team: entry.team.clone(), date, start, end, note: entry.note.clone() });
    }

    Ok(events)
}

pub fn validate(
    raw_preferences: &IndexMap<String, Vec<String>>,
    raw_events: &[RawEventEntry],
    days: &[Day],
    year: i32,
    month: u32,
    ctx: &mut RunContext,
) -> Result<ValidatedInputs> {
    let preferences = validate_preferences(raw_preferences, days, year, month, ctx);
    let events = validate_events(raw_events, days, year, month, ctx)?;

    let teams = team_universe(preferences.keys().map(String::as_str), events.iter().map(|e| e.team.as_str()));

    Ok(ValidatedInputs { teams, preferences, events })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::Configuration;
    use crate::scheduler::availability::build_days;

    fn days() -> Vec<Day> {
        let cfg = Configuration::from_yaml_str(
            "year: 2026\nmonth: 1\nmin_slots: 3\nmax_solve_seconds: 60\navailability:\n  \"15\": [\"09:00\", \"22:00\", null, null]\n",
        )
        .unwrap();
        build_days(&cfg)
    }

    #[test]
    fn drops_out_of_month_preference_dates() {
        let mut raw = IndexMap::new();
        raw.insert("A".to_string(), vec!["2026-01-15".to_string(), "2026-02-01".to_string()]);
        let mut ctx = RunContext::new("data".into(), "out".into());
        let prefs = validate_preferences(&raw, &days(), 2026, 1, &mut ctx);
        assert_eq!(prefs["A"].len(), 1);
    }

    #[test]
    fn drops_preference_for_unusable_day() {
        let mut raw = IndexMap::new();
        // Day 1 has no availability window configured, so it has no slots.
        raw.insert("A".to_string(), vec!["2026-01-01".to_string(), "2026-01-15".to_string()]);
        let mut ctx = RunContext::new("data".into(), "out".into());
        let prefs = validate_preferences(&raw, &days(), 2026, 1, &mut ctx);
        assert_eq!(prefs["A"].len(), 1);
        assert!(prefs["A"].iter().all(|d| d.day() == 15));
    }

    #[test]
    fn drops_misaligned_event() {
        let raw = vec![RawEventEntry { team: "A".to_string(), date: "2026-01-15".to_string(), start: "18:15".to_string(), duration_hours: 4.0, note: None }];
        let mut ctx = RunContext::new("data".into(), "out".into());
        let events = validate_events(&raw, &days(), 2026, 1, &mut ctx).unwrap();
        assert!(events.is_empty());
        assert_eq!(ctx.warnings().len(), 1);
    }

    #[test]
    fn keeps_valid_event() {
        let raw = vec![RawEventEntry { team: "A".to_string(), date: "2026-01-15".to_string(), start: "18:00".to_string(), duration_hours: 4.0, note: None }];
        let mut ctx = RunContext::new("data".into(), "out".into());
        let events = validate_events(&raw, &days(), 2026, 1, &mut ctx).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start, 1080);
        assert_eq!(events[0].end, 1320);
    }

    #[test]
    fn drops_event_outside_availability_window() {
        let raw = vec![RawEventEntry { team: "A".to_string(), date: "2026-01-15".to_string(), start: "06:00".to_string(), duration_hours: 1.0, note: None }];
        let mut ctx = RunContext::new("data".into(), "out".into());
        let events = validate_events(&raw, &days(), 2026, 1, &mut ctx).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn conflicting_events_for_different_teams_abort_as_no_solution() {
        let raw = vec![
            RawEventEntry { team: "A".to_string(), date: "2026-01-15".to_string(), start: "18:00".to_string(), duration_hours: 2.0, note: None },
            RawEventEntry { team: "B".to_string(), date: "2026-01-15".to_string(), start: "19:00".to_string(), duration_hours: 2.0, note: None },
        ];
        let mut ctx = RunContext::new("data".into(), "out".into());
        let result = validate_events(&raw, &days(), 2026, 1, &mut ctx);
        assert!(matches!(result, Err(Error::NoSolution)));
    }
}
