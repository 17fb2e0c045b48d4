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

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::io::time::parse_hhmm;

/// Up to two disjoint availability windows for a single day-of-month,
/// already resolved to minutes-since-midnight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayAvailability {
    pub windows: Vec<(i32, i32)>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    year: i32,
    month: u32,
    min_slots: u32,
    max_solve_seconds: u64,
    #[serde(default)]
    availability: IndexMap<String, [Option<String>; 4]>,
}

/// A fully validated, in-memory configuration document.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub year: i32,
    pub month: u32,
    pub min_slots: u32,
    pub max_solve_seconds: u64,
    /// Keyed by day-of-month (1-based). A day absent from the map is treated
    /// as fully unavailable, matching the reference admin UI's behavior of
    /// always pre-populating every day before the operator edits anything.
    pub availability: IndexMap<u32, DayAvailability>,
}

impl Configuration {
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let raw: RawConfig = serde_yaml::from_str(contents)
            .map_err(|source| Error::Configuration(format!("malformed configuration document: {source}")))?;

        if !(1..=12).contains(&raw.month) {
            return Err(Error::Configuration(format!("month must be in 1..=12, got {}", raw.month)));
        }
        if raw.min_slots == 0 {
            return Err(Error::Configuration("min_slots must be at least 1".to_string()));
        }

        let mut availability = IndexMap::with_capacity(raw.availability.len());
        for (day_str, entry) in raw.availability {
            let day: u32 = day_str
                .parse()
                .map_err(|_| Error::Configuration(format!("invalid availability day key: {day_str}")))?;
            let windows = parse_availability_entry(&entry)?;
            availability.insert(day, DayAvailability { windows });
        }

        Ok(Configuration { year: raw.year, month: raw.month, min_slots: raw.min_slots, max_solve_seconds: raw.max_solve_seconds, availability })
    }

    /// Availability for a given day-of-month, defaulting to fully unavailable.
    pub fn availability_for(&self, day_of_month: u32) -> DayAvailability {
        self.availability.get(&day_of_month).cloned().unwrap_or_default()
    }
}

fn parse_availability_entry(entry: &[Option<String>; 4]) -> Result<Vec<(i32, i32)>> {
    let mut windows = Vec::with_capacity(2);
    for pair in entry.chunks(2) {
        let (start_raw, end_raw) = (&pair[0], &pair[1]);
        match (start_raw, end_raw) {
            (Some(start), Some(end)) => {
                let start_min = parse_hhmm(start).map_err(|e| Error::Configuration(e.to_string()))?;
                let end_min = parse_hhmm(end).map_err(|e| Error::Configuration(e.to_string()))?;
                if end_min <= start_min {
                    return Err(Error::Configuration(format!("availability window end must be after start: {start}-{end}")));
                }
                windows.push((start_min, end_min));
            }
            (None, None) => {}
            _ => return Err(Error::Configuration("availability window must set both start and end, or neither".to_string())),
        }
    }
    Ok(windows)
}
