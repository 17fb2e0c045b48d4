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

use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::team::TeamId;

/// The events document as it comes off disk, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEventEntry {
    pub team: String,
    pub date: String,
    pub start: String,
    pub duration_hours: f64,
    #[serde(default)]
    pub note: Option<String>,
}

/// A validated, pre-confirmed reservation, already resolved to a minute
/// range on the grid.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub team: TeamId,
    pub date: NaiveDate,
    pub start: i32,
    pub end: i32,
    pub note: Option<String>,
}

impl EventRecord {
    pub fn duration_minutes(&self) -> i32 {
        self.end - self.start
    }
}
