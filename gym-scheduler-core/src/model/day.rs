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
use range_set_blaze::RangeSetBlaze;

use crate::io::time::SLOT_MINUTES;

/// A day within the target month, carrying its expanded, grid-aligned slot
/// list. An empty `slots` means the day cannot host any session at all
/// (either no availability, or not enough contiguous room for `min_slots`).
#[derive(Debug, Clone)]
pub struct Day {
    pub date: NaiveDate,
    pub day_of_month: u32,
    pub slots: Vec<i32>,
    /// The raw available-minutes set before the min-block prune, as a
    /// compact range set (the same role `ProcSet` plays for CPU ranges in
    /// the teacher's resource model, applied here to a minute domain).
    pub available_minutes: RangeSetBlaze<i32>,
}

impl Day {
    pub fn is_usable(&self) -> bool {
        !self.slots.is_empty()
    }

    pub fn slot_index(&self, minute: i32) -> Option<usize> {
        self.slots.iter().position(|&m| m == minute)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// True if there exists some run of `min_slots` consecutive grid slots
    /// starting at `start_minute` within this day's slot list.
    pub fn has_min_block_at(&self, start_minute: i32, min_slots: u32) -> bool {
        let Some(start_idx) = self.slots.iter().position(|&m| m == start_minute) else { return false };
        if start_idx + min_slots as usize > self.slots.len() {
            return false;
        }
        (0..min_slots as usize).all(|k| self.slots[start_idx + k] == start_minute + k as i32 * SLOT_MINUTES)
    }
}

/// Named time bands used by the zone proportional-fairness term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Morning,
    Daytime,
    Evening,
    Night,
}

pub const ZONES: [Zone; 4] = [Zone::Morning, Zone::Daytime, Zone::Evening, Zone::Night];

impl Zone {
    /// The zone a slot-start minute falls into, or `None` outside every
    /// named band.
    pub fn classify(start_minute: i32) -> Option<Zone> {
        match start_minute {
            m if (8 * 60 + 30..11 * 60).contains(&m) => Some(Zone::Morning),
            m if (11 * 60..15 * 60).contains(&m) => Some(Zone::Daytime),
            m if (15 * 60..18 * 60).contains(&m) => Some(Zone::Evening),
            m if (18 * 60..21 * 60).contains(&m) => Some(Zone::Night),
            _ => None,
        }
    }
}

/// Morning-burden penalty for a slot starting at `start_minute`.
pub fn morning_penalty(start_minute: i32) -> i64 {
    match start_minute {
        m if (8 * 60 + 30..9 * 60 + 30).contains(&m) => 7,
        m if (9 * 60 + 30..10 * 60).contains(&m) => 4,
        m if (10 * 60..11 * 60).contains(&m) => 2,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(slots: Vec<i32>) -> Day {
        Day { date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(), day_of_month: 10, slots, available_minutes: RangeSetBlaze::new() }
    }

    #[test]
    fn min_block_detection() {
        let d = day(vec![540, 570, 600, 660, 690, 720]);
        assert!(d.has_min_block_at(540, 3));
        assert!(!d.has_min_block_at(600, 3));
        assert!(d.has_min_block_at(660, 3));
    }

    #[test]
    fn zone_classification_and_penalty() {
        assert_eq!(Zone::classify(8 * 60 + 45), Some(Zone::Morning));
        assert_eq!(Zone::classify(12 * 60), Some(Zone::Daytime));
        assert_eq!(Zone::classify(7 * 60), None);
        assert_eq!(morning_penalty(8 * 60 + 45), 7);
        assert_eq!(morning_penalty(9 * 60 + 45), 4);
        assert_eq!(morning_penalty(10 * 60 + 30), 2);
        assert_eq!(morning_penalty(12 * 60), 0);
    }
}
