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

//! Expands a month's worth of availability windows into per-day slot lists,
//! pruning any day that cannot host one full minimum-length session.

use chrono::NaiveDate;
use range_set_blaze::RangeSetBlaze;

use crate::io::time::SLOT_MINUTES;
use crate::model::config::Configuration;
use crate::model::day::Day;

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("valid calendar month");
    let this_month_first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid calendar month");
    (next_month_first - this_month_first).num_days() as u32
}

fn expand_window(start: i32, end: i32) -> Vec<i32> {
    let mut v = Vec::new();
    let mut t = start;
    while t + SLOT_MINUTES <= end {
        v.push(t);
        t += SLOT_MINUTES;
    }
    v
}

/// A day keeps its slot list only if some contiguous run of `min_slots`
/// grid slots exists somewhere within it.
fn has_any_min_block(slots: &[i32], min_slots: u32) -> bool {
    if slots.is_empty() || min_slots == 0 {
        return false;
    }
    slots.windows(min_slots as usize).any(|w| {
        w.iter().enumerate().all(|(k, &m)| m == w[0] + k as i32 * SLOT_MINUTES)
    })
}

/// Builds the ordered day list for the configured month (step 4.1).
pub fn build_days(config: &Configuration) -> Vec<Day> {
    let count = days_in_month(config.year, config.month);
    let mut days = Vec::with_capacity(count as usize);

    for dom in 1..=count {
        let date = NaiveDate::from_ymd_opt(config.year, config.month, dom).expect("day within month bounds");
        let availability = config.availability_for(dom);

        let mut available_minutes = RangeSetBlaze::<i32>::new();
        let mut slots = Vec::new();
        for &(start, end) in &availability.windows {
            available_minutes |= RangeSetBlaze::from_iter([start..=(end - 1)]);
            slots.extend(expand_window(start, end));
        }
        slots.sort_unstable();

        if !has_any_min_block(&slots, config.min_slots) {
            slots.clear();
        }

        days.push(Day { date, day_of_month: dom, slots, available_minutes });
    }

    days
}
