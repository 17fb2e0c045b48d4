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

//! Fixed-width minutes-since-midnight everywhere internally; HH:MM conversion
//! only happens here, at the I/O boundary.

use std::fmt;

#[derive(Debug, Clone)]
pub struct TimeParseError(pub String);

impl fmt::Display for TimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid HH:MM time string: {}", self.0)
    }
}

impl std::error::Error for TimeParseError {}

pub const SLOT_MINUTES: i32 = 30;

pub fn parse_hhmm(s: &str) -> Result<i32, TimeParseError> {
    let (h, m) = s.split_once(':').ok_or_else(|| TimeParseError(s.to_string()))?;
    let h: i32 = h.parse().map_err(|_| TimeParseError(s.to_string()))?;
    let m: i32 = m.parse().map_err(|_| TimeParseError(s.to_string()))?;
    if !(0..=24).contains(&h) || !(0..60).contains(&m) || (h == 24 && m != 0) {
        return Err(TimeParseError(s.to_string()));
    }
    Ok(h * 60 + m)
}

pub fn format_hhmm(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

pub fn is_on_grid(minutes: i32) -> bool {
    minutes % SLOT_MINUTES == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        assert_eq!(parse_hhmm("18:30").unwrap(), 18 * 60 + 30);
        assert_eq!(format_hhmm(18 * 60 + 30), "18:30");
        assert_eq!(parse_hhmm("24:00").unwrap(), 1440);
    }

    #[test]
    fn rejects_misaligned_or_malformed() {
        assert!(parse_hhmm("18:15").is_ok());
        assert!(!is_on_grid(parse_hhmm("18:15").unwrap()));
        assert!(parse_hhmm("nonsense").is_err());
        assert!(parse_hhmm("25:00").is_err());
    }
}
