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

use indexmap::IndexSet;

/// Team names are free-form strings supplied by the preferences/events
/// documents; there is no separate registration step.
pub type TeamId = String;

/// Builds the team universe in first-seen order: every preferences key
/// first, then any event-only team appended afterwards. Preserves document
/// order rather than sorting, so downstream tie-breaks stay reproducible
/// from the raw input.
pub fn team_universe<'a>(
    preference_teams: impl Iterator<Item = &'a str>,
    event_teams: impl Iterator<Item = &'a str>,
) -> IndexSet<TeamId> {
    let mut teams: IndexSet<TeamId> = IndexSet::new();
    for t in preference_teams {
        teams.insert(t.to_string());
    }
    for t in event_teams {
        teams.insert(t.to_string());
    }
    teams
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_first_seen_order() {
        let prefs = vec!["b", "a"];
        let events = vec!["a", "c"];
        let universe = team_universe(prefs.into_iter(), events.into_iter());
        assert_eq!(universe.into_iter().collect::<Vec<_>>(), vec!["b".to_string(), "a".to_string(), "c".to_string()]);
    }
}
