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

//! Deterministic tie-break ordering used by the constructive solver when it
//! has to choose which eligible teams get a day. Scarcer teams (fewer
//! preferred days left) go first, so they are not squeezed out by teams
//! that have many other chances this month; ties break on team name so the
//! result never depends on map iteration order.

use std::collections::HashMap;

use indexmap::IndexSet;

use crate::model::team::TeamId;

pub fn sort_by_priority(teams: &mut Vec<usize>, team_names: &IndexSet<TeamId>, pref_count: &HashMap<usize, u32>) {
    teams.sort_by(|&a, &b| {
        let pa = pref_count.get(&a).copied().unwrap_or(0);
        let pb = pref_count.get(&b).copied().unwrap_or(0);
        pa.cmp(&pb).then_with(|| team_names.get_index(a).cmp(&team_names.get_index(b)))
    });
}
