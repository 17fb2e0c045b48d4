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

//! The seven-term weighted objective (§4.5). Every term is recomputed from
//! the assignment matrix directly rather than tracked incrementally, which
//! keeps the solver's hill-climbing loop simple at the cost of a full
//! rescan per candidate move; see `solver.rs` for why that trade-off is
//! acceptable at this problem size.

use std::collections::HashMap;

use crate::model::day::{morning_penalty, Zone, ZONES};
use crate::scheduler::model_builder::ScheduleModel;

pub struct Weights {
    pub team_participation: i64,
    pub daily_spread_non_event: i64,
    pub daily_spread_event_day: i64,
    pub monthly_fairness: i64,
    pub morning_burden_spread: i64,
    pub zone_fairness: i64,
    pub idle_slots: i64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            team_participation: 10_000,
            daily_spread_non_event: 100,
            daily_spread_event_day: 100,
            monthly_fairness: 13,
            morning_burden_spread: 10,
            zone_fairness: 10,
            idle_slots: 100_000,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjectiveBreakdown {
    pub team_participation: i64,
    pub daily_spread_non_event: i64,
    pub daily_spread_event_day: i64,
    pub monthly_fairness: i64,
    pub morning_burden_spread: i64,
    pub zone_fairness: i64,
    pub idle_slots: i64,
    pub weighted_total: f64,
}

/// Used-only max/min: when computing the spread of usage across a day's
/// active teams, a team with `y=0` contributes nothing to either bound
/// rather than pulling the minimum down to zero. Filtering to `active`
/// before taking max/min is the direct equivalent of substituting the 0/T
/// sentinel values the design notes describe for a reified CP model.
fn used_only_spread(values: &[u32]) -> i64 {
    if values.len() < 2 {
        return 0;
    }
    let max = *values.iter().max().unwrap();
    let min = *values.iter().min().unwrap();
    (max - min) as i64
}

fn pairwise_proportional_fairness(totals: &HashMap<usize, i64>, pref_count: &HashMap<usize, u32>) -> i64 {
    let teams: Vec<usize> = pref_count.iter().filter(|&(_, &c)| c > 0).map(|(&t, _)| t).collect();
    let mut acc: i64 = 0;
    for i in 0..teams.len() {
        for j in (i + 1)..teams.len() {
            let (a, b) = (teams[i], teams[j]);
            let ta = *totals.get(&a).unwrap_or(&0);
            let tb = *totals.get(&b).unwrap_or(&0);
            let (pa, pb) = (pref_count[&a] as i64, pref_count[&b] as i64);
            acc += (ta * pb - tb * pa).abs();
        }
    }
    acc
}

pub fn compute(model: &ScheduleModel, weights: &Weights) -> ObjectiveBreakdown {
    let pref_count: HashMap<usize, u32> = (0..model.teams.len()).map(|t| (t, model.pref_count(t))).collect();

    let mut team_participation: i64 = 0;
    let mut daily_spread_non_event: i64 = 0;
    let mut daily_spread_event_day: i64 = 0;
    let mut idle_slots: i64 = 0;
    let mut monthly_totals: HashMap<usize, i64> = HashMap::new();
    let mut morning_burden: HashMap<usize, i64> = HashMap::new();
    let mut zone_totals: HashMap<(Zone, usize), i64> = HashMap::new();

    for day_idx in 0..model.days.len() {
        let day = &model.days[day_idx];
        if !day.is_usable() {
            continue;
        }
        let active = model.active_teams(day_idx);
        team_participation += active.len() as i64;
        idle_slots += model.assignment[day_idx].iter().filter(|t| t.is_none()).count() as i64;

        let event_teams = model.event_index.teams_on(day.date);
        let is_full_event_day = model.event_index.is_full_event_day(day.date);

        if !is_full_event_day {
            if event_teams.is_none() {
                let usages: Vec<u32> = active.iter().map(|&t| model.usage(day_idx, t)).collect();
                daily_spread_non_event += used_only_spread(&usages);
            } else {
                let eligible = model.eligible_non_event_teams(day_idx);
                let subset: Vec<u32> = active.iter().filter(|t| eligible.contains(t)).map(|&t| model.usage(day_idx, t)).collect();
                daily_spread_event_day += used_only_spread(&subset);
            }
        }

        for &team in &active {
            let usage = model.usage(day_idx, team) as i64;
            *monthly_totals.entry(team).or_insert(0) += usage;
        }

        for (i, &minute) in day.slots.iter().enumerate() {
            if let Some(team) = model.assignment[day_idx][i] {
                *morning_burden.entry(team).or_insert(0) += morning_penalty(minute);
                if let Some(zone) = Zone::classify(minute) {
                    *zone_totals.entry((zone, team)).or_insert(0) += 1;
                }
            }
        }
    }

    let morning_values: Vec<i64> = (0..model.teams.len()).map(|t| *morning_burden.get(&t).unwrap_or(&0)).collect();
    let morning_burden_spread = if morning_values.len() < 2 {
        0
    } else {
        morning_values.iter().max().unwrap() - morning_values.iter().min().unwrap()
    };

    let monthly_fairness = pairwise_proportional_fairness(&monthly_totals, &pref_count);

    let mut zone_fairness: i64 = 0;
    for zone in ZONES {
        let zone_map: HashMap<usize, i64> = (0..model.teams.len()).map(|t| (t, *zone_totals.get(&(zone, t)).unwrap_or(&0))).collect();
        zone_fairness += pairwise_proportional_fairness(&zone_map, &pref_count);
    }

    let weighted_total = team_participation as f64 * weights.team_participation as f64
        - daily_spread_non_event as f64 * weights.daily_spread_non_event as f64
        - daily_spread_event_day as f64 * weights.daily_spread_event_day as f64
        - monthly_fairness as f64 * weights.monthly_fairness as f64
        - morning_burden_spread as f64 * weights.morning_burden_spread as f64
        - zone_fairness as f64 * weights.zone_fairness as f64
        - idle_slots as f64 * weights.idle_slots as f64;

    ObjectiveBreakdown {
        team_participation,
        daily_spread_non_event,
        daily_spread_event_day,
        monthly_fairness,
        morning_burden_spread,
        zone_fairness,
        idle_slots,
        weighted_total,
    }
}

/// Per-team, per-zone monthly totals, for reporting (e.g. the CLI's
/// summary table) rather than scoring.
pub fn team_zone_totals(model: &ScheduleModel) -> Vec<(String, [i64; 4])> {
    let mut totals: HashMap<usize, [i64; 4]> = HashMap::new();
    for day_idx in 0..model.days.len() {
        let day = &model.days[day_idx];
        for (i, &minute) in day.slots.iter().enumerate() {
            let Some(team) = model.assignment[day_idx][i] else { continue };
            let Some(zone) = Zone::classify(minute) else { continue };
            let zone_idx = ZONES.iter().position(|&z| z == zone).unwrap();
            totals.entry(team).or_insert([0; 4])[zone_idx] += 1;
        }
    }
    (0..model.teams.len()).map(|t| (model.team_name(t).to_string(), *totals.get(&t).unwrap_or(&[0; 4]))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn used_only_spread_ignores_fewer_than_two() {
        assert_eq!(used_only_spread(&[]), 0);
        assert_eq!(used_only_spread(&[4]), 0);
        assert_eq!(used_only_spread(&[4, 6]), 2);
    }
}
