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

//! Deterministic constructive solver plus a bounded local-search repair
//! pass. No CP/MILP solver crate is available anywhere in this codebase's
//! dependency stack (see DESIGN.md); each day's hard constraints are
//! independent of every other day's, so the constructive pass solves them
//! day by day, and the local-search pass spends the remaining time budget
//! hill-climbing the monthly soft objective.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::model::day::Day;
use crate::platform::RunContext;
use crate::scheduler::model_builder::ScheduleModel;
use crate::scheduler::objective::{self, Weights};
use crate::scheduler::sorting::sort_by_priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    Optimal,
    Feasible,
}

pub struct SolverResult {
    pub status: SolverStatus,
}

/// Pins every event's slots to its owning team before the constructive pass
/// runs, implementing the event-pinning hard contract directly rather than
/// as a constraint the constructive pass has to rediscover.
fn apply_event_pins(model: &mut ScheduleModel) {
    for event in model.events.clone() {
        let Some(day_idx) = model.days.iter().position(|d| d.date == event.date) else { continue };
        let Some(team_idx) = model.team_index(&event.team) else { continue };
        let mut t = event.start;
        while t < event.end {
            if let Some(slot_idx) = model.days[day_idx].slot_index(t) {
                model.assignment[day_idx][slot_idx] = Some(team_idx);
            }
            t += 30;
        }
    }
}

/// The free (non-event) slot runs for a day, as `(start_index, length)`
/// pairs into that day's slot list.
fn free_runs(day: &Day, event_covered: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut run_start: Option<usize> = None;
    for i in 0..day.slots.len() {
        if event_covered[i] {
            if let Some(start) = run_start.take() {
                runs.push((start, i - start));
            }
        } else if run_start.is_none() {
            run_start = Some(i);
        }
    }
    if let Some(start) = run_start {
        runs.push((start, day.slots.len() - start));
    }
    runs
}

/// Fills a day's free slots with the eligible, preferring teams, splitting
/// each contiguous free run as evenly as possible among however many teams
/// fit a `min_slots` block in it. Teams already placed earlier the same day
/// (in another free run split by an event) are excluded, preserving the
/// single-block-per-team-per-day contract across the whole day, not just
/// within one run.
///
/// The per-run split only balances usage within each run; on a day split
/// into more than one run, `enforce_cross_run_equity` trims usage back down
/// afterwards so the day-wide equity contract (§4.4 item 9) holds across
/// runs too, not just within one.
fn fill_day(model: &mut ScheduleModel, day_idx: usize, min_slots: u32, ctx: &mut RunContext) {
    let day = model.days[day_idx].clone();
    if !day.is_usable() {
        return;
    }
    if model.event_index.is_full_event_day(day.date) {
        return;
    }

    let event_covered: Vec<bool> = model.assignment[day_idx].iter().map(|t| t.is_some()).collect();
    let runs = free_runs(&day, &event_covered);

    let mut eligible = model.eligible_non_event_teams(day_idx);
    let pref_count: HashMap<usize, u32> = eligible.iter().map(|&t| (t, model.pref_count(t))).collect();
    sort_by_priority(&mut eligible, &model.teams, &pref_count);

    if eligible.is_empty() {
        return;
    }

    let mut used_today: Vec<usize> = Vec::new();
    let mut lone_team_had_no_window = eligible.len() == 1;

    for (run_start, run_len) in runs {
        let remaining: Vec<usize> = eligible.iter().copied().filter(|t| !used_today.contains(t)).collect();
        if remaining.is_empty() {
            continue;
        }
        let n_fit = remaining.len().min(run_len / min_slots as usize);
        if n_fit == 0 {
            continue;
        }
        if n_fit > 0 {
            lone_team_had_no_window = false;
        }

        let chosen = &remaining[..n_fit];
        let base = run_len / n_fit;
        let extra = run_len % n_fit;
        // Smaller chunks first (earlier start), larger chunks last: this
        // directly satisfies the earlier-starter-uses-no-more contract.
        let smaller_count = n_fit - extra;

        let mut offset = run_start;
        for (rank, &team) in chosen.iter().enumerate() {
            let size = if rank < smaller_count { base } else { base + 1 };
            for slot in offset..offset + size {
                model.assignment[day_idx][slot] = Some(team);
            }
            offset += size;
            used_today.push(team);
        }
    }

    if lone_team_had_no_window {
        let team_name = model.team_name(eligible[0]).to_string();
        ctx.warn(format!(
            "day {}: team '{team_name}' is the only one preferring this day but no contiguous block of {min_slots} slots fits its available window",
            day.date
        ));
    }

    enforce_cross_run_equity(model, day_idx, &used_today);
}

/// Trims any team whose usage exceeds `min_usage + 1` (over the teams placed
/// by `fill_day` today) down to that bound, removing the excess from the
/// tail of its contiguous block. A day with a single free run is already
/// within one slot of the minimum by construction, so this is a no-op there;
/// it only does work on a day an event has split into multiple runs, where
/// each run was balanced independently and could otherwise diverge from the
/// others by more than one slot.
fn enforce_cross_run_equity(model: &mut ScheduleModel, day_idx: usize, placed_teams: &[usize]) {
    if placed_teams.len() < 2 {
        return;
    }
    let min_usage = placed_teams.iter().map(|&t| model.usage(day_idx, t)).min().unwrap();
    let target = min_usage + 1;

    for &team in placed_teams {
        let mut to_remove = model.usage(day_idx, team).saturating_sub(target);
        if to_remove == 0 {
            continue;
        }
        for slot in model.assignment[day_idx].iter_mut().rev() {
            if to_remove == 0 {
                break;
            }
            if *slot == Some(team) {
                *slot = None;
                to_remove -= 1;
            }
        }
    }
}

fn construct(model: &mut ScheduleModel, min_slots: u32, ctx: &mut RunContext) {
    apply_event_pins(model);
    for day_idx in 0..model.days.len() {
        fill_day(model, day_idx, min_slots, ctx);
    }
}

/// One hill-climbing move: within a single day's single free run, swap an
/// assigned team for a benched eligible team that was not picked during
/// construction, keeping every chunk's size and position unchanged so the
/// hard constraints stay satisfied by construction.
fn try_random_swap(model: &mut ScheduleModel, day_idx: usize, rng: &mut impl Rng) -> bool {
    let eligible = model.eligible_non_event_teams(day_idx);
    if eligible.len() < 2 {
        return false;
    }
    let active = model.active_teams(day_idx);
    let benched: Vec<usize> = eligible.iter().copied().filter(|t| !active.contains(t)).collect();
    if active.is_empty() || benched.is_empty() {
        return false;
    }

    let victim = active[rng.random_range(0..active.len())];
    let replacement = benched[rng.random_range(0..benched.len())];

    let before = objective::compute(model, &Weights::default()).weighted_total;
    for slot in model.assignment[day_idx].iter_mut() {
        if *slot == Some(victim) {
            *slot = Some(replacement);
        }
    }
    let after = objective::compute(model, &Weights::default()).weighted_total;

    if after > before {
        true
    } else {
        for slot in model.assignment[day_idx].iter_mut() {
            if *slot == Some(replacement) {
                *slot = Some(victim);
            }
        }
        false
    }
}

fn local_search(model: &mut ScheduleModel, budget: Duration, ctx: &mut RunContext) -> SolverStatus {
    if model.days.is_empty() {
        return SolverStatus::Optimal;
    }
    let start = Instant::now();
    let max_stale_rounds = model.days.len() * 8 + 16;
    let mut stale = 0;

    while stale < max_stale_rounds {
        if start.elapsed() >= budget {
            return SolverStatus::Feasible;
        }
        let day_idx = ctx.rng.random_range(0..model.days.len());
        if try_random_swap(model, day_idx, &mut ctx.rng) {
            stale = 0;
        } else {
            stale += 1;
        }
    }
    SolverStatus::Optimal
}

pub fn solve(model: &mut ScheduleModel, min_slots: u32, max_solve_seconds: u64, ctx: &mut RunContext) -> SolverResult {
    construct(model, min_slots, ctx);
    let status = local_search(model, Duration::from_secs(max_solve_seconds), ctx);
    SolverResult { status }
}
