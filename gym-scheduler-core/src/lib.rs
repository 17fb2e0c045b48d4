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

pub mod error;
pub mod io;
pub mod model;
pub mod platform;
pub mod scheduler;

use log::info;

use crate::error::Result;
use crate::io::documents::RawPreferencesDoc;
use crate::model::config::Configuration;
use crate::model::event::RawEventEntry;
use crate::platform::RunContext;
use crate::scheduler::materializer::{ByTeamRow, ScheduleRow};
use crate::scheduler::model_builder::ScheduleModel;
use crate::scheduler::objective::ObjectiveBreakdown;
use crate::scheduler::solver::SolverStatus;

/// Everything a caller needs to write the output artifacts: the solved
/// model itself (for diagnostics/tests), the materialized tables, the
/// objective breakdown, and the terminal solver status.
pub struct AllocationResult {
    pub model: ScheduleModel,
    pub schedule: Vec<ScheduleRow>,
    pub by_team: Vec<ByTeamRow>,
    pub objective: ObjectiveBreakdown,
    pub status: SolverStatus,
}

/// Runs the full pipeline (§2): builds the calendar, validates the raw
/// documents, integrates events, constructs and solves the model, then
/// materializes the result. Mirrors the shape of the teacher's
/// `meta_schedule`/`queues_schedule` orchestration: a thin function that
/// calls each stage in order and hands the context through explicitly.
pub fn run_allocation(
    config: &Configuration,
    raw_preferences: &RawPreferencesDoc,
    raw_events: &[RawEventEntry],
    ctx: &mut RunContext,
) -> Result<AllocationResult> {
    info!("building calendar for {}-{:02}", config.year, config.month);
    let days = scheduler::availability::build_days(config);

    let validated = scheduler::validator::validate(raw_preferences, raw_events, &days, config.year, config.month, ctx);
    let flushed = ctx.flush_warnings();
    let inputs = validated?;
    info!("validation complete: {} team(s), {} event(s), {flushed} warning(s)", inputs.teams.len(), inputs.events.len());

    let event_index = scheduler::events_integrator::build(&inputs.events, &days);
    let mut model = ScheduleModel::new(inputs, days, event_index);

    let result = scheduler::solver::solve(&mut model, config.min_slots, config.max_solve_seconds, ctx);
    info!("solver finished with status {:?}", result.status);

    let (schedule, by_team) = scheduler::materializer::materialize(&model);
    let objective = scheduler::reporter::report(&model);

    Ok(AllocationResult { model, schedule, by_team, objective, status: result.status })
}
