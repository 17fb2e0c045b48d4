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

//! Post-hoc diagnostic recomputation of the objective breakdown (§4.8). The
//! solver scores candidate moves with the same `objective::compute` call;
//! this module exists so callers who only have the final model (e.g. the
//! CLI's summary report) don't need to know that.

use crate::scheduler::model_builder::ScheduleModel;
use crate::scheduler::objective::{self, ObjectiveBreakdown, Weights};

pub fn report(model: &ScheduleModel) -> ObjectiveBreakdown {
    objective::compute(model, &Weights::default())
}
