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

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

use anyhow::{anyhow, Result};
use gym_scheduler_core::scheduler::materializer::{DayStatus, ScheduleRow, UNASSIGNED_LABEL};
use plotters::backend::BitMapBackend;
use plotters::chart::ChartBuilder;
use plotters::drawing::IntoDrawingArea;
use plotters::element::Rectangle;
use plotters::prelude::full_palette::GREY_600;
use plotters::prelude::{Color, ShapeStyle, BLACK, WHITE};
use plotters::style::RGBColor;

const PALETTE: &[RGBColor] = &[
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(188, 189, 34),
];

fn color_for(label: &str) -> RGBColor {
    let mut hasher = DefaultHasher::new();
    label.hash(&mut hasher);
    PALETTE[(hasher.finish() as usize) % PALETTE.len()]
}

/// Renders `gantt.png`: one column per day of the month, one horizontal bar
/// per assigned block, stacked top (early) to bottom (late) within the day.
pub fn render(out_dir: &Path, schedule: &[ScheduleRow]) -> Result<()> {
    if schedule.is_empty() {
        return Ok(());
    }

    let day_count = schedule.len() as u32;
    let min_minute = 8 * 60;
    let max_minute = 22 * 60;
    let width = 80 + day_count * 24;
    let height = 600;
    let path = out_dir.join("gantt.png");

    let root = BitMapBackend::new(&path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| anyhow!("gantt backend init: {e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption("Monthly allocation", ("sans-serif", 16))
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(1u32..day_count + 1, max_minute..min_minute)
        .map_err(|e| anyhow!("gantt chart build: {e}"))?;

    chart
        .configure_mesh()
        .x_desc("day of month")
        .y_desc("time of day")
        .x_labels(day_count.min(31) as usize)
        .y_label_formatter(&|m: &i32| format!("{:02}:{:02}", m / 60, m % 60))
        .disable_mesh()
        .draw()
        .map_err(|e| anyhow!("gantt mesh draw: {e}"))?;

    for row in schedule {
        let day = row.day_of_month;
        if row.status == DayStatus::Unusable {
            chart
                .draw_series(std::iter::once(Rectangle::new([(day, min_minute), (day + 1, max_minute)], GREY_600.mix(0.2).filled())))
                .map_err(|e| anyhow!("gantt unusable overlay draw: {e}"))?;
            continue;
        }
        for block in &row.blocks {
            if block.label == UNASSIGNED_LABEL {
                continue;
            }
            let style: ShapeStyle = color_for(&block.label).filled();
            chart
                .draw_series(std::iter::once(Rectangle::new([(day, block.start), (day + 1, block.end)], style)))
                .map_err(|e| anyhow!("gantt block draw: {e}"))?;
            chart
                .draw_series(std::iter::once(Rectangle::new([(day, block.start), (day + 1, block.end)], ShapeStyle::from(&BLACK).stroke_width(1))))
                .map_err(|e| anyhow!("gantt outline draw: {e}"))?;
        }
    }

    root.present().map_err(|e| anyhow!("gantt present: {e}"))?;
    Ok(())
}
