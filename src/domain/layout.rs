use crate::domain::canvas::timeline_extent;
use crate::domain::cluster::partition;
use crate::domain::columns::allocate;
use crate::domain::interval::{normalize, SortedIntervals};
use crate::domain::models::{
    ColumnAssignment, DayLayout, DayTask, LayoutConfig, LayoutResult, TimeInterval,
};
use chrono::NaiveDate;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutScale {
    pub pixels_per_hour: f64,
    pub minimum_block_height: f64,
}

impl From<&LayoutConfig> for LayoutScale {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            pixels_per_hour: config.pixels_per_hour,
            minimum_block_height: config.minimum_block_height_pixels,
        }
    }
}

pub fn assemble(assignment: &ColumnAssignment, scale: &LayoutScale) -> LayoutResult {
    let interval = &assignment.interval;
    let top = f64::from(interval.start_minute) / 60.0 * scale.pixels_per_hour;
    let height = f64::from(interval.duration_minutes()) / 60.0 * scale.pixels_per_hour;

    LayoutResult {
        source_id: interval.source_id.clone(),
        top,
        height: height.max(scale.minimum_block_height),
        column: assignment.column,
        total_columns: assignment.total_columns,
        cluster: assignment.cluster,
        continues_before: interval.continues_before,
        continues_after: interval.continues_after,
    }
}

/// Sorts, clusters, allocates and assembles already-normalized intervals.
pub fn layout_intervals(intervals: Vec<TimeInterval>, scale: &LayoutScale) -> Vec<LayoutResult> {
    let sorted = SortedIntervals::new(intervals);
    partition(&sorted)
        .iter()
        .flat_map(allocate)
        .map(|assignment| assemble(&assignment, scale))
        .collect()
}

/// Lays out one day's task snapshot from scratch.
///
/// The result depends only on the arguments; the order of `tasks` does not matter.
pub fn layout_day(tasks: &[DayTask], day: NaiveDate, config: &LayoutConfig) -> DayLayout {
    let intervals = tasks
        .iter()
        .map(|task| normalize(task, day, config.minimum_duration_minutes))
        .collect();
    let blocks = layout_intervals(intervals, &LayoutScale::from(config));
    let extent = timeline_extent(&blocks, config);

    debug!(
        "event=timeline_layout module=domain status=ok date={} tasks={} clusters={} max_columns={}",
        day,
        tasks.len(),
        blocks.iter().map(|block| block.cluster + 1).max().unwrap_or(0),
        extent.max_columns
    );

    DayLayout {
        date: day,
        blocks,
        extent,
    }
}
