use crate::domain::models::{DraftSlot, LayoutConfig, LayoutResult, TimelineExtent};
use chrono::{Duration, NaiveDate, NaiveTime};

const HOURS_PER_DAY: u32 = 24;

/// Scrollable canvas size for a laid-out day.
///
/// The horizontal extent reserves room for the widest cluster of the day, never fewer
/// than one column.
pub fn timeline_extent(blocks: &[LayoutResult], config: &LayoutConfig) -> TimelineExtent {
    let max_columns = blocks
        .iter()
        .map(|block| block.total_columns)
        .max()
        .unwrap_or(1)
        .max(1);

    TimelineExtent {
        width: config.gutter_width_pixels + max_columns as f64 * column_stride(config),
        height: f64::from(HOURS_PER_DAY) * config.pixels_per_hour,
        max_columns,
    }
}

pub fn column_offset(column: usize, config: &LayoutConfig) -> f64 {
    column as f64 * column_stride(config)
}

fn column_stride(config: &LayoutConfig) -> f64 {
    config.column_width_pixels + config.column_gap_pixels
}

/// Vertical offset that brings the earliest block into view, keeping a little padding
/// above it.
pub fn initial_scroll_offset(blocks: &[LayoutResult], config: &LayoutConfig) -> Option<f64> {
    blocks
        .iter()
        .map(|block| block.top)
        .min_by(f64::total_cmp)
        .map(|top| (top - config.scroll_top_padding_pixels).max(0.0))
}

/// Maps a tap inside an hour row to a new task slot of `default_task_minutes`.
pub fn draft_slot_at(day: NaiveDate, hour: u32, offset_y: f64, config: &LayoutConfig) -> DraftSlot {
    let hour = hour.min(HOURS_PER_DAY - 1);
    let minute = if offset_y.is_finite() {
        (offset_y / config.pixels_per_hour * 60.0).round().clamp(0.0, 59.0) as u32
    } else {
        0
    };
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    let start = day.and_time(time);

    DraftSlot {
        start,
        end: start + Duration::minutes(i64::from(config.default_task_minutes)),
    }
}
