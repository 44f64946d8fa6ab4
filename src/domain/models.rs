use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use crate::domain::interval::MINUTES_PER_DAY;
use serde::{Deserialize, Serialize};

/// Task as the timeline sees it: an opaque id and two wall-clock timestamps in the
/// rendering timezone. Everything else about the task stays with the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DayTask {
    pub id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Occupied range `[start_minute, end_minute)` measured from local midnight of the
/// rendered day.
///
/// `continues_before` / `continues_after` are set when the task was clipped at the
/// day boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    pub source_id: String,
    pub start_minute: u32,
    pub end_minute: u32,
    pub continues_before: bool,
    pub continues_after: bool,
}

impl TimeInterval {
    pub fn new(source_id: impl Into<String>, start_minute: u32, end_minute: u32) -> Self {
        Self {
            source_id: source_id.into(),
            start_minute,
            end_minute,
            continues_before: false,
            continues_after: false,
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }

    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start_minute < other.end_minute && other.start_minute < self.end_minute
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAssignment {
    pub interval: TimeInterval,
    pub cluster: usize,
    pub column: usize,
    pub total_columns: usize,
}

/// Pixel geometry for one block, keyed by the task id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub source_id: String,
    pub top: f64,
    pub height: f64,
    pub column: usize,
    pub total_columns: usize,
    pub cluster: usize,
    pub continues_before: bool,
    pub continues_after: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineExtent {
    pub width: f64,
    pub height: f64,
    pub max_columns: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayLayout {
    pub date: NaiveDate,
    pub blocks: Vec<LayoutResult>,
    pub extent: TimelineExtent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub pixels_per_hour: f64,
    pub minimum_duration_minutes: u32,
    pub minimum_block_height_pixels: f64,
    pub column_width_pixels: f64,
    pub column_gap_pixels: f64,
    pub gutter_width_pixels: f64,
    pub scroll_top_padding_pixels: f64,
    pub default_task_minutes: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pixels_per_hour: 80.0,
            minimum_duration_minutes: 15,
            minimum_block_height_pixels: 30.0,
            column_width_pixels: 120.0,
            column_gap_pixels: 6.0,
            gutter_width_pixels: 54.0,
            scroll_top_padding_pixels: 40.0,
            default_task_minutes: 30,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_positive(self.pixels_per_hour, "timeline.pixels_per_hour")?;
        validate_positive(self.column_width_pixels, "timeline.column_width_pixels")?;
        validate_non_negative(
            self.minimum_block_height_pixels,
            "timeline.minimum_block_height_pixels",
        )?;
        validate_non_negative(self.column_gap_pixels, "timeline.column_gap_pixels")?;
        validate_non_negative(self.gutter_width_pixels, "timeline.gutter_width_pixels")?;
        validate_non_negative(
            self.scroll_top_padding_pixels,
            "timeline.scroll_top_padding_pixels",
        )?;
        validate_minutes_in_day(
            self.minimum_duration_minutes,
            "timeline.minimum_duration_minutes",
        )?;
        validate_minutes_in_day(self.default_task_minutes, "timeline.default_task_minutes")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Normal,
    High,
    Critical,
}

/// Task as delivered by the remote store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub color: Option<String>,
    pub all_day: bool,
    pub priority: Option<TaskPriority>,
}

impl TaskRecord {
    pub fn validate(&self) -> Result<(), String> {
        validate_non_empty(&self.id, "task.id")?;
        Ok(())
    }
}

fn validate_non_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field_name} must not be empty"));
    }
    Ok(())
}

fn validate_minutes_in_day(value: u32, field_name: &str) -> Result<(), String> {
    if value == 0 || value > MINUTES_PER_DAY {
        return Err(format!("{field_name} must be within 1..={MINUTES_PER_DAY}"));
    }
    Ok(())
}

fn validate_positive(value: f64, field_name: &str) -> Result<(), String> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{field_name} must be a finite number > 0"));
    }
    Ok(())
}

fn validate_non_negative(value: f64, field_name: &str) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{field_name} must be a finite number >= 0"));
    }
    Ok(())
}
