use crate::application::bootstrap::bootstrap_workspace;
use crate::application::fetch_guard::FetchTicket;
use crate::application::timeline_service::TimelineService;
use crate::domain::canvas::{column_offset, draft_slot_at, initial_scroll_offset};
use crate::domain::models::{DayLayout, LayoutConfig};
use crate::infrastructure::error::InfraError;
use crate::infrastructure::layout_cache::InMemoryLayoutCache;
use crate::infrastructure::task_feed::decode_task_feed;
use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use log::{error, info};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct TimelineState {
    config_dir: PathBuf,
    service: TimelineService<InMemoryLayoutCache>,
}

impl TimelineState {
    pub fn new(workspace_root: PathBuf) -> Result<Self, InfraError> {
        let bootstrap = bootstrap_workspace(&workspace_root)?;
        let service = TimelineService::new(
            bootstrap.layout_config,
            Arc::new(InMemoryLayoutCache::default()),
        )
        .with_timezone(bootstrap.timezone);

        info!(
            "event=timeline_state module=commands status=ok timezone={} config_dir={}",
            bootstrap.timezone,
            bootstrap.config_dir.display()
        );

        Ok(Self {
            config_dir: bootstrap.config_dir,
            service,
        })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn command_error(&self, command: &str, error: &InfraError) -> String {
        error!("event=command_failed module=commands command={command} reason={error}");
        error.to_string()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBlockResponse {
    pub task_id: String,
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
    pub column: usize,
    pub total_columns: usize,
    pub continues_before: bool,
    pub continues_after: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayLayoutResponse {
    pub date: String,
    pub blocks: Vec<TimelineBlockResponse>,
    pub content_width: f64,
    pub content_height: f64,
    pub max_columns: usize,
    pub scroll_offset: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DraftSlotResponse {
    pub start: String,
    pub end: String,
}

pub fn layout_day_impl(
    state: &TimelineState,
    date: String,
    payload: String,
) -> Result<DayLayoutResponse, InfraError> {
    let day = parse_date(&date)?;
    let records = decode_task_feed(&payload)?;
    let layout = state.service.layout(day, &records)?;
    Ok(to_response(&layout, state.service.config()))
}

pub fn begin_fetch_impl(state: &TimelineState) -> u64 {
    state.service.begin_fetch().value()
}

/// Returns `Ok(None)` when the fetch identified by `ticket` has been superseded.
pub fn complete_fetch_impl(
    state: &TimelineState,
    ticket: u64,
    date: String,
    payload: String,
) -> Result<Option<DayLayoutResponse>, InfraError> {
    let day = parse_date(&date)?;
    let records = decode_task_feed(&payload)?;
    let layout = state
        .service
        .complete_fetch(FetchTicket::from_raw(ticket), day, &records)?;
    Ok(layout.map(|layout| to_response(&layout, state.service.config())))
}

pub fn draft_slot_impl(
    state: &TimelineState,
    date: String,
    hour: u32,
    offset_y: f64,
) -> Result<DraftSlotResponse, InfraError> {
    let day = parse_date(&date)?;
    let slot = draft_slot_at(day, hour, offset_y, state.service.config());
    let timezone = state.service.timezone();
    Ok(DraftSlotResponse {
        start: local_to_rfc3339(slot.start, timezone)?,
        end: local_to_rfc3339(slot.end, timezone)?,
    })
}

fn to_response(layout: &DayLayout, config: &LayoutConfig) -> DayLayoutResponse {
    DayLayoutResponse {
        date: layout.date.to_string(),
        blocks: layout
            .blocks
            .iter()
            .map(|block| TimelineBlockResponse {
                task_id: block.source_id.clone(),
                top: block.top,
                height: block.height,
                left: column_offset(block.column, config),
                width: config.column_width_pixels,
                column: block.column,
                total_columns: block.total_columns,
                continues_before: block.continues_before,
                continues_after: block.continues_after,
            })
            .collect(),
        content_width: layout.extent.width,
        content_height: layout.extent.height,
        max_columns: layout.extent.max_columns,
        scroll_offset: initial_scroll_offset(&layout.blocks, config),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, InfraError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| InfraError::InvalidInput(format!("date must be YYYY-MM-DD: {value}")))
}

fn local_to_rfc3339(value: NaiveDateTime, timezone: Tz) -> Result<String, InfraError> {
    timezone
        .from_local_datetime(&value)
        .earliest()
        .map(|instant| instant.to_rfc3339())
        .ok_or_else(|| {
            InfraError::InvalidInput(format!("local time {value} does not exist in {timezone}"))
        })
}
