//! Day timeline layout for the planner client.
//!
//! Turns one day's task snapshot into non-overlapping block geometry: vertical
//! position from time of day, and a column / column-count pair so overlapping tasks
//! sit side by side.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::commands::{
    begin_fetch_impl, complete_fetch_impl, draft_slot_impl, layout_day_impl, DayLayoutResponse,
    DraftSlotResponse, TimelineBlockResponse, TimelineState,
};
pub use application::day_partition::partition_day;
pub use application::fetch_guard::{FetchSequence, FetchTicket};
pub use application::timeline_service::TimelineService;
pub use domain::canvas::{column_offset, draft_slot_at, initial_scroll_offset, timeline_extent};
pub use domain::cluster::{partition, Cluster};
pub use domain::columns::{allocate, peak_concurrency};
pub use domain::interval::{
    normalize, SortedIntervals, DEFAULT_MINIMUM_DURATION_MINUTES, MINUTES_PER_DAY,
};
pub use domain::layout::{assemble, layout_day, layout_intervals, LayoutScale};
pub use domain::models::{
    ColumnAssignment, DayLayout, DayTask, DraftSlot, LayoutConfig, LayoutResult, TaskPriority,
    TaskRecord, TimeInterval, TimelineExtent,
};
pub use infrastructure::error::InfraError;
pub use infrastructure::layout_cache::{CachedLayout, InMemoryLayoutCache, LayoutCacheRepository};
pub use infrastructure::task_feed::decode_task_feed;

/// Crate version, exposed for host diagnostics.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
