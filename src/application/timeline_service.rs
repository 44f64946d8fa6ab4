use crate::application::day_partition::partition_day;
use crate::application::fetch_guard::{FetchSequence, FetchTicket};
use crate::domain::layout::layout_day;
use crate::domain::models::{DayLayout, DayTask, LayoutConfig, TaskRecord};
use crate::infrastructure::error::InfraError;
use crate::infrastructure::layout_cache::{CachedLayout, LayoutCacheRepository};
use chrono::NaiveDate;
use chrono_tz::Tz;
use log::{debug, warn};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub struct TimelineService<R>
where
    R: LayoutCacheRepository,
{
    config: LayoutConfig,
    timezone: Tz,
    cache_repository: Arc<R>,
    fetch_sequence: FetchSequence,
}

impl<R> TimelineService<R>
where
    R: LayoutCacheRepository,
{
    pub fn new(config: LayoutConfig, cache_repository: Arc<R>) -> Self {
        Self {
            config,
            timezone: Tz::UTC,
            cache_repository,
            fetch_sequence: FetchSequence::default(),
        }
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Lays out `day` from a complete snapshot of records. Results are memoized per
    /// snapshot; a cached entry is only served when its stored snapshot matches, so a hit
    /// returns exactly what a fresh computation would.
    pub fn layout(
        &self,
        day: NaiveDate,
        records: &[TaskRecord],
    ) -> Result<DayLayout, InfraError> {
        let tasks = ordered_snapshot(partition_day(records, day, self.timezone));
        let fingerprint = snapshot_fingerprint(day, &tasks);

        if let Some(cached) = self.cache_repository.get(fingerprint)? {
            if cached.layout.date == day && cached.tasks == tasks {
                debug!(
                    "event=timeline_cache module=service status=hit date={day} fingerprint={fingerprint:016x}"
                );
                return Ok(cached.layout);
            }
            warn!(
                "event=timeline_cache module=service status=collision date={day} fingerprint={fingerprint:016x}"
            );
        }

        let layout = layout_day(&tasks, day, &self.config);
        self.cache_repository.put(
            fingerprint,
            &CachedLayout {
                tasks,
                layout: layout.clone(),
            },
        )?;
        Ok(layout)
    }

    pub fn begin_fetch(&self) -> FetchTicket {
        self.fetch_sequence.begin()
    }

    /// Accepts the records of a finished fetch. Returns `None` when a newer fetch was
    /// started after `ticket`; that snapshot never reaches the layout engine.
    pub fn complete_fetch(
        &self,
        ticket: FetchTicket,
        day: NaiveDate,
        records: &[TaskRecord],
    ) -> Result<Option<DayLayout>, InfraError> {
        if !self.fetch_sequence.is_current(ticket) {
            warn!(
                "event=timeline_fetch module=service status=stale ticket={} latest={}",
                ticket.value(),
                self.fetch_sequence
                    .latest()
                    .map(FetchTicket::value)
                    .unwrap_or(0)
            );
            return Ok(None);
        }
        self.layout(day, records).map(Some)
    }
}

fn ordered_snapshot(mut tasks: Vec<DayTask>) -> Vec<DayTask> {
    tasks.sort_by(|left, right| {
        (left.start, &left.id, left.end).cmp(&(right.start, &right.id, right.end))
    });
    tasks
}

fn snapshot_fingerprint(day: NaiveDate, tasks: &[DayTask]) -> u64 {
    let mut hasher = DefaultHasher::new();
    day.hash(&mut hasher);
    tasks.hash(&mut hasher);
    hasher.finish()
}
