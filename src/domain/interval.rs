use crate::domain::models::{DayTask, TimeInterval};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const MINUTES_PER_DAY: u32 = 24 * 60;
pub const DEFAULT_MINIMUM_DURATION_MINUTES: u32 = 15;

/// Converts a task into minute offsets on `day`, enforcing a minimum visible duration.
///
/// Inverted or zero-length tasks are not rejected; the floor turns them into a block of
/// `minimum_duration_minutes`. Timestamps outside `day` are clipped to the day boundary
/// and flagged on the interval.
pub fn normalize(task: &DayTask, day: NaiveDate, minimum_duration_minutes: u32) -> TimeInterval {
    let start_minute = minute_of_day(task.start, day).min(MINUTES_PER_DAY - 1);
    let end_minute = minute_of_day(task.end, day)
        .max(start_minute.saturating_add(minimum_duration_minutes.max(1)));
    let next_midnight = day.succ_opt().map(|next| next.and_time(NaiveTime::MIN));

    TimeInterval {
        source_id: task.id.clone(),
        start_minute,
        end_minute,
        continues_before: task.start.date() < day,
        continues_after: next_midnight.is_some_and(|midnight| task.end > midnight),
    }
}

fn minute_of_day(timestamp: NaiveDateTime, day: NaiveDate) -> u32 {
    let date = timestamp.date();
    if date < day {
        0
    } else if date > day {
        MINUTES_PER_DAY
    } else {
        timestamp.hour() * 60 + timestamp.minute()
    }
}

/// Intervals in `(start asc, end asc, source_id asc)` order.
///
/// The partitioner and the column allocator both depend on this order, so the only way
/// to build one is through [`SortedIntervals::new`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortedIntervals(Vec<TimeInterval>);

impl SortedIntervals {
    pub fn new(mut intervals: Vec<TimeInterval>) -> Self {
        intervals.sort_by(|left, right| {
            left.start_minute
                .cmp(&right.start_minute)
                .then(left.end_minute.cmp(&right.end_minute))
                .then_with(|| left.source_id.cmp(&right.source_id))
        });
        Self(intervals)
    }

    pub fn as_slice(&self) -> &[TimeInterval] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<TimeInterval> {
        self.0
    }
}
