use crate::domain::models::{DayTask, TaskRecord};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Selects the records visible on `day` in `tz` and converts them to local wall-clock
/// tasks.
///
/// A record is visible when its `[start, end)` overlaps the local day. Records whose end
/// is not after their start are visible when the start falls inside the day.
pub fn partition_day(records: &[TaskRecord], day: NaiveDate, tz: Tz) -> Vec<DayTask> {
    let day_start = local_midnight(day, tz);
    let day_end = day
        .succ_opt()
        .map(|next| local_midnight(next, tz))
        .unwrap_or(day_start + chrono::Duration::days(1));

    let mut tasks: Vec<DayTask> = records
        .iter()
        .filter(|record| {
            if record.end > record.start {
                record.start < day_end && record.end > day_start
            } else {
                record.start >= day_start && record.start < day_end
            }
        })
        .map(|record| DayTask {
            id: record.id.clone(),
            start: record.start.with_timezone(&tz).naive_local(),
            end: record.end.with_timezone(&tz).naive_local(),
        })
        .collect();
    tasks.sort_by(|left, right| {
        left.start
            .cmp(&right.start)
            .then_with(|| left.id.cmp(&right.id))
    });
    tasks
}

/// First instant of `day` in `tz`. Days that skip midnight for DST start at the first
/// valid local time after it.
fn local_midnight(day: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    if let Some(instant) = tz.from_local_datetime(&midnight).earliest() {
        return instant.with_timezone(&Utc);
    }
    (1..=180)
        .map(|minutes| midnight + chrono::Duration::minutes(minutes))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
        .map(|instant| instant.with_timezone(&Utc))
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight).with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn fixed_time(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value)
            .expect("valid datetime")
            .with_timezone(&Utc)
    }

    fn record(id: &str, start: &str, end: &str) -> TaskRecord {
        TaskRecord {
            id: id.to_string(),
            title: format!("task {id}"),
            start: fixed_time(start),
            end: fixed_time(end),
            color: None,
            all_day: false,
            priority: None,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 16).expect("valid date")
    }

    fn local(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M").expect("valid local time")
    }

    fn ids(tasks: &[DayTask]) -> Vec<&str> {
        tasks.iter().map(|task| task.id.as_str()).collect()
    }

    #[test]
    fn keeps_only_tasks_overlapping_the_day_in_utc() {
        let records = vec![
            record("inside", "2026-02-16T09:00:00Z", "2026-02-16T10:00:00Z"),
            record("before", "2026-02-15T09:00:00Z", "2026-02-15T10:00:00Z"),
            record("after", "2026-02-17T00:00:00Z", "2026-02-17T01:00:00Z"),
            record("overnight", "2026-02-15T23:00:00Z", "2026-02-16T01:00:00Z"),
            record("ends-at-midnight", "2026-02-15T23:00:00Z", "2026-02-16T00:00:00Z"),
        ];
        let tasks = partition_day(&records, day(), Tz::UTC);
        assert_eq!(ids(&tasks), vec!["overnight", "inside"]);
        assert_eq!(tasks[1].start, local("2026-02-16 09:00"));
    }

    #[test]
    fn converts_to_local_wall_clock() {
        let records = vec![
            // 09:00 in Tokyo on the 16th.
            record("tokyo-morning", "2026-02-16T00:00:00Z", "2026-02-16T00:30:00Z"),
            // 08:30 in Tokyo on the 17th.
            record("tokyo-next-day", "2026-02-16T23:30:00Z", "2026-02-17T00:00:00Z"),
        ];
        let tasks = partition_day(&records, day(), chrono_tz::Asia::Tokyo);
        assert_eq!(ids(&tasks), vec!["tokyo-morning"]);
        assert_eq!(tasks[0].start, local("2026-02-16 09:00"));
        assert_eq!(tasks[0].end, local("2026-02-16 09:30"));
    }

    #[test]
    fn inverted_records_are_kept_when_they_start_inside_the_day() {
        let records = vec![
            record("inverted", "2026-02-16T09:00:00Z", "2026-02-16T08:50:00Z"),
            record("zero", "2026-02-16T12:00:00Z", "2026-02-16T12:00:00Z"),
            record("inverted-outside", "2026-02-17T09:00:00Z", "2026-02-16T08:00:00Z"),
        ];
        let tasks = partition_day(&records, day(), Tz::UTC);
        assert_eq!(ids(&tasks), vec!["inverted", "zero"]);
    }

    #[test]
    fn equal_starts_are_ordered_by_id() {
        let records = vec![
            record("b", "2026-02-16T09:00:00Z", "2026-02-16T10:00:00Z"),
            record("a", "2026-02-16T09:00:00Z", "2026-02-16T09:30:00Z"),
        ];
        assert_eq!(ids(&partition_day(&records, day(), Tz::UTC)), vec!["a", "b"]);
    }

    #[test]
    fn dst_day_without_midnight_still_has_a_start() {
        // Santiago skips 00:00-01:00 when DST begins on 2026-09-06.
        let dst_day = NaiveDate::from_ymd_opt(2026, 9, 6).expect("valid date");
        let start = local_midnight(dst_day, chrono_tz::America::Santiago);
        let previous = local_midnight(
            dst_day.pred_opt().expect("previous day"),
            chrono_tz::America::Santiago,
        );
        assert!(start > previous);
        assert!(start - previous <= chrono::Duration::hours(24));
    }
}
