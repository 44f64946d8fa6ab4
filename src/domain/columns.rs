use crate::domain::cluster::Cluster;
use crate::domain::models::{ColumnAssignment, TimeInterval};

/// First-fit column assignment for one cluster.
///
/// Each interval takes the lowest-indexed column whose last occupant ended at or before
/// its start; a new column is opened only when none qualifies. On start-sorted input
/// the resulting column count equals the cluster's peak concurrency.
pub fn allocate(cluster: &Cluster) -> Vec<ColumnAssignment> {
    let mut column_end: Vec<u32> = Vec::new();
    let mut columns = Vec::with_capacity(cluster.len());

    for interval in cluster.intervals() {
        let free = column_end
            .iter()
            .position(|end| interval.start_minute >= *end);
        let column = match free {
            Some(column) => {
                column_end[column] = interval.end_minute;
                column
            }
            None => {
                column_end.push(interval.end_minute);
                column_end.len() - 1
            }
        };
        columns.push(column);
    }

    let total_columns = column_end.len();
    cluster
        .intervals()
        .iter()
        .zip(columns)
        .map(|(interval, column)| ColumnAssignment {
            interval: interval.clone(),
            cluster: cluster.id(),
            column,
            total_columns,
        })
        .collect()
}

/// Largest number of intervals active at the same minute.
///
/// Ends are processed before starts at the same minute, matching the half-open
/// `[start, end)` convention.
pub fn peak_concurrency(intervals: &[TimeInterval]) -> usize {
    let mut events: Vec<(u32, i8)> = Vec::with_capacity(intervals.len() * 2);
    for interval in intervals {
        events.push((interval.start_minute, 1));
        events.push((interval.end_minute, -1));
    }
    events.sort_unstable();

    let mut active: i64 = 0;
    let mut peak: i64 = 0;
    for (_, delta) in events {
        active += i64::from(delta);
        peak = peak.max(active);
    }
    usize::try_from(peak).unwrap_or(0)
}
