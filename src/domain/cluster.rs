use crate::domain::interval::SortedIntervals;
use crate::domain::models::TimeInterval;

/// Maximal run of intervals connected by temporal overlap.
///
/// Only [`partition`] builds clusters, so members are always in [`SortedIntervals`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    id: usize,
    intervals: Vec<TimeInterval>,
    max_end: u32,
}

impl Cluster {
    fn open(id: usize, interval: &TimeInterval) -> Self {
        Self {
            id,
            intervals: vec![interval.clone()],
            max_end: interval.end_minute,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn intervals(&self) -> &[TimeInterval] {
        &self.intervals
    }

    pub fn start_minute(&self) -> u32 {
        self.intervals
            .first()
            .map(|interval| interval.start_minute)
            .unwrap_or(self.max_end)
    }

    pub fn end_minute(&self) -> u32 {
        self.max_end
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

/// Splits sorted intervals into clusters with a single left-to-right sweep.
///
/// An interval joins the open cluster only when it starts strictly before the cluster's
/// running maximum end; an interval starting exactly at that end seals the cluster.
pub fn partition(intervals: &SortedIntervals) -> Vec<Cluster> {
    let mut clusters = Vec::new();
    let mut open: Option<Cluster> = None;

    for interval in intervals.as_slice() {
        match open.as_mut() {
            Some(cluster) if interval.start_minute < cluster.max_end => {
                cluster.max_end = cluster.max_end.max(interval.end_minute);
                cluster.intervals.push(interval.clone());
            }
            _ => {
                if let Some(sealed) = open.take() {
                    clusters.push(sealed);
                }
                open = Some(Cluster::open(clusters.len(), interval));
            }
        }
    }

    if let Some(sealed) = open {
        clusters.push(sealed);
    }
    clusters
}
