use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one snapshot request; only the most recently issued ticket is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct FetchSequence {
    latest: AtomicU64,
}

impl FetchSequence {
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    pub fn latest(&self) -> Option<FetchTicket> {
        match self.latest.load(Ordering::SeqCst) {
            0 => None,
            value => Some(FetchTicket(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn newer_request_supersedes_older() {
        let sequence = FetchSequence::default();
        assert_eq!(sequence.latest(), None);

        let first = sequence.begin();
        assert!(sequence.is_current(first));

        let second = sequence.begin();
        assert!(second > first);
        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
        assert_eq!(sequence.latest(), Some(second));
    }

    #[test]
    fn unknown_ticket_is_never_current() {
        let sequence = FetchSequence::default();
        sequence.begin();
        assert!(!sequence.is_current(FetchTicket::from_raw(42)));
    }

    #[test]
    fn concurrent_requests_receive_distinct_tickets() {
        let sequence = Arc::new(FetchSequence::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let sequence = Arc::clone(&sequence);
                thread::spawn(move || (0..50).map(|_| sequence.begin().value()).collect::<Vec<_>>())
            })
            .collect();

        let mut tickets: Vec<u64> = handles
            .into_iter()
            .flat_map(|handle| handle.join().expect("worker thread"))
            .collect();
        tickets.sort_unstable();
        tickets.dedup();
        assert_eq!(tickets.len(), 400);
        assert_eq!(sequence.latest().map(FetchTicket::value), Some(400));
    }
}
