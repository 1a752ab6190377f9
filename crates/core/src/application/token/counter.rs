// Ticket Counter - process-owned source of ticket numbers

use crate::domain::error::Result;
use crate::domain::TicketNumber;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out ticket numbers. Each call to [`TicketCounter::next_ticket`] is a
/// single `fetch_add`, so concurrent callers never observe the same value.
///
/// Owned by the token service; never shared as global state.
#[derive(Debug)]
pub struct TicketCounter {
    next: AtomicU64,
}

impl TicketCounter {
    /// Fresh counter: the first ticket is `T-1`.
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(TicketNumber::FIRST.sequence()),
        }
    }

    /// Continue numbering after the highest ticket already issued.
    pub fn resume_after(last_issued: u64) -> Self {
        Self {
            next: AtomicU64::new(last_issued.saturating_add(1)),
        }
    }

    /// Take the next ticket number.
    pub fn next_ticket(&self) -> Result<TicketNumber> {
        let sequence = self.next.fetch_add(1, Ordering::SeqCst);
        TicketNumber::new(sequence)
    }

    /// Ticket number the next call will hand out (no increment).
    pub fn peek(&self) -> Result<TicketNumber> {
        TicketNumber::new(self.next.load(Ordering::SeqCst))
    }
}

impl Default for TicketCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_tickets_start_at_one() {
        let counter = TicketCounter::new();
        let labels: Vec<String> = (0..3)
            .map(|_| counter.next_ticket().unwrap().to_string())
            .collect();
        assert_eq!(labels, vec!["T-1", "T-2", "T-3"]);
        assert_eq!(counter.peek().unwrap().to_string(), "T-4");
    }

    #[test]
    fn test_resume_after_last_issued() {
        let counter = TicketCounter::resume_after(41);
        assert_eq!(counter.peek().unwrap().sequence(), 42);
        assert_eq!(counter.next_ticket().unwrap().sequence(), 42);

        let empty = TicketCounter::resume_after(0);
        assert_eq!(empty.next_ticket().unwrap(), TicketNumber::FIRST);
    }

    #[test]
    fn test_concurrent_tickets_are_unique_and_gapless() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 250;

        let counter = TicketCounter::new();
        let issued: Vec<u64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        (0..PER_THREAD)
                            .map(|_| counter.next_ticket().unwrap().sequence())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        let total = THREADS * PER_THREAD;
        let unique: HashSet<u64> = issued.iter().copied().collect();
        assert_eq!(unique.len(), total);
        assert_eq!(unique, (1..=total as u64).collect::<HashSet<_>>());
    }
}
