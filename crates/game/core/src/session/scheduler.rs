//! Virtual-clock queue for deferred phase transitions.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::state::PendingTransition;

/// Deferred transitions keyed by due time, then by insertion order.
///
/// The clock only moves when the driver advances it, so tests can step
/// through a battle without real sleeps.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<(Duration, u64), PendingTransition>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, transition: PendingTransition, delay: Duration) {
        let due = self.now + delay;
        self.queue.insert((due, self.next_seq), transition);
        self.next_seq += 1;
    }

    /// Drops every queued transition. The clock keeps its value.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Time left until the earliest transition comes due.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue
            .keys()
            .next()
            .map(|(due, _)| due.saturating_sub(self.now))
    }

    /// Removes the earliest transition due at or before `deadline` and moves
    /// the clock to its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<PendingTransition> {
        let (&(due, _), _) = self.queue.first_key_value()?;
        if due > deadline {
            return None;
        }
        let (_, transition) = self.queue.pop_first()?;
        self.now = self.now.max(due);
        Some(transition)
    }

    /// Moves the clock forward to `deadline` (never backwards).
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn fires_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(PendingTransition::Victory, MS * 20);
        scheduler.schedule(PendingTransition::MonsterTurn, MS * 10);

        assert_eq!(scheduler.next_due(), Some(MS * 10));
        assert_eq!(scheduler.pop_due(MS * 5), None);
        assert_eq!(scheduler.pop_due(MS * 30), Some(PendingTransition::MonsterTurn));
        assert_eq!(scheduler.now(), MS * 10);
        assert_eq!(scheduler.pop_due(MS * 30), Some(PendingTransition::Victory));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(PendingTransition::Victory, Duration::ZERO);
        scheduler.schedule(PendingTransition::MonsterTurn, Duration::ZERO);

        assert_eq!(scheduler.pop_due(Duration::ZERO), Some(PendingTransition::Victory));
        assert_eq!(scheduler.pop_due(Duration::ZERO), Some(PendingTransition::MonsterTurn));
    }

    #[test]
    fn delays_are_relative_to_virtual_now() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(MS * 100);
        scheduler.schedule(PendingTransition::MonsterTurn, MS * 10);

        assert_eq!(scheduler.next_due(), Some(MS * 10));
        scheduler.advance_to(MS * 50);
        assert_eq!(scheduler.now(), MS * 100);
    }
}
