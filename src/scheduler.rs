use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Deferred work the session runs once its due time has passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimerEvent {
    SpawnBalloon,
    SpawnPowerUp,
    /// Ends multi-shot if `deadline_ms` is still the current deadline
    MultiShotExpired { deadline_ms: u64 },
}

impl TimerEvent {
    pub fn is_spawn(&self) -> bool {
        matches!(self, TimerEvent::SpawnBalloon | TimerEvent::SpawnPowerUp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due_ms: u64,
    /// Insertion order, keeps events due at the same time first-in first-out
    seq: u64,
    event: TimerEvent,
}

/// Min-queue of timer events ordered by due time
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: u64, event: TimerEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry { due_ms, seq, event }));
    }

    /// Removes and returns the earliest event due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, TimerEvent)> {
        let is_due = self
            .queue
            .peek()
            .is_some_and(|Reverse(entry)| entry.due_ms <= now_ms);
        if !is_due {
            return None;
        }
        let Reverse(entry) = self.queue.pop()?;
        Some((entry.due_ms, entry.event))
    }

    /// Drops every pending event matching `predicate`
    pub fn cancel_where(&mut self, predicate: impl Fn(&TimerEvent) -> bool) {
        self.queue.retain(|Reverse(entry)| !predicate(&entry.event));
    }
}

#[cfg(test)]
impl Scheduler {
    fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(entry)| entry.due_ms)
    }

    fn contains(&self, event: TimerEvent) -> bool {
        self.queue.iter().any(|Reverse(entry)| entry.event == event)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_come_out_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(300, TimerEvent::SpawnPowerUp);
        scheduler.schedule(100, TimerEvent::SpawnBalloon);

        assert_eq!(scheduler.pop_due(50), None);
        assert_eq!(
            scheduler.pop_due(1_000),
            Some((100, TimerEvent::SpawnBalloon))
        );
        assert_eq!(
            scheduler.pop_due(1_000),
            Some((300, TimerEvent::SpawnPowerUp))
        );
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_same_due_time_is_fifo() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(10, TimerEvent::SpawnPowerUp);
        scheduler.schedule(10, TimerEvent::SpawnBalloon);

        assert_eq!(scheduler.pop_due(10), Some((10, TimerEvent::SpawnPowerUp)));
        assert_eq!(scheduler.pop_due(10), Some((10, TimerEvent::SpawnBalloon)));
    }

    #[test]
    fn test_cancel_spawns_keeps_other_events() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(10, TimerEvent::SpawnBalloon);
        scheduler.schedule(20, TimerEvent::SpawnPowerUp);
        scheduler.schedule(30, TimerEvent::MultiShotExpired { deadline_ms: 30 });

        scheduler.cancel_where(TimerEvent::is_spawn);

        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.next_due(), Some(30));
        assert!(scheduler.contains(TimerEvent::MultiShotExpired { deadline_ms: 30 }));
    }
}
