use super::types::{Dispatch, SimTime};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug)]
pub struct ScheduledActivity {
    pub time: SimTime,
    pub sequence_num: u64,
    pub dispatch: Dispatch,
}

impl PartialEq for ScheduledActivity {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.sequence_num == other.sequence_num
    }
}

impl Eq for ScheduledActivity {}

impl PartialOrd for ScheduledActivity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledActivity {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.sequence_num.cmp(&self.sequence_num))
    }
}

/// Simulated clock plus the heap of suspended activities.
///
/// Entries are keyed by absolute trigger time; the sequence number breaks
/// ties so equal-time activities run in the order they were scheduled.
#[derive(Debug, Default)]
pub struct EventScheduler {
    event_queue: BinaryHeap<ScheduledActivity>,
    sequence_counter: u64,
    current_time: SimTime,
}

impl EventScheduler {
    /// Create a new EventScheduler at time zero
    pub fn new() -> Self {
        Self {
            event_queue: BinaryHeap::new(),
            sequence_counter: 0,
            current_time: 0,
        }
    }

    pub fn now(&self) -> SimTime {
        self.current_time
    }

    /// Schedule a dispatch to run after the specified delay
    pub fn schedule_after(&mut self, dispatch: Dispatch, delay: SimTime) {
        self.schedule_at(dispatch, self.current_time.saturating_add(delay));
    }

    /// Schedule a dispatch at an absolute time, never earlier than now
    pub fn schedule_at(&mut self, dispatch: Dispatch, time: SimTime) {
        let scheduled = ScheduledActivity {
            time: time.max(self.current_time),
            sequence_num: self.sequence_counter,
            dispatch,
        };

        self.event_queue.push(scheduled);
        self.sequence_counter += 1;
    }

    /// Pop the earliest activity with trigger time at or before `until`,
    /// moving the clock to its trigger time
    pub fn pop_due(&mut self, until: SimTime) -> Option<ScheduledActivity> {
        match self.event_queue.peek() {
            Some(next) if next.time <= until => {
                let scheduled = self.event_queue.pop()?;
                self.current_time = scheduled.time;
                Some(scheduled)
            }
            _ => None,
        }
    }

    /// Move the clock forward without running anything
    pub fn settle(&mut self, until: SimTime) {
        self.current_time = self.current_time.max(until);
    }

    /// Check if there are any activities remaining in the queue
    pub fn has_events(&self) -> bool {
        !self.event_queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.event_queue.len()
    }

    /// Trigger time of the earliest pending activity
    pub fn peek_next_time(&self) -> Option<SimTime> {
        self.event_queue.peek().map(|scheduled| scheduled.time)
    }
}
