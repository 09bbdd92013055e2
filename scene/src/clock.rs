//! Simulated scene clock and wake scheduler.
//!
//! Leg completions and poll timers are pushed onto a min-heap ordered by
//! `(due_ms, sequence)`, so wakes due at the same instant run in the order
//! they were scheduled. Entries are never removed eagerly: a wake whose
//! entity generation moved on, or whose timer was stopped, is simply
//! discarded when it is popped.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::render::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What to do when a heap entry comes due.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Wake {
    /// The current leg of `node` finished, if `generation` still matches.
    Leg { node: NodeId, generation: u64 },
    /// A repeating timer fired.
    Timer { id: TimerId },
}

#[derive(Debug)]
struct Timer {
    request: String,
    interval_ms: u64,
}

#[derive(Debug, Default)]
pub struct Clock {
    now_ms: u64,
    seq: u64,
    heap: BinaryHeap<Reverse<(u64, u64, Wake)>>,
    timers: HashMap<TimerId, Timer>,
    next_timer: u64,
}

impl Clock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Move the clock forward. Never moves backwards.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    pub fn schedule(&mut self, due_ms: u64, wake: Wake) {
        self.seq += 1;
        self.heap.push(Reverse((due_ms, self.seq, wake)));
    }

    /// Pop the earliest wake due at or before `until_ms`.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(u64, Wake)> {
        let Reverse((due, _, _)) = self.heap.peek()?;
        if *due > until_ms {
            return None;
        }
        self.heap.pop().map(|Reverse((due, _, wake))| (due, wake))
    }

    /// Time of the earliest scheduled wake, stale or not.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse((due, _, _))| *due)
    }

    /// Entries still in the heap, including stale ones.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.heap.len()
    }

    /// Start a repeating timer that first fires one interval from now.
    pub fn start_timer(&mut self, request: impl Into<String>, interval_ms: u64) -> TimerId {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        let interval_ms = interval_ms.max(1);
        self.timers.insert(id, Timer { request: request.into(), interval_ms });
        self.schedule(self.now_ms + interval_ms, Wake::Timer { id });
        id
    }

    /// Stop a timer. Returns false if it was not running.
    pub fn stop_timer(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    #[must_use]
    pub fn is_running(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Fire a due timer: reschedule it and return its request type.
    ///
    /// Returns `None` for a stopped timer.
    pub fn fire_timer(&mut self, id: TimerId) -> Option<String> {
        let (request, interval_ms) = self.timers.get(&id).map(|t| (t.request.clone(), t.interval_ms))?;
        self.schedule(self.now_ms + interval_ms, Wake::Timer { id });
        Some(request)
    }
}
