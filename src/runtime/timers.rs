//! One-shot window timers

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use crate::window::WindowId;

/// Pending timers ordered by deadline, then by scheduling order
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<(Instant, u64, WindowId)>>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline: Instant, window: WindowId) {
        self.seq += 1;
        self.heap.push(Reverse((deadline, self.seq, window)));
    }

    pub fn schedule_after(&mut self, now: Instant, delay: Duration, window: WindowId) {
        self.schedule(now + delay, window);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse((deadline, _, _))| *deadline)
    }

    /// Remove and return every timer due at `now`, earliest first
    pub fn pop_expired(&mut self, now: Instant) -> Vec<WindowId> {
        let mut expired = Vec::new();
        while let Some(Reverse((deadline, _, window))) = self.heap.peek() {
            if *deadline > now {
                break;
            }
            expired.push(*window);
            self.heap.pop();
        }
        expired
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
