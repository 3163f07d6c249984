//! Stopwatch for timing animations and benchmarks
//!
//! Misuse (stopping a stopped watch, resetting a running one) is logged and
//! leaves the watch untouched.

use std::time::{Duration, Instant};

use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    start: Option<Instant>,
    stop: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stopwatch that is already running
    pub fn started() -> Self {
        let mut watch = Self::new();
        watch.start();
        watch
    }

    /// Start timing. A stopped watch that was not reset keeps its original
    /// start time, so the stopped interval counts towards `elapsed`.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn stop(&mut self) {
        self.stop_at(Instant::now());
    }

    pub fn reset(&mut self) {
        if self.is_running() {
            warn!("Stopwatch reset while running, ignored");
            return;
        }
        self.start = None;
        self.stop = None;
    }

    pub fn is_running(&self) -> bool {
        self.start.is_some() && self.stop.is_none()
    }

    /// Running: time since start. Stopped: start to stop. Never started: zero.
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    fn start_at(&mut self, now: Instant) {
        if self.start.is_none() {
            self.start = Some(now);
        }
        self.stop = None;
    }

    fn stop_at(&mut self, now: Instant) {
        if !self.is_running() {
            warn!("Stopwatch stopped while not running, ignored");
            return;
        }
        self.stop = Some(now);
    }

    fn elapsed_at(&self, now: Instant) -> Duration {
        match (self.start, self.stop) {
            (Some(start), Some(stop)) => stop.saturating_duration_since(start),
            (Some(start), None) => now.saturating_duration_since(start),
            _ => Duration::ZERO,
        }
    }
}
