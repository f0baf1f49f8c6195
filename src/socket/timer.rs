//! Idle deadline tracking for one connection.

use crate::config::IdleConfig;
use crate::events::IdleEvent;
use std::time::Duration;
use tokio::time::Instant;

/// Far enough into the future to be effectively "never"; keeps
/// `sleep_until` usable when every threshold is disabled without
/// overflowing `Instant + Duration`.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 3600);

struct Axis {
    event: IdleEvent,
    threshold: Duration,
    deadline: Instant,
}

impl Axis {
    fn new(event: IdleEvent, threshold: Duration, now: Instant) -> Self {
        Self {
            event,
            threshold,
            deadline: now + threshold,
        }
    }

    fn rearm(&mut self, now: Instant) {
        self.deadline = now + self.threshold;
    }
}

/// Tracks the reader/writer/all idle windows; each axis fires once per
/// quiet window and re-arms, so a socket that stays quiet keeps producing
/// keepalive pings on the configured cadence.
pub(crate) struct IdleTimer {
    axes: Vec<Axis>,
}

impl IdleTimer {
    pub(crate) fn new(config: &IdleConfig) -> Self {
        let now = Instant::now();
        let mut axes = Vec::with_capacity(3);
        if let Some(threshold) = config.reader {
            axes.push(Axis::new(IdleEvent::ReaderIdle, threshold, now));
        }
        if let Some(threshold) = config.writer {
            axes.push(Axis::new(IdleEvent::WriterIdle, threshold, now));
        }
        if let Some(threshold) = config.all {
            axes.push(Axis::new(IdleEvent::AllIdle, threshold, now));
        }
        Self { axes }
    }

    /// Next instant at which some axis may fire.
    pub(crate) fn next_deadline(&self) -> Instant {
        self.axes
            .iter()
            .map(|axis| axis.deadline)
            .min()
            .unwrap_or_else(|| Instant::now() + FAR_FUTURE)
    }

    /// Inbound traffic observed: the reader and all-idle windows restart.
    pub(crate) fn touch_read(&mut self) {
        self.reset(IdleEvent::ReaderIdle);
        self.reset(IdleEvent::AllIdle);
    }

    /// Outbound traffic observed: the writer and all-idle windows restart.
    pub(crate) fn touch_write(&mut self) {
        self.reset(IdleEvent::WriterIdle);
        self.reset(IdleEvent::AllIdle);
    }

    fn reset(&mut self, event: IdleEvent) {
        let now = Instant::now();
        for axis in self.axes.iter_mut().filter(|a| a.event == event) {
            axis.rearm(now);
        }
    }

    /// Axes whose deadline has passed, in configuration order. Each fired
    /// axis re-arms from now.
    pub(crate) fn expired(&mut self) -> Vec<IdleEvent> {
        let now = Instant::now();
        let mut fired = Vec::new();
        for axis in self.axes.iter_mut() {
            if axis.deadline <= now {
                axis.rearm(now);
                fired.push(axis.event);
            }
        }
        fired
    }
}
