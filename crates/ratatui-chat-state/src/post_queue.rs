use std::time::Duration;
use std::time::Instant;

use tracing::trace;

/// Batches items that arrive close together so they can be applied in one go.
///
/// The first push schedules a flush `delay` after it; later pushes join that batch without
/// moving the deadline. Nothing runs on its own: the event loop calls [`PostQueue::poll`],
/// typically with a poll timeout taken from [`PostQueue::next_deadline`].
#[derive(Clone, Debug)]
pub struct PostQueue<T> {
    delay: Duration,
    pending: Vec<T>,
    deadline: Option<Instant>,
}

impl<T> PostQueue<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Vec::new(),
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn push(&mut self, item: T, now: Instant) {
        self.pending.push(item);
        if self.deadline.is_none() {
            self.deadline = Some(now + self.delay);
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the pending batch is due, zero if it already is.
    pub fn time_until_flush(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Returns the pending batch once its deadline has passed, otherwise nothing.
    pub fn poll(&mut self, now: Instant) -> Vec<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.flush(),
            _ => Vec::new(),
        }
    }

    /// Returns the pending batch immediately.
    pub fn flush(&mut self) -> Vec<T> {
        self.deadline = None;
        let batch = std::mem::take(&mut self.pending);
        if !batch.is_empty() {
            trace!(count = batch.len(), "flushing posted items");
        }
        batch
    }

    /// Drops the pending batch and its schedule.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.pending.clear();
    }
}
