// SPDX-License-Identifier: MPL-2.0
//! Bounded, timer-drained alert queue.
//!
//! `AlertQueue` is the pure state machine behind an [`AlertStack`](super::AlertStack).
//! It never touches a clock or a runtime by itself: every transition returns
//! what the caller has to do with the single eviction timer (arm it, cancel
//! it, or ignore a stale fire).
//!
//! # Timer model
//!
//! There is one periodic tick of length `living_time`, not a deadline per
//! entry. Whatever entry is the head when the tick fires is evicted, even if
//! it was inserted after the timer was armed.
//!
//! Each arming allocates a fresh [`Epoch`]. A fire carrying an epoch that no
//! longer matches the armed one was cancelled by [`AlertQueue::clear`] and
//! is ignored.

use crate::domain::alert::StackSettings;
use std::collections::VecDeque;
use tokio::time::Instant;

/// Generation token of one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Epoch(u64);

impl Epoch {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// One payload held in the queue.
#[derive(Debug, Clone)]
pub struct Entry<T> {
    /// Insertion order, unique within one queue.
    pub seq: u64,
    /// When the entry was enqueued.
    pub inserted_at: Instant,
    pub payload: T,
}

/// Queue state over ActiveFlag × emptiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Empty, no timer. Initial and terminal state.
    EmptyIdle,
    /// Non-empty without a timer. Only exists inside `insert`; seeing it
    /// at rest means an invariant was broken.
    NonEmptyIdle,
    /// Non-empty with the timer running.
    NonEmptyArmed,
}

/// Outcome of [`AlertQueue::insert`].
#[derive(Debug)]
#[must_use]
pub struct Insertion<T> {
    /// Head entry dropped to make room, if the queue was full.
    pub overflowed: Option<T>,
    /// Timer the caller must arm, if none was running.
    pub arm: Option<Epoch>,
}

/// Outcome of [`AlertQueue::expire`].
#[derive(Debug)]
#[must_use]
pub enum Expiry<T> {
    /// The epoch was cancelled; nothing changed.
    Stale,
    /// The head was evicted.
    Evicted {
        evicted: Entry<T>,
        /// Timer the caller must arm to keep draining.
        rearm: Option<Epoch>,
    },
}

/// Capacity-limited FIFO drained by a single periodic timer.
#[derive(Debug)]
pub struct AlertQueue<T> {
    entries: VecDeque<Entry<T>>,
    settings: StackSettings,
    armed: Option<Epoch>,
    next_epoch: u64,
    next_seq: u64,
}

impl<T> AlertQueue<T> {
    /// Creates an empty, idle queue.
    #[must_use]
    pub fn new(settings: StackSettings) -> Self {
        Self {
            entries: VecDeque::with_capacity(settings.capacity().value()),
            settings,
            armed: None,
            next_epoch: 0,
            next_seq: 0,
        }
    }

    /// Appends `payload`, evicting the head first if the queue is full.
    ///
    /// Overflow eviction leaves the timer untouched. A timer is requested
    /// only when none is armed.
    pub fn insert(&mut self, payload: T) -> Insertion<T> {
        let overflowed = if self.entries.len() >= self.settings.capacity().value() {
            self.entries.pop_front().map(|entry| entry.payload)
        } else {
            None
        };

        self.entries.push_back(Entry {
            seq: self.next_seq,
            inserted_at: Instant::now(),
            payload,
        });
        self.next_seq += 1;

        let arm = if self.armed.is_none() {
            Some(self.arm())
        } else {
            None
        };

        self.check_invariants();
        Insertion { overflowed, arm }
    }

    /// Removes every entry and disarms the timer.
    ///
    /// Returns the epoch that was cancelled. Clearing an empty idle queue
    /// changes nothing and returns `None`.
    pub fn clear(&mut self) -> Option<Epoch> {
        self.entries.clear();
        let cancelled = self.armed.take();
        self.check_invariants();
        cancelled
    }

    /// Timer fire for `epoch`.
    ///
    /// Evicts the current head when `epoch` is the armed one and re-arms if
    /// entries remain. Any other epoch was cancelled and is ignored.
    pub fn expire(&mut self, epoch: Epoch) -> Expiry<T> {
        if self.armed != Some(epoch) {
            return Expiry::Stale;
        }
        self.armed = None;

        debug_assert!(
            !self.entries.is_empty(),
            "timer {epoch:?} armed over an empty queue"
        );
        let Some(head) = self.entries.pop_front() else {
            return Expiry::Stale;
        };

        let rearm = if self.entries.is_empty() {
            None
        } else {
            Some(self.arm())
        };

        self.check_invariants();
        Expiry::Evicted {
            evicted: head,
            rearm,
        }
    }

    fn arm(&mut self) -> Epoch {
        assert!(self.armed.is_none(), "second timer armed over {:?}", self.armed);
        let epoch = Epoch(self.next_epoch);
        self.next_epoch += 1;
        self.armed = Some(epoch);
        epoch
    }

    fn check_invariants(&self) {
        debug_assert!(
            self.entries.len() <= self.settings.capacity().value(),
            "queue over capacity"
        );
        debug_assert_eq!(
            self.entries.is_empty(),
            self.armed.is_none(),
            "timer armed iff queue non-empty"
        );
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match (self.entries.is_empty(), self.armed.is_some()) {
            (true, _) => Phase::EmptyIdle,
            (false, false) => Phase::NonEmptyIdle,
            (false, true) => Phase::NonEmptyArmed,
        }
    }

    /// Returns the armed epoch, if any.
    #[must_use]
    pub fn armed(&self) -> Option<Epoch> {
        self.armed
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn settings(&self) -> StackSettings {
        self.settings
    }

    /// Returns the entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }

    /// Returns the payloads oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|entry| &entry.payload)
    }
}

impl<T: Clone> AlertQueue<T> {
    /// Copies the payloads out, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}
