//! Follow-to-newest scheduling.
//!
//! The list re-evaluates its follow dependencies on every render. Whenever
//! they change, any pending scroll is cancelled and, if follow mode is on, a
//! new one is scheduled after the follow delay. The delay lets the row grid
//! settle (placeholders swapped for data, rows appended) before the list
//! measures where the end of the stream is.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use procmon_common::types::Record;

/// Opaque fingerprint of the caller's filter criteria.
///
/// The list never interprets it; a change only re-arms the follow scroll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FilterToken(u64);

impl FilterToken {
    /// Fingerprints any hashable filter value.
    #[must_use]
    pub fn of<T: Hash + ?Sized>(filters: &T) -> Self {
        let mut hasher = DefaultHasher::new();
        filters.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Identity of a record sequence as far as follow scheduling cares.
///
/// Append-only streams change length on every insert; a replaced or
/// re-filtered stream changes its first or last index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceIdentity {
    len: usize,
    first: Option<u64>,
    last: Option<u64>,
}

impl SequenceIdentity {
    /// Computes the identity of an optional record slice.
    #[must_use]
    pub fn of(messages: Option<&[Record]>) -> Self {
        let messages = messages.unwrap_or_default();
        Self {
            len: messages.len(),
            first: messages.first().map(|r| r.sequence_index),
            last: messages.last().map(|r| r.sequence_index),
        }
    }
}

/// Everything a follow scroll reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowDeps {
    /// Follow mode flag.
    pub following: bool,
    /// Current record sequence.
    pub sequence: SequenceIdentity,
    /// Caller filter criteria.
    pub filters: FilterToken,
    /// Whether the list has completed its first render.
    pub mounted: bool,
    /// Whether the caller reports a load in flight.
    pub loading: bool,
}

/// One-shot follow timer with cancel-on-change and cancel-on-unmount.
#[derive(Debug, Clone)]
pub struct FollowEffect {
    delay: Duration,
    deps: Option<FollowDeps>,
    deadline: Option<Instant>,
    attached: bool,
    fired: u64,
}

impl FollowEffect {
    /// Creates an idle effect with the given delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deps: None,
            deadline: None,
            attached: false,
            fired: 0,
        }
    }

    /// Re-evaluates the dependencies. Returns `true` if a scroll was scheduled.
    pub fn sync(&mut self, deps: FollowDeps, now: Instant) -> bool {
        if self.deps == Some(deps) {
            return false;
        }
        self.deps = Some(deps);
        if self.deadline.take().is_some() {
            tracing::trace!("follow scroll cancelled by dependency change");
        }
        if !deps.following {
            return false;
        }
        self.deadline = Some(now + self.delay);
        tracing::debug!(delay_ms = self.delay.as_millis(), "follow scroll scheduled");
        true
    }

    /// Marks the scroll target as present.
    pub const fn attach(&mut self) {
        self.attached = true;
    }

    /// Cancels any pending scroll and detaches the target.
    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            tracing::debug!("pending follow scroll cancelled");
        }
        self.deps = None;
        self.attached = false;
    }

    /// Fires the pending scroll if its deadline has passed.
    ///
    /// Returns `true` when the caller should scroll to the end. A timer that
    /// expires while the target is detached is dropped.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if !self.attached {
                    tracing::trace!("follow scroll dropped, target detached");
                    return false;
                }
                self.fired += 1;
                tracing::debug!(fired = self.fired, "follow scroll fired");
                true
            }
            _ => false,
        }
    }

    /// Whether a scroll is scheduled.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Number of scrolls fired so far.
    #[must_use]
    pub const fn fired(&self) -> u64 {
        self.fired
    }
}
