//! Debounced hover tracking.
//!
//! A tooltip is revealed once the pointer has rested on the same target for
//! the show delay, and withdrawn once the pointer has been away from it for
//! the hide delay. Fast sweeps across adjacent targets therefore never
//! flash a tooltip.

use std::time::{Duration, Instant};

/// Hover state for one kind of target.
#[derive(Debug, Clone)]
pub struct Hover<T> {
    show_delay: Duration,
    hide_delay: Duration,
    pointer: Option<(T, Instant)>,
    shown: Option<T>,
    left_at: Option<Instant>,
}

impl<T: Clone + PartialEq> Hover<T> {
    /// Creates a tracker with the given delays.
    #[must_use]
    pub const fn new(show_delay: Duration, hide_delay: Duration) -> Self {
        Self {
            show_delay,
            hide_delay,
            pointer: None,
            shown: None,
            left_at: None,
        }
    }

    /// Records what the pointer is over now.
    pub fn pointer_at(&mut self, target: Option<T>, now: Instant) {
        if self.pointer.as_ref().map(|(t, _)| t) == target.as_ref() {
            return;
        }
        match (&self.shown, &target) {
            (Some(shown), Some(t)) if shown == t => self.left_at = None,
            (Some(_), _) if self.left_at.is_none() => self.left_at = Some(now),
            _ => {}
        }
        self.pointer = target.map(|t| (t, now));
    }

    /// Advances the timers.
    pub fn tick(&mut self, now: Instant) {
        if self
            .left_at
            .is_some_and(|left| now.saturating_duration_since(left) >= self.hide_delay)
        {
            self.shown = None;
            self.left_at = None;
        }
        if let Some((target, since)) = &self.pointer {
            if self.shown.as_ref() != Some(target)
                && now.saturating_duration_since(*since) >= self.show_delay
            {
                self.shown = Some(target.clone());
                self.left_at = None;
            }
        }
    }

    /// The target whose tooltip is visible, if any.
    #[must_use]
    pub const fn visible(&self) -> Option<&T> {
        self.shown.as_ref()
    }

    /// Drops all hover state.
    pub fn reset(&mut self) {
        self.pointer = None;
        self.shown = None;
        self.left_at = None;
    }
}
