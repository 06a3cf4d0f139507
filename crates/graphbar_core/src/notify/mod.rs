//! Transient validation notifications.
//!
//! # Responsibility
//! - Keep the stack of on-screen notifications, most recent first.
//! - Drive each notification through `Visible -> Hiding -> Removed` on two
//!   fixed timers.
//!
//! # Invariants
//! - Time is supplied by the host (`now_ms`); nothing here reads a clock, so
//!   lifecycles are deterministic under test.
//! - A notification always completes its full lifecycle; there is no early dismissal.
//! - `Removed` notifications are dropped from the stack in the same tick.

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use crate::validation::ValidationError;
use serde::Deserialize;
use std::collections::VecDeque;

/// Stable per-session notification identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(pub u64);

/// Lifecycle phase of one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Visible,
    Hiding,
    Removed,
}

/// Fixed lifecycle durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationTiming {
    /// Time spent fully visible before hiding starts.
    pub hide_after_ms: u64,
    /// Time spent hiding before removal.
    pub remove_after_ms: u64,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            hide_after_ms: 3_000,
            remove_after_ms: 1_000,
        }
    }
}

/// One validation message on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub field_label: String,
    pub error: ValidationError,
    pub message: String,
    pub phase: NotificationPhase,
    created_at_ms: u64,
}

impl Notification {
    /// Display text, e.g. `value >> [NumberOutOfRangeException] ...`.
    pub fn text(&self) -> String {
        format!(
            "{} >> [{}Exception] {}",
            self.field_label,
            self.error.code(),
            self.message
        )
    }

    fn hide_at(&self, timing: &NotificationTiming) -> u64 {
        self.created_at_ms.saturating_add(timing.hide_after_ms)
    }

    fn remove_at(&self, timing: &NotificationTiming) -> u64 {
        self.hide_at(timing).saturating_add(timing.remove_after_ms)
    }

    fn phase_at(&self, now_ms: u64, timing: &NotificationTiming) -> NotificationPhase {
        if now_ms >= self.remove_at(timing) {
            NotificationPhase::Removed
        } else if now_ms >= self.hide_at(timing) {
            NotificationPhase::Hiding
        } else {
            NotificationPhase::Visible
        }
    }
}

/// Phase change produced by `NotificationCenter::tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub id: NotificationId,
    pub phase: NotificationPhase,
}

/// Stack of live notifications.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    timing: NotificationTiming,
    next_id: u64,
    active: VecDeque<Notification>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(NotificationTiming::default())
    }
}

impl NotificationCenter {
    pub fn new(timing: NotificationTiming) -> Self {
        Self {
            timing,
            next_id: 1,
            active: VecDeque::new(),
        }
    }

    /// Pushes a new visible notification on top of the stack.
    pub fn notify(
        &mut self,
        field_label: impl Into<String>,
        error: ValidationError,
        message: impl Into<String>,
        now_ms: u64,
    ) -> &Notification {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        self.active.push_front(Notification {
            id,
            field_label: field_label.into(),
            error,
            message: message.into(),
            phase: NotificationPhase::Visible,
            created_at_ms: now_ms,
        });
        &self.active[0]
    }

    /// Advances every notification to its phase at `now_ms`.
    ///
    /// Returns changes oldest first. A notification that skipped `Hiding`
    /// (host ticked late) reports both transitions.
    pub fn tick(&mut self, now_ms: u64) -> Vec<PhaseChange> {
        let mut changes = Vec::new();
        for notification in self.active.iter_mut().rev() {
            let target = notification.phase_at(now_ms, &self.timing);
            if notification.phase == NotificationPhase::Visible
                && target != NotificationPhase::Visible
            {
                changes.push(PhaseChange {
                    id: notification.id,
                    phase: NotificationPhase::Hiding,
                });
            }
            if target == NotificationPhase::Removed {
                changes.push(PhaseChange {
                    id: notification.id,
                    phase: NotificationPhase::Removed,
                });
            }
            notification.phase = target;
        }
        self.active
            .retain(|notification| notification.phase != NotificationPhase::Removed);
        changes
    }

    /// Earliest future time at which `tick` would change something.
    pub fn next_deadline(&self) -> Option<u64> {
        self.active
            .iter()
            .map(|notification| match notification.phase {
                NotificationPhase::Visible => notification.hide_at(&self.timing),
                _ => notification.remove_at(&self.timing),
            })
            .min()
    }

    /// Live notifications, most recent first.
    pub fn active(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn timing(&self) -> NotificationTiming {
        self.timing
    }
}
