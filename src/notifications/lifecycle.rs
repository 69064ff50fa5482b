// SPDX-License-Identifier: MPL-2.0
//! Per-toast phase state machine.
//!
//! A toast moves through `Entering → Visible → Dismissing → Removed` and never
//! goes back. Each phase that waits on something (entry animation, auto-dismiss
//! delay, exit animation) arms exactly one [`PendingTimer`]. Arming a new timer
//! replaces the previous one, and a timer only fires if its token and the
//! phase it was armed in still match, so a late callback can never move a
//! toast that has already been dismissed.

use crate::domain::notifications::AnimationDuration;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// Visual phase of a toast.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Slide/fade-in animation in progress.
    Entering,
    /// Steady state, auto-dismiss timer (if any) running.
    Visible,
    /// Slide/fade-out animation in progress.
    Dismissing,
    /// Gone. Terminal.
    Removed,
}

impl Phase {
    /// Returns true while a manual dismiss may still start the exit.
    #[must_use]
    pub fn accepts_dismiss(self) -> bool {
        matches!(self, Phase::Entering | Phase::Visible)
    }
}

/// Entry and exit animation lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub entry: AnimationDuration,
    pub exit: AnimationDuration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            entry: AnimationDuration::default_entry(),
            exit: AnimationDuration::default_exit(),
        }
    }
}

/// Identifies one armed timer of one toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(u64);

/// A scheduled phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub token: TimerToken,
    /// Phase the timer was armed in. The timer is stale once this differs
    /// from the current phase.
    pub armed_in: Phase,
    pub deadline: Instant,
}

/// One phase change, reported back to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    pub at: Instant,
}

/// Lifecycle controller of a single toast.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    phase: Phase,
    auto_dismiss: Option<Duration>,
    timing: Timing,
    pending: Option<PendingTimer>,
    next_token: u64,
}

impl Lifecycle {
    /// Starts a lifecycle in [`Phase::Entering`] with the entry animation armed.
    #[must_use]
    pub fn start(auto_dismiss: Option<Duration>, timing: Timing, now: Instant) -> Self {
        let mut lifecycle = Self {
            phase: Phase::Entering,
            auto_dismiss: auto_dismiss.filter(|d| !d.is_zero()),
            timing,
            pending: None,
            next_token: 0,
        };
        lifecycle.arm(now + timing.entry.as_duration());
        lifecycle
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Currently armed timer, if any.
    #[must_use]
    pub fn pending(&self) -> Option<PendingTimer> {
        self.pending
    }

    /// When the next phase change is due.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|timer| timer.deadline)
    }

    /// Fires the timer identified by `token`.
    ///
    /// Returns the transitions performed, which is empty when the token is
    /// stale (replaced, cancelled, or armed in an earlier phase).
    pub fn fire(&mut self, token: TimerToken) -> Vec<Transition> {
        let Some(timer) = self.pending else {
            return Vec::new();
        };
        if timer.token != token || timer.armed_in != self.phase {
            return Vec::new();
        }
        self.pending = None;
        let at = timer.deadline;

        match self.phase {
            Phase::Entering => {
                let transition = self.enter(Phase::Visible, at);
                // The auto-dismiss delay starts from zero once visible.
                if let Some(delay) = self.auto_dismiss {
                    self.arm(at + delay);
                }
                vec![transition]
            }
            Phase::Visible => self.start_exit(at),
            Phase::Dismissing => vec![self.enter(Phase::Removed, at)],
            Phase::Removed => Vec::new(),
        }
    }

    /// Starts dismissal.
    ///
    /// From `Visible` the exit animation is armed. From `Entering` the toast
    /// passes through `Dismissing` and lands in `Removed` immediately. Once
    /// dismissal has started this is a no-op.
    pub fn dismiss(&mut self, now: Instant) -> Vec<Transition> {
        match self.phase {
            Phase::Entering => self.force_remove(now),
            Phase::Visible => self.start_exit(now),
            Phase::Dismissing | Phase::Removed => Vec::new(),
        }
    }

    /// Moves straight to `Removed`, traversing `Dismissing` without delay.
    pub fn force_remove(&mut self, now: Instant) -> Vec<Transition> {
        self.pending = None;
        let mut transitions = Vec::with_capacity(2);
        if self.phase.accepts_dismiss() {
            transitions.push(self.enter(Phase::Dismissing, now));
        }
        if self.phase == Phase::Dismissing {
            transitions.push(self.enter(Phase::Removed, now));
        }
        transitions
    }

    fn start_exit(&mut self, at: Instant) -> Vec<Transition> {
        // Entering Dismissing cancels the auto-dismiss timer.
        self.pending = None;
        let mut transitions = vec![self.enter(Phase::Dismissing, at)];
        if self.timing.exit.is_instant() {
            transitions.push(self.enter(Phase::Removed, at));
        } else {
            self.arm(at + self.timing.exit.as_duration());
        }
        transitions
    }

    fn enter(&mut self, to: Phase, at: Instant) -> Transition {
        debug_assert!(to > self.phase, "phase regression {:?} -> {:?}", self.phase, to);
        let from = self.phase;
        self.phase = to;
        if to == Phase::Removed {
            self.pending = None;
        }
        Transition { from, to, at }
    }

    fn arm(&mut self, deadline: Instant) {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(PendingTimer {
            token,
            armed_in: self.phase,
            deadline,
        });
    }
}
