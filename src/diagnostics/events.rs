// SPDX-License-Identifier: MPL-2.0
//! Lifecycle event types for toast diagnostics.
//!
//! Every phase change a toast goes through is captured as a
//! [`LifecycleEvent`], so hosts can inspect what happened to a notification
//! after it has left the screen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notifications::{Phase, ToastId};

/// What caused a toast to change phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissCause {
    /// Entry or exit animation ran to completion.
    Animation,
    /// The auto-dismiss timer expired.
    Timeout,
    /// The user pressed the dismiss control.
    User,
    /// The user pressed the action button.
    Action,
    /// Application code dismissed the toast.
    Programmatic,
    /// The toast was the oldest one when capacity was exceeded.
    Capacity,
    /// Everything was cleared at once (e.g. sign-out).
    ClearAll,
}

/// A single phase transition of one toast.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleEvent {
    /// Toast that changed phase.
    pub id: ToastId,
    /// Phase before the transition.
    pub from: Phase,
    /// Phase after the transition.
    pub to: Phase,
    /// Why the transition happened.
    pub cause: DismissCause,
    /// Wall-clock time the transition was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl LifecycleEvent {
    /// Creates a new event stamped with the current time.
    #[must_use]
    pub fn new(id: ToastId, from: Phase, to: Phase, cause: DismissCause) -> Self {
        Self {
            id,
            from,
            to,
            cause,
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_cause_serializes_snake_case() {
        #[derive(Serialize)]
        struct Wrapper {
            cause: DismissCause,
        }
        let toml = toml::to_string(&Wrapper {
            cause: DismissCause::ClearAll,
        })
        .expect("serialize");
        assert_eq!(toml.trim(), "cause = \"clear_all\"");
    }

    #[test]
    fn event_keeps_transition_endpoints() {
        let id = ToastId::new();
        let event = LifecycleEvent::new(id, Phase::Visible, Phase::Dismissing, DismissCause::Timeout);
        assert_eq!(event.id, id);
        assert_eq!(event.from, Phase::Visible);
        assert_eq!(event.to, Phase::Dismissing);
        assert!(event.recorded_at <= Utc::now());
    }
}
