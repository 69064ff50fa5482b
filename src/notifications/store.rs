// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `ToastStore` owns the active toasts (newest first), enforces the
//! capacity limit, and applies every phase change. Timers are not threads:
//! each toast carries its pending deadline, and the store fires whatever is
//! due when it is advanced, either by a host loop calling [`ToastStore::tick`]
//! or by the async driver in [`super::dispatch`].

use super::lifecycle::{Phase, Timing, Transition};
use super::notification::{Notification, ToastAction, ToastId, ToastSpec};
use crate::config::Config;
use crate::diagnostics::{CircularBuffer, DismissCause, LifecycleEvent};
use crate::domain::diagnostics::HistoryCapacity;
use crate::domain::notifications::MaxActive;
use crate::error::{Error, Result};
use std::collections::VecDeque;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Messages a rendering layer sends back to the store.
#[derive(Debug, Clone)]
pub enum Message {
    /// The user pressed the dismiss control of a toast.
    Dismiss(ToastId),
    /// The user pressed the action button of a toast.
    InvokeAction(ToastId),
    /// Fire any phase changes that are due.
    Tick,
}

/// Active toasts and their lifecycles.
#[derive(Debug)]
pub struct ToastStore {
    /// Active notifications (newest first).
    active: VecDeque<Notification>,
    max_active: MaxActive,
    timing: Timing,
    history: CircularBuffer<LifecycleEvent>,
    /// Bumped on every enqueue and phase change.
    revision: u64,
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::with_settings(MaxActive::default(), Timing::default(), HistoryCapacity::default())
    }
}

impl ToastStore {
    /// Creates an empty store from configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let timing = Timing {
            entry: config.entry_animation(),
            exit: config.exit_animation(),
        };
        Self::with_settings(config.max_active(), timing, config.history_capacity())
    }

    #[must_use]
    pub fn with_settings(max_active: MaxActive, timing: Timing, history: HistoryCapacity) -> Self {
        Self {
            active: VecDeque::new(),
            max_active,
            timing,
            history: CircularBuffer::new(history),
            revision: 0,
        }
    }

    /// Adds a notification at the front and returns its id.
    ///
    /// If this pushes the store over capacity, the oldest toasts are removed
    /// immediately, whether or not the user could dismiss them.
    pub fn enqueue(&mut self, spec: ToastSpec) -> ToastId {
        let now = Instant::now();
        let notification = Notification::from_spec(spec, self.timing, now);
        let id = notification.id();

        if notification.severity().is_error_class() {
            warn!(%id, severity = %notification.severity(), title = notification.title(), "toast dispatched");
        } else {
            info!(%id, severity = %notification.severity(), title = notification.title(), "toast dispatched");
        }

        self.revision += 1;
        self.active.push_front(notification);
        while self.active.len() > self.max_active.value() {
            let Some(mut oldest) = self.active.pop_back() else {
                break;
            };
            let transitions = oldest.lifecycle_mut().force_remove(now);
            self.record(oldest.id(), &transitions, DismissCause::Capacity);
        }
        id
    }

    /// Starts dismissing a toast.
    ///
    /// Returns `false` when the id is unknown or dismissal already started,
    /// so a timer and a tap racing on the same toast are harmless.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        self.dismiss_with(id, DismissCause::Programmatic)
    }

    /// Dismisses a toast on behalf of the user-facing dismiss control.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotDismissible`] if the toast hides that control.
    pub fn user_dismiss(&mut self, id: ToastId) -> Result<bool> {
        match self.get(id) {
            None => Ok(false),
            Some(n) if !n.is_dismissible() && n.phase().accepts_dismiss() => {
                Err(Error::NotDismissible(id))
            }
            Some(_) => Ok(self.dismiss_with(id, DismissCause::User)),
        }
    }

    /// Returns the action of a toast that can still be acted on.
    #[must_use]
    pub fn action_for(&self, id: ToastId) -> Option<ToastAction> {
        self.get(id)
            .filter(|n| n.phase().accepts_dismiss())
            .and_then(|n| n.action().cloned())
    }

    /// Dismisses a toast whose action was just invoked.
    ///
    /// Allowed for every toast, including ones the user cannot dismiss.
    pub fn dismiss_after_action(&mut self, id: ToastId) -> bool {
        self.dismiss_with(id, DismissCause::Action)
    }

    /// Dismisses a toast for its action and hands the action back.
    ///
    /// Only the first claim on a toast returns the action, so its callback
    /// runs at most once however many presses arrive.
    #[must_use]
    pub fn claim_action(&mut self, id: ToastId) -> Option<ToastAction> {
        let action = self.action_for(id)?;
        self.dismiss_after_action(id).then_some(action)
    }

    /// Dismisses the toast and runs its action callback.
    ///
    /// Returns `false` if the toast has no action or is already leaving.
    pub fn invoke_action(&mut self, id: ToastId) -> bool {
        let Some(action) = self.claim_action(id) else {
            return false;
        };
        action.invoke();
        true
    }

    /// Removes every toast at once, including ones still entering.
    pub fn dismiss_all(&mut self) {
        let now = Instant::now();
        let drained: Vec<Notification> = self.active.drain(..).collect();
        for mut notification in drained {
            let transitions = notification.lifecycle_mut().force_remove(now);
            self.record(notification.id(), &transitions, DismissCause::ClearAll);
        }
    }

    /// Snapshot of the active toasts, newest first.
    #[must_use]
    pub fn list_active(&self) -> Vec<Notification> {
        self.active.iter().cloned().collect()
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Notification> {
        self.active.iter().find(|n| n.id() == id)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    #[must_use]
    pub fn max_active(&self) -> MaxActive {
        self.max_active
    }

    /// Earliest pending phase change across all toasts.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active
            .iter()
            .filter_map(|n| n.lifecycle().deadline())
            .min()
    }

    /// Fires every phase change due by now.
    pub fn tick(&mut self) -> usize {
        self.advance_to(Instant::now())
    }

    /// Fires every phase change due at or before `now`, earliest first.
    ///
    /// A phase entered along the way arms its own timer from the moment it
    /// was entered, so one call can carry a toast through several phases.
    /// Returns the number of transitions applied.
    pub fn advance_to(&mut self, now: Instant) -> usize {
        let mut applied = 0;
        loop {
            // Oldest toast wins ties.
            let due = self
                .active
                .iter()
                .enumerate()
                .rev()
                .filter_map(|(index, n)| n.lifecycle().pending().map(|timer| (index, timer)))
                .filter(|(_, timer)| timer.deadline <= now)
                .min_by_key(|(_, timer)| timer.deadline);
            let Some((index, timer)) = due else {
                break;
            };

            let Some(notification) = self.active.get_mut(index) else {
                break;
            };
            let id = notification.id();
            let transitions = notification.lifecycle_mut().fire(timer.token);
            let removed = notification.phase() == Phase::Removed;
            for transition in &transitions {
                let cause = if transition.from == Phase::Visible {
                    DismissCause::Timeout
                } else {
                    DismissCause::Animation
                };
                self.record(id, std::slice::from_ref(transition), cause);
            }
            applied += transitions.len();
            if removed {
                self.active.remove(index);
            }
        }
        applied
    }

    /// Handles a message from the rendering layer.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                if let Err(err) = self.user_dismiss(*id) {
                    debug!(%id, error = %err, "ignored dismiss request");
                }
            }
            Message::InvokeAction(id) => {
                self.invoke_action(*id);
            }
            Message::Tick => {
                self.tick();
            }
        }
    }

    /// Recorded phase transitions, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &LifecycleEvent> {
        self.history.iter()
    }

    /// Changes whenever the active list or any phase changes.
    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }

    fn dismiss_with(&mut self, id: ToastId, cause: DismissCause) -> bool {
        let Some(index) = self.active.iter().position(|n| n.id() == id) else {
            return false;
        };
        let now = Instant::now();
        let Some(notification) = self.active.get_mut(index) else {
            return false;
        };
        let transitions = notification.lifecycle_mut().dismiss(now);
        if transitions.is_empty() {
            return false;
        }
        let removed = notification.phase() == Phase::Removed;
        self.record(id, &transitions, cause);
        if removed {
            self.active.remove(index);
        }
        true
    }

    fn record(&mut self, id: ToastId, transitions: &[Transition], cause: DismissCause) {
        if !transitions.is_empty() {
            self.revision += 1;
        }
        for transition in transitions {
            debug!(%id, from = ?transition.from, to = ?transition.to, ?cause, "toast phase change");
            self.history
                .push(LifecycleEvent::new(id, transition.from, transition.to, cause));
        }
    }
}
