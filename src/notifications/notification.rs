// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct, the `ToastSpec` builder
//! callers use to describe a notification, and the optional `ToastAction`.

use super::lifecycle::{Lifecycle, Phase, Timing};
use super::severity::{Presentation, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique notification ID.
    ///
    /// IDs come from a process-wide counter and are never reused.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A button rendered on the toast. Pressing it runs the callback and
/// dismisses the toast.
#[derive(Clone)]
pub struct ToastAction {
    label: String,
    callback: Arc<dyn Fn() + Send + Sync>,
}

impl ToastAction {
    pub fn new(label: impl Into<String>, callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            callback: Arc::new(callback),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Runs the callback.
    pub fn invoke(&self) {
        (self.callback)();
    }
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Description of a notification to dispatch.
///
/// Duration and dismissibility default to the severity's table entry unless
/// overridden here.
#[derive(Debug, Clone)]
pub struct ToastSpec {
    severity: Severity,
    title: String,
    message: Option<String>,
    action: Option<ToastAction>,
    duration_ms: Option<u64>,
    dismissible: Option<bool>,
}

impl ToastSpec {
    pub fn new(severity: Severity, title: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: None,
            action: None,
            duration_ms: None,
            dismissible: None,
        }
    }

    /// Sets the body text. An empty message is treated as no message.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.message = (!message.is_empty()).then_some(message);
        self
    }

    /// Sets the body text when one is given.
    #[must_use]
    pub fn maybe_message(self, message: Option<impl Into<String>>) -> Self {
        match message {
            Some(message) => self.message(message),
            None => self,
        }
    }

    #[must_use]
    pub fn action(mut self, action: ToastAction) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn maybe_action(mut self, action: Option<ToastAction>) -> Self {
        self.action = action;
        self
    }

    /// Overrides the auto-dismiss delay. `0` disables auto-dismiss.
    #[must_use]
    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Overrides whether the user-facing dismiss control is shown.
    #[must_use]
    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }
}

/// A notification owned by the toast store.
#[derive(Debug, Clone)]
pub struct Notification {
    id: ToastId,
    severity: Severity,
    title: String,
    message: Option<String>,
    duration_ms: u64,
    dismissible: bool,
    action: Option<ToastAction>,
    lifecycle: Lifecycle,
}

impl Notification {
    /// Materializes a spec, filling unset fields from the severity defaults.
    pub(crate) fn from_spec(spec: ToastSpec, timing: Timing, now: Instant) -> Self {
        let defaults = spec.severity.defaults();
        let duration_ms = spec.duration_ms.unwrap_or(defaults.duration_ms);
        let auto_dismiss = (duration_ms > 0).then(|| Duration::from_millis(duration_ms));
        Self {
            id: ToastId::new(),
            severity: spec.severity,
            title: spec.title,
            message: spec.message,
            duration_ms,
            dismissible: spec.dismissible.unwrap_or(defaults.dismissible),
            action: spec.action,
            lifecycle: Lifecycle::start(auto_dismiss, timing, now),
        }
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Auto-dismiss delay in milliseconds, `0` if the toast stays until dismissed.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    #[must_use]
    pub fn is_dismissible(&self) -> bool {
        self.dismissible
    }

    #[must_use]
    pub fn action(&self) -> Option<&ToastAction> {
        self.action.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    /// Whether the renderer should draw the dismiss ("✕") control.
    #[must_use]
    pub fn shows_dismiss_control(&self) -> bool {
        self.dismissible && self.phase().accepts_dismiss()
    }

    #[must_use]
    pub fn presentation(&self) -> Presentation {
        self.severity.presentation()
    }

    pub(crate) fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub(crate) fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }
}
