// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! This module provides a non-intrusive notification system following
//! toast/snackbar UX patterns. Notifications slide in, stay for a while
//! depending on their severity, and slide out, without blocking the screen
//! that raised them.
//!
//! # Components
//!
//! - [`severity`] - Severity taxonomy and the per-severity defaults table
//! - [`lifecycle`] - Phase state machine driven by cancellable timers
//! - [`notification`] - `Notification`, `ToastSpec` builder and `ToastAction`
//! - [`store`] - `ToastStore` for capacity, ordering and phase changes
//! - [`dispatch`] - `Toasts`, the shared handle every screen uses
//! - [`failure`] - Turning failed remote calls into error toasts
//!
//! # Usage
//!
//! ```no_run
//! use care_toast::config::Config;
//! use care_toast::notifications::Toasts;
//!
//! # async fn run() -> care_toast::error::Result<()> {
//! let toasts = Toasts::start(&Config::default())?;
//! let id = toasts.notify_error("Login Failed", Some("Invalid credentials"), None);
//!
//! // The rendering layer redraws on every change.
//! let mut snapshots = toasts.subscribe();
//! while snapshots.changed().await.is_ok() {
//!     if snapshots.borrow().iter().all(|n| n.id() != id) {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Design Considerations
//!
//! - Toast duration: 5s for success/info, 6-8s for warnings and reminders,
//!   7s for errors, 10s for critical alerts
//! - Max active toasts: 3 by default (the oldest is evicted)
//! - Critical alerts hide the dismiss control; their action button still works

pub mod dispatch;
pub mod failure;
pub mod lifecycle;
pub mod notification;
pub mod severity;
pub mod store;

pub use dispatch::Toasts;
pub use failure::{ApiFailure, FailureContext, FailureReport};
pub use lifecycle::{Phase, Timing};
pub use notification::{Notification, ToastAction, ToastId, ToastSpec};
pub use severity::{ColorRole, Presentation, Severity, SeverityDefaults};
pub use store::{Message as ToastMessage, ToastStore};
