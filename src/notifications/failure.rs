// SPDX-License-Identifier: MPL-2.0
//! Turning failed remote calls into error toasts.
//!
//! Raw backend messages ("Invalid credentials", "fetch failed", "503") are
//! rewritten into text a patient can act on, titled after the flow that
//! failed, and shown through [`Toasts::notify_error`].

use super::dispatch::Toasts;
use super::notification::ToastId;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Message shown when the failure carries nothing usable.
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Code attached to failures with no message at all.
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";

/// Raw fragments (matched case-insensitively, first match wins) and their
/// user-facing replacement.
const FRIENDLY_MESSAGES: &[(&str, &str)] = &[
    ("Network request failed", "Please check your internet connection and try again."),
    ("fetch failed", "Unable to connect to the server. Please check your internet connection."),
    ("timeout", "Request timed out. Please try again."),
    ("Invalid credentials", "The email or password you entered is incorrect."),
    ("User not found", "No account found with this email address."),
    ("Email already exists", "An account with this email already exists."),
    ("Username already exists", "This username is already taken. Please choose another."),
    ("Invalid email", "Please enter a valid email address."),
    ("Password too weak", "Password must be at least 6 characters long."),
    ("Token expired", "Your session has expired. Please sign in again."),
    ("Internal server error", "Something went wrong on our end. Please try again later."),
    ("500", "Server error. Please try again later."),
    ("503", "Service temporarily unavailable. Please try again later."),
];

const RETRYABLE_FRAGMENTS: &[&str] = &[
    "network",
    "timeout",
    "timed out",
    "server error",
    "500",
    "502",
    "503",
    "504",
    "fetch failed",
];

const LOGIN_HINT: &str = "\n\nForgot your password? You can reset it from the sign-in screen.";
const SIGNUP_HINT: &str = "\n\nAlready have an account? Try signing in instead.";

/// Which flow the failed call belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureContext {
    Login,
    Signup,
    ForgotPassword,
    #[default]
    General,
}

impl FailureContext {
    /// Toast title for failures in this flow.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            FailureContext::Login => "Sign In Failed",
            FailureContext::Signup => "Registration Failed",
            FailureContext::ForgotPassword => "Password Reset Failed",
            FailureContext::General => "Request Failed",
        }
    }
}

/// What the backend (or the transport) said about a failed call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFailure {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    /// Form field the backend blamed, if any.
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

impl ApiFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// A failure rewritten for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    pub context: FailureContext,
    pub title: &'static str,
    pub message: String,
    pub code: Option<String>,
    pub field: Option<String>,
    retryable: bool,
}

impl FailureReport {
    #[must_use]
    pub fn from_failure(failure: &ApiFailure, context: FailureContext) -> Self {
        let raw = failure
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty());
        let code = failure
            .code
            .clone()
            .or_else(|| failure.status.map(|s| s.to_string()))
            .or_else(|| raw.is_none().then(|| UNKNOWN_ERROR_CODE.to_string()));

        let raw = raw.unwrap_or(FALLBACK_MESSAGE);
        let mut message = friendly_message(raw).unwrap_or(raw).to_string();
        match context {
            FailureContext::Login if message.contains("Invalid") || message.contains("incorrect") => {
                message.push_str(LOGIN_HINT);
            }
            FailureContext::Signup if message.contains("exists") => {
                message.push_str(SIGNUP_HINT);
            }
            _ => {}
        }

        let retryable = [Some(raw), Some(message.as_str()), code.as_deref()]
            .into_iter()
            .flatten()
            .any(is_retryable_text)
            || failure.status.is_some_and(|s| (500..600).contains(&s));

        Self {
            context,
            title: context.title(),
            message,
            code,
            field: failure.field.clone(),
            retryable,
        }
    }

    /// Whether retrying the same call may succeed (network trouble, 5xx).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }
}

fn friendly_message(raw: &str) -> Option<&'static str> {
    let lowered = raw.to_lowercase();
    FRIENDLY_MESSAGES
        .iter()
        .find(|(pattern, _)| lowered.contains(&pattern.to_lowercase()))
        .map(|(_, friendly)| *friendly)
}

fn is_retryable_text(text: &str) -> bool {
    let lowered = text.to_lowercase();
    RETRYABLE_FRAGMENTS.iter().any(|f| lowered.contains(f))
}

impl Toasts {
    /// Shows a failed remote call as an error toast.
    pub fn report_failure(
        &self,
        failure: &ApiFailure,
        context: FailureContext,
    ) -> (ToastId, FailureReport) {
        let report = FailureReport::from_failure(failure, context);
        warn!(
            ?context,
            code = report.code.as_deref().unwrap_or("-"),
            retryable = report.is_retryable(),
            raw = failure.message.as_deref().unwrap_or(""),
            "remote call failed"
        );
        let id = self.notify_error(report.title, Some(&report.message), None);
        (id, report)
    }
}
