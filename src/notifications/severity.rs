// SPDX-License-Identifier: MPL-2.0
//! Severity taxonomy for toast notifications.
//!
//! Each severity maps to a fixed set of defaults (auto-dismiss duration,
//! user dismissibility) and presentation hints. The [`SeverityDefaults`]
//! table is the only place these values live.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of notification. Determines default timing and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Operation completed successfully.
    Success,
    /// A remote call or operation failed.
    Error,
    /// Something needs attention but nothing failed.
    Warning,
    /// General information.
    #[default]
    Info,
    /// Safety-relevant notice. Not dismissible by the user by default.
    CriticalAlert,
    /// Medication reminder.
    PrescriptionReminder,
    /// Upcoming consultation reminder.
    AppointmentReminder,
}

/// Color role used by the rendering layer to pick a palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    Success,
    Error,
    Warning,
    Info,
    Emergency,
    Heart,
    Primary,
}

/// Presentation hints for a severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    /// Glyph shown next to the title.
    pub icon: &'static str,
    /// Accent color role.
    pub color_role: ColorRole,
}

/// Default behavior for one severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityDefaults {
    /// Auto-dismiss delay in milliseconds (`0` never auto-dismisses).
    pub duration_ms: u64,
    /// Whether the user-facing dismiss control is shown.
    pub dismissible: bool,
    /// Rendering hints.
    pub presentation: Presentation,
}

const fn defaults(
    duration_ms: u64,
    dismissible: bool,
    icon: &'static str,
    color_role: ColorRole,
) -> SeverityDefaults {
    SeverityDefaults {
        duration_ms,
        dismissible,
        presentation: Presentation { icon, color_role },
    }
}

const SUCCESS: SeverityDefaults = defaults(5_000, true, "✓", ColorRole::Success);
const ERROR: SeverityDefaults = defaults(7_000, true, "⚠", ColorRole::Error);
const WARNING: SeverityDefaults = defaults(6_000, true, "⚠", ColorRole::Warning);
const INFO: SeverityDefaults = defaults(5_000, true, "ℹ", ColorRole::Info);
const CRITICAL_ALERT: SeverityDefaults = defaults(10_000, false, "🚨", ColorRole::Emergency);
const PRESCRIPTION_REMINDER: SeverityDefaults = defaults(8_000, true, "💊", ColorRole::Heart);
const APPOINTMENT_REMINDER: SeverityDefaults = defaults(6_000, true, "📅", ColorRole::Primary);

impl Severity {
    /// Every severity, in declaration order.
    pub const ALL: [Severity; 7] = [
        Severity::Success,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::CriticalAlert,
        Severity::PrescriptionReminder,
        Severity::AppointmentReminder,
    ];

    /// Returns the defaults table entry for this severity.
    #[must_use]
    pub fn defaults(self) -> &'static SeverityDefaults {
        match self {
            Severity::Success => &SUCCESS,
            Severity::Error => &ERROR,
            Severity::Warning => &WARNING,
            Severity::Info => &INFO,
            Severity::CriticalAlert => &CRITICAL_ALERT,
            Severity::PrescriptionReminder => &PRESCRIPTION_REMINDER,
            Severity::AppointmentReminder => &APPOINTMENT_REMINDER,
        }
    }

    /// Returns the rendering hints for this severity.
    #[must_use]
    pub fn presentation(self) -> Presentation {
        self.defaults().presentation
    }

    /// Returns the snake_case name of this severity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::CriticalAlert => "critical_alert",
            Severity::PrescriptionReminder => "prescription_reminder",
            Severity::AppointmentReminder => "appointment_reminder",
        }
    }

    /// Whether failures of this kind deserve a warning in the logs.
    #[must_use]
    pub fn is_error_class(self) -> bool {
        matches!(self, Severity::Error | Severity::CriticalAlert)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        // Legacy names are accepted from older payloads.
        let name = match name.as_str() {
            "medical_alert" => "critical_alert",
            "prescription" => "prescription_reminder",
            "appointment" => "appointment_reminder",
            other => other,
        };
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str() == name)
            .ok_or_else(|| Error::UnknownSeverity(s.to_string()))
    }
}
