// SPDX-License-Identifier: MPL-2.0
//! Notification newtypes.
//!
//! Type-safe wrappers for toast capacity and animation timing.

use std::time::Duration;

// =============================================================================
// Bounds
// =============================================================================

/// Active toast capacity bounds. There is no upper limit.
pub mod max_active_bounds {
    /// Minimum number of active toasts.
    pub const MIN: usize = 1;
    /// Default number of active toasts.
    pub const DEFAULT: usize = 3;
}

/// Animation duration bounds (0 to 2000 ms).
pub mod animation_bounds {
    /// Longest accepted animation (milliseconds).
    pub const MAX_MS: u64 = 2000;
    /// Default entry animation (milliseconds).
    pub const DEFAULT_ENTRY_MS: u64 = 300;
    /// Default exit animation (milliseconds).
    pub const DEFAULT_EXIT_MS: u64 = 250;
}

// =============================================================================
// MaxActive
// =============================================================================

/// Maximum number of toasts that may be active at once.
///
/// Zero is raised to one, so a store can never be configured to hold no
/// toasts. Larger values are kept as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxActive(usize);

impl MaxActive {
    /// Creates a new capacity of at least one toast.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.max(max_active_bounds::MIN))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for MaxActive {
    fn default() -> Self {
        Self(max_active_bounds::DEFAULT)
    }
}

// =============================================================================
// AnimationDuration
// =============================================================================

/// Duration of an entry or exit animation, capped at 2 seconds.
///
/// Zero is allowed and makes the corresponding phase change immediate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AnimationDuration(u64);

impl AnimationDuration {
    /// Zero-length animation.
    pub const NONE: Self = Self(0);

    /// Creates a new animation duration from milliseconds, clamping to range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.min(animation_bounds::MAX_MS))
    }

    /// Default slide/fade-in duration.
    #[must_use]
    pub fn default_entry() -> Self {
        Self(animation_bounds::DEFAULT_ENTRY_MS)
    }

    /// Default slide/fade-out duration.
    #[must_use]
    pub fn default_exit() -> Self {
        Self(animation_bounds::DEFAULT_EXIT_MS)
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the value as a [`Duration`].
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Returns true if the animation takes no time.
    #[must_use]
    pub fn is_instant(self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Tests
// =============================================================================
