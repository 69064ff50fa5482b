// SPDX-License-Identifier: MPL-2.0
//! Diagnostics newtypes.
//!
//! This module provides type-safe wrappers for diagnostics values,
//! ensuring they are always within valid ranges.

// =============================================================================
// History Capacity Bounds
// =============================================================================

/// History capacity bounds (16 to 4096 transitions).
pub mod history_capacity_bounds {
    /// Minimum history capacity.
    pub const MIN: usize = 16;
    /// Maximum history capacity.
    pub const MAX: usize = 4096;
    /// Default history capacity.
    pub const DEFAULT: usize = 256;
}

// =============================================================================
// HistoryCapacity
// =============================================================================

/// Number of lifecycle transitions retained for diagnostics.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (16–4096 transitions).
///
/// # Example
///
/// ```
/// use care_toast::domain::diagnostics::HistoryCapacity;
///
/// let capacity = HistoryCapacity::new(512);
/// assert_eq!(capacity.value(), 512);
///
/// // Values outside range are clamped
/// assert_eq!(HistoryCapacity::new(50_000).value(), 4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryCapacity(usize);

impl HistoryCapacity {
    /// Creates a new history capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(history_capacity_bounds::MIN, history_capacity_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for HistoryCapacity {
    fn default() -> Self {
        Self(history_capacity_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_capacity_clamps() {
        assert_eq!(HistoryCapacity::new(0).value(), history_capacity_bounds::MIN);
        assert_eq!(
            HistoryCapacity::new(100_000).value(),
            history_capacity_bounds::MAX
        );
    }

    #[test]
    fn history_capacity_default() {
        assert_eq!(
            HistoryCapacity::default().value(),
            history_capacity_bounds::DEFAULT
        );
    }
}
