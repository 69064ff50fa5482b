// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Capacity**: How many toasts may be on screen at once
//! - **Animation**: Entry and exit animation durations
//! - **History**: Size of the lifecycle transition history

// ==========================================================================
// Capacity Defaults
// ==========================================================================

/// Default number of toasts that may be active at once.
pub const DEFAULT_MAX_ACTIVE: usize = 3;

/// Minimum number of active toasts. There is no maximum.
pub const MIN_MAX_ACTIVE: usize = 1;

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Default slide/fade-in duration (in milliseconds).
pub const DEFAULT_ENTRY_ANIMATION_MS: u64 = 300;

/// Default slide/fade-out duration (in milliseconds).
pub const DEFAULT_EXIT_ANIMATION_MS: u64 = 250;

/// Longest accepted animation duration (in milliseconds).
pub const MAX_ANIMATION_MS: u64 = 2_000;

// ==========================================================================
// History Defaults
// ==========================================================================

/// Default number of lifecycle transitions kept for diagnostics.
pub const DEFAULT_HISTORY_CAPACITY: usize = 256;

/// Minimum history capacity.
pub const MIN_HISTORY_CAPACITY: usize = 16;

/// Maximum history capacity.
pub const MAX_HISTORY_CAPACITY: usize = 4_096;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_MAX_ACTIVE > 0);
    assert!(DEFAULT_MAX_ACTIVE >= MIN_MAX_ACTIVE);

    assert!(DEFAULT_ENTRY_ANIMATION_MS <= MAX_ANIMATION_MS);
    assert!(DEFAULT_EXIT_ANIMATION_MS <= MAX_ANIMATION_MS);

    assert!(MIN_HISTORY_CAPACITY > 0);
    assert!(DEFAULT_HISTORY_CAPACITY >= MIN_HISTORY_CAPACITY);
    assert!(DEFAULT_HISTORY_CAPACITY <= MAX_HISTORY_CAPACITY);
};
