// SPDX-License-Identifier: MPL-2.0
//! Notification domain types.
//!
//! - [`MaxActive`]: How many toasts may be active at once
//! - [`AnimationDuration`]: Length of an entry or exit animation

mod newtypes;

pub use newtypes::{animation_bounds, max_active_bounds, AnimationDuration, MaxActive};
