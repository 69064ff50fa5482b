// SPDX-License-Identifier: MPL-2.0
//! Diagnostics domain types.
//!
//! This module provides pure domain types for diagnostics:
//! - [`HistoryCapacity`]: Capacity for the lifecycle transition history

mod newtypes;

pub use newtypes::{history_capacity_bounds, HistoryCapacity};
