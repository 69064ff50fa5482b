// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording toast lifecycle history.
//!
//! The toast store records every phase transition it performs into a
//! memory-bounded circular buffer. Hosts can read this history to find out
//! why a notification disappeared (timeout, user, capacity eviction...).
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`LifecycleEvent`]: One phase transition of one toast
//! - [`HistoryCapacity`]: How many transitions the history keeps

mod buffer;
mod events;

pub use crate::domain::diagnostics::HistoryCapacity;
pub use buffer::CircularBuffer;
pub use events::{DismissCause, LifecycleEvent};
