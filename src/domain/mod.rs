// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value types with ZERO external dependencies.
//!
//! This module contains pure domain types and value objects. It has no
//! dependencies on external crates (except `std`) to ensure testability.
//!
//! # Modules
//!
//! - [`diagnostics`]: Diagnostics types ([`HistoryCapacity`](diagnostics::HistoryCapacity))
//! - [`notifications`]: Toast value objects ([`MaxActive`](notifications::MaxActive),
//!   [`AnimationDuration`](notifications::AnimationDuration))

pub mod diagnostics;
pub mod notifications;
