// SPDX-License-Identifier: MPL-2.0
//! `care_toast` is the notification layer of a patient-facing healthcare app.
//!
//! It queues short-lived toasts (confirmations, errors, medication and
//! appointment reminders, critical alerts), animates them through a small
//! phase machine, caps how many are on screen, and reports every change to
//! whatever renders them.

#![doc(html_root_url = "https://docs.rs/care_toast/0.3.0")]

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod notifications;
