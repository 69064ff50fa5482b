// SPDX-License-Identifier: MPL-2.0
use care_toast::config::{self, Config};
use care_toast::diagnostics::DismissCause;
use care_toast::notifications::{
    ApiFailure, FailureContext, Notification, Phase, Severity, ToastAction, ToastId, ToastSpec,
    Toasts,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn phase_of(toasts: &Toasts, id: ToastId) -> Option<Phase> {
    toasts
        .list_active()
        .iter()
        .find(|n| n.id() == id)
        .map(Notification::phase)
}

#[test]
fn test_settings_round_trip_through_file() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("nested").join("settings.toml");

    let saved = Config {
        max_active: Some(5),
        entry_animation_ms: Some(150),
        exit_animation_ms: Some(0),
        history_capacity: Some(64),
    };
    config::save_to_path(&saved, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    assert_eq!(loaded, saved);
    assert_eq!(loaded.max_active().value(), 5);
    assert!(loaded.exit_animation().is_instant());
    assert_eq!(loaded.history_capacity().value(), 64);
}

#[test]
fn test_out_of_range_settings_are_clamped() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        "max_active = 0\nentry_animation_ms = 60000\nhistory_capacity = 1\n",
    )
    .expect("Failed to write settings");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    assert_eq!(loaded.max_active().value(), 1);
    assert_eq!(loaded.entry_animation().as_millis(), 2_000);
    assert_eq!(loaded.history_capacity().value(), 16);
    assert_eq!(loaded.exit_animation().as_millis(), 250);
}

#[test]
fn test_malformed_settings_fall_back_to_defaults() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "max_active = \"three\"").expect("Failed to write settings");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    assert_eq!(loaded, Config::default());
}

#[tokio::test(start_paused = true)]
async fn test_configured_manager_keeps_single_toast() {
    let toasts = Toasts::start(&Config {
        max_active: Some(1),
        exit_animation_ms: Some(0),
        ..Config::default()
    })
    .expect("runtime available");

    let first = toasts.notify_success("Account Created", Some("Welcome!"), None);
    let second = toasts.notify_warning("Incomplete Information", None, None);

    let active = toasts.list_active();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id(), second);
    assert_eq!(phase_of(&toasts, first), None);

    // Visible after 300ms, then 6s of warning before an instant exit.
    sleep_ms(300 + 6_000 + 1).await;
    assert!(toasts.list_active().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_large_configured_capacity_is_honoured() {
    let toasts = Toasts::start(&Config {
        max_active: Some(20),
        ..Config::default()
    })
    .expect("runtime available");

    for i in 0..20 {
        toasts.notify_info(format!("Message {i}"), None, None);
    }
    assert_eq!(toasts.list_active().len(), 20);

    toasts.notify_info("Message 20", None, None);
    let active = toasts.list_active();
    assert_eq!(active.len(), 20);
    assert_eq!(active[0].title(), "Message 20");
    assert_eq!(active[19].title(), "Message 1");
}

#[tokio::test(start_paused = true)]
async fn test_history_records_full_lifecycle() {
    let toasts = Toasts::start(&Config::default()).expect("runtime available");
    let id = toasts.notify_info("New Features", Some("Telemedicine is here"), None);

    sleep_ms(300 + 5_000 + 250 + 1).await;
    assert!(toasts.list_active().is_empty());

    let steps: Vec<_> = toasts
        .history()
        .into_iter()
        .filter(|e| e.id == id)
        .map(|e| (e.from, e.to, e.cause))
        .collect();
    assert_eq!(
        steps,
        vec![
            (Phase::Entering, Phase::Visible, DismissCause::Animation),
            (Phase::Visible, Phase::Dismissing, DismissCause::Timeout),
            (Phase::Dismissing, Phase::Removed, DismissCause::Animation),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_user_dismiss_while_visible_plays_exit() {
    let toasts = Toasts::start(&Config::default()).expect("runtime available");
    let id = toasts.notify_appointment_reminder("Appointment Reminder", Some("Tomorrow at 2:00 PM"), None);

    sleep_ms(400).await;
    assert_eq!(phase_of(&toasts, id), Some(Phase::Visible));

    assert_eq!(toasts.user_dismiss(id), Ok(true));
    assert_eq!(phase_of(&toasts, id), Some(Phase::Dismissing));
    assert_eq!(toasts.user_dismiss(id), Ok(false));

    sleep_ms(251).await;
    assert_eq!(phase_of(&toasts, id), None);
    assert!(toasts
        .history()
        .iter()
        .any(|e| e.id == id && e.cause == DismissCause::User));
}

#[tokio::test(start_paused = true)]
async fn test_action_runs_callback_and_dismisses() {
    let toasts = Toasts::start(&Config::default()).expect("runtime available");
    let taken = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&taken);
    let id = toasts.dispatch(
        ToastSpec::new(Severity::PrescriptionReminder, "Medication Reminder")
            .message("Time to take your morning medication.")
            .action(ToastAction::new("Mark Taken", move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })),
    );

    sleep_ms(500).await;
    assert!(toasts.invoke_action(id));
    assert_eq!(taken.load(Ordering::SeqCst), 1);

    // Second press lands on a toast that is already leaving.
    assert!(!toasts.invoke_action(id));
    assert_eq!(taken.load(Ordering::SeqCst), 1);

    sleep_ms(251).await;
    assert!(toasts.list_active().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_failed_sign_in_becomes_error_toast() {
    let toasts = Toasts::start(&Config::default()).expect("runtime available");

    let (id, report) = toasts.report_failure(
        &ApiFailure::new("fetch failed"),
        FailureContext::Login,
    );
    assert!(report.is_retryable());

    let active = toasts.list_active();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id(), id);
    assert_eq!(active[0].title(), "Sign In Failed");
    assert_eq!(active[0].duration_ms(), 7_000);
    assert_eq!(
        active[0].message(),
        Some("Unable to connect to the server. Please check your internet connection.")
    );
}
