// SPDX-License-Identifier: MPL-2.0
//! Shared dispatch handle for the whole application.
//!
//! [`Toasts`] is created once at startup and cloned into every screen or
//! error handler that needs to show a notification. All clones share one
//! [`ToastStore`] behind a mutex, so enqueue, dismiss and timer firings are
//! applied one at a time. A background task on the tokio runtime sleeps
//! until the next pending phase change and fires it; every mutation wakes it
//! up to recompute its deadline.
//!
//! The rendering layer follows changes through [`Toasts::subscribe`].

use super::notification::{Notification, ToastAction, ToastId, ToastSpec};
use super::severity::Severity;
use super::store::ToastStore;
use crate::config::Config;
use crate::diagnostics::LifecycleEvent;
use crate::error::{Error, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::runtime::Handle;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug)]
struct Shared {
    store: Mutex<ToastStore>,
    wake: Arc<Notify>,
    snapshots: watch::Sender<Vec<Notification>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ToastStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.lock().next_deadline()
    }

    fn publish(&self, store: &ToastStore) {
        self.snapshots.send_replace(store.list_active());
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        // Let the driver notice that the last handle is gone.
        self.wake.notify_one();
    }
}

/// Cheap-to-clone handle to the application's toast store.
#[derive(Debug, Clone)]
pub struct Toasts {
    shared: Arc<Shared>,
}

impl Toasts {
    /// Creates the store from configuration and starts its timer driver.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRuntime`] when called outside a tokio runtime.
    pub fn start(config: &Config) -> Result<Self> {
        Self::with_store(ToastStore::new(config))
    }

    /// Wraps an existing store and starts its timer driver.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRuntime`] when called outside a tokio runtime.
    pub fn with_store(store: ToastStore) -> Result<Self> {
        Self::launch(store).map(|(toasts, _driver)| toasts)
    }

    fn launch(store: ToastStore) -> Result<(Self, JoinHandle<()>)> {
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        let (snapshots, _) = watch::channel(store.list_active());
        let wake = Arc::new(Notify::new());
        let shared = Arc::new(Shared {
            store: Mutex::new(store),
            wake: Arc::clone(&wake),
            snapshots,
        });
        let driver = runtime.spawn(drive(Arc::downgrade(&shared), wake));
        Ok((Self { shared }, driver))
    }

    /// Enqueues a notification and returns its id.
    pub fn dispatch(&self, spec: ToastSpec) -> ToastId {
        self.update(|store| store.enqueue(spec))
    }

    pub fn notify_success(
        &self,
        title: impl Into<String>,
        message: Option<&str>,
        action: Option<ToastAction>,
    ) -> ToastId {
        self.notify(Severity::Success, title, message, action)
    }

    pub fn notify_error(
        &self,
        title: impl Into<String>,
        message: Option<&str>,
        action: Option<ToastAction>,
    ) -> ToastId {
        self.notify(Severity::Error, title, message, action)
    }

    pub fn notify_warning(
        &self,
        title: impl Into<String>,
        message: Option<&str>,
        action: Option<ToastAction>,
    ) -> ToastId {
        self.notify(Severity::Warning, title, message, action)
    }

    pub fn notify_info(
        &self,
        title: impl Into<String>,
        message: Option<&str>,
        action: Option<ToastAction>,
    ) -> ToastId {
        self.notify(Severity::Info, title, message, action)
    }

    /// Shows a safety notice the user cannot swipe away. It leaves through
    /// its action button or its (long) timeout.
    pub fn notify_critical_alert(
        &self,
        title: impl Into<String>,
        message: Option<&str>,
        action: Option<ToastAction>,
    ) -> ToastId {
        self.notify(Severity::CriticalAlert, title, message, action)
    }

    pub fn notify_prescription_reminder(
        &self,
        title: impl Into<String>,
        message: Option<&str>,
        action: Option<ToastAction>,
    ) -> ToastId {
        self.notify(Severity::PrescriptionReminder, title, message, action)
    }

    pub fn notify_appointment_reminder(
        &self,
        title: impl Into<String>,
        message: Option<&str>,
        action: Option<ToastAction>,
    ) -> ToastId {
        self.notify(Severity::AppointmentReminder, title, message, action)
    }

    /// Dismisses a toast programmatically. Idempotent.
    pub fn dismiss(&self, id: ToastId) -> bool {
        self.update(|store| store.dismiss(id))
    }

    /// Dismisses a toast from its dismiss control.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotDismissible`] if the toast hides that control.
    pub fn user_dismiss(&self, id: ToastId) -> Result<bool> {
        self.update(|store| store.user_dismiss(id))
    }

    /// Dismisses a toast, then runs its action callback.
    ///
    /// The dismissal is claimed under the lock, so when several presses race
    /// only one of them runs the callback. The callback itself runs without
    /// the store locked and may dispatch further notifications.
    pub fn invoke_action(&self, id: ToastId) -> bool {
        let Some(action) = self.update(|store| store.claim_action(id)) else {
            return false;
        };
        action.invoke();
        true
    }

    /// Removes every toast at once.
    pub fn dismiss_all(&self) {
        self.update(ToastStore::dismiss_all);
    }

    /// Snapshot of the active toasts, newest first.
    #[must_use]
    pub fn list_active(&self) -> Vec<Notification> {
        self.shared.lock().list_active()
    }

    /// Receives a new snapshot whenever the active toasts change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.shared.snapshots.subscribe()
    }

    /// Recorded phase transitions, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<LifecycleEvent> {
        self.shared.lock().history().cloned().collect()
    }

    fn notify(
        &self,
        severity: Severity,
        title: impl Into<String>,
        message: Option<&str>,
        action: Option<ToastAction>,
    ) -> ToastId {
        self.dispatch(
            ToastSpec::new(severity, title)
                .maybe_message(message)
                .maybe_action(action),
        )
    }

    /// Applies a mutation. Subscribers and the driver are only woken when
    /// the store actually changed.
    fn update<R>(&self, apply: impl FnOnce(&mut ToastStore) -> R) -> R {
        let (result, changed) = {
            let mut store = self.shared.lock();
            let before = store.revision();
            let result = apply(&mut *store);
            let changed = store.revision() != before;
            if changed {
                self.shared.publish(&store);
            }
            (result, changed)
        };
        if changed {
            self.shared.wake.notify_one();
        }
        result
    }
}

/// Fires due phase changes until the last [`Toasts`] handle is dropped.
async fn drive(shared: Weak<Shared>, wake: Arc<Notify>) {
    loop {
        let Some(deadline) = shared.upgrade().map(|shared| shared.next_deadline()) else {
            break;
        };
        match deadline {
            Some(deadline) => {
                tokio::select! {
                    () = tokio::time::sleep_until(deadline) => {}
                    () = wake.notified() => continue,
                }
            }
            None => {
                wake.notified().await;
                continue;
            }
        }

        let Some(shared) = shared.upgrade() else {
            break;
        };
        let mut store = shared.lock();
        if store.tick() > 0 {
            shared.publish(&store);
        }
    }
    debug!("toast driver stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DismissCause;
    use crate::notifications::Phase;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Barrier, OnceLock};
    use std::time::Duration;

    fn sleep_ms(ms: u64) -> tokio::time::Sleep {
        tokio::time::sleep(Duration::from_millis(ms))
    }

    fn phase_of(toasts: &Toasts, id: ToastId) -> Option<Phase> {
        toasts
            .list_active()
            .iter()
            .find(|n| n.id() == id)
            .map(Notification::phase)
    }

    #[test]
    fn start_outside_runtime_fails() {
        assert!(matches!(
            Toasts::start(&Config::default()),
            Err(Error::NoRuntime)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn login_failure_runs_to_removal() {
        let toasts = Toasts::start(&Config::default()).unwrap();
        let id = toasts.notify_error("Login Failed", Some("Invalid credentials"), None);

        let active = toasts.list_active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].severity(), Severity::Error);
        assert_eq!(active[0].duration_ms(), 7_000);
        assert!(active[0].is_dismissible());
        assert_eq!(active[0].phase(), Phase::Entering);
        assert_eq!(active[0].message(), Some("Invalid credentials"));

        sleep_ms(301).await;
        assert_eq!(phase_of(&toasts, id), Some(Phase::Visible));

        sleep_ms(7_000).await;
        assert_eq!(phase_of(&toasts, id), Some(Phase::Dismissing));

        sleep_ms(250).await;
        assert_eq!(phase_of(&toasts, id), None);
        assert!(toasts.list_active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn fourth_toast_evicts_first() {
        let toasts = Toasts::start(&Config::default()).unwrap();
        let first = toasts.notify_info("one", None, None);
        let rest: Vec<_> = ["two", "three", "four"]
            .into_iter()
            .map(|title| toasts.notify_info(title, None, None))
            .collect();

        let ids: Vec<_> = toasts.list_active().iter().map(Notification::id).collect();
        assert_eq!(ids.len(), 3);
        assert!(!ids.contains(&first));
        assert_eq!(ids, vec![rest[2], rest[1], rest[0]]);
    }

    #[tokio::test(start_paused = true)]
    async fn critical_alert_times_out_without_dismiss_control() {
        let toasts = Toasts::start(&Config::default()).unwrap();
        let id = toasts.notify_critical_alert("Medical Emergency", Some("Call 911"), None);

        let snapshot = toasts.list_active();
        assert!(!snapshot[0].shows_dismiss_control());
        assert_eq!(toasts.user_dismiss(id), Err(Error::NotDismissible(id)));

        sleep_ms(300 + 9_999).await;
        assert_eq!(phase_of(&toasts, id), Some(Phase::Visible));

        sleep_ms(2).await;
        assert_eq!(phase_of(&toasts, id), Some(Phase::Dismissing));

        sleep_ms(250).await;
        assert_eq!(phase_of(&toasts, id), None);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_each_change() {
        let toasts = Toasts::start(&Config::default()).unwrap();
        let mut rx = toasts.subscribe();
        assert!(rx.borrow().is_empty());

        let id = toasts.notify_success("Account Created", Some("Welcome"), None);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update()[0].id(), id);

        // Entry animation completion is published by the driver.
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update()[0].phase(), Phase::Visible);
    }

    #[tokio::test(start_paused = true)]
    async fn action_callback_may_dispatch() {
        let toasts = Toasts::start(&Config::default()).unwrap();
        let inner = toasts.clone();
        let action = ToastAction::new("Mark Taken", move || {
            inner.notify_success("Medication logged", None, None);
        });
        let id = toasts.notify_prescription_reminder(
            "Medication Reminder",
            Some("Time to take your morning medication."),
            Some(action),
        );

        assert!(toasts.invoke_action(id));

        let active = toasts.list_active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title(), "Medication logged");
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_all_clears_mid_entry() {
        let toasts = Toasts::start(&Config::default()).unwrap();
        toasts.notify_warning("Incomplete Information", Some("Fill in all fields"), None);
        toasts.notify_appointment_reminder("Appointment Reminder", Some("Tomorrow 2 PM"), None);
        sleep_ms(100).await;

        toasts.dismiss_all();

        assert!(toasts.list_active().is_empty());
        sleep_ms(20_000).await;
        assert!(toasts.list_active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_is_idempotent_across_clones() {
        let toasts = Toasts::start(&Config::default()).unwrap();
        let other = toasts.clone();
        let id = toasts.notify_info("New Features", None, None);
        sleep_ms(301).await;

        assert!(toasts.dismiss(id));
        assert!(!other.dismiss(id));

        let dismissing = toasts
            .history()
            .iter()
            .filter(|e| e.id == id && e.to == Phase::Dismissing)
            .count();
        assert_eq!(dismissing, 1);
    }

    #[tokio::test]
    async fn racing_presses_run_callback_once() {
        let toasts = Toasts::start(&Config::default()).unwrap();
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let id = toasts.notify_critical_alert(
            "Medical Emergency",
            Some("Call 911"),
            Some(ToastAction::new("Call 911", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(50));
            })),
        );

        let barrier = Barrier::new(2);
        let results: Vec<bool> = std::thread::scope(|scope| {
            let presses: Vec<_> = (0..2)
                .map(|_| {
                    let toasts = toasts.clone();
                    let barrier = &barrier;
                    scope.spawn(move || {
                        barrier.wait();
                        toasts.invoke_action(id)
                    })
                })
                .collect();
            presses.into_iter().map(|p| p.join().unwrap()).collect()
        });

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(results.iter().filter(|won| **won).count(), 1);
        assert_eq!(phase_of(&toasts, id), None);
    }

    #[tokio::test(start_paused = true)]
    async fn callback_dismissing_its_own_toast_runs_once() {
        let toasts = Toasts::start(&Config::default()).unwrap();
        let runs = Arc::new(AtomicUsize::new(0));
        let own_id = Arc::new(OnceLock::new());

        let counter = Arc::clone(&runs);
        let slot = Arc::clone(&own_id);
        let inner = toasts.clone();
        let action = ToastAction::new("Mark Taken", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            if let Some(id) = slot.get() {
                inner.dismiss(*id);
            }
        });
        let id = toasts.notify_prescription_reminder("Medication Reminder", None, Some(action));
        own_id.set(id).unwrap();
        sleep_ms(301).await;

        assert!(toasts.invoke_action(id));
        assert!(!toasts.invoke_action(id));
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        let causes: Vec<_> = toasts
            .history()
            .into_iter()
            .filter(|e| e.id == id && e.from == Phase::Visible)
            .map(|e| e.cause)
            .collect();
        assert_eq!(causes, vec![DismissCause::Action]);

        sleep_ms(251).await;
        assert_eq!(phase_of(&toasts, id), None);
    }

    #[tokio::test(start_paused = true)]
    async fn no_op_calls_do_not_publish() {
        let toasts = Toasts::start(&Config::default()).unwrap();
        let info = toasts.notify_info("New Features", None, None);
        let critical = toasts.notify_critical_alert("Medical Emergency", None, None);
        let mut rx = toasts.subscribe();

        assert!(!toasts.dismiss(ToastId::new()));
        assert_eq!(toasts.user_dismiss(critical), Err(Error::NotDismissible(critical)));
        assert!(!toasts.invoke_action(info));
        assert!(!rx.has_changed().unwrap());

        assert!(toasts.dismiss(info));
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn driver_stops_after_last_handle_drops() {
        let (toasts, driver) = Toasts::launch(ToastStore::default()).unwrap();
        let other = toasts.clone();
        toasts.notify_info("New Features", None, None);
        sleep_ms(10).await;

        drop(toasts);
        drop(other);

        let finished = tokio::time::timeout(Duration::from_secs(1), driver).await;
        assert!(matches!(finished, Ok(Ok(()))));
    }

    #[tokio::test(start_paused = true)]
    async fn idle_driver_stops_after_last_handle_drops() {
        let (toasts, driver) = Toasts::launch(ToastStore::default()).unwrap();
        sleep_ms(10).await;

        drop(toasts);

        let finished = tokio::time::timeout(Duration::from_secs(1), driver).await;
        assert!(matches!(finished, Ok(Ok(()))));
    }
}
