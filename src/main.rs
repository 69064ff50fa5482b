// SPDX-License-Identifier: MPL-2.0
use care_toast::config::{self, Config};
use care_toast::notifications::{Notification, ToastAction, Toasts};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: care_toast [--config PATH] [--max-active N] [--scenario demo|flood]

Plays sample notifications through the toast manager and prints every
change of the active list.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scenario {
    /// One toast of each severity, spaced out like real app traffic.
    Demo,
    /// Ten toasts at once to show capacity eviction.
    Flood,
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "demo" => Ok(Scenario::Demo),
            "flood" => Ok(Scenario::Flood),
            other => Err(format!("unknown scenario '{other}'")),
        }
    }
}

struct Flags {
    config: Option<PathBuf>,
    max_active: Option<usize>,
    scenario: Scenario,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        println!("{USAGE}");
        return Ok(None);
    }
    Ok(Some(Flags {
        config: args.opt_value_from_str("--config")?,
        max_active: args.opt_value_from_str("--max-active")?,
        scenario: args
            .opt_value_from_str("--scenario")?
            .unwrap_or(Scenario::Demo),
    }))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn load_config(flags: &Flags) -> care_toast::error::Result<Config> {
    let mut config = match &flags.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    if flags.max_active.is_some() {
        config.max_active = flags.max_active;
    }
    Ok(config)
}

fn render(active: &[Notification]) {
    println!("── {} active ──", active.len());
    for toast in active {
        let presentation = toast.presentation();
        let close = if toast.shows_dismiss_control() { " ✕" } else { "" };
        let action = toast
            .action()
            .map(|a| format!(" [{}]", a.label()))
            .unwrap_or_default();
        println!(
            "  {} {} {}{}{}  ({:?})",
            toast.id(),
            presentation.icon,
            toast.title(),
            action,
            close,
            toast.phase()
        );
        if let Some(message) = toast.message() {
            println!("      {message}");
        }
    }
}

async fn play_demo(toasts: &Toasts) {
    let pause = || tokio::time::sleep(Duration::from_millis(600));

    toasts.notify_success(
        "Account Created",
        Some("Welcome to HomeClinic! Your account has been set up."),
        None,
    );
    pause().await;
    toasts.notify_error(
        "Login Failed",
        Some("Invalid credentials. Please check your email and password."),
        None,
    );
    pause().await;
    toasts.notify_warning(
        "Incomplete Information",
        Some("Please fill in all required fields before continuing."),
        None,
    );
    pause().await;
    toasts.notify_info(
        "New Features",
        Some("Check out our latest telemedicine features in the consultation tab."),
        None,
    );
    pause().await;
    let emergency = toasts.notify_critical_alert(
        "Medical Emergency",
        Some("If this is a medical emergency, please call 911 immediately."),
        Some(ToastAction::new("Call 911", || info!("emergency call triggered"))),
    );
    pause().await;
    toasts.notify_prescription_reminder(
        "Medication Reminder",
        Some("Time to take your morning medication. Please follow the prescribed dosage."),
        Some(ToastAction::new("Mark Taken", || info!("medication marked as taken"))),
    );
    pause().await;
    toasts.notify_appointment_reminder(
        "Appointment Reminder",
        Some("Your consultation with Dr. Smith is scheduled for tomorrow at 2:00 PM."),
        Some(ToastAction::new("View Details", || info!("appointment details opened"))),
    );

    // The user acknowledges the emergency notice if it is still on screen.
    pause().await;
    toasts.invoke_action(emergency);
}

fn play_flood(toasts: &Toasts) {
    for i in 1..=10 {
        toasts.notify_info(format!("Message {i}"), None, None);
    }
}

async fn run(toasts: Toasts, scenario: Scenario) {
    let mut snapshots = toasts.subscribe();
    let printer = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            render(&snapshots.borrow_and_update());
        }
    });

    match scenario {
        Scenario::Demo => play_demo(&toasts).await,
        Scenario::Flood => play_flood(&toasts),
    }

    let mut drained = toasts.subscribe();
    if drained.wait_for(Vec::is_empty).await.is_err() {
        error!("toast store closed before draining");
    }
    printer.abort();

    let history = toasts.history();
    info!(transitions = history.len(), "all toasts gone");
}

fn main() -> ExitCode {
    init_tracing();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "invalid arguments");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let config = match load_config(&flags) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(error = %err, "failed to start runtime");
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(async {
        match Toasts::start(&config) {
            Ok(toasts) => {
                run(toasts, flags.scenario).await;
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!(error = %err, "failed to start toast manager");
                ExitCode::FAILURE
            }
        }
    })
}
