//! Run command - supervise a process until it exits or is stopped.

use anyhow::{bail, Result};
use chrono::{DateTime, Local};
use haltctl_core::ports::ProcessHandle;
use haltctl_core::{
    ConfigStore, LifecycleEvent, ProcessSpec, StopEngine, StopOutcome, StopSignal,
};
use serde::Serialize;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub struct RunArgs {
    pub name: Option<String>,
    pub stop_signal: Option<StopSignal>,
    pub stop_timeout: Option<i64>,
    pub time: Option<i64>,
    pub command: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport {
    id: String,
    name: String,
    outcome: Option<StopOutcome>,
    exit_code: Option<i32>,
    events: Vec<LifecycleEvent>,
}

/// Returns the exit code haltctl itself should exit with.
pub async fn run(args: RunArgs, json: bool) -> Result<i32> {
    let Some((program, rest)) = args.command.split_first() else {
        bail!("No command given");
    };

    let config = ConfigStore::new()?.load().await?;
    let shutdown = CancellationToken::new();
    let engine = StopEngine::new(config, shutdown.clone());

    let mut spec = ProcessSpec::new(program.as_str()).args(rest.iter().cloned());
    spec.name = args.name;
    spec.stop_signal = args.stop_signal;
    spec.stop_timeout = args.stop_timeout;

    let process = engine.spawn(spec).await?;

    let outcome = tokio::select! {
        _ = process.state().exited() => None,
        _ = signal::ctrl_c() => {
            if !json {
                eprintln!("Stopping {}...", process.name());
            }

            let stop = engine.stop(process.id(), args.time);
            tokio::pin!(stop);

            let result = loop {
                tokio::select! {
                    result = &mut stop => break result,
                    _ = signal::ctrl_c(), if !shutdown.is_cancelled() => {
                        if !json {
                            eprintln!("Interrupted again, abandoning the stop");
                        }
                        shutdown.cancel();
                    }
                }
            };
            log_stop(process.id(), &result);
            Some(result?)
        }
    };

    let exit_code = process.state().current().exit_code();
    let report = RunReport {
        id: process.id().to_string(),
        name: process.name().to_string(),
        outcome,
        exit_code,
        events: engine.take_events(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(match report.outcome {
        Some(_) => 0,
        None => report.exit_code.unwrap_or(1),
    })
}

fn log_stop(id: &str, result: &haltctl_core::Result<StopOutcome>) {
    match result {
        Ok(outcome) => info!(container = %id, outcome = ?outcome, "Stop finished"),
        Err(e) => error!(container = %id, error = %e, "Stop failed"),
    }
}

fn print_report(report: &RunReport) {
    let short_id = &report.id[..12];

    match report.outcome {
        Some(StopOutcome::Stopped) => println!("Stopped {} ({})", report.name, short_id),
        Some(StopOutcome::AlreadyStopped) => {
            println!("{} ({}) had already exited", report.name, short_id)
        }
        None => println!("{} ({}) exited on its own", report.name, short_id),
    }

    match report.exit_code {
        Some(code) => println!("Exit code: {}", code),
        None => println!("Exit code: unknown"),
    }

    for event in &report.events {
        let at = DateTime::from_timestamp_millis(event.timestamp_ms as i64)
            .map(|t| t.with_timezone(&Local).format("%H:%M:%S%.3f").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("Event: {} at {}", event, at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haltctl_core::Error;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_log_stop_success() {
        let out = capture(|| log_stop("abc", &Ok(StopOutcome::Stopped)));
        assert!(out.contains("INFO"));
        assert!(out.contains("Stop finished"));
        assert!(out.contains("container=abc"));
    }

    #[test]
    fn test_log_stop_failure() {
        let err = Error::stop_failed("abc", Error::NotFound("abc".to_string()));
        let out = capture(|| log_stop("abc", &Err(err)));
        assert!(out.contains("ERROR"));
        assert!(out.contains("Stop failed"));
        assert!(out.contains("cannot stop container: abc"));
    }
}
