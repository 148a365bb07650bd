//! Budgeted poll loop.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::PollError;

/// Work performed once per cycle.
#[async_trait]
pub trait PollHandler: Send {
    /// `cycle` starts at 1.
    async fn on_poll(&mut self, cycle: u64) -> Result<(), PollError>;
}

/// Why the loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    BudgetExhausted,
    Cancelled,
    Fatal(String),
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    pub cycles: u64,
    pub failures: u64,
    pub elapsed: Duration,
    pub stop: StopReason,
}

impl fmt::Display for PollReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match &self.stop {
            StopReason::BudgetExhausted => "budget exhausted".to_string(),
            StopReason::Cancelled => "cancelled".to_string(),
            StopReason::Fatal(msg) => format!("fatal: {}", msg),
        };
        write!(
            f,
            "{} cycles ({} failed) in {:.1}s, {}",
            self.cycles,
            self.failures,
            self.elapsed.as_secs_f64(),
            reason
        )
    }
}

/// Runs a [`PollHandler`] every `interval` until `budget` is spent.
#[derive(Debug, Clone, Copy)]
pub struct PollLoop {
    interval: Duration,
    budget: Duration,
}

impl PollLoop {
    pub fn new(interval: Duration, budget: Duration) -> Self {
        Self { interval, budget }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Drive `handler` until the budget is spent, `cancel` fires or the
    /// handler returns a fatal error.
    ///
    /// Cancellation is observed between polls and during the sleep, never in
    /// the middle of a poll.
    pub async fn run<H>(&self, handler: &mut H, cancel: CancellationToken) -> PollReport
    where
        H: PollHandler + ?Sized,
    {
        let start = Instant::now();
        let mut cycles = 0u64;
        let mut failures = 0u64;

        info!(
            "Poll loop started: interval {:?}, budget {:?}",
            self.interval, self.budget
        );

        let stop = loop {
            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            if start.elapsed() >= self.budget {
                break StopReason::BudgetExhausted;
            }

            cycles += 1;
            debug!("Poll cycle {}", cycles);
            match handler.on_poll(cycles).await {
                Ok(()) => {}
                Err(PollError::Fatal(msg)) => {
                    error!("Poll cycle {} failed fatally: {}", cycles, msg);
                    failures += 1;
                    break StopReason::Fatal(msg);
                }
                Err(e) => {
                    warn!("Poll cycle {} failed: {}", cycles, e);
                    failures += 1;
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => break StopReason::Cancelled,
                _ = tokio::time::sleep(self.interval) => {}
            }
        };

        let report = PollReport {
            cycles,
            failures,
            elapsed: start.elapsed(),
            stop,
        };
        info!("Poll loop stopped: {}", report);
        report
    }
}

#[cfg(test)]
#[path = "poll_loop_tests.rs"]
mod tests;
