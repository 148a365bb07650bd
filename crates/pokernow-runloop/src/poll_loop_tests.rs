use super::*;

/// Handler that replays a scripted sequence of results.
struct Scripted {
    results: Vec<Result<(), PollError>>,
    seen: Vec<u64>,
}

impl Scripted {
    fn new(results: Vec<Result<(), PollError>>) -> Self {
        Self {
            results,
            seen: Vec::new(),
        }
    }

    fn always_ok() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl PollHandler for Scripted {
    async fn on_poll(&mut self, cycle: u64) -> Result<(), PollError> {
        self.seen.push(cycle);
        if self.results.is_empty() {
            Ok(())
        } else {
            self.results.remove(0)
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_stops_when_budget_is_spent() {
    let poll_loop = PollLoop::new(Duration::from_secs(5), Duration::from_secs(60));
    let mut handler = Scripted::always_ok();

    let report = poll_loop.run(&mut handler, CancellationToken::new()).await;

    assert_eq!(report.stop, StopReason::BudgetExhausted);
    assert_eq!(report.cycles, 12);
    assert_eq!(report.failures, 0);
    assert_eq!(report.elapsed, Duration::from_secs(60));
    assert_eq!(handler.seen, (1..=12).collect::<Vec<_>>());
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_before_start() {
    let poll_loop = PollLoop::new(Duration::from_secs(5), Duration::from_secs(60));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut handler = Scripted::always_ok();
    let report = poll_loop.run(&mut handler, cancel).await;

    assert_eq!(report.stop, StopReason::Cancelled);
    assert_eq!(report.cycles, 0);
    assert!(handler.seen.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_interrupts_sleep() {
    let poll_loop = PollLoop::new(Duration::from_secs(5), Duration::from_secs(60));
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(12)).await;
        trigger.cancel();
    });

    let mut handler = Scripted::always_ok();
    let report = poll_loop.run(&mut handler, cancel).await;

    assert_eq!(report.stop, StopReason::Cancelled);
    // Polls at 0s, 5s and 10s; cancelled while sleeping towards 15s.
    assert_eq!(report.cycles, 3);
    assert_eq!(report.elapsed, Duration::from_secs(12));
}

#[tokio::test(start_paused = true)]
async fn test_continues_after_failed_poll() {
    let poll_loop = PollLoop::new(Duration::from_secs(5), Duration::from_secs(15));
    let mut handler = Scripted::new(vec![
        Ok(()),
        Err(PollError::Poll("seat list missing".into())),
        Ok(()),
    ]);

    let report = poll_loop.run(&mut handler, CancellationToken::new()).await;

    assert_eq!(report.stop, StopReason::BudgetExhausted);
    assert_eq!(report.cycles, 3);
    assert_eq!(report.failures, 1);
}

#[tokio::test(start_paused = true)]
async fn test_fatal_error_stops_loop() {
    let poll_loop = PollLoop::new(Duration::from_secs(5), Duration::from_secs(60));
    let mut handler = Scripted::new(vec![
        Ok(()),
        Err(PollError::Fatal("browser session closed".into())),
    ]);

    let report = poll_loop.run(&mut handler, CancellationToken::new()).await;

    assert_eq!(
        report.stop,
        StopReason::Fatal("browser session closed".to_string())
    );
    assert_eq!(report.cycles, 2);
    assert_eq!(report.failures, 1);
    assert_eq!(report.elapsed, Duration::from_secs(5));
}

#[test]
fn test_report_display() {
    let report = PollReport {
        cycles: 4,
        failures: 1,
        elapsed: Duration::from_secs(20),
        stop: StopReason::Cancelled,
    };
    assert_eq!(report.to_string(), "4 cycles (1 failed) in 20.0s, cancelled");
}
