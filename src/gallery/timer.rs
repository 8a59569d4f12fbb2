use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::events::Tick;

/// Repeating timer that reports `Tick`s over a channel until cancelled.
///
/// The first tick arrives one full period after `start`; restarting means
/// dropping this timer and starting a new one. Cancellation is idempotent and
/// also happens on drop, so the timer task never outlives its owner.
#[derive(Debug)]
pub struct TickTimer {
    generation: u64,
    cancel: CancellationToken,
}

impl TickTimer {
    pub fn start(
        period: Duration,
        generation: u64,
        tx: mpsc::Sender<Tick>,
        parent: &CancellationToken,
    ) -> Self {
        let cancel = parent.child_token();
        let first = Instant::now() + period;
        tokio::spawn({
            let cancel = cancel.clone();
            async move {
                let mut interval = interval_at(first, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => break,
                        _ = interval.tick() => {
                            trace!(generation, "tick");
                            tokio::select! {
                                biased;
                                _ = cancel.cancelled() => break,
                                sent = tx.send(Tick { generation }) => {
                                    if sent.is_err() {
                                        break;
                                    }
                                }
                            }
                        }
                    }
                }
                debug!(generation, "tick timer stopped");
            }
        });
        debug!(generation, period_ms = period.as_millis() as u64, "tick timer armed");
        Self { generation, cancel }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
