//! Statistics reporting cadence driven by the manager

use mgrlink_shared::MgrConfigure;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

/// Holds the active reporting period and runs the periodic report loop.
///
/// The period is whatever the manager last sent. A period of zero means no
/// periodic reports until a non-zero period arrives.
#[derive(Debug)]
pub struct StatsReporter {
    period: watch::Sender<u32>,
}

impl StatsReporter {
    pub fn new(initial_period: u32) -> Self {
        let (period, _) = watch::channel(initial_period);
        Self { period }
    }

    /// Active reporting period in seconds.
    pub fn period(&self) -> u32 {
        *self.period.borrow()
    }

    /// Adopt the period carried by a configure message. Returns whether it changed.
    pub fn apply(&self, msg: &MgrConfigure) -> bool {
        let new_period = msg.stats_period();
        let mut old_period = 0;
        let changed = self.period.send_if_modified(|period| {
            old_period = *period;
            if *period == new_period {
                return false;
            }
            *period = new_period;
            true
        });
        if changed {
            info!("Stats period {}s -> {}s", old_period, new_period);
        } else {
            debug!("Stats period unchanged at {}s", new_period);
        }
        changed
    }

    /// Watch period changes.
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.period.subscribe()
    }

    /// Call `report` once per period, forever.
    ///
    /// A period change restarts the wait with the new value. Drop the future
    /// (or abort its task) to stop.
    pub async fn run<F, Fut>(&self, mut report: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut rx = self.period.subscribe();
        loop {
            let period = *rx.borrow_and_update();
            if period == 0 {
                debug!("Periodic reports disabled, waiting for a period");
                if rx.changed().await.is_err() {
                    return;
                }
                continue;
            }

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(period.into())) => {
                    debug!("Stats report due (period {}s)", period);
                    report().await;
                }
                changed = rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }
    }
}

impl Default for StatsReporter {
    fn default() -> Self {
        Self::new(0)
    }
}
