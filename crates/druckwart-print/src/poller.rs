// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recurring status poller.
//
// One background task fetches the job queue on a fixed cadence and
// broadcasts each successful snapshot to the service's subscribers.  A
// failed tick is logged and skipped — it never broadcasts and never ends
// the loop.  Cadence stays fixed regardless of error history; the only
// way out is an explicit shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::ipp_client::IppTransport;
use crate::service::PrintService;

/// Handle to the running poll loop.
pub struct StatusPoller {
    shutdown: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl StatusPoller {
    /// Spawn the poll loop on the current tokio runtime.
    ///
    /// `service` is called once per tick to borrow a fresh orchestrator
    /// handle, so one tick's resources never leak into the next.  The
    /// first tick fires one full period after spawning.
    pub fn spawn<T, F>(period: Duration, service: F) -> Self
    where
        T: IppTransport + Send + Sync + 'static,
        F: Fn() -> Arc<PrintService<T>> + Send + 'static,
    {
        let shutdown = Arc::new(Notify::new());
        let handle = tokio::spawn(run(period, service, Arc::clone(&shutdown)));
        Self { shutdown, handle }
    }

    /// Signal the loop to stop and wait for it to finish.
    ///
    /// An in-flight tick completes normally; a tick that has not started
    /// yet is abandoned.
    pub async fn shutdown(self) {
        self.shutdown.notify_one();
        if let Err(e) = self.handle.await {
            error!(error = %e, "status poller task ended abnormally");
        }
    }
}

async fn run<T, F>(period: Duration, service: F, shutdown: Arc<Notify>)
where
    T: IppTransport + Send + Sync + 'static,
    F: Fn() -> Arc<PrintService<T>> + Send + 'static,
{
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(period_ms = period.as_millis() as u64, "status poller started");

    loop {
        tokio::select! {
            biased;
            _ = shutdown.notified() => {
                info!("status poller stopped");
                break;
            }
            _ = ticker.tick() => {
                let service = service();
                match service.poll_jobs().await {
                    Ok(jobs) => {
                        debug!(count = jobs.len(), "status poll tick");
                        service.broadcast(&jobs);
                    }
                    Err(e) => {
                        // Skip the broadcast, keep the cadence.
                        error!(error = %e, "status poll tick failed");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::service::tests::{MockTransport, job_state_section, service_over};

    const TICK: Duration = Duration::from_millis(20);

    async fn settle(ticks: u32) {
        tokio::time::sleep(TICK * ticks).await;
    }

    #[tokio::test]
    async fn broadcasts_a_snapshot_each_tick() {
        let mock = MockTransport::with_sections(vec![job_state_section(3)]);
        let service = Arc::new(service_over(&mock));

        let broadcasts = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&broadcasts);
        service.subscribe(move |jobs| {
            assert_eq!(jobs.len(), 1);
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let handle = Arc::clone(&service);
        let poller = StatusPoller::spawn(TICK, move || Arc::clone(&handle));
        settle(5).await;
        poller.shutdown().await;

        assert!(broadcasts.load(Ordering::SeqCst) >= 1, "no broadcast observed");
        assert!(mock.query_count() >= 1, "poller never queried the transport");
    }

    #[tokio::test]
    async fn failed_ticks_skip_broadcast_and_keep_the_loop_alive() {
        let mock = MockTransport::default();
        mock.set_fail(true);
        let service = Arc::new(service_over(&mock));

        let broadcasts = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&broadcasts);
        service.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let handle = Arc::clone(&service);
        let poller = StatusPoller::spawn(TICK, move || Arc::clone(&handle));

        settle(5).await;
        assert!(mock.query_count() >= 1, "failing ticks must still poll");
        assert_eq!(broadcasts.load(Ordering::SeqCst), 0, "failed tick broadcast");

        // Recovery: once the transport works again the loop must still be
        // running and resume broadcasting.
        mock.set_fail(false);
        settle(5).await;
        poller.shutdown().await;

        assert!(broadcasts.load(Ordering::SeqCst) >= 1, "loop died after failures");
    }

    #[tokio::test]
    async fn shutdown_wins_over_a_pending_tick() {
        let mock = MockTransport::default();
        let service = Arc::new(service_over(&mock));

        let handle = Arc::clone(&service);
        let poller = StatusPoller::spawn(Duration::from_secs(3600), move || Arc::clone(&handle));

        tokio::time::timeout(Duration::from_secs(1), poller.shutdown())
            .await
            .expect("shutdown must not wait for the next tick");
        assert_eq!(mock.query_count(), 0);
    }
}
