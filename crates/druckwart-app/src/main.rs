// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Druckwart — headless print-job orchestration daemon.
//
// Entry point.  Initialises logging, reads configuration from the
// environment, wires the orchestrator to the IPP transport, starts the
// status poller, and runs until Ctrl-C.
//
// Job snapshots are re-emitted on the `druckwart::updates` target as JSON
// lines; a push transport (web socket hub, MQTT bridge, …) tails that
// channel to forward updates to remote clients.

use std::sync::Arc;

use tracing::{error, info};

use druckwart_core::AppConfig;
use druckwart_print::{IppClientAdapter, PrintService, StatusPoller};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("druckwart starting");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration error — set DRUCKWART_PRINTER_URI");
            std::process::exit(1);
        }
    };

    let service = match PrintService::new(&config, IppClientAdapter::new()) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            error!(error = %e, "print service init failed");
            std::process::exit(1);
        }
    };

    info!(
        printer_uri = %service.printer_uri(),
        poll_interval_secs = config.poll_interval_secs,
        "print service ready"
    );

    // Stand-in for the push transport: every broadcast snapshot goes out
    // as one JSON line on a dedicated log target.
    service.subscribe(|jobs| match serde_json::to_string(jobs) {
        Ok(payload) => {
            info!(target: "druckwart::updates", count = jobs.len(), %payload, "job update")
        }
        Err(e) => error!(error = %e, "job snapshot serialization failed"),
    });

    let poll_handle = Arc::clone(&service);
    let poller = StatusPoller::spawn(config.poll_interval(), move || Arc::clone(&poll_handle));

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => error!(error = %e, "failed to listen for shutdown signal"),
    }

    poller.shutdown().await;
    info!("druckwart stopped");
}
