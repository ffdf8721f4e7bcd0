// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print orchestration facade.
//
// Owns translation, transport calls, and error containment for the three
// public operations, plus the in-process subscription registry the status
// poller broadcasts through.  The public operations are total: they log
// and degrade (false / empty) instead of surfacing faults, so callers
// need no error handling of their own.  The internal `try_`/`poll_`/
// `query_` functions keep the explicit `Result` form for logging and
// tests.

use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, Mutex};

use ipp::prelude::*;
use tracing::{debug, error, warn};

use druckwart_core::config::AppConfig;
use druckwart_core::error::{DruckwartError, Result};
use druckwart_core::types::{JobStatusInfo, PrintOptions, PrinterInfo, SubscriberId};

use crate::ipp_client::IppTransport;
use crate::normalize;
use crate::translate;
use crate::wire::PrintJobRequest;

/// IANA-assigned IPP port, assumed when the configured URI has none.
const DEFAULT_IPP_PORT: u16 = 631;

/// Callback receiving each broadcast job snapshot.
///
/// Invoked synchronously by the broadcaster — a slow subscriber delays
/// every later one, so callbacks must not block.
pub type JobUpdateCallback = dyn Fn(&[JobStatusInfo]) + Send + Sync;

/// Stateless facade over one configured print server.
///
/// Holds no job state of its own — the print server is the single source
/// of truth.  The only shared mutable state is the subscriber registry,
/// guarded by a mutex and snapshotted before every broadcast.
pub struct PrintService<T> {
    transport: T,
    printer_uri: String,
    subscribers: Mutex<HashMap<SubscriberId, Arc<JobUpdateCallback>>>,
}

impl<T: IppTransport> PrintService<T> {
    /// Construct the facade for the configured target printer.
    ///
    /// An empty printer URI is a fatal configuration error — the service
    /// refuses construction rather than failing on first use.
    pub fn new(config: &AppConfig, transport: T) -> Result<Self> {
        if config.printer_uri.trim().is_empty() {
            return Err(DruckwartError::MissingPrinterUri);
        }
        Ok(Self {
            transport,
            printer_uri: config.printer_uri.clone(),
            subscribers: Mutex::new(HashMap::new()),
        })
    }

    /// The configured default target printer URI.
    pub fn printer_uri(&self) -> &str {
        &self.printer_uri
    }

    /// Submit a document for printing.
    ///
    /// Returns `true` only when the server reports the fresh job as
    /// pending, held, or already processing.  A malformed target URI, a
    /// transport fault, or any other reported state yields `false` with a
    /// logged error — this call never raises.
    pub async fn submit(
        &self,
        job_name: &str,
        document: impl Read + Send + Sync + 'static,
        printer_uri: Option<&str>,
        options: Option<&PrintOptions>,
    ) -> bool {
        let target = printer_uri.unwrap_or(&self.printer_uri);
        match self.try_submit(job_name, document, target, options).await {
            Ok(state) => {
                let accepted = matches!(
                    state,
                    Some(JobState::Pending | JobState::Processing | JobState::PendingHeld)
                );
                if accepted {
                    debug!(job_name, state = ?state, "print job accepted");
                } else {
                    warn!(job_name, state = ?state, "print job not accepted by server");
                }
                accepted
            }
            Err(e) => {
                error!(job_name, error = %e, "error printing");
                false
            }
        }
    }

    async fn try_submit(
        &self,
        job_name: &str,
        document: impl Read + Send + Sync + 'static,
        target: &str,
        options: Option<&PrintOptions>,
    ) -> Result<Option<JobState>> {
        let printer_uri = parse_uri(target)?;
        let request = PrintJobRequest {
            printer_uri,
            job_name: job_name.to_string(),
            payload: IppPayload::new(document),
            template_attributes: translate::template_attributes(options),
            additional_attributes: translate::color_attributes(options),
        };
        let response = self.transport.print_job(request).await?;
        Ok(normalize::submission_state(&response))
    }

    /// Snapshot the not-yet-completed jobs on the server.
    ///
    /// Any fault yields an empty list with a logged error.  An empty
    /// result is indistinguishable from a failed query by design.
    pub async fn list_jobs(&self) -> Vec<JobStatusInfo> {
        match self.poll_jobs().await {
            Ok(jobs) => jobs,
            Err(e) => {
                error!(error = %e, "error getting jobs");
                Vec::new()
            }
        }
    }

    /// Explicit-outcome form of [`list_jobs`](Self::list_jobs), used by the
    /// status poller so a failed tick is distinguishable from an empty
    /// queue.
    pub(crate) async fn poll_jobs(&self) -> Result<Vec<JobStatusInfo>> {
        let base = self.base_server_uri()?;
        let response = self.transport.get_jobs(base).await?;
        Ok(normalize::collect_jobs(&response))
    }

    /// Snapshot the printers known to the server.  Fault policy as for
    /// [`list_jobs`](Self::list_jobs).
    pub async fn list_printers(&self) -> Vec<PrinterInfo> {
        match self.query_printers().await {
            Ok(printers) => printers,
            Err(e) => {
                error!(error = %e, "error getting printers");
                Vec::new()
            }
        }
    }

    async fn query_printers(&self) -> Result<Vec<PrinterInfo>> {
        let base = self.base_server_uri()?;
        let response = self.transport.get_printers(base).await?;
        Ok(normalize::collect_printers(&response, &self.printer_uri))
    }

    /// Server endpoint for queries: scheme, host, and port of the
    /// configured URI with any path stripped.
    fn base_server_uri(&self) -> Result<Uri> {
        let full = parse_uri(&self.printer_uri)?;
        let scheme = full.scheme_str().unwrap_or("ipp");
        let host = full.host().ok_or_else(|| DruckwartError::InvalidUri {
            uri: self.printer_uri.clone(),
            reason: "missing host".to_string(),
        })?;
        let port = full.port_u16().unwrap_or(DEFAULT_IPP_PORT);
        parse_uri(&format!("{scheme}://{host}:{port}"))
    }

    // -- subscription registry ----------------------------------------------

    /// Register a callback for job-snapshot broadcasts.
    pub fn subscribe<F>(&self, callback: F) -> SubscriberId
    where
        F: Fn(&[JobStatusInfo]) + Send + Sync + 'static,
    {
        let id = SubscriberId::new();
        self.subscribers
            .lock()
            .expect("subscriber registry lock poisoned")
            .insert(id, Arc::new(callback));
        debug!(subscriber = %id, "job-update subscriber registered");
        id
    }

    /// Remove a subscriber.  Returns whether the handle was registered.
    pub fn unsubscribe(&self, id: &SubscriberId) -> bool {
        let removed = self
            .subscribers
            .lock()
            .expect("subscriber registry lock poisoned")
            .remove(id)
            .is_some();
        if removed {
            debug!(subscriber = %id, "job-update subscriber removed");
        }
        removed
    }

    /// Push one job snapshot to every current subscriber.
    ///
    /// The callback list is snapshotted under the lock and invoked after
    /// releasing it, so subscribers may subscribe/unsubscribe from within
    /// a callback without deadlocking a broadcast in progress.
    pub fn broadcast(&self, jobs: &[JobStatusInfo]) {
        let snapshot: Vec<Arc<JobUpdateCallback>> = self
            .subscribers
            .lock()
            .expect("subscriber registry lock poisoned")
            .values()
            .cloned()
            .collect();
        for callback in snapshot {
            callback(jobs);
        }
    }
}

fn parse_uri(raw: &str) -> Result<Uri> {
    raw.parse::<Uri>().map_err(|e| DruckwartError::InvalidUri {
        uri: raw.to_string(),
        reason: e.to_string(),
    })
}
