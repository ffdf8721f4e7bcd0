// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Thin transport seam around the `ipp` crate's async client.
//
// The trait exists so the orchestrator can be exercised against a mock;
// the production adapter forwards to the client library and does nothing
// else.  Operations sent:
//   - Print-Job          (RFC 8011 §4.2.1)
//   - Get-Jobs           (RFC 8011 §4.2.6, filtered to not-completed)
//   - CUPS-Get-Printers  (CUPS extension, server-wide printer listing)

use std::future::Future;

use ipp::prelude::*;
use tracing::debug;

use druckwart_core::error::{DruckwartError, Result};

use crate::wire::{PrintJobRequest, WireResponse};

/// Job attributes requested from Get-Jobs; without this the server only
/// reports job-id and job-uri.
const REQUESTED_JOB_ATTRIBUTES: [&str; 4] = [
    "job-id",
    "job-name",
    "job-state",
    "job-originating-user-name",
];

/// Async transport boundary to the print server.
///
/// Implementations hold no per-call state and must be safe for concurrent
/// use by independent logical calls.
pub trait IppTransport {
    /// Submit one print job and return the decoded response.
    fn print_job(
        &self,
        request: PrintJobRequest,
    ) -> impl Future<Output = Result<WireResponse>> + Send;

    /// Fetch the not-yet-completed jobs known to the server.
    fn get_jobs(&self, server_uri: Uri) -> impl Future<Output = Result<WireResponse>> + Send;

    /// Fetch all printers known to the server.
    fn get_printers(
        &self,
        server_uri: Uri,
    ) -> impl Future<Output = Result<WireResponse>> + Send;
}

/// Production transport backed by [`AsyncIppClient`].
///
/// Stateless — one client is constructed per call, so concurrent callers
/// never share connection state.
#[derive(Debug, Clone, Copy, Default)]
pub struct IppClientAdapter;

impl IppClientAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl IppTransport for IppClientAdapter {
    async fn print_job(&self, request: PrintJobRequest) -> Result<WireResponse> {
        let PrintJobRequest {
            printer_uri,
            job_name,
            payload,
            template_attributes,
            additional_attributes,
        } = request;

        let operation = IppOperationBuilder::print_job(printer_uri.clone(), payload)
            .job_title(&job_name)
            .attributes(template_attributes)
            .attributes(additional_attributes)
            .build();

        debug!(uri = %printer_uri, %job_name, "sending Print-Job");
        let client = AsyncIppClient::new(printer_uri);
        let response = client
            .send(operation)
            .await
            .map_err(|e| DruckwartError::IppRequest(format!("Print-Job: {e}")))?;
        checked("Print-Job", response)
    }

    async fn get_jobs(&self, server_uri: Uri) -> Result<WireResponse> {
        let mut request = IppRequestResponse::new(
            IppVersion::v1_1(),
            Operation::GetJobs,
            Some(server_uri.clone()),
        );
        request.attributes_mut().add(
            DelimiterTag::OperationAttributes,
            IppAttribute::new("which-jobs", IppValue::Keyword("not-completed".to_string())),
        );
        request.attributes_mut().add(
            DelimiterTag::OperationAttributes,
            IppAttribute::new(
                "requested-attributes",
                IppValue::Array(
                    REQUESTED_JOB_ATTRIBUTES
                        .iter()
                        .map(|name| IppValue::Keyword((*name).to_string()))
                        .collect(),
                ),
            ),
        );

        debug!(uri = %server_uri, "sending Get-Jobs");
        let client = AsyncIppClient::new(server_uri);
        let response = client
            .send(request)
            .await
            .map_err(|e| DruckwartError::IppRequest(format!("Get-Jobs: {e}")))?;
        checked("Get-Jobs", response)
    }

    async fn get_printers(&self, server_uri: Uri) -> Result<WireResponse> {
        let request = IppRequestResponse::new(
            IppVersion::v1_1(),
            Operation::CupsGetPrinters,
            Some(server_uri.clone()),
        );

        debug!(uri = %server_uri, "sending CUPS-Get-Printers");
        let client = AsyncIppClient::new(server_uri);
        let response = client
            .send(request)
            .await
            .map_err(|e| DruckwartError::IppRequest(format!("CUPS-Get-Printers: {e}")))?;
        checked("CUPS-Get-Printers", response)
    }
}

/// Reject non-success IPP status codes, decode everything else.
fn checked(operation: &str, response: IppRequestResponse) -> Result<WireResponse> {
    let status = response.header().status_code();
    if !status.is_success() {
        return Err(DruckwartError::PrintServer(format!(
            "{operation} returned status {status:?}"
        )));
    }
    Ok(WireResponse::from_ipp(response.attributes()))
}
