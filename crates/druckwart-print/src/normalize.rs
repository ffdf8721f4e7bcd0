// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inbound normalization: decoded IPP responses into stable domain
// snapshots.
//
// The print server is the only source of truth; these functions produce
// fresh value objects on every call and keep none of the response around.

use chrono::Utc;
use ipp::prelude::*;

use druckwart_core::types::{JobStatusInfo, PrinterInfo};

use crate::wire::{AttrValue, AttributeSection, SectionKind, WireResponse};

/// Placeholder for attributes the server did not report.
const UNKNOWN: &str = "Unknown";

/// Job state of a submission response — the first job section's
/// `job-state`, decoded to the protocol enumeration.
pub fn submission_state(response: &WireResponse) -> Option<JobState> {
    response
        .sections_of(SectionKind::Job)
        .next()
        .and_then(|section| section.attributes.get("job-state"))
        .and_then(AttrValue::as_enum)
        .and_then(JobState::from_i32)
}

/// One [`JobStatusInfo`] per job section of a Get-Jobs response.
pub fn collect_jobs(response: &WireResponse) -> Vec<JobStatusInfo> {
    response
        .sections_of(SectionKind::Job)
        .map(job_from_section)
        .collect()
}

fn job_from_section(section: &AttributeSection) -> JobStatusInfo {
    let id = section
        .attributes
        .get("job-id")
        .and_then(AttrValue::as_integer)
        .unwrap_or(0);

    let name = section
        .attributes
        .get("job-name")
        .map(|v| v.first_scalar())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let user = section
        .attributes
        .get("job-originating-user-name")
        .map(|v| v.first_scalar())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let state = section
        .attributes
        .get("job-state")
        .and_then(AttrValue::as_enum)
        .and_then(JobState::from_i32)
        .map(|s| format!("{s:?}"))
        .unwrap_or_else(|| UNKNOWN.to_string());

    JobStatusInfo {
        id,
        name,
        state,
        user,
        // Capture time, not server time — job timestamps from the wire are
        // unreliable across CUPS versions.
        created_at: Utc::now(),
    }
}

/// One [`PrinterInfo`] per printer-attributes section, in response order.
///
/// Sections of any other kind are skipped.  A record whose resolved name
/// is empty is discarded; every other field may be empty.
pub fn collect_printers(response: &WireResponse, configured_uri: &str) -> Vec<PrinterInfo> {
    response
        .sections_of(SectionKind::Printer)
        .filter_map(|section| printer_from_section(section, configured_uri))
        .collect()
}

fn printer_from_section(
    section: &AttributeSection,
    configured_uri: &str,
) -> Option<PrinterInfo> {
    let mut info = PrinterInfo::default();

    for (name, value) in &section.attributes {
        match name.as_str() {
            "printer-name" => info.name = value.to_string(),
            // Usually a 1setOf of URIs — take the first.
            "printer-uri-supported" => info.uri = value.first_scalar(),
            "printer-info" => info.description = value.to_string(),
            "printer-state" => info.state = value.to_string(),
            _ => {}
        }
    }

    // Resolved only after all attributes are in: the configured target URI
    // naming this printer marks it as the default.  Substring match, so an
    // unrelated printer whose name is embedded in the URI matches too.
    info.is_default = configured_uri
        .to_lowercase()
        .contains(&info.name.to_lowercase());

    if info.name.is_empty() {
        return None;
    }
    Some(info)
}
