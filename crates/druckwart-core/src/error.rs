// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Druckwart.

use thiserror::Error;

/// Top-level error type for all Druckwart operations.
#[derive(Debug, Error)]
pub enum DruckwartError {
    // -- Configuration --
    #[error("printer URI is not configured")]
    MissingPrinterUri,

    #[error("invalid printer URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    // -- Protocol --
    #[error("IPP request failed: {0}")]
    IppRequest(String),

    #[error("print server error: {0}")]
    PrintServer(String),

    // -- I/O / serialization --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DruckwartError>;
