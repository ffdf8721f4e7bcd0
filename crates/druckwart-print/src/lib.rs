// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Druckwart Print — IPP submission, response normalization, and recurring
// status polling.  This crate bridges between the domain types defined in
// `druckwart-core` and the network print server.

pub mod ipp_client;
pub mod normalize;
pub mod poller;
pub mod service;
pub mod translate;
pub mod wire;

pub use ipp_client::{IppClientAdapter, IppTransport};
pub use poller::StatusPoller;
pub use service::PrintService;
