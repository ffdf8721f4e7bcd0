// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Druckwart print orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Colour rendering requested for a print job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMode {
    #[default]
    Color,
    Monochrome,
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

impl PageOrientation {
    /// IPP `orientation-requested` enum value (RFC 8011 §5.2.10).
    pub fn ipp_enum_value(&self) -> i32 {
        match self {
            Self::Portrait => 3,
            Self::Landscape => 4,
        }
    }
}

/// Per-submission print options.
///
/// Constructed fresh for each submission request and never persisted.
/// The page range is kept in its user-entered string form; parsing into
/// [`PageRange`] values happens at translation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintOptions {
    pub color_mode: ColorMode,
    pub copies: u32,
    /// Compact range expression, e.g. `"1-3, 5"`. `None` means all pages.
    pub page_range: Option<String>,
    pub orientation: PageOrientation,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Color,
            copies: 1,
            page_range: None,
            orientation: PageOrientation::Portrait,
        }
    }
}

/// One inclusive page span as sent on the wire.
///
/// `first` and `last` are passed through exactly as parsed; the printer
/// decides what an inverted span means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub first: i32,
    pub last: i32,
}

/// Normalized snapshot of one print job as reported by the server.
///
/// Produced fresh on every poll; only `id` is meaningful across polls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusInfo {
    /// Server-assigned job id (0 when the server did not report one).
    pub id: i32,
    pub name: String,
    /// String form of the protocol job state, or "Unknown".
    pub state: String,
    /// Originating user, or "Unknown".
    pub user: String,
    /// Capture time of this snapshot — the protocol's own timestamps are
    /// not trusted.
    pub created_at: DateTime<Utc>,
}

/// Normalized snapshot of one printer known to the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrinterInfo {
    pub name: String,
    pub uri: String,
    pub description: String,
    pub state: String,
    /// Whether the configured target URI names this printer. Heuristic:
    /// case-insensitive substring match on the printer name.
    pub is_default: bool,
}

/// Handle identifying one registered job-update subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriberId(pub Uuid);

impl SubscriberId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_one_color_portrait_copy() {
        let options = PrintOptions::default();
        assert_eq!(options.color_mode, ColorMode::Color);
        assert_eq!(options.copies, 1);
        assert_eq!(options.orientation, PageOrientation::Portrait);
        assert!(options.page_range.is_none());
    }

    #[test]
    fn orientation_maps_to_ipp_enum_values() {
        assert_eq!(PageOrientation::Portrait.ipp_enum_value(), 3);
        assert_eq!(PageOrientation::Landscape.ipp_enum_value(), 4);
    }

    #[test]
    fn subscriber_ids_are_unique() {
        assert_ne!(SubscriberId::new(), SubscriberId::new());
    }
}
