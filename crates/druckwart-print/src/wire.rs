// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wire-level attribute model shared by the transport adapter and the
// response normalizer.
//
// IPP responses carry loosely typed attribute values: a given attribute may
// arrive as a single scalar, a homogeneous list of strings, or a mixed
// sequence.  Instead of inspecting `ipp::IppValue` variants all over the
// normalizer, responses are decoded once into the closed sum [`AttrValue`]
// and pattern-matched from there.

use std::collections::HashMap;

use ipp::prelude::*;

/// Delimiter-tag category of one response section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Operation,
    Job,
    Printer,
    /// Any group kind this core does not consume (unsupported-attributes
    /// and vendor extensions).
    Other,
}

impl SectionKind {
    fn from_tag(tag: DelimiterTag) -> Self {
        match tag {
            DelimiterTag::OperationAttributes => Self::Operation,
            DelimiterTag::JobAttributes => Self::Job,
            DelimiterTag::PrinterAttributes => Self::Printer,
            _ => Self::Other,
        }
    }
}

/// Decoded form of one IPP attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Integer(i32),
    Enum(i32),
    /// Any scalar, stringified.
    Text(String),
    /// A sequence whose elements are all string-like.
    TextList(Vec<String>),
    /// A sequence mixing value kinds.
    Mixed(Vec<AttrValue>),
}

impl AttrValue {
    /// Decode an `ipp` crate value into the closed sum.
    pub fn from_ipp(value: &IppValue) -> Self {
        match value {
            IppValue::Integer(v) => Self::Integer(*v),
            IppValue::Enum(v) => Self::Enum(*v),
            IppValue::Array(items) => {
                if items.iter().all(is_string_like) {
                    Self::TextList(items.iter().map(ToString::to_string).collect())
                } else {
                    Self::Mixed(items.iter().map(Self::from_ipp).collect())
                }
            }
            other => Self::Text(other.to_string()),
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Enum values, accepting plain integers too — some servers report
    /// enumerated states with the integer value tag.
    pub fn as_enum(&self) -> Option<i32> {
        match self {
            Self::Enum(v) | Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// First element of a sequence, or the stringified scalar.
    pub fn first_scalar(&self) -> String {
        match self {
            Self::TextList(items) => items.first().cloned().unwrap_or_default(),
            Self::Mixed(items) => items.first().map(ToString::to_string).unwrap_or_default(),
            scalar => scalar.to_string(),
        }
    }
}

impl std::fmt::Display for AttrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) | Self::Enum(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::TextList(items) => f.write_str(&items.join(", ")),
            Self::Mixed(items) => {
                let rendered: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&rendered.join(", "))
            }
        }
    }
}

fn is_string_like(value: &IppValue) -> bool {
    matches!(
        value,
        IppValue::TextWithoutLanguage(_)
            | IppValue::NameWithoutLanguage(_)
            | IppValue::Keyword(_)
            | IppValue::Uri(_)
            | IppValue::UriScheme(_)
            | IppValue::Charset(_)
            | IppValue::NaturalLanguage(_)
            | IppValue::MimeMediaType(_)
            | IppValue::OctetString(_)
    )
}

/// One tagged attribute group from a response.
#[derive(Debug, Clone)]
pub struct AttributeSection {
    pub kind: SectionKind,
    /// Attribute name to decoded value.
    pub attributes: HashMap<String, AttrValue>,
}

/// All sections of one decoded IPP response.
#[derive(Debug, Clone, Default)]
pub struct WireResponse {
    pub sections: Vec<AttributeSection>,
}

impl WireResponse {
    /// Decode every attribute group of a response.
    pub fn from_ipp(attributes: &IppAttributes) -> Self {
        let sections = attributes
            .groups()
            .iter()
            .map(|group| AttributeSection {
                kind: SectionKind::from_tag(group.tag()),
                attributes: group
                    .attributes()
                    .iter()
                    .map(|(name, attr)| (name.clone(), AttrValue::from_ipp(attr.value())))
                    .collect(),
            })
            .collect();
        Self { sections }
    }

    /// Iterate the sections of one kind, preserving response order.
    pub fn sections_of(&self, kind: SectionKind) -> impl Iterator<Item = &AttributeSection> {
        self.sections.iter().filter(move |s| s.kind == kind)
    }
}

/// Wire form of one print submission.
///
/// Derived from (job name, document, target URI, options) for the duration
/// of a single submission call; never persisted.
pub struct PrintJobRequest {
    pub printer_uri: Uri,
    pub job_name: String,
    pub payload: IppPayload,
    /// Job-template attributes: copies, orientation, colour mode, ranges.
    pub template_attributes: Vec<IppAttribute>,
    /// Redundant colour hints for servers ignoring `print-color-mode`.
    pub additional_attributes: Vec<IppAttribute>,
}
