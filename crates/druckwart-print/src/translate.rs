// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Outbound attribute translation: user-facing print options into IPP
// job-template and colour-hint attributes.
//
// All functions here are pure — no I/O, no state, no mutation of inputs.
// Absent options translate exactly like default-valued options.

use ipp::prelude::*;

use druckwart_core::types::{ColorMode, PageRange, PrintOptions};

/// Build the redundant colour-hint pair sent alongside the job template.
///
/// Modern servers honour the `print-color-mode` keyword; older CUPS
/// filters only look at the legacy `ColorModel` name.  Both are always
/// emitted so either generation of server ends up on the requested mode.
pub fn color_attributes(options: Option<&PrintOptions>) -> Vec<IppAttribute> {
    let mode = options.map(|o| o.color_mode).unwrap_or_default();
    vec![
        IppAttribute::new(
            "print-color-mode",
            IppValue::Keyword(color_keyword(mode).to_string()),
        ),
        IppAttribute::new(
            "ColorModel",
            IppValue::NameWithoutLanguage(legacy_color_model(mode).to_string()),
        ),
    ]
}

/// Build the job-template attributes for one submission.
///
/// Copies and orientation fall back to one portrait copy when no options
/// are given.  The `page-ranges` attribute is omitted entirely when the
/// range expression is absent or yields no usable range.
pub fn template_attributes(options: Option<&PrintOptions>) -> Vec<IppAttribute> {
    let defaults = PrintOptions::default();
    let options = options.unwrap_or(&defaults);

    let mut attributes = vec![
        IppAttribute::new("copies", IppValue::Integer(options.copies as i32)),
        IppAttribute::new(
            "orientation-requested",
            IppValue::Enum(options.orientation.ipp_enum_value()),
        ),
        IppAttribute::new(
            "print-color-mode",
            IppValue::Keyword(color_keyword(options.color_mode).to_string()),
        ),
    ];

    if let Some(expression) = options.page_range.as_deref() {
        let ranges = parse_page_ranges(expression);
        if !ranges.is_empty() {
            attributes.push(IppAttribute::new(
                "page-ranges",
                IppValue::Array(
                    ranges
                        .iter()
                        .map(|r| IppValue::RangeOfInteger {
                            min: r.first,
                            max: r.last,
                        })
                        .collect(),
                ),
            ));
        }
    }

    attributes
}

/// Parse a compact range expression like `"1-3, 5"`.
///
/// Tokens are comma-separated; each is either a single page number or a
/// `first-last` span.  Whitespace around tokens and around the hyphen is
/// ignored.  Malformed tokens are dropped silently — submitting the job
/// unrestricted beats rejecting it over a typo.  Spans are passed through
/// as written, including inverted ones.
pub fn parse_page_ranges(expression: &str) -> Vec<PageRange> {
    expression
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(parse_range_token)
        .collect()
}

fn parse_range_token(token: &str) -> Option<PageRange> {
    let parts: Vec<&str> = token
        .split('-')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [single] => {
            let page = single.parse().ok()?;
            Some(PageRange {
                first: page,
                last: page,
            })
        }
        [first, last] => Some(PageRange {
            first: first.parse().ok()?,
            last: last.parse().ok()?,
        }),
        _ => None,
    }
}

fn color_keyword(mode: ColorMode) -> &'static str {
    match mode {
        ColorMode::Monochrome => "monochrome",
        ColorMode::Color => "color",
    }
}

fn legacy_color_model(mode: ColorMode) -> &'static str {
    match mode {
        ColorMode::Monochrome => "Gray",
        ColorMode::Color => "RGB",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use druckwart_core::types::PageOrientation;

    fn has_keyword(attributes: &[IppAttribute], name: &str, expected: &str) -> bool {
        attributes.iter().any(|a| {
            a.name() == name && matches!(a.value(), IppValue::Keyword(k) if k == expected)
        })
    }

    fn has_name_value(attributes: &[IppAttribute], name: &str, expected: &str) -> bool {
        attributes.iter().any(|a| {
            a.name() == name
                && matches!(a.value(), IppValue::NameWithoutLanguage(v) if v == expected)
        })
    }

    #[test]
    fn monochrome_emits_both_hints() {
        let options = PrintOptions {
            color_mode: ColorMode::Monochrome,
            ..PrintOptions::default()
        };
        let attributes = color_attributes(Some(&options));
        assert!(has_keyword(&attributes, "print-color-mode", "monochrome"));
        assert!(has_name_value(&attributes, "ColorModel", "Gray"));
        assert!(!has_keyword(&attributes, "print-color-mode", "color"));
    }

    #[test]
    fn color_emits_both_hints() {
        let attributes = color_attributes(Some(&PrintOptions::default()));
        assert!(has_keyword(&attributes, "print-color-mode", "color"));
        assert!(has_name_value(&attributes, "ColorModel", "RGB"));
        assert!(!has_name_value(&attributes, "ColorModel", "Gray"));
    }

    #[test]
    fn absent_options_translate_like_defaults() {
        let from_none = template_attributes(None);
        let from_defaults = template_attributes(Some(&PrintOptions::default()));
        assert_eq!(from_none.len(), from_defaults.len());
        for (a, b) in from_none.iter().zip(from_defaults.iter()) {
            assert_eq!(a.name(), b.name());
            assert_eq!(a.value(), b.value());
        }
        let color_none = color_attributes(None);
        let color_default = color_attributes(Some(&PrintOptions::default()));
        for (a, b) in color_none.iter().zip(color_default.iter()) {
            assert_eq!(a.name(), b.name());
            assert_eq!(a.value(), b.value());
        }
    }

    #[test]
    fn template_carries_copies_and_orientation() {
        let options = PrintOptions {
            copies: 2,
            orientation: PageOrientation::Landscape,
            ..PrintOptions::default()
        };
        let attributes = template_attributes(Some(&options));
        assert!(attributes
            .iter()
            .any(|a| a.name() == "copies" && matches!(a.value(), IppValue::Integer(2))));
        assert!(attributes
            .iter()
            .any(|a| a.name() == "orientation-requested"
                && matches!(a.value(), IppValue::Enum(4))));
    }

    #[test]
    fn page_ranges_attribute_holds_parsed_spans() {
        let options = PrintOptions {
            page_range: Some("1-3, 5".to_string()),
            ..PrintOptions::default()
        };
        let attributes = template_attributes(Some(&options));
        let ranges = attributes
            .iter()
            .find(|a| a.name() == "page-ranges")
            .expect("page-ranges attribute");
        match ranges.value() {
            IppValue::Array(items) => {
                assert_eq!(items.len(), 2);
                assert!(matches!(items[0], IppValue::RangeOfInteger { min: 1, max: 3 }));
                assert!(matches!(items[1], IppValue::RangeOfInteger { min: 5, max: 5 }));
            }
            other => panic!("expected array of ranges, got {other:?}"),
        }
    }

    #[test]
    fn unusable_range_expression_omits_the_attribute() {
        let options = PrintOptions {
            page_range: Some("invalid".to_string()),
            ..PrintOptions::default()
        };
        let attributes = template_attributes(Some(&options));
        assert!(!attributes.iter().any(|a| a.name() == "page-ranges"));
    }

    #[test]
    fn parses_singles_and_spans() {
        assert_eq!(
            parse_page_ranges("1-3, 5"),
            vec![PageRange { first: 1, last: 3 }, PageRange { first: 5, last: 5 }]
        );
    }

    #[test]
    fn whitespace_is_insignificant() {
        assert_eq!(
            parse_page_ranges("  1 - 3 ,5 "),
            vec![PageRange { first: 1, last: 3 }, PageRange { first: 5, last: 5 }]
        );
    }

    #[test]
    fn inverted_spans_pass_through() {
        assert_eq!(parse_page_ranges("3-1"), vec![PageRange { first: 3, last: 1 }]);
    }

    #[test]
    fn malformed_tokens_are_dropped_silently() {
        assert_eq!(
            parse_page_ranges("1-2-3, x, 4"),
            vec![PageRange { first: 4, last: 4 }]
        );
        assert!(parse_page_ranges("invalid").is_empty());
        assert!(parse_page_ranges("").is_empty());
        assert!(parse_page_ranges(" , ,").is_empty());
    }

    #[test]
    fn dangling_hyphen_collapses_to_single_page() {
        // "1-" loses its empty segment and parses like a bare "1".
        assert_eq!(parse_page_ranges("1-"), vec![PageRange { first: 1, last: 1 }]);
    }
}
