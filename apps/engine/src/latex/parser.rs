//! Best-effort LaTeX parsing: the exact inverse of the generator's two
//! fixed grammars.
//!
//! The parser never fails. It detects which template family produced the
//! source, isolates each logical section, and runs independent extraction
//! steps inside it; a step that finds nothing leaves its fields absent, an
//! entry with an unexpected shape is skipped with a warning, and nothing is
//! ever guessed. Arbitrary LaTeX is out of scope: the input is always
//! either this crate's own generator output or that output after an
//! external rewrite.

use std::collections::HashMap;

use regex::Regex;
use tracing::debug;

use crate::latex::classic::ClassicGrammar;
use crate::latex::escape::unescape_latex;
use crate::latex::modern::ModernGrammar;
use crate::models::resume::{ParsedResume, TemplateId};

/// Extracts whatever structured fields the source confidently yields.
pub fn parse_latex(source: &str) -> ParsedResume {
    match detect_dialect(source) {
        TemplateId::Modern => {
            debug!("parsing moderncv-family LaTeX");
            ModernGrammar::new().extract(source)
        }
        TemplateId::Classic => {
            debug!("parsing classic-family LaTeX");
            ClassicGrammar::new().extract(source)
        }
    }
}

/// The moderncv preamble is the distinguishing marker; anything else gets
/// the classic routine as a best-effort fallback.
pub fn detect_dialect(source: &str) -> TemplateId {
    if source.contains("\\documentclass") && source.contains("moderncv") {
        TemplateId::Modern
    } else {
        TemplateId::Classic
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared extraction helpers
// ────────────────────────────────────────────────────────────────────────────

/// Splits the document into named `\section{...}` blocks, each spanning to
/// the next heading or `\end{document}`. Running entry regexes only inside
/// their own block prevents cross-section pattern leakage.
pub(crate) fn section_blocks(source: &str) -> HashMap<String, &str> {
    let heading =
        Regex::new(r"\\section\{([^}]*)\}").expect("static section-heading pattern compiles");
    let body_end = source.find("\\end{document}").unwrap_or(source.len());

    let marks: Vec<(usize, usize, &str)> = heading
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some((whole.start(), whole.end(), name.as_str()))
        })
        .filter(|(start, _, _)| *start < body_end)
        .collect();

    let mut blocks = HashMap::new();
    for (i, (_, content_start, name)) in marks.iter().enumerate() {
        let content_end = marks
            .get(i + 1)
            .map(|(next_start, _, _)| *next_start)
            .unwrap_or(body_end);
        blocks.insert(name.to_string(), &source[*content_start..content_end]);
    }
    blocks
}

/// A parsed `start -- end` range. The literal word "Present" (any case) as
/// the end marks the entry as current/ongoing and clears the end date.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
    pub is_current: bool,
}

pub(crate) fn parse_date_range(raw: &str) -> DateRange {
    let raw = raw.trim();
    if raw.is_empty() {
        return DateRange::default();
    }
    match raw.split_once("--") {
        Some((start, end)) => {
            let start = non_empty(start);
            let end_raw = end.trim();
            if end_raw.eq_ignore_ascii_case("present") {
                DateRange {
                    start,
                    end: None,
                    is_current: true,
                }
            } else {
                DateRange {
                    start,
                    end: non_empty(end_raw),
                    is_current: false,
                }
            }
        }
        None => DateRange {
            start: non_empty(raw),
            end: None,
            is_current: false,
        },
    }
}

/// Unescapes and trims a captured value, mapping blanks to None.
pub(crate) fn clean_capture(raw: &str) -> Option<String> {
    let cleaned = unescape_latex(raw);
    non_empty(&cleaned)
}

pub(crate) fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Splits a comma-joined macro argument into trimmed, unescaped items.
pub(crate) fn split_comma_list(raw: &str) -> Vec<String> {
    unescape_latex(raw)
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Comma-split technologies payload; the generator's "N/A" placeholder
/// means an empty list.
pub(crate) fn tech_list(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("n/a") {
        return Vec::new();
    }
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reassembles an entry's free-text body using the generator's bullet
/// convention: lines marked `•` or `-` become `• ` bullets, other non-empty
/// lines stay plain paragraph lines.
pub(crate) fn normalize_description(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if let Some(rest) = line.strip_prefix('•') {
                format!("• {}", rest.trim_start())
            } else if let Some(rest) = line.strip_prefix('-') {
                format!("• {}", rest.trim_start())
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_modern_dialect() {
        let source = "\\documentclass[11pt]{moderncv}\n\\begin{document}\\end{document}";
        assert_eq!(detect_dialect(source), TemplateId::Modern);
    }

    #[test]
    fn test_detect_classic_dialect() {
        let source = "\\documentclass{article}\n\\begin{document}\\end{document}";
        assert_eq!(detect_dialect(source), TemplateId::Classic);
    }

    #[test]
    fn test_unrecognized_input_falls_back_to_classic() {
        assert_eq!(detect_dialect("just some prose"), TemplateId::Classic);
    }

    #[test]
    fn test_section_blocks_span_to_next_heading() {
        let source = "\\section{One}\nalpha\n\\section{Two}\nbeta\n\\end{document}";
        let blocks = section_blocks(source);
        assert_eq!(blocks.get("One").map(|s| s.trim()), Some("alpha"));
        assert_eq!(blocks.get("Two").map(|s| s.trim()), Some("beta"));
    }

    #[test]
    fn test_section_blocks_stop_at_end_document() {
        let source = "\\section{Only}\ncontent\n\\end{document}\ntrailing";
        let blocks = section_blocks(source);
        assert_eq!(blocks.get("Only").map(|s| s.trim()), Some("content"));
    }

    #[test]
    fn test_date_range_plain() {
        let range = parse_date_range("2019-04 -- 2021-06");
        assert_eq!(range.start.as_deref(), Some("2019-04"));
        assert_eq!(range.end.as_deref(), Some("2021-06"));
        assert!(!range.is_current);
    }

    #[test]
    fn test_date_range_present_clears_end() {
        for raw in ["2019-04 -- Present", "2019-04 -- present", "2019-04--PRESENT"] {
            let range = parse_date_range(raw);
            assert_eq!(range.start.as_deref(), Some("2019-04"), "input {raw:?}");
            assert_eq!(range.end, None);
            assert!(range.is_current, "input {raw:?}");
        }
    }

    #[test]
    fn test_date_range_start_only() {
        let range = parse_date_range("2020-01");
        assert_eq!(range.start.as_deref(), Some("2020-01"));
        assert_eq!(range.end, None);
        assert!(!range.is_current);
    }

    #[test]
    fn test_date_range_empty() {
        assert_eq!(parse_date_range("  "), DateRange::default());
    }

    #[test]
    fn test_split_comma_list_trims_and_drops_blanks() {
        assert_eq!(
            split_comma_list(" Rust , , SQL ,WASM"),
            vec!["Rust".to_string(), "SQL".to_string(), "WASM".to_string()]
        );
    }

    #[test]
    fn test_normalize_description_bullets() {
        let raw = "• Led the team\n- Shipped v2\nPlain closing line\n\n";
        assert_eq!(
            normalize_description(raw),
            "• Led the team\n• Shipped v2\nPlain closing line"
        );
    }

    #[test]
    fn test_parse_latex_never_panics_on_garbage() {
        for source in ["", "\\{\\}{{{", "\\documentclass{moderncv}", "%%%%%"] {
            let parsed = parse_latex(source);
            assert!(parsed.is_empty(), "garbage input {source:?} produced fields");
        }
    }
}
