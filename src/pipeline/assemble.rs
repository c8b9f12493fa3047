//! Result assembly: markup → plain text, joined with the page-break marker.
//!
//! The OCR model answers in Markdown. Downstream consumers want prose, so
//! each result is reduced to plain text by walking the Markdown event
//! stream and keeping only content: headings lose their `#`, emphasis loses
//! its asterisks, tables keep cell text in reading order. Two cheap string
//! passes run first to fix model quirks — fence-wrapped output and stray
//! invisible Unicode — because they would otherwise survive the event walk
//! as literal text.
//!
//! Segments are then concatenated in page order with [`PAGE_BREAK`] between
//! consecutive pages: none before the first, none after the last. Zero
//! pages yield an empty string; one page yields its text verbatim.

use crate::engine::RawModelResult;
use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Options, Parser, TagEnd};
use regex::Regex;

/// The literal delimiter between consecutive page texts in the assembled
/// document. An N-page document contains exactly N−1 occurrences.
pub const PAGE_BREAK: &str = "\n\n=== PAGE BREAK ===\n\n";

/// Join the ordered per-page texts into one document.
pub fn assemble_document(results: &[RawModelResult]) -> String {
    results
        .iter()
        .map(|r| page_text(&r.markdown))
        .collect::<Vec<_>>()
        .join(PAGE_BREAK)
}

/// Reduce one raw model result to plain text.
pub fn page_text(raw: &str) -> String {
    let s = normalise_line_endings(raw);
    let s = strip_outer_fences(&s);
    let s = remove_invisible_chars(&s);
    markdown_to_text(&s)
}

// ── Model-output cleanup ─────────────────────────────────────────────────

/// Models sometimes wrap the whole answer in ``` fences despite the prompt
/// saying not to.
static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:markdown)?\n(.*)\n```\s*$").unwrap());

fn strip_outer_fences(input: &str) -> String {
    if let Some(caps) = RE_OUTER_FENCES.captures(input.trim()) {
        caps[1].to_string()
    } else {
        input.to_string()
    }
}

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

fn remove_invisible_chars(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' | '\u{00AD}'))
        .collect()
}

// ── Markdown → plain text ────────────────────────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Walk the Markdown event stream, keeping content and dropping structure.
fn markdown_to_text(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);

    let mut text = String::new();
    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Text(s) | Event::Code(s) => text.push_str(&s),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::FootnoteReference(s) => {
                text.push('[');
                text.push_str(&s);
                text.push(']');
            }
            // Blank line after block-level content.
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::CodeBlock) => text.push_str("\n\n"),
            // Line break after each list item and table row.
            Event::End(TagEnd::Item)
            | Event::End(TagEnd::TableHead)
            | Event::End(TagEnd::TableRow) => text.push('\n'),
            // Cells in a row read left to right.
            Event::End(TagEnd::TableCell) => text.push('\t'),
            // Everything else — tag starts, rules, raw HTML — is structure.
            _ => {}
        }
    }

    tidy_whitespace(&text)
}

/// Trim trailing whitespace per line, collapse runs of blank lines, and
/// trim the ends of the document.
fn tidy_whitespace(input: &str) -> String {
    let trimmed_lines = input
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    RE_BLANK_LINES
        .replace_all(&trimmed_lines, "\n\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(markdown: &str) -> RawModelResult {
        RawModelResult {
            markdown: markdown.to_string(),
            input_tokens: 0,
            output_tokens: 0,
        }
    }

    #[test]
    fn plain_prose_passes_through_verbatim() {
        assert_eq!(page_text("Alpha"), "Alpha");
    }

    #[test]
    fn headings_lose_their_markers() {
        assert_eq!(
            page_text("# Title\n\nBody text."),
            "Title\n\nBody text."
        );
    }

    #[test]
    fn emphasis_markers_are_stripped() {
        assert_eq!(page_text("Some **bold** and *italic* words."), "Some bold and italic words.");
    }

    #[test]
    fn table_cells_survive_in_reading_order() {
        let md = "| Name | Qty |\n|------|-----|\n| Bolt | 4 |\n| Nut | 9 |";
        let text = page_text(md);
        assert!(!text.contains('|'), "pipes must be stripped: {text:?}");
        let positions: Vec<usize> = ["Name", "Qty", "Bolt", "4", "Nut", "9"]
            .iter()
            .map(|w| text.find(w).unwrap_or_else(|| panic!("missing {w} in {text:?}")))
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "cell order must be preserved");
    }

    #[test]
    fn fence_wrapped_output_is_unwrapped() {
        assert_eq!(page_text("```markdown\nAlpha\n```"), "Alpha");
        assert_eq!(page_text("```\nAlpha\n```"), "Alpha");
    }

    #[test]
    fn invisible_chars_are_removed() {
        assert_eq!(page_text("Al\u{200B}pha\u{FEFF}"), "Alpha");
    }

    #[test]
    fn two_pages_join_with_one_delimiter() {
        let doc = assemble_document(&[result("Alpha"), result("Beta")]);
        assert_eq!(doc, "Alpha\n\n=== PAGE BREAK ===\n\nBeta");
    }

    #[test]
    fn delimiter_count_is_pages_minus_one() {
        for n in 0usize..6 {
            let results: Vec<RawModelResult> =
                (0..n).map(|i| result(&format!("Page {i}"))).collect();
            let doc = assemble_document(&results);
            assert_eq!(
                doc.matches(PAGE_BREAK).count(),
                n.saturating_sub(1),
                "n = {n}"
            );
        }
    }

    #[test]
    fn single_page_has_no_delimiter() {
        let doc = assemble_document(&[result("Only page")]);
        assert_eq!(doc, "Only page");
        assert!(!doc.contains(PAGE_BREAK));
    }

    #[test]
    fn zero_pages_yield_empty_string() {
        assert_eq!(assemble_document(&[]), "");
    }
}
