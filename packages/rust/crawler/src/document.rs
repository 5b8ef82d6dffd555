//! Queryable wrapper around rendered HTML.
//!
//! [`Document`] is a thin layer over [`scraper::Html`] exposing the two
//! queries the site adapters need: "first non-empty text for an ordered
//! selector list" and "every element matching a selector group".

use scraper::html::Select;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// A parsed HTML document.
///
/// Parsing never fails; malformed markup is repaired the way browsers do it.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a full HTML document.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Try each selector in order; return the trimmed text of the first
    /// element matched by the first selector that yields non-empty text.
    ///
    /// Invalid selectors are logged and skipped.
    pub fn first_text<S: AsRef<str>>(&self, selectors: &[S]) -> Option<String> {
        for raw in selectors {
            let raw = raw.as_ref();
            let Some(sel) = compile(raw) else {
                continue;
            };
            if let Some(el) = self.html.select(&sel).next() {
                let text = element_text(el);
                if !text.is_empty() {
                    debug!(selector = raw, "selector hit");
                    return Some(text);
                }
            }
        }
        None
    }

    /// Lazily iterate every element matching `selector`, in document order.
    ///
    /// Each call starts a fresh traversal, so the sequence can be restarted
    /// by calling again with the same selector.
    pub fn select_all<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.html.select(selector)
    }

    /// Trimmed text of every element matching any of `selectors`, in document
    /// order, joined with `\n`. Empty blocks are skipped.
    pub fn concat_text<S: AsRef<str>>(&self, selectors: &[S]) -> String {
        let Some(group) = compile_group(selectors) else {
            return String::new();
        };

        self.select_all(&group)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Collect an element's descendant text and trim it.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Compile a single selector, logging (not failing) on bad input.
pub(crate) fn compile(raw: &str) -> Option<Selector> {
    match Selector::parse(raw) {
        Ok(sel) => Some(sel),
        Err(e) => {
            warn!(selector = raw, error = %e, "ignoring invalid selector");
            None
        }
    }
}

/// Compile a list of selectors into one selector group (`a, b, c`).
///
/// A group matches each element at most once and yields matches in document
/// order, which is what the concatenating scans rely on. Invalid entries are
/// dropped individually.
pub(crate) fn compile_group<S: AsRef<str>>(selectors: &[S]) -> Option<Selector> {
    let valid: Vec<&str> = selectors
        .iter()
        .map(AsRef::as_ref)
        .filter(|raw| compile(raw).is_some())
        .collect();

    if valid.is_empty() {
        return None;
    }
    compile(&valid.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <h1 class="headline">  Staff Engineer  </h1>
        <div class="empty-title"></div>
        <span data-test="employer"> Acme </span>
        <div class="description">First block</div>
        <p>between</p>
        <section class="job-description">Second block</section>
    </body></html>"#;

    #[test]
    fn first_text_respects_selector_order() {
        let doc = Document::parse(PAGE);
        let text = doc.first_text(&["[data-test=\"employer\"]", "h1"]);
        assert_eq!(text.as_deref(), Some("Acme"));

        let text = doc.first_text(&["h1", "[data-test=\"employer\"]"]);
        assert_eq!(text.as_deref(), Some("Staff Engineer"));
    }

    #[test]
    fn first_text_skips_empty_and_invalid() {
        let doc = Document::parse(PAGE);
        let text = doc.first_text(&["[[broken", ".empty-title", ".headline"]);
        assert_eq!(text.as_deref(), Some("Staff Engineer"));

        assert_eq!(doc.first_text(&[".missing"]), None);
    }

    #[test]
    fn concat_text_follows_document_order() {
        let doc = Document::parse(PAGE);
        // Selector order is reversed relative to the markup.
        let text = doc.concat_text(&["[class*=\"job-description\"]", ".description"]);
        assert_eq!(text, "First block\nSecond block");
    }

    #[test]
    fn select_all_is_restartable() {
        let doc = Document::parse(PAGE);
        let sel = Selector::parse("div, section").unwrap();
        let first = doc.select_all(&sel).count();
        let second = doc.select_all(&sel).count();
        assert_eq!(first, 3);
        assert_eq!(first, second);
    }
}
