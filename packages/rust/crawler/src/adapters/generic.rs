//! Generic (fallback) site adapter.
//!
//! Always matches: used when the host is not a known job board. Title,
//! company and location use broad first-match selectors; the description is
//! assembled from every paragraph-sized text block on the page.

use jobsnap_shared::RawCandidate;

use super::{SiteAdapter, SiteSelectors, list};
use crate::document::{Document, compile_group, element_text};

/// Blocks must be longer than this many characters to count as description.
pub const MIN_BLOCK_CHARS: usize = 100;

/// Blocks must be shorter than this many characters to count as description.
pub const MAX_BLOCK_CHARS: usize = 5000;

/// Generic adapter that works on arbitrary job pages.
/// Always matches as the lowest-priority fallback.
pub struct GenericAdapter {
    selectors: SiteSelectors,
}

impl GenericAdapter {
    pub fn new(selectors: SiteSelectors) -> Self {
        Self { selectors }
    }

    /// Built-in selectors. `description` lists the block elements scanned.
    pub fn selectors() -> SiteSelectors {
        SiteSelectors {
            title: list(&["h1", "h2", ".title", r#"[class*="title"]"#]),
            company: list(&[
                r#"[class*="company"]"#,
                r#"[class*="employer"]"#,
                r#"[class*="organization"]"#,
            ]),
            location: list(&[r#"[class*="location"]"#, r#"[class*="address"]"#]),
            description: list(&["p", "div", "section"]),
            salary: list(&[r#"[class*="salary"]"#, r#"[class*="compensation"]"#]),
        }
    }

    /// Concatenate every block whose trimmed length lies strictly between
    /// [`MIN_BLOCK_CHARS`] and [`MAX_BLOCK_CHARS`], in document order.
    fn paragraph_scan(&self, doc: &Document) -> String {
        let Some(blocks) = compile_group(&self.selectors.description) else {
            return String::new();
        };

        doc.select_all(&blocks)
            .map(element_text)
            .filter(|text| is_paragraph_sized(text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl SiteAdapter for GenericAdapter {
    fn matches(&self, _host: &str) -> bool {
        // Generic adapter always matches
        true
    }

    fn extract(&self, doc: &Document, _source_url: &str) -> RawCandidate {
        RawCandidate {
            job_title: doc.first_text(&self.selectors.title).unwrap_or_default(),
            company_name: doc.first_text(&self.selectors.company).unwrap_or_default(),
            location: doc.first_text(&self.selectors.location).unwrap_or_default(),
            salary: doc.first_text(&self.selectors.salary).unwrap_or_default(),
            job_description: self.paragraph_scan(doc),
            requirements: Vec::new(),
        }
    }

    fn name(&self) -> &str {
        "generic"
    }
}

fn is_paragraph_sized(text: &str) -> bool {
    let len = text.chars().count();
    len > MIN_BLOCK_CHARS && len < MAX_BLOCK_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_paragraphs(lengths: &[(char, usize)]) -> String {
        let body: String = lengths
            .iter()
            .map(|(c, n)| format!("<p>{}</p>", c.to_string().repeat(*n)))
            .collect();
        format!("<html><body>{body}</body></html>")
    }

    #[test]
    fn description_length_window_is_exclusive() {
        let html = page_with_paragraphs(&[('a', 99), ('b', 150), ('c', 5001), ('d', 100), ('e', 4999)]);
        let adapter = GenericAdapter::new(GenericAdapter::selectors());
        let candidate = adapter.extract(&Document::parse(&html), "https://example.com/job");

        let lines: Vec<&str> = candidate.job_description.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "b".repeat(150));
        assert_eq!(lines[1], "e".repeat(4999));
    }

    #[test]
    fn length_is_measured_after_trimming() {
        let padded = format!("<html><body><p>   {}   </p></body></html>", "x".repeat(100));
        let adapter = GenericAdapter::new(GenericAdapter::selectors());
        let candidate = adapter.extract(&Document::parse(&padded), "https://example.com/job");
        assert!(candidate.job_description.is_empty());
    }

    #[test]
    fn first_heading_wins_for_title() {
        let html = r#"<html><body>
            <div class="page-title">Careers</div>
            <h2>Open roles</h2>
            <h1>Data Engineer</h1>
        </body></html>"#;
        let adapter = GenericAdapter::new(GenericAdapter::selectors());
        let candidate = adapter.extract(&Document::parse(html), "https://example.com/job");
        assert_eq!(candidate.job_title, "Data Engineer");
    }
}
