//! LinkedIn job adapter.

use jobsnap_shared::{MAX_REQUIREMENTS, RawCandidate};
use scraper::Selector;

use super::{SiteAdapter, SiteSelectors, extract_with, list};
use crate::document::{Document, element_text};

/// Words that mark a list item or paragraph as a requirement line.
const REQUIREMENT_KEYWORDS: [&str; 3] = ["requirement", "qualification", "experience"];

/// Extracts postings from `linkedin.com/jobs/view/...` pages.
pub struct LinkedInAdapter {
    selectors: SiteSelectors,
}

impl LinkedInAdapter {
    pub fn new(selectors: SiteSelectors) -> Self {
        Self { selectors }
    }

    /// Built-in selector lists, data attributes first.
    pub fn selectors() -> SiteSelectors {
        SiteSelectors {
            title: list(&[
                r#"[data-test-id="job-details-jobs-unified-top-card__job-title"]"#,
                ".job-details-jobs-unified-top-card__job-title",
                ".top-card-layout__title",
                r#"h1[class*="job-title"]"#,
                r#"h1[class*="title"]"#,
            ]),
            company: list(&[
                r#"[data-test-id="job-details-jobs-unified-top-card__company-name"]"#,
                ".job-details-jobs-unified-top-card__company-name",
                ".topcard__org-name-link",
                r#"[class*="company-name"]"#,
                r#"[class*="employer"]"#,
            ]),
            location: list(&[
                ".job-details-jobs-unified-top-card__bullet",
                ".topcard__flavor--bullet",
                r#"[class*="job-location"]"#,
                r#"[class*="location"]"#,
            ]),
            description: list(&[
                r#"[data-test-id="job-details-jobs-unified-top-card__job-description"]"#,
                ".jobs-description__content",
                r#"[class*="job-description"]"#,
                r#"[class*="description"]"#,
            ]),
            salary: list(&[
                ".compensation__salary",
                r#"[class*="salary"]"#,
            ]),
        }
    }
}

impl SiteAdapter for LinkedInAdapter {
    fn matches(&self, host: &str) -> bool {
        host.contains("linkedin.com")
    }

    fn extract(&self, doc: &Document, _source_url: &str) -> RawCandidate {
        let mut candidate = extract_with(doc, &self.selectors);
        candidate.requirements = extract_requirements(doc);
        candidate
    }

    fn name(&self) -> &str {
        "linkedin"
    }
}

/// Scan every `<li>`/`<p>` for requirement-looking lines; keep the first few.
pub(crate) fn extract_requirements(doc: &Document) -> Vec<String> {
    let Ok(sel) = Selector::parse("li, p") else {
        return Vec::new();
    };

    doc.select_all(&sel)
        .map(element_text)
        .filter(|text| is_requirement(text))
        .take(MAX_REQUIREMENTS)
        .collect()
}

fn is_requirement(text: &str) -> bool {
    let lower = text.to_lowercase();
    REQUIREMENT_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
