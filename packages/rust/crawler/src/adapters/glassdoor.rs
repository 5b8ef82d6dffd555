//! Glassdoor job adapter.

use jobsnap_shared::RawCandidate;

use super::{SiteAdapter, SiteSelectors, extract_with, list};
use crate::document::Document;

/// Extracts postings from Glassdoor job-listing pages.
pub struct GlassdoorAdapter {
    selectors: SiteSelectors,
}

impl GlassdoorAdapter {
    pub fn new(selectors: SiteSelectors) -> Self {
        Self { selectors }
    }

    /// Built-in selector lists, `data-test` attributes first.
    pub fn selectors() -> SiteSelectors {
        SiteSelectors {
            title: list(&[
                r#"[data-test="job-title"]"#,
                r#"h1[class*="job-title"]"#,
                r#"h1[class*="title"]"#,
            ]),
            company: list(&[
                r#"[data-test="employer-name"]"#,
                r#"[class*="employer"]"#,
                r#"[class*="company"]"#,
            ]),
            location: list(&[
                r#"[data-test="location"]"#,
                r#"[class*="job-location"]"#,
                r#"[class*="location"]"#,
            ]),
            description: list(&[
                r#"[data-test="job-description"]"#,
                ".jobDescriptionContent",
                r#"[class*="job-description"]"#,
                r#"[class*="description"]"#,
            ]),
            salary: list(&[
                r#"[data-test="detailSalary"]"#,
                r#"[class*="salary"]"#,
            ]),
        }
    }
}

impl SiteAdapter for GlassdoorAdapter {
    fn matches(&self, host: &str) -> bool {
        host.contains("glassdoor.com")
    }

    fn extract(&self, doc: &Document, _source_url: &str) -> RawCandidate {
        extract_with(doc, &self.selectors)
    }

    fn name(&self) -> &str {
        "glassdoor"
    }
}
