//! Indeed job adapter.

use jobsnap_shared::RawCandidate;

use super::{SiteAdapter, SiteSelectors, extract_with, list};
use crate::document::Document;

/// Extracts postings from Indeed `viewjob` pages.
pub struct IndeedAdapter {
    selectors: SiteSelectors,
}

impl IndeedAdapter {
    pub fn new(selectors: SiteSelectors) -> Self {
        Self { selectors }
    }

    /// Built-in selector lists, `data-testid` attributes first.
    pub fn selectors() -> SiteSelectors {
        SiteSelectors {
            title: list(&[
                r#"[data-testid="jobsearch-JobInfoHeader-title"]"#,
                r#"h1[class*="jobsearch-JobInfoHeader-title"]"#,
                r#"h1[class*="title"]"#,
            ]),
            company: list(&[
                r#"[data-testid="jobsearch-JobInfoHeader-companyName"]"#,
                r#"[data-testid="inlineHeader-companyName"]"#,
                r#"[class*="company"]"#,
                r#"[class*="employer"]"#,
            ]),
            location: list(&[
                r#"[data-testid="jobsearch-JobInfoHeader-locationText"]"#,
                r#"[data-testid="inlineHeader-companyLocation"]"#,
                r#"[class*="job-location"]"#,
                r#"[class*="location"]"#,
            ]),
            description: list(&[
                r#"[data-testid="jobsearch-JobComponent-description"]"#,
                "#jobDescriptionText",
                r#"[class*="job-description"]"#,
                r#"[class*="description"]"#,
            ]),
            salary: list(&[
                "#salaryInfoAndJobType",
                r#"[data-testid="jobsearch-OtherJobDetailsContainer"] [class*="salary"]"#,
                r#"[class*="salary"]"#,
            ]),
        }
    }
}

impl SiteAdapter for IndeedAdapter {
    fn matches(&self, host: &str) -> bool {
        host.contains("indeed.com")
    }

    fn extract(&self, doc: &Document, _source_url: &str) -> RawCandidate {
        extract_with(doc, &self.selectors)
    }

    fn name(&self) -> &str {
        "indeed"
    }
}
