//! Monster job adapter.
//!
//! Monster exposes no stable data attributes, so only class-substring
//! selectors are used.

use jobsnap_shared::RawCandidate;

use super::{SiteAdapter, SiteSelectors, extract_with, list};
use crate::document::Document;

pub struct MonsterAdapter {
    selectors: SiteSelectors,
}

impl MonsterAdapter {
    pub fn new(selectors: SiteSelectors) -> Self {
        Self { selectors }
    }

    pub fn selectors() -> SiteSelectors {
        SiteSelectors {
            title: list(&[r#"h1[class*="job-title"]"#, r#"h1[class*="title"]"#]),
            company: list(&[r#"[class*="company"]"#, r#"[class*="employer"]"#]),
            location: list(&[r#"[class*="job-location"]"#, r#"[class*="location"]"#]),
            description: list(&[r#"[class*="job-description"]"#, r#"[class*="description"]"#]),
            salary: list(&[r#"[class*="salary"]"#]),
        }
    }
}

impl SiteAdapter for MonsterAdapter {
    fn matches(&self, host: &str) -> bool {
        host.contains("monster.com")
    }

    fn extract(&self, doc: &Document, _source_url: &str) -> RawCandidate {
        extract_with(doc, &self.selectors)
    }

    fn name(&self) -> &str {
        "monster"
    }
}
