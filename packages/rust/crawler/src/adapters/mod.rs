//! Site adapter trait and built-in adapters for job posting extraction.
//!
//! Adapters map a rendered job page to a [`RawCandidate`] using ordered,
//! per-site selector lists. The registry picks an adapter by request host.

mod generic;
mod glassdoor;
mod indeed;
mod linkedin;
mod monster;

use jobsnap_shared::{AppConfig, RawCandidate, SiteSelectorsConfig};
use url::Url;

use crate::document::Document;

pub use generic::GenericAdapter;
pub use glassdoor::GlassdoorAdapter;
pub use indeed::IndeedAdapter;
pub use linkedin::LinkedInAdapter;
pub use monster::MonsterAdapter;

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

/// Ordered selector lists for each record field.
///
/// The order is significant: earlier selectors win. Description selectors
/// are not first-match; every match is concatenated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteSelectors {
    pub title: Vec<String>,
    pub company: Vec<String>,
    pub location: Vec<String>,
    pub description: Vec<String>,
    pub salary: Vec<String>,
}

impl SiteSelectors {
    /// Replace every list the override sets; keep the rest.
    pub fn with_overrides(mut self, overrides: &SiteSelectorsConfig) -> Self {
        if let Some(title) = &overrides.title {
            self.title = title.clone();
        }
        if let Some(company) = &overrides.company {
            self.company = company.clone();
        }
        if let Some(location) = &overrides.location {
            self.location = location.clone();
        }
        if let Some(description) = &overrides.description {
            self.description = description.clone();
        }
        if let Some(salary) = &overrides.salary {
            self.salary = salary.clone();
        }
        self
    }
}

/// Build an owned selector list from string literals.
pub(crate) fn list(selectors: &[&str]) -> Vec<String> {
    selectors.iter().map(|s| (*s).to_string()).collect()
}

/// First-match extraction for title/company/location/salary plus
/// concatenated description. Shared by every board-specific adapter.
pub(crate) fn extract_with(doc: &Document, selectors: &SiteSelectors) -> RawCandidate {
    RawCandidate {
        job_title: doc.first_text(&selectors.title).unwrap_or_default(),
        company_name: doc.first_text(&selectors.company).unwrap_or_default(),
        location: doc.first_text(&selectors.location).unwrap_or_default(),
        salary: doc.first_text(&selectors.salary).unwrap_or_default(),
        job_description: doc.concat_text(&selectors.description),
        requirements: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Trait for site-specific job posting extraction.
///
/// Adapters are tried in registration order; `GenericAdapter` is the
/// always-last fallback.
pub trait SiteAdapter: Send + Sync {
    /// Whether this adapter handles the given lowercase host.
    fn matches(&self, host: &str) -> bool;

    /// Map a parsed page to a raw candidate record. Must not fail.
    fn extract(&self, doc: &Document, source_url: &str) -> RawCandidate;

    /// Short adapter name, also the `[sites.<name>]` config key.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Holds registered adapters in priority order.
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn SiteAdapter>>,
    fallback: GenericAdapter,
}

impl AdapterRegistry {
    /// Create a registry with all built-in adapters and built-in selectors.
    pub fn new() -> Self {
        Self::from_config(&AppConfig::default())
    }

    /// Create a registry applying `[sites.<name>]` selector overrides.
    pub fn from_config(config: &AppConfig) -> Self {
        let site = |name: &str, defaults: SiteSelectors| match config.sites.get(name) {
            Some(overrides) => defaults.with_overrides(overrides),
            None => defaults,
        };

        Self {
            adapters: vec![
                Box::new(LinkedInAdapter::new(site("linkedin", LinkedInAdapter::selectors()))),
                Box::new(IndeedAdapter::new(site("indeed", IndeedAdapter::selectors()))),
                Box::new(GlassdoorAdapter::new(site(
                    "glassdoor",
                    GlassdoorAdapter::selectors(),
                ))),
                Box::new(MonsterAdapter::new(site("monster", MonsterAdapter::selectors()))),
            ],
            fallback: GenericAdapter::new(site("generic", GenericAdapter::selectors())),
        }
    }

    /// Register an extra adapter ahead of the generic fallback.
    pub fn register(&mut self, adapter: Box<dyn SiteAdapter>) {
        self.adapters.push(adapter);
    }

    /// Pick the adapter for `url`. Always returns one (generic is the fallback).
    pub fn detect(&self, url: &str) -> &dyn SiteAdapter {
        let host = host_of(url);
        self.adapters
            .iter()
            .find(|adapter| adapter.matches(&host))
            .map(|adapter| adapter.as_ref())
            .unwrap_or(&self.fallback)
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase host of `url`, or the whole lowercased string when it does not
/// parse as an absolute URL.
pub fn host_of(url: &str) -> String {
    match Url::parse(url.trim()) {
        Ok(parsed) => parsed
            .host_str()
            .map(str::to_lowercase)
            .unwrap_or_else(|| url.to_lowercase()),
        Err(_) => url.to_lowercase(),
    }
}
