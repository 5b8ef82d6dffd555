//! Page rendering, markup parsing, and job board adapters.
//!
//! This crate provides:
//! - [`render`]: Per-request headless Chrome rendering ([`ChromeRenderer`])
//! - [`document`]: Selector-based text queries over rendered HTML
//! - [`adapters`]: Site-specific extractors (LinkedIn, Indeed, etc.)
//! - [`AdapterRegistry`]: Picks the adapter for a request host

pub mod adapters;
pub mod document;
pub mod render;

pub use adapters::{
    AdapterRegistry, GenericAdapter, GlassdoorAdapter, IndeedAdapter, LinkedInAdapter,
    MonsterAdapter, SiteAdapter, SiteSelectors, host_of,
};
pub use document::Document;
pub use render::{ChromeRenderer, RenderedPage, Renderer};

#[cfg(test)]
mod tests {
    use super::*;

    fn load_fixture(name: &str) -> Document {
        let path = format!("../../../fixtures/html/{name}");
        let content = std::fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("missing fixture: {path}"));
        Document::parse(&content)
    }

    fn extract(fixture: &str, url: &str) -> jobsnap_shared::RawCandidate {
        let doc = load_fixture(fixture);
        let registry = AdapterRegistry::new();
        registry.detect(url).extract(&doc, url)
    }

    // -----------------------------------------------------------------------
    // Board extraction tests
    // -----------------------------------------------------------------------

    #[test]
    fn linkedin_extracts_posting() {
        let c = extract(
            "linkedin.html",
            "https://www.linkedin.com/jobs/view/senior-rust-engineer-at-ferrous-labs-3812345678",
        );

        assert_eq!(c.job_title, "Senior Rust Engineer");
        assert_eq!(c.company_name, "Ferrous Labs");
        assert_eq!(c.location, "Berlin, Germany");
        assert_eq!(c.salary, "€90,000 - €120,000");
        assert!(c.job_description.contains("async networking services"));
        assert!(c.job_description.contains("What you will do"));
        assert_eq!(c.requirements.len(), 5);
        assert_eq!(c.requirements[0], "5+ years of experience writing Rust in production");
    }

    #[test]
    fn indeed_extracts_posting() {
        let c = extract("indeed.html", "https://www.indeed.com/viewjob?jk=abc123");

        assert_eq!(c.job_title, "Warehouse Operations Lead");
        assert_eq!(c.company_name, "Northwind Logistics");
        assert_eq!(c.location, "Columbus, OH 43215");
        assert_eq!(c.salary, "$62,000 - $70,000 a year");
        assert!(c.job_description.starts_with("Northwind is hiring"));
        assert!(c.requirements.is_empty());
    }

    #[test]
    fn glassdoor_extracts_posting() {
        let c = extract("glassdoor.html", "https://www.glassdoor.com/job-listing/data-analyst");

        assert_eq!(c.job_title, "Data Analyst");
        assert_eq!(c.company_name, "Contoso Health");
        assert_eq!(c.location, "Austin, TX");
        assert_eq!(c.salary, "$75K - $95K (Employer est.)");
        assert!(c.job_description.contains("clinical outcomes"));
    }

    #[test]
    fn monster_extracts_posting() {
        let c = extract("monster.html", "https://www.monster.com/job-openings/nurse");

        assert_eq!(c.job_title, "Registered Nurse");
        assert_eq!(c.company_name, "Lakeside Medical Center");
        assert_eq!(c.location, "Madison, WI");
        assert!(c.job_description.contains("patient care"));
    }

    #[test]
    fn generic_extracts_posting() {
        let c = extract("generic.html", "https://careers.example.com/jobs/42");

        assert_eq!(c.job_title, "Product Designer");
        assert_eq!(c.company_name, "Example Co.");
        assert_eq!(c.location, "Remote (US)");
        assert!(c.job_description.contains("design system"));
        // Navigation chrome is too short to qualify.
        assert!(!c.job_description.contains("Privacy"));
    }

    #[test]
    fn empty_page_yields_empty_candidate() {
        let doc = Document::parse("<html><body></body></html>");
        let registry = AdapterRegistry::new();
        let url = "https://www.indeed.com/viewjob?jk=1";
        let c = registry.detect(url).extract(&doc, url);
        assert_eq!(c, jobsnap_shared::RawCandidate::default());
    }

    #[test]
    fn extraction_is_deterministic() {
        let url = "https://www.linkedin.com/jobs/view/1";
        assert_eq!(extract("linkedin.html", url), extract("linkedin.html", url));
    }
}
