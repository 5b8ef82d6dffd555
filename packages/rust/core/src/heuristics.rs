//! Best-effort company and job title guesses from URL paths.
//!
//! Job boards often embed the posting's title and employer in the URL slug
//! (`/jobs/view/senior-backend-engineer-at-acme-corp-3812345678`). These
//! functions never fail: they return a guess or the matching placeholder.

use std::sync::LazyLock;

use jobsnap_shared::{COMPANY_PLACEHOLDER, JOB_TITLE_PLACEHOLDER};
use regex::Regex;
use url::Url;

/// Company used when neither the page nor the URL names one.
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Title used when neither the page nor the URL names one.
pub const UNKNOWN_TITLE: &str = "Unknown Position";

/// Guess the employer from a LinkedIn, Indeed or Glassdoor `...-at-<company>` slug.
///
/// Returns [`COMPANY_PLACEHOLDER`] for other hosts or when nothing matches.
pub fn company_from_url(url: &str) -> String {
    static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)linkedin\.com/jobs/(?:.*?[/-])??at-([^/?#]+)").expect("valid regex")
    });
    static INDEED_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)indeed\.com/(?:.*?[/-])??at-([^/?#]+)").expect("valid regex")
    });
    static GLASSDOOR_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)glassdoor\.com/(?:.*?[/-])??at-([^/?#]+)").expect("valid regex")
    });

    let lower = url.to_lowercase();
    let re: &Regex = if lower.contains("linkedin.com") {
        &*LINKEDIN_RE
    } else if lower.contains("indeed.com") {
        &*INDEED_RE
    } else if lower.contains("glassdoor.com") {
        &*GLASSDOOR_RE
    } else {
        return COMPANY_PLACEHOLDER.to_string();
    };

    re.captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|slug| humanize_slug(slug.as_str()))
        .unwrap_or_else(|| COMPANY_PLACEHOLDER.to_string())
}

/// Guess the job title from a LinkedIn `jobs/view/<slug>` or Indeed `job-<slug>` path.
///
/// Any `-at-<company>` suffix is cut off. Returns [`JOB_TITLE_PLACEHOLDER`]
/// for other hosts or when nothing matches.
pub fn job_title_from_url(url: &str) -> String {
    static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)linkedin\.com/jobs/view/([^/?#]+)").expect("valid regex")
    });
    static INDEED_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)indeed\.com/(?:.*?[/-])??job-([^/?#]+)").expect("valid regex")
    });

    let lower = url.to_lowercase();
    let re: &Regex = if lower.contains("linkedin.com") {
        &*LINKEDIN_RE
    } else if lower.contains("indeed.com") {
        &*INDEED_RE
    } else {
        return JOB_TITLE_PLACEHOLDER.to_string();
    };

    re.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|slug| cut_company_suffix(slug.as_str()))
        .and_then(humanize_slug)
        .unwrap_or_else(|| JOB_TITLE_PLACEHOLDER.to_string())
}

/// Registry labels that sit under a country code (`co.uk`, `com.au`).
const SECOND_LEVEL_SUFFIXES: [&str; 5] = ["co", "com", "org", "net", "ac"];

/// Last-resort company name: the site's own name for non-board hosts.
///
/// `careers.example-co.com` → `Example Co`. Returns [`UNKNOWN_COMPANY`] when
/// the URL has no usable host.
pub fn company_from_host(url: &str) -> String {
    let Some(host) = Url::parse(url.trim())
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
    else {
        return UNKNOWN_COMPANY.to_string();
    };

    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    // Second-level label: "careers.example.com" → "example", "jobs.acme.co.uk" → "acme".
    let name = match labels.len() {
        0 => None,
        1 => Some(labels[0]),
        n if n >= 3 && SECOND_LEVEL_SUFFIXES.contains(&labels[n - 2]) => Some(labels[n - 3]),
        n => Some(labels[n - 2]),
    };

    name.filter(|n| n.parse::<u8>().is_err())
        .and_then(humanize_slug)
        .unwrap_or_else(|| UNKNOWN_COMPANY.to_string())
}

/// Drop everything from the first `-at-` on (`engineer-at-acme` → `engineer`).
fn cut_company_suffix(slug: &str) -> &str {
    match slug.to_ascii_lowercase().find("-at-") {
        Some(idx) => &slug[..idx],
        None => slug,
    }
}

/// `acme-corp-3812345678.html` → `Acme Corp`.
///
/// Strips a file extension and a trailing numeric posting id, turns hyphens
/// (not underscores) into spaces and upper-cases the first letter of every
/// word. `None` when nothing textual is left.
fn humanize_slug(slug: &str) -> Option<String> {
    let slug = slug
        .trim_end_matches(".html")
        .trim_end_matches(".htm");

    let mut words: Vec<&str> = slug.split('-').filter(|w| !w.is_empty()).collect();
    while words
        .last()
        .is_some_and(|w| w.chars().all(|c| c.is_ascii_digit()))
    {
        words.pop();
    }
    if words.is_empty() {
        return None;
    }

    Some(words.iter().map(|w| capitalize(w)).collect::<Vec<_>>().join(" "))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
