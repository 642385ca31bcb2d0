//! Domain filter: results off trusted domains must mention a fallback term.
//!
//! Public-sector and non-profit boards (e.g. `.gov.il`, `.org.il`) are
//! trusted as-is. Postings on any other host are kept only when their text
//! mentions one of the fallback terms.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::NormalizedResult;

/// Trusted host suffixes and the terms required everywhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainFilter {
    /// Host suffixes whose results are always kept, e.g. `".gov.il"`.
    pub trusted_suffixes: Vec<String>,
    /// Terms, one of which must appear in results from other hosts.
    pub fallback_terms: Vec<String>,
}

impl DomainFilter {
    /// Returns `true` if `result` survives the filter.
    pub fn allows(&self, result: &NormalizedResult) -> bool {
        if self.is_trusted(&result.link) {
            return true;
        }
        self.fallback_terms
            .iter()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .any(|term| result.search_text.contains(&term))
    }

    fn is_trusted(&self, link: &str) -> bool {
        let Some(host) = Url::parse(link)
            .ok()
            .and_then(|url| url.host_str().map(str::to_lowercase))
        else {
            return false;
        };
        self.trusted_suffixes.iter().any(|suffix| {
            let suffix = suffix.trim().to_lowercase();
            let bare = suffix.trim_start_matches('.');
            !bare.is_empty() && (host == bare || host.ends_with(&format!(".{bare}")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::normalize::normalize;
    use crate::types::RawResult;

    fn make(link: &str, title: &str) -> NormalizedResult {
        normalize(RawResult::new(title, link, "")).expect("normalize")
    }

    fn filter() -> DomainFilter {
        DomainFilter {
            trusted_suffixes: vec![".gov.il".into(), "org.il".into()],
            fallback_terms: vec!["ESG".into(), "partnership".into()],
        }
    }

    #[test]
    fn trusted_domain_kept_without_terms() {
        assert!(filter().allows(&make("https://jobs.gov.il/1", "Clerk")));
        assert!(filter().allows(&make("https://www.Kids.ORG.il/1", "Clerk")));
    }

    #[test]
    fn bare_suffix_host_matches() {
        assert!(filter().allows(&make("https://gov.il/1", "Clerk")));
    }

    #[test]
    fn suffix_must_align_with_label_boundary() {
        // "notgov.il" is not under "gov.il".
        assert!(!filter().allows(&make("https://notgov.il/1", "Clerk")));
    }

    #[test]
    fn corporate_domain_needs_fallback_term() {
        assert!(!filter().allows(&make("https://corp.com/1", "Sales Manager")));
        assert!(filter().allows(&make("https://corp.com/2", "ESG Manager")));
        assert!(filter().allows(&make("https://corp.com/3", "Partnerships Manager")));
    }

    #[test]
    fn default_filter_rejects_everything_off_trusted_hosts() {
        // No trusted suffixes and no fallback terms: nothing qualifies.
        assert!(!DomainFilter::default().allows(&make("https://corp.com/1", "ESG")));
    }
}
