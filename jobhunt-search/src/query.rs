//! Search query construction.
//!
//! One query is issued per configured site. The query text is either the
//! caller's explicit query or the profile's terms joined with spaces;
//! location terms are always appended to bias results toward them.

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};

/// One provider request: query text plus an optional site restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteQuery {
    pub text: String,
    pub site: Option<String>,
}

impl SiteQuery {
    /// The query string sent to the provider, e.g. `"esg tel aviv site:gov.il"`.
    pub fn render(&self) -> String {
        match &self.site {
            Some(site) => format!("{} site:{site}", self.text),
            None => self.text.clone(),
        }
    }
}

/// Build the base query text.
///
/// With an explicit query it replaces the keyword part; otherwise required
/// terms come first, then bonus terms. Locations are appended either way.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the resulting query is empty.
pub fn build_query(
    explicit: Option<&str>,
    required: &[String],
    bonus: &[String],
    locations: &[String],
) -> Result<String> {
    let mut parts: Vec<&str> = Vec::new();
    match explicit.map(str::trim).filter(|q| !q.is_empty()) {
        Some(query) => parts.push(query),
        None => {
            parts.extend(required.iter().map(|t| t.trim()));
            parts.extend(bonus.iter().map(|t| t.trim()));
        }
    }
    parts.extend(locations.iter().map(|t| t.trim()));

    let text = parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return Err(SearchError::Config(
            "search query is empty: configure keywords or pass a query".into(),
        ));
    }
    Ok(text)
}

/// Expand the base query into one [`SiteQuery`] per active site.
///
/// With no active sites a single unrestricted query is returned.
pub fn site_queries(text: &str, config: &SearchConfig) -> Vec<SiteQuery> {
    let queries: Vec<SiteQuery> = config
        .active_sites()
        .map(|site| SiteQuery {
            text: text.to_string(),
            site: Some(site.to_string()),
        })
        .collect();
    if queries.is_empty() {
        vec![SiteQuery {
            text: text.to_string(),
            site: None,
        }]
    } else {
        queries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keywords_then_bonus_then_locations() {
        let q = build_query(
            None,
            &strings(&["ESG"]),
            &strings(&["partnerships", "impact"]),
            &strings(&["Tel Aviv"]),
        )
        .expect("query");
        assert_eq!(q, "ESG partnerships impact Tel Aviv");
    }

    #[test]
    fn explicit_query_replaces_keywords_but_keeps_locations() {
        let q = build_query(
            Some("  community manager "),
            &strings(&["ESG"]),
            &strings(&["partnerships"]),
            &strings(&["Haifa"]),
        )
        .expect("query");
        assert_eq!(q, "community manager Haifa");
    }

    #[test]
    fn blank_explicit_query_falls_back_to_keywords() {
        let q = build_query(Some("   "), &strings(&["ESG"]), &[], &[]).expect("query");
        assert_eq!(q, "ESG");
    }

    #[test]
    fn empty_query_rejected() {
        let err = build_query(None, &[], &[], &[]).unwrap_err();
        assert!(err.to_string().contains("query is empty"));
    }

    #[test]
    fn one_query_per_active_site() {
        let config = SearchConfig {
            sites: vec!["gov.il".into(), "".into(), "idealist.org".into()],
            ..Default::default()
        };
        let queries = site_queries("esg", &config);
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].render(), "esg site:gov.il");
        assert_eq!(queries[1].render(), "esg site:idealist.org");
    }

    #[test]
    fn no_sites_means_single_unrestricted_query() {
        let queries = site_queries("esg", &SearchConfig::default());
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].site, None);
        assert_eq!(queries[0].render(), "esg");
    }
}
