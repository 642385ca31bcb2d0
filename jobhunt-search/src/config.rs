//! Search and scoring configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which sites are queried and how the provider
//! behaves. [`ScoringWeights`] and [`RequiredGate`] control the scorer.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Google CSE returns at most this many items per request.
pub const MAX_RESULTS_PER_QUERY: u32 = 10;

/// Configuration for the per-site search fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Site restrictions; one query is issued per entry. Empty entries are
    /// skipped. With no sites, a single unrestricted query runs.
    pub sites: Vec<String>,
    /// Number of items requested per query (1–10).
    pub results_per_query: u32,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, `jobhunt/<version>` is used.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sites: Vec::new(),
            results_per_query: MAX_RESULTS_PER_QUERY,
            timeout_seconds: 30,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `results_per_query` must be within 1..=10
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if !(1..=MAX_RESULTS_PER_QUERY).contains(&self.results_per_query) {
            return Err(SearchError::Config(format!(
                "results_per_query must be between 1 and {MAX_RESULTS_PER_QUERY}"
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Sites with blank entries removed.
    pub fn active_sites(&self) -> impl Iterator<Item = &str> {
        self.sites
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

/// Per-term weights of the scoring formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub required_weight: f64,
    pub bonus_weight: f64,
    pub location_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            required_weight: 10.0,
            bonus_weight: 3.0,
            location_weight: 1.0,
        }
    }
}

impl ScoringWeights {
    /// Checks `required >= bonus >= location > 0`, all finite.
    pub fn validate(&self) -> Result<(), SearchError> {
        let all = [self.required_weight, self.bonus_weight, self.location_weight];
        if all.iter().any(|w| !w.is_finite()) {
            return Err(SearchError::Config("scoring weights must be finite".into()));
        }
        if self.location_weight <= 0.0 {
            return Err(SearchError::Config(
                "location_weight must be greater than 0".into(),
            ));
        }
        if self.bonus_weight < self.location_weight || self.required_weight < self.bonus_weight {
            return Err(SearchError::Config(
                "scoring weights must satisfy required_weight >= bonus_weight >= location_weight"
                    .into(),
            ));
        }
        Ok(())
    }
}

/// What happens to a result that misses at least one required term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredGate {
    /// Keep the result; the required component of its score is 0.
    #[default]
    ZeroBase,
    /// Drop the result from the digest.
    Drop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert!(config.sites.is_empty());
        assert_eq!(config.results_per_query, 10);
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.user_agent.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_results_per_query_rejected() {
        let config = SearchConfig {
            results_per_query: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("results_per_query"));
    }

    #[test]
    fn results_per_query_above_ten_rejected() {
        let config = SearchConfig {
            results_per_query: 11,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn active_sites_skip_blank_entries() {
        let config = SearchConfig {
            sites: vec!["gov.il".into(), "  ".into(), String::new(), " idealist.org ".into()],
            ..Default::default()
        };
        let sites: Vec<&str> = config.active_sites().collect();
        assert_eq!(sites, vec!["gov.il", "idealist.org"]);
    }

    #[test]
    fn default_weights_are_ten_three_one() {
        let w = ScoringWeights::default();
        assert!((w.required_weight - 10.0).abs() < f64::EPSILON);
        assert!((w.bonus_weight - 3.0).abs() < f64::EPSILON);
        assert!((w.location_weight - 1.0).abs() < f64::EPSILON);
        assert!(w.validate().is_ok());
    }

    #[test]
    fn equal_weights_valid() {
        let w = ScoringWeights {
            required_weight: 2.0,
            bonus_weight: 2.0,
            location_weight: 2.0,
        };
        assert!(w.validate().is_ok());
    }

    #[test]
    fn bonus_above_required_rejected() {
        let w = ScoringWeights {
            required_weight: 1.0,
            bonus_weight: 3.0,
            location_weight: 0.5,
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn zero_location_weight_rejected() {
        let w = ScoringWeights {
            location_weight: 0.0,
            ..Default::default()
        };
        let err = w.validate().unwrap_err();
        assert!(err.to_string().contains("location_weight"));
    }

    #[test]
    fn non_finite_weight_rejected() {
        let w = ScoringWeights {
            required_weight: f64::INFINITY,
            ..Default::default()
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn required_gate_default_is_zero_base() {
        assert_eq!(RequiredGate::default(), RequiredGate::ZeroBase);
    }

    #[test]
    fn required_gate_serde_snake_case() {
        let json = serde_json::to_string(&RequiredGate::ZeroBase).expect("serialize");
        assert_eq!(json, "\"zero_base\"");
        let gate: RequiredGate = serde_json::from_str("\"drop\"").expect("deserialize");
        assert_eq!(gate, RequiredGate::Drop);
    }
}
