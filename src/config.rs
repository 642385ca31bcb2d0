//! Configuration for the job digest.
//!
//! Loaded once at startup from TOML and turned into the typed engine
//! inputs ([`RankingOptions`], [`SearchConfig`], [`CseCredentials`]).
//! The ranking engine never sees the raw file.

use std::ffi::OsString;
use std::fmt;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use jobhunt_search::query::build_query;
use jobhunt_search::{
    CseCredentials, DomainFilter, KeywordProfile, RankingOptions, RequiredGate, ScoringWeights,
    SearchConfig,
};
use serde::{Deserialize, Serialize};

use crate::error::{HunterError, Result};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "JOBHUNT_CONFIG";
/// Environment variable overriding `credentials.api_key`.
pub const API_KEY_ENV: &str = "GOOGLE_CSE_KEY";
/// Environment variable overriding `credentials.cx`.
pub const CX_ENV: &str = "GOOGLE_CSE_CX";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HunterConfig {
    /// Keyword profile terms.
    pub profile: ProfileConfig,
    /// Sites and provider request settings.
    pub search: SearchConfig,
    /// Scoring weights and required-keyword policy.
    pub scoring: ScoringConfig,
    /// Digest size and output.
    pub digest: DigestConfig,
    /// Optional trusted-domain filter.
    pub domain_filter: Option<DomainFilter>,
    /// Search API credentials (environment variables take precedence).
    pub credentials: CredentialsConfig,
}

/// Keyword lists as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Every one of these should appear in a strong match.
    pub required: Vec<String>,
    /// Each match adds a secondary boost.
    pub bonus: Vec<String>,
    /// Each match adds a small tiebreak boost.
    pub locations: Vec<String>,
    /// Any match removes the posting.
    pub excluded: Vec<String>,
}

/// Scoring weights and gate policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub required_weight: f64,
    pub bonus_weight: f64,
    pub location_weight: f64,
    /// What to do with a posting that misses a required term.
    pub required_gate: RequiredGate,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let weights = ScoringWeights::default();
        Self {
            required_weight: weights.required_weight,
            bonus_weight: weights.bonus_weight,
            location_weight: weights.location_weight,
            required_gate: RequiredGate::default(),
        }
    }
}

impl ScoringConfig {
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            required_weight: self.required_weight,
            bonus_weight: self.bonus_weight,
            location_weight: self.location_weight,
        }
    }
}

/// Output format of the written digest.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestFormat {
    /// Line-oriented Markdown document.
    #[default]
    #[serde(alias = "md")]
    Markdown,
    /// Standalone HTML page.
    Html,
}

impl FromStr for DigestFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            other => Err(format!("unknown digest format '{other}' (expected markdown or html)")),
        }
    }
}

impl fmt::Display for DigestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
        })
    }
}

/// Digest size and destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Maximum number of entries; unset keeps every ranked entry.
    ///
    /// Signed so that a negative value in the file is reported as an
    /// error instead of failing to parse.
    pub limit: Option<i64>,
    /// Output path; `-` writes to stdout.
    pub output: PathBuf,
    pub format: DigestFormat,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            limit: None,
            output: PathBuf::from("daily_jobs.md"),
            format: DigestFormat::Markdown,
        }
    }
}

/// Search API credentials from the config file.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cx: Option<String>,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("cx", &self.cx)
            .finish()
    }
}

impl HunterConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| HunterError::Config(format!("{}: {e}", path.display())))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| HunterError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/jobhunt/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("jobhunt").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("jobhunt")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/jobhunt-config/config.toml")
        }
    }

    /// Find the config file to load.
    ///
    /// Order: the explicit path, `$JOBHUNT_CONFIG`, `./config.toml`, the
    /// default path, then `./config.toml.example`.
    ///
    /// # Errors
    ///
    /// Returns [`HunterError::Config`] if an explicitly named file does not
    /// exist or no candidate is found.
    pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
        let cwd = std::env::current_dir()?;
        resolve_from(
            explicit,
            std::env::var_os(CONFIG_ENV),
            &cwd,
            &Self::default_config_path(),
        )
    }

    /// Validate every section, failing on the first problem.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid profile, weights, domain filter,
    /// search settings or a negative digest limit.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        self.ranking_options()?.validate()?;
        Ok(())
    }

    /// Build the validated keyword profile.
    pub fn keyword_profile(&self) -> Result<KeywordProfile> {
        let p = &self.profile;
        Ok(KeywordProfile::new(
            &p.required,
            &p.bonus,
            &p.locations,
            &p.excluded,
        )?)
    }

    /// The digest limit, rejecting negative values.
    pub fn limit(&self) -> Result<Option<usize>> {
        match self.digest.limit {
            None => Ok(None),
            Some(n) => usize::try_from(n)
                .map(Some)
                .map_err(|_| HunterError::Config(format!("digest.limit must be >= 0, got {n}"))),
        }
    }

    /// Assemble the ranking engine's options.
    pub fn ranking_options(&self) -> Result<RankingOptions> {
        Ok(RankingOptions {
            profile: self.keyword_profile()?,
            weights: self.scoring.weights(),
            gate: self.scoring.required_gate,
            limit: self.limit()?,
            domain_filter: self.domain_filter.clone(),
        })
    }

    /// The query text sent to the provider, from `explicit` or the profile.
    pub fn query_text(&self, explicit: Option<&str>) -> Result<String> {
        let p = &self.profile;
        Ok(build_query(explicit, &p.required, &p.bonus, &p.locations)?)
    }

    /// Resolve credentials, preferring `GOOGLE_CSE_KEY` / `GOOGLE_CSE_CX`.
    pub fn credentials(&self) -> Result<CseCredentials> {
        self.credentials_with(|name| std::env::var(name).ok())
    }

    /// Resolve credentials using `lookup` for the environment.
    ///
    /// # Errors
    ///
    /// Returns [`jobhunt_search::SearchError::Credentials`] naming the
    /// missing variable if either value is absent in both places.
    pub fn credentials_with<F>(&self, lookup: F) -> Result<CseCredentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |env: &str, file: &Option<String>| {
            lookup(env)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| file.clone().filter(|v| !v.trim().is_empty()))
        };
        let api_key = pick(API_KEY_ENV, &self.credentials.api_key);
        let cx = pick(CX_ENV, &self.credentials.cx);
        match (api_key, cx) {
            (Some(api_key), Some(cx)) => Ok(CseCredentials::new(api_key, cx)),
            (api_key, cx) => {
                let mut missing = Vec::new();
                if api_key.is_none() {
                    missing.push(format!("{API_KEY_ENV} (or credentials.api_key)"));
                }
                if cx.is_none() {
                    missing.push(format!("{CX_ENV} (or credentials.cx)"));
                }
                Err(jobhunt_search::SearchError::Credentials(format!(
                    "missing {}",
                    missing.join(" and ")
                ))
                .into())
            }
        }
    }

    /// Human-readable summary for `jobhunt check`.
    pub fn summary(&self) -> String {
        let p = &self.profile;
        let mut out = String::new();
        let _ = writeln!(out, "required:  {}", p.required.join(", "));
        let _ = writeln!(out, "bonus:     {}", p.bonus.join(", "));
        let _ = writeln!(out, "locations: {}", p.locations.join(", "));
        let _ = writeln!(out, "excluded:  {}", p.excluded.join(", "));
        let sites: Vec<&str> = self.search.active_sites().collect();
        let sites = if sites.is_empty() {
            "(any)".to_string()
        } else {
            sites.join(", ")
        };
        let _ = writeln!(out, "sites:     {sites}");
        let _ = writeln!(
            out,
            "weights:   {}/{}/{} ({:?})",
            self.scoring.required_weight,
            self.scoring.bonus_weight,
            self.scoring.location_weight,
            self.scoring.required_gate
        );
        let limit = self
            .digest
            .limit
            .map_or_else(|| "unlimited".to_string(), |n| n.to_string());
        let _ = writeln!(
            out,
            "digest:    {} ({}, limit {limit})",
            self.digest.output.display(),
            self.digest.format
        );
        out
    }
}

fn resolve_from(
    explicit: Option<&Path>,
    env: Option<OsString>,
    cwd: &Path,
    default_path: &Path,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(HunterError::Config(format!(
            "config file not found: {}",
            path.display()
        )));
    }
    if let Some(path) = env.filter(|p| !p.is_empty()).map(PathBuf::from) {
        if path.is_file() {
            return Ok(path);
        }
        tracing::warn!(path = %path.display(), "{CONFIG_ENV} points at a missing file");
    }
    let candidates = [
        cwd.join("config.toml"),
        default_path.to_path_buf(),
        cwd.join("config.toml.example"),
    ];
    candidates
        .into_iter()
        .find(|p| p.is_file())
        .ok_or_else(|| HunterError::Config("no configuration file found".into()))
}
