//! Process-wide serving configuration.
//!
//! Resolution is a pure function of (project record, configuration), so the
//! configuration is an explicit value threaded through calls rather than an
//! ambient global. Construct it directly or load it from TOML:
//!
//! ```
//! use dochost::config::ServeConfig;
//!
//! let config = ServeConfig::from_toml_str(
//!     "production_domain = \"readthedocs.example\"\nuse_subdomain = true",
//! ).unwrap();
//! assert!(config.use_subdomain);
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// URL scheme used when composing absolute URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => f.write_str("http"),
            Self::Https => f.write_str("https"),
        }
    }
}

/// Serving configuration for URL and domain resolution.
///
/// `production_domain` is mandatory; a missing or empty value is a startup
/// error, never a per-request one. No runtime mutation is expected: build
/// once, share by reference.
#[derive(Debug, Clone, Deserialize)]
pub struct ServeConfig {
    /// Base domain documentation is served under (e.g. `readthedocs.example`).
    pub production_domain: String,

    /// Serve each project from `{slug}.{production_domain}` instead of a
    /// `/docs/{slug}/` path on the shared domain.
    #[serde(default)]
    pub use_subdomain: bool,

    /// Scheme for absolute URLs.
    #[serde(default)]
    pub scheme: Scheme,
}

impl ServeConfig {
    /// Create a configuration with the given production domain and defaults
    /// for everything else (path-based serving, http).
    pub fn new(production_domain: impl Into<String>) -> Result<Self> {
        let config = Self {
            production_domain: production_domain.into(),
            use_subdomain: false,
            scheme: Scheme::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&raw)
    }

    /// Enable or disable subdomain serving.
    pub fn with_subdomain(mut self, enabled: bool) -> Self {
        self.use_subdomain = enabled;
        self
    }

    /// Set the scheme for absolute URLs.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.production_domain.trim().is_empty() {
            return Err(Error::Config("production_domain must be set".into()));
        }
        Ok(())
    }
}
