//! Upstream service families and their base URLs.

use std::collections::HashMap;

use reqwest::Url;

use crate::client::UpstreamError;

/// Default base URL for every family in local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// One backend service family; each has its own base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upstream {
    Blog,
    Help,
    Project,
    User,
    Cloud,
    Payment,
    Welfare,
}

impl Upstream {
    pub const ALL: [Upstream; 7] = [
        Upstream::Blog,
        Upstream::Help,
        Upstream::Project,
        Upstream::User,
        Upstream::Cloud,
        Upstream::Payment,
        Upstream::Welfare,
    ];

    /// Environment variable holding this family's base URL.
    pub fn env_var(self) -> &'static str {
        match self {
            Upstream::Blog => "BLOG_API_URL",
            Upstream::Help => "HELP_API_URL",
            Upstream::Project => "PROJECT_API_URL",
            Upstream::User => "USER_API_URL",
            Upstream::Cloud => "CLOUD_API_URL",
            Upstream::Payment => "PAYMENT_API_URL",
            Upstream::Welfare => "WELFARE_API_URL",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Upstream::Blog => "blog",
            Upstream::Help => "help",
            Upstream::Project => "project",
            Upstream::User => "user",
            Upstream::Cloud => "cloud",
            Upstream::Payment => "payment",
            Upstream::Welfare => "welfare",
        }
    }
}

/// Parsed base URL per upstream family.
#[derive(Debug, Clone)]
pub struct UpstreamBases {
    bases: HashMap<Upstream, Url>,
}

impl UpstreamBases {
    /// Load every family's base URL from its environment variable,
    /// falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Result<Self, UpstreamError> {
        let mut bases = HashMap::new();
        for family in Upstream::ALL {
            let raw = std::env::var(family.env_var())
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
            bases.insert(family, parse_base(family, &raw)?);
        }
        Ok(Self { bases })
    }

    /// Point every family at the same base URL.
    pub fn uniform(base: &str) -> Result<Self, UpstreamError> {
        let mut bases = HashMap::new();
        for family in Upstream::ALL {
            bases.insert(family, parse_base(family, base)?);
        }
        Ok(Self { bases })
    }

    /// Override one family's base URL.
    pub fn with(mut self, family: Upstream, base: &str) -> Result<Self, UpstreamError> {
        self.bases.insert(family, parse_base(family, base)?);
        Ok(self)
    }

    pub fn get(&self, family: Upstream) -> &Url {
        // Every constructor fills all families.
        &self.bases[&family]
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

fn parse_base(family: Upstream, raw: &str) -> Result<Url, UpstreamError> {
    let url = Url::parse(raw.trim()).map_err(|e| UpstreamError::InvalidBaseUrl {
        family: family.name(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(UpstreamError::InvalidBaseUrl {
            family: family.name(),
            reason: format!("{raw} cannot be used as a base URL"),
        });
    }
    Ok(url)
}
