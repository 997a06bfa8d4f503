//! Query-string whitelisting for proxy routes.
//!
//! Every proxy route declares which query keys it forwards and which of
//! those are mandatory. Anything else the client sends is dropped before
//! the upstream URL is built.

use crate::error::CoreError;

/// Allowed and required query keys for a single route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPolicy {
    allowed: &'static [&'static str],
    required: &'static [&'static str],
}

impl QueryPolicy {
    /// A route that forwards no query parameters at all.
    pub const NONE: QueryPolicy = QueryPolicy {
        allowed: &[],
        required: &[],
    };

    /// Build a policy. Required keys are implicitly allowed.
    pub const fn new(allowed: &'static [&'static str], required: &'static [&'static str]) -> Self {
        Self { allowed, required }
    }

    /// Shorthand for a policy with optional keys only.
    pub const fn allow(allowed: &'static [&'static str]) -> Self {
        Self::new(allowed, &[])
    }

    pub fn required(&self) -> &'static [&'static str] {
        self.required
    }

    fn permits(&self, key: &str) -> bool {
        self.allowed.contains(&key) || self.required.contains(&key)
    }

    /// Check required keys and strip everything not whitelisted.
    ///
    /// A required key counts as missing when it is absent or every value
    /// supplied for it is blank. Pair order and repeated keys are kept.
    pub fn apply(&self, pairs: &[(String, String)]) -> Result<Vec<(String, String)>, CoreError> {
        for key in self.required {
            let present = pairs
                .iter()
                .any(|(k, v)| k == key && !v.trim().is_empty());
            if !present {
                return Err(CoreError::Validation(format!(
                    "Missing required query parameter: {key}"
                )));
            }
        }

        Ok(pairs
            .iter()
            .filter(|(k, _)| self.permits(k))
            .cloned()
            .collect())
    }
}
