//! Session token validation.
//!
//! The identity provider issues HS256-signed JWTs carrying the user's
//! subject, email and group memberships. The proxy validates them locally
//! and forwards the same token upstream as the bearer credential.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use portal_core::session::Session;
use serde::{Deserialize, Serialize};

/// Claims carried by an identity-provider session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the identity provider's user id.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    /// Group memberships as emitted by Cognito. Merged with `groups`.
    #[serde(default, rename = "cognito:groups", skip_serializing_if = "Vec::is_empty")]
    pub cognito_groups: Vec<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    /// Every group the token grants, from either claim, without duplicates.
    pub fn all_groups(&self) -> Vec<String> {
        let mut groups = Vec::with_capacity(self.groups.len() + self.cognito_groups.len());
        for group in self.groups.iter().chain(&self.cognito_groups) {
            if !groups.contains(group) {
                groups.push(group.clone());
            }
        }
        groups
    }

    /// Turn verified claims plus the raw token into a session.
    pub fn into_session(self, token: impl Into<String>) -> Session {
        let groups = self.all_groups();
        Session::authenticated(self.sub, self.email, groups, token)
    }
}

/// Configuration for session token validation.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
    /// Expected `iss` claim. Not checked when `None`.
    pub issuer: Option<String>,
    /// Expected `aud` claim. Not checked when `None`.
    pub audience: Option<String>,
}

impl AuthConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var         | Required | Default |
    /// |-----------------|----------|---------|
    /// | `AUTH_SECRET`   | **yes**  | --      |
    /// | `AUTH_ISSUER`   | no       | unset   |
    /// | `AUTH_AUDIENCE` | no       | unset   |
    ///
    /// # Panics
    ///
    /// Panics if `AUTH_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("AUTH_SECRET").expect("AUTH_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "AUTH_SECRET must not be empty");

        let optional = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            secret,
            issuer: optional("AUTH_ISSUER"),
            audience: optional("AUTH_AUDIENCE"),
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::default(); // HS256, validates exp
        match &self.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }
        if let Some(iss) = &self.issuer {
            validation.set_issuer(&[iss]);
        }
        validation
    }
}

/// Validate and decode a session token, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &AuthConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &config.validation(),
    )?;
    Ok(token_data.claims)
}

/// Sign a token for the given user, valid for `ttl_mins` minutes.
///
/// The identity provider normally issues tokens; this exists for local
/// development and tests.
pub fn issue_token(
    sub: &str,
    email: Option<&str>,
    groups: &[&str],
    ttl_mins: i64,
    config: &AuthConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        email: email.map(str::to_string),
        groups: groups.iter().map(|g| g.to_string()).collect(),
        cognito_groups: Vec::new(),
        exp: now + ttl_mins * 60,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}
