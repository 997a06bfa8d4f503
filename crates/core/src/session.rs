//! The authenticated user context attached to every proxied request.

use crate::groups::GROUP_ADMIN;

/// Who is making the request, as far as the identity provider says.
///
/// An anonymous session has no access token; the proxy then omits the
/// `Authorization` header entirely instead of sending an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Identity-provider subject.
    pub user_id: Option<String>,
    pub email: Option<String>,
    /// Group memberships, e.g. `"admin"`.
    pub groups: Vec<String>,
    access_token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build a session for a verified token. A blank token yields an
    /// anonymous session.
    pub fn authenticated(
        user_id: impl Into<String>,
        email: Option<String>,
        groups: Vec<String>,
        access_token: impl Into<String>,
    ) -> Self {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Self::anonymous();
        }
        Self {
            user_id: Some(user_id.into()),
            email,
            groups,
            access_token: Some(access_token),
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    pub fn is_admin(&self) -> bool {
        self.in_group(GROUP_ADMIN)
    }

    /// Value for an outbound `Authorization` header, if there is a token.
    pub fn bearer(&self) -> Option<String> {
        self.access_token().map(|t| format!("Bearer {t}"))
    }
}
