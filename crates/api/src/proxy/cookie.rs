//! The onboarding-dismissed cookie.

use axum::http::HeaderValue;

pub const ONBOARDING_COOKIE: &str = "onboarding-seen";

/// One year, in seconds.
pub const ONBOARDING_COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 365;

/// `Set-Cookie` value marking onboarding as seen for a year.
pub fn onboarding_cookie() -> HeaderValue {
    HeaderValue::from_static("onboarding-seen=true; Path=/; Max-Age=31536000; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_carries_name_and_max_age() {
        let value = onboarding_cookie();
        let value = value.to_str().unwrap();
        assert!(value.starts_with(&format!("{ONBOARDING_COOKIE}=true;")));
        assert!(value.contains(&format!("Max-Age={ONBOARDING_COOKIE_MAX_AGE}")));
    }
}
