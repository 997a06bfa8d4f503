//! Which inbound headers travel upstream.

use reqwest::header::{HeaderMap, HeaderName, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};

/// Request id header, shared with the inbound request-id middleware.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Copy the fixed forwarded header set out of an inbound request.
///
/// `Authorization` is deliberately absent: the outbound bearer comes from
/// the resolved session, never from whatever the client sent.
pub fn forwarded_headers(inbound: &HeaderMap) -> HeaderMap {
    let names = [
        ACCEPT,
        ACCEPT_LANGUAGE,
        CONTENT_TYPE,
        HeaderName::from_static(X_REQUEST_ID),
    ];

    let mut out = HeaderMap::new();
    for name in names {
        for value in inbound.get_all(&name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderValue, AUTHORIZATION, COOKIE};

    use super::*;

    #[test]
    fn copies_only_the_fixed_set() {
        let mut inbound = HeaderMap::new();
        inbound.insert(ACCEPT, HeaderValue::from_static("application/json"));
        inbound.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        inbound.insert(X_REQUEST_ID, HeaderValue::from_static("req-1"));
        inbound.insert(AUTHORIZATION, HeaderValue::from_static("Bearer client"));
        inbound.insert(COOKIE, HeaderValue::from_static("session-token=abc"));

        let out = forwarded_headers(&inbound);

        assert_eq!(out.len(), 3);
        assert_eq!(out[ACCEPT], "application/json");
        assert_eq!(out[X_REQUEST_ID], "req-1");
        assert!(out.get(AUTHORIZATION).is_none());
        assert!(out.get(COOKIE).is_none());
    }

    #[test]
    fn keeps_repeated_values() {
        let mut inbound = HeaderMap::new();
        inbound.append(ACCEPT_LANGUAGE, HeaderValue::from_static("ko"));
        inbound.append(ACCEPT_LANGUAGE, HeaderValue::from_static("en"));

        let out = forwarded_headers(&inbound);
        assert_eq!(out.get_all(ACCEPT_LANGUAGE).iter().count(), 2);
    }
}
