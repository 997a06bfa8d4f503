//! Target URL construction from a base URL and a path template.
//!
//! Templates look like `/projects/{id}/tasks`. Each `{name}` segment is
//! replaced by the matching path parameter, percent-encoded as a single
//! segment so a parameter can never introduce extra path components.
//! Values that would collapse a segment (empty, `.` or `..`) are rejected.

use std::collections::HashMap;

use reqwest::Url;

use crate::client::UpstreamError;

/// Build the full upstream URL for one proxied call.
pub fn build_target_url(
    base: &Url,
    template: &str,
    params: &HashMap<String, String>,
    query: &[(String, String)],
) -> Result<Url, UpstreamError> {
    let segments = template
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| substitute(segment, params))
        .collect::<Result<Vec<_>, _>>()?;

    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| UpstreamError::InvalidBaseUrl {
                family: "unknown",
                reason: format!("{base} cannot be used as a base URL"),
            })?;
        path.pop_if_empty();
        path.extend(segments);
    }

    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }

    Ok(url)
}

fn substitute<'a>(
    segment: &'a str,
    params: &'a HashMap<String, String>,
) -> Result<&'a str, UpstreamError> {
    match segment
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
    {
        Some(name) => {
            let value = params
                .get(name)
                .ok_or_else(|| UpstreamError::MissingPathParam(name.to_string()))?;
            // `PathSegmentsMut::extend` drops these, retargeting the call.
            if matches!(value.trim(), "" | "." | "..") {
                return Err(UpstreamError::InvalidPathParam {
                    name: name.to_string(),
                    value: value.clone(),
                });
            }
            Ok(value.as_str())
        }
        None => Ok(segment),
    }
}
