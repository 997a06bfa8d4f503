use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an upstream resource.
///
/// Upstream services are inconsistent about id encoding: some resources
/// use numeric keys, others opaque strings. Both are accepted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{n}"),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}
