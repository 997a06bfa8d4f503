//! Shapes of the upstream resources the portal relays.
//!
//! The upstream service is the source of truth; these types exist only to
//! check that a response looks like what the frontend expects before it is
//! relayed. Unknown fields are ignored so upstream additions never break
//! the proxy.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::error::CoreError;
use crate::types::ResourceId;

#[derive(Debug, Deserialize, Validate)]
pub struct BlogPost {
    pub id: Option<ResourceId>,
    #[validate(length(min = 1))]
    pub slug: String,
    #[validate(length(min = 1))]
    pub title: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct HelpArticle {
    pub id: ResourceId,
    #[validate(length(min = 1))]
    pub title: String,
    pub content: Option<String>,
    pub category: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct Alert {
    pub id: ResourceId,
    #[validate(length(min = 1))]
    pub message: String,
    pub read: bool,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct Project {
    pub id: ResourceId,
    #[validate(length(min = 1))]
    pub name: String,
    pub status: Option<String>,
    #[validate(range(min = 0.0))]
    pub budget: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct Task {
    pub id: ResourceId,
    pub project_id: Option<ResourceId>,
    #[validate(length(min = 1))]
    pub title: String,
    pub done: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct Contract {
    pub id: ResourceId,
    pub project_id: Option<ResourceId>,
    pub status: Option<String>,
    #[validate(range(min = 0.0))]
    pub amount: Option<f64>,
}

/// Payment checkout result. `redirect_url` points at the payment gateway.
#[derive(Debug, Deserialize, Validate)]
pub struct Payment {
    pub id: Option<ResourceId>,
    pub status: Option<String>,
    #[validate(url)]
    pub redirect_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct WelfareListing {
    pub id: ResourceId,
    #[validate(length(min = 1))]
    pub title: String,
    pub region: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
}

/// Presigned object-storage upload target.
#[derive(Debug, Deserialize, Validate)]
pub struct PresignedUpload {
    #[validate(url)]
    pub url: String,
    #[validate(length(min = 1))]
    pub key: String,
}

/// Which resource a response is expected to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSchema {
    BlogPost,
    HelpArticle,
    Alert,
    Project,
    Task,
    Contract,
    Payment,
    WelfareListing,
    PresignedUpload,
}

/// Whether a response holds a single resource or a list of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    One,
    Many,
}

/// Envelope keys under which list endpoints nest their items.
const LIST_ENVELOPE_KEYS: [&str; 3] = ["data", "items", "content"];

/// A schema plus the expected cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaCheck {
    pub schema: ResponseSchema,
    pub shape: Shape,
}

impl SchemaCheck {
    pub const fn one(schema: ResponseSchema) -> Self {
        Self {
            schema,
            shape: Shape::One,
        }
    }

    pub const fn many(schema: ResponseSchema) -> Self {
        Self {
            schema,
            shape: Shape::Many,
        }
    }

    /// Check a raw response body against this schema.
    ///
    /// An empty body has nothing to check and passes.
    pub fn check(&self, body: &[u8]) -> Result<(), CoreError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }

        let value: Value = serde_json::from_slice(body).map_err(|e| self.mismatch(e))?;

        match self.shape {
            Shape::One => self.check_value(&value),
            Shape::Many => {
                let items = list_items(&value)
                    .ok_or_else(|| self.mismatch("expected a list of resources"))?;
                items.iter().try_for_each(|item| self.check_value(item))
            }
        }
    }

    fn check_value(&self, value: &Value) -> Result<(), CoreError> {
        match self.schema {
            ResponseSchema::BlogPost => self.check_as::<BlogPost>(value),
            ResponseSchema::HelpArticle => self.check_as::<HelpArticle>(value),
            ResponseSchema::Alert => self.check_as::<Alert>(value),
            ResponseSchema::Project => self.check_as::<Project>(value),
            ResponseSchema::Task => self.check_as::<Task>(value),
            ResponseSchema::Contract => self.check_as::<Contract>(value),
            ResponseSchema::Payment => self.check_as::<Payment>(value),
            ResponseSchema::WelfareListing => self.check_as::<WelfareListing>(value),
            ResponseSchema::PresignedUpload => self.check_as::<PresignedUpload>(value),
        }
    }

    fn check_as<T: DeserializeOwned + Validate>(&self, value: &Value) -> Result<(), CoreError> {
        let resource = T::deserialize(value).map_err(|e| self.mismatch(e))?;
        resource.validate().map_err(|e| self.mismatch(e))
    }

    fn mismatch(&self, reason: impl std::fmt::Display) -> CoreError {
        CoreError::SchemaMismatch {
            schema: self.schema.name(),
            reason: reason.to_string(),
        }
    }
}

impl ResponseSchema {
    pub fn name(self) -> &'static str {
        match self {
            ResponseSchema::BlogPost => "BlogPost",
            ResponseSchema::HelpArticle => "HelpArticle",
            ResponseSchema::Alert => "Alert",
            ResponseSchema::Project => "Project",
            ResponseSchema::Task => "Task",
            ResponseSchema::Contract => "Contract",
            ResponseSchema::Payment => "Payment",
            ResponseSchema::WelfareListing => "WelfareListing",
            ResponseSchema::PresignedUpload => "PresignedUpload",
        }
    }
}

/// Locate the item array in a list response: a bare array or an object
/// whose envelope key holds one.
fn list_items(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => LIST_ENVELOPE_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array)),
        _ => None,
    }
}
