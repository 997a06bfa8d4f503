#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Schema mismatch for {schema}: {reason}")]
    SchemaMismatch { schema: &'static str, reason: String },
}
