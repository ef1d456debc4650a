use thiserror::Error;

/// Errors surfaced by the fallible entry points: parsing via
/// [`Value::try_parse`](crate::Value::try_parse), the serde bridge and the
/// CLI. Contract violations in the format engine panic instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid JSON at {0}")]
    Syntax(String),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
