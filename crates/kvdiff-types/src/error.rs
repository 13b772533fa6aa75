use thiserror::Error;

/// Errors produced while building documents.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("number cannot be represented as i64 or f64: {0}")]
    UnrepresentableNumber(String),

    #[error("parse error: {0}")]
    Parse(String),
}
