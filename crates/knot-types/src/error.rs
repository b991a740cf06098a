use thiserror::Error;

/// Errors produced when parsing identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid identifier {0:?}: expected 32 lowercase hex digits")]
    InvalidId(String),

    #[error("invalid tag in identifier {0:?}: expected a decimal u32 suffix")]
    InvalidTag(String),
}
