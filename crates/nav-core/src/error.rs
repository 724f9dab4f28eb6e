//! Shared error type.
//!
//! Sub-crates define their own error enums for routing failures and wrap
//! `NavError` where configuration or parsing problems can surface.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown travel mode {0:?}")]
    UnknownMode(String),
}

/// Shorthand result type for `nav-core`.
pub type NavResult<T> = Result<T, NavError>;
