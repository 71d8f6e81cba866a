//! Typed errors for the core crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or loading the provider catalog.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog has no providers, so nothing can be recommended.
    #[error("provider catalog is empty")]
    EmptyCatalog,

    #[error("duplicate provider id '{0}' in catalog")]
    DuplicateProvider(String),

    #[error("failed to read catalog file {path:?}: {source}")]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

/// A questionnaire value that is not one of the accepted choices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} '{value}' (expected one of: {})", .expected.join(", "))]
pub struct ParseChoiceError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}
