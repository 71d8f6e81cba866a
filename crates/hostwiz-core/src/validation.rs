//! Requirements validation

use crate::model::{Requirements, FEATURE_OPTIONS};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Feature name cannot be empty")]
    BlankFeature,

    #[error("Unknown feature '{0}' (see FEATURE_OPTIONS)")]
    UnknownFeature(String),
}

/// Check the free-form parts of a requirements profile.
///
/// The enumerated answers are already constrained by their types, so only the
/// feature set needs checking. Every problem is reported, not just the first.
pub fn validate_requirements(requirements: &Requirements) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for feature in &requirements.features {
        if feature.trim().is_empty() {
            errors.push(ValidationError::BlankFeature);
        } else if !FEATURE_OPTIONS.contains(&feature.as_str()) {
            errors.push(ValidationError::UnknownFeature(feature.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
