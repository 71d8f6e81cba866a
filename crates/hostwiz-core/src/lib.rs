//! HostWiz Core - questionnaire model, provider catalog and scoring
//!
//! This crate provides:
//! - The `Requirements` value built from the questionnaire
//! - The static provider catalog
//! - The deterministic multi-factor scoring engine
//! - Requirements validation

pub mod catalog;
pub mod error;
pub mod model;
pub mod scoring;
pub mod validation;

pub use catalog::ProviderCatalog;
pub use error::{CoreError, ParseChoiceError};
pub use model::{
    assign_tiers, Budget, ExpectedTraffic, ProviderRecord, RecommendationResult, RecommendationSource,
    Requirements, ScoredProvider, SupportLevel, TechnicalLevel, Tier, WebsiteType,
    FEATURE_OPTIONS, MAX_RECOMMENDATIONS,
};
pub use scoring::{match_score, score, score_providers};
pub use validation::{validate_requirements, ValidationError};
