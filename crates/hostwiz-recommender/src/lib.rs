//! HostWiz Recommender - AI-first hosting recommendations
//!
//! This crate provides:
//! - The recommendation orchestrator with deterministic fallback
//! - Configuration from environment variables

pub mod config;
pub mod orchestrator;

pub use config::RecommenderConfig;
pub use orchestrator::{
    Recommender, ALGORITHM_REASONING, FALLBACK_REASON, FALLBACK_REASONING,
};
