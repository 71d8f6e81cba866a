//! HostWiz AI - LLM integration for personalized hosting recommendations
//!
//! This crate provides:
//! - Prompt building from requirements and the provider catalog
//! - LLM API client (OpenAI/Anthropic wire protocols)
//! - Extraction and validation of the JSON payload in LLM output

pub mod client;
pub mod error;
pub mod prompt;
pub mod response;

pub use client::{Backend, LlmClient, LlmSettings};
pub use error::AiError;
pub use prompt::{build_prompt, SYSTEM_PROMPT};
pub use response::{extract_json_object, parse_recommendations};
