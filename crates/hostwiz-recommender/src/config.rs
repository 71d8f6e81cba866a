//! Recommender configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::debug;
use url::Url;

use hostwiz_ai::client::{
    DEFAULT_ANTHROPIC_BASE, DEFAULT_ANTHROPIC_MODEL, DEFAULT_OPENAI_BASE, DEFAULT_OPENAI_MODEL,
};
use hostwiz_ai::{Backend, LlmClient, LlmSettings};
use hostwiz_core::ProviderCatalog;

use crate::orchestrator::Recommender;

#[derive(Debug, Clone, Default)]
pub struct RecommenderConfig {
    pub backend: Backend,
    /// None = no credential, the AI path is skipped.
    pub api_key: Option<String>,
    pub llm: LlmSettings,
    /// None = no transport timeout.
    pub request_timeout: Option<Duration>,
    /// None = built-in catalog.
    pub catalog_path: Option<PathBuf>,
}

impl RecommenderConfig {
    pub fn from_env() -> Result<Self> {
        let backend = std::env::var("HOSTWIZ_BACKEND")
            .unwrap_or_else(|_| Backend::default().to_string())
            .parse()
            .context("Invalid HOSTWIZ_BACKEND")?;

        let request_timeout = std::env::var("HOSTWIZ_REQUEST_TIMEOUT_SECS")
            .ok()
            .map(|v| v.parse::<u64>().context("Invalid HOSTWIZ_REQUEST_TIMEOUT_SECS"))
            .transpose()?
            .map(Duration::from_secs);

        Ok(Self {
            backend,
            api_key: std::env::var("HOSTWIZ_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            llm: LlmSettings {
                openai_base_url: base_url_var("OPENAI_API_BASE", DEFAULT_OPENAI_BASE)?,
                openai_model: std::env::var("OPENAI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
                anthropic_base_url: base_url_var("ANTHROPIC_API_BASE", DEFAULT_ANTHROPIC_BASE)?,
                anthropic_model: std::env::var("ANTHROPIC_MODEL")
                    .unwrap_or_else(|_| DEFAULT_ANTHROPIC_MODEL.to_string()),
            },
            request_timeout,
            catalog_path: std::env::var("HOSTWIZ_CATALOG").ok().map(PathBuf::from),
        })
    }

    /// HTTP transport plus LLM client, honouring the request timeout.
    pub fn build_client(&self) -> Result<LlmClient> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(LlmClient::with_http_client(self.llm.clone(), http))
    }

    pub fn load_catalog(&self) -> Result<ProviderCatalog> {
        match &self.catalog_path {
            Some(path) => ProviderCatalog::from_json_file(path)
                .with_context(|| format!("Failed to load catalog from {:?}", path)),
            None => Ok(ProviderCatalog::builtin()),
        }
    }

    pub fn build_recommender(&self) -> Result<Recommender> {
        let catalog = self.load_catalog()?;
        debug!("Using catalog with {} providers", catalog.len());
        Recommender::new(catalog, self.build_client()?).context("Invalid provider catalog")
    }
}

fn base_url_var(key: &str, default: &str) -> Result<String> {
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    let url = Url::parse(&value).with_context(|| format!("Invalid {}", key))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Invalid {}: scheme must be http or https", key);
    }
    Ok(value.trim_end_matches('/').to_string())
}
