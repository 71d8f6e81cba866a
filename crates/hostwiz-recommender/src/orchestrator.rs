//! # Recommendation Orchestrator
//!
//! Runs one recommendation request:
//! 1. Without a credential, rank the full catalog with the scoring engine
//! 2. Otherwise build the prompt and make a single LLM call
//! 3. Validate the payload, rank it highest score first and keep the top four
//! 4. On any AI failure, score a reduced candidate list instead
//!
//! `recommend` always produces a result. The only fatal condition is an
//! empty catalog, which is rejected by [`Recommender::new`].

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use hostwiz_ai::{build_prompt, parse_recommendations, AiError, Backend, LlmClient};
use hostwiz_core::{
    assign_tiers, score, score_providers, CoreError, ProviderCatalog, RecommendationResult,
    RecommendationSource, Requirements, MAX_RECOMMENDATIONS,
};

/// Reasoning attached when no credential was supplied.
pub const ALGORITHM_REASONING: &str = "These recommendations are based on our matching algorithm, which weighs your website type, traffic, budget, technical level and support needs. For personalized AI recommendations, please provide an API key.";

/// Reasoning attached when the AI path failed.
pub const FALLBACK_REASONING: &str = "These recommendations are based on general hosting suitability. For personalized AI recommendations, please provide a valid API key.";

/// Per-entry reason attached to every fallback recommendation.
pub const FALLBACK_REASON: &str = "Recommended based on general suitability";

/// Coordinates prompt building, the LLM call, validation and fallback.
///
/// Cheap to clone and safe to share between tasks.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Arc<ProviderCatalog>,
    client: LlmClient,
}

impl Recommender {
    pub fn new(
        catalog: impl Into<Arc<ProviderCatalog>>,
        client: LlmClient,
    ) -> Result<Self, CoreError> {
        let catalog = catalog.into();
        if catalog.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }
        Ok(Self { catalog, client })
    }

    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    /// Produce recommendations for one requirements profile.
    ///
    /// A missing, empty or whitespace-only credential skips the AI path
    /// without touching the network.
    pub async fn recommend(
        &self,
        requirements: &Requirements,
        credential: Option<&str>,
        backend: Backend,
    ) -> RecommendationResult {
        let span = info_span!("recommend", request_id = %Uuid::new_v4(), %backend);
        self.run(requirements, credential, backend)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        requirements: &Requirements,
        credential: Option<&str>,
        backend: Backend,
    ) -> RecommendationResult {
        let credential = match credential.map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) => c,
            None => {
                info!("No credential supplied, using scoring algorithm");
                return self.algorithm(requirements);
            }
        };

        match self.ai(requirements, credential, backend).await {
            Ok(result) => {
                info!(
                    "AI returned {} recommendations",
                    result.recommendations.len()
                );
                result
            }
            Err(e) => {
                warn!("AI recommendation failed, falling back: {}", e);
                self.fallback(requirements)
            }
        }
    }

    async fn ai(
        &self,
        requirements: &Requirements,
        credential: &str,
        backend: Backend,
    ) -> Result<RecommendationResult, AiError> {
        let prompt = build_prompt(requirements, &self.catalog);
        debug!("Built prompt ({} chars)", prompt.len());

        let raw = self.client.request(&prompt, credential, backend).await?;
        let mut result = parse_recommendations(&raw)?;

        // stable, so equal scores keep the model's order
        result
            .recommendations
            .sort_by(|a, b| b.match_score.cmp(&a.match_score));
        if result.recommendations.len() > MAX_RECOMMENDATIONS {
            debug!(
                "Truncating {} AI recommendations to {}",
                result.recommendations.len(),
                MAX_RECOMMENDATIONS
            );
            result.recommendations.truncate(MAX_RECOMMENDATIONS);
        }
        assign_tiers(&mut result.recommendations);

        Ok(result)
    }

    fn algorithm(&self, requirements: &Requirements) -> RecommendationResult {
        let mut recommendations = score(requirements, &self.catalog);
        recommendations.truncate(MAX_RECOMMENDATIONS);

        RecommendationResult {
            recommendations,
            reasoning: ALGORITHM_REASONING.to_string(),
            source: RecommendationSource::Algorithm,
        }
    }

    fn fallback(&self, requirements: &Requirements) -> RecommendationResult {
        let mut recommendations =
            score_providers(requirements, self.catalog.head(MAX_RECOMMENDATIONS));
        for provider in &mut recommendations {
            provider.ai_recommendation_reason = Some(FALLBACK_REASON.to_string());
        }

        RecommendationResult {
            recommendations,
            reasoning: FALLBACK_REASONING.to_string(),
            source: RecommendationSource::Fallback,
        }
    }
}
