//! Questionnaire and recommendation types shared across the pipeline

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseChoiceError;

/// Upper bound on the number of providers in a recommendation result.
pub const MAX_RECOMMENDATIONS: usize = 4;

/// Extra features the questionnaire lets the user tick.
pub const FEATURE_OPTIONS: &[&str] = &[
    "SSL Certificate",
    "Daily Backups",
    "CDN (Content Delivery Network)",
    "Email Hosting",
    "Database Support",
    "One-click Installations",
    "24/7 Monitoring",
];

/// Declares a closed questionnaire choice with its wire value and display label.
macro_rules! choice {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal) {
            $($variant:ident => $wire:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted value, in questionnaire order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseChoiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok($name::$variant),)+
                    other => Err(ParseChoiceError {
                        field: $field,
                        value: other.to_string(),
                        expected: &[$($wire),+],
                    }),
                }
            }
        }
    };
}

choice! {
    /// What kind of site is being hosted.
    WebsiteType ("websiteType") {
        Blog => "blog", "Personal Blog/Portfolio";
        Business => "business", "Business Website";
        Ecommerce => "ecommerce", "E-commerce Store";
        App => "app", "Web Application";
        Enterprise => "enterprise", "Enterprise Solution";
    }
}

choice! {
    /// Expected monthly visitors.
    ExpectedTraffic ("expectedTraffic") {
        Low => "low", "Low (< 1K visitors/month)";
        Medium => "medium", "Medium (1K - 10K visitors/month)";
        High => "high", "High (10K - 100K visitors/month)";
        VeryHigh => "very-high", "Very High (100K+ visitors/month)";
    }
}

choice! {
    /// Monthly budget band.
    Budget ("budget") {
        Budget => "budget", "$0 - $10/month (Budget-friendly)";
        Standard => "standard", "$10 - $50/month (Standard)";
        Premium => "premium", "$50 - $200/month (Premium)";
        Enterprise => "enterprise", "$200+/month (Enterprise)";
    }
}

choice! {
    TechnicalLevel ("technicalLevel") {
        Beginner => "beginner", "Beginner";
        Intermediate => "intermediate", "Intermediate";
        Advanced => "advanced", "Advanced";
    }
}

choice! {
    SupportLevel ("supportLevel") {
        Basic => "basic", "Basic (Community forums, documentation)";
        Standard => "standard", "Standard (Email support during business hours)";
        Priority => "priority", "Priority (24/7 support with quick response times)";
    }
}

/// Answers collected by the questionnaire.
///
/// Built once by the caller; the pipeline only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    pub website_type: WebsiteType,
    pub expected_traffic: ExpectedTraffic,
    pub budget: Budget,
    pub technical_level: TechnicalLevel,
    pub support_level: SupportLevel,
    /// Selected extras. A set, so selection order never matters.
    #[serde(default)]
    pub features: BTreeSet<String>,
}

impl Requirements {
    pub fn new(
        website_type: WebsiteType,
        expected_traffic: ExpectedTraffic,
        budget: Budget,
        technical_level: TechnicalLevel,
        support_level: SupportLevel,
    ) -> Self {
        Self {
            website_type,
            expected_traffic,
            budget,
            technical_level,
            support_level,
            features: BTreeSet::new(),
        }
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.insert(feature.into());
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features.extend(features.into_iter().map(Into::into));
        self
    }
}

/// A hosting provider as described in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    pub id: String,
    pub name: String,
    /// Single glyph shown next to the name
    pub logo: String,
    #[serde(rename = "price")]
    pub price_range: String,
    /// 0.0 - 5.0
    pub rating: f64,
    pub description: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub best_for: Vec<String>,
    pub features: Vec<String>,
}

/// Rank-derived label attached to a scored provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Recommended,
    Good,
    Alternative,
}

impl Tier {
    /// Tier for a zero-based rank: first is recommended, the next two are good.
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            0 => Tier::Recommended,
            1 | 2 => Tier::Good,
            _ => Tier::Alternative,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Recommended => "recommended",
            Tier::Good => "good",
            Tier::Alternative => "alternative",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry with its fitness for one requirements profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProvider {
    #[serde(flatten)]
    pub provider: ProviderRecord,
    /// 0 - 100
    pub match_score: u8,
    pub tier: Tier,
    /// Only set when the entry came from the AI path or the AI fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_recommendation_reason: Option<String>,
}

impl ScoredProvider {
    pub fn new(provider: ProviderRecord, match_score: u8, tier: Tier) -> Self {
        Self {
            provider,
            match_score: match_score.min(100),
            tier,
            ai_recommendation_reason: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.provider.id
    }
}

/// Re-derive every tier from its position in an already ranked slice.
pub fn assign_tiers(ranked: &mut [ScoredProvider]) {
    for (rank, provider) in ranked.iter_mut().enumerate() {
        provider.tier = Tier::for_rank(rank);
    }
}

/// Which path of the pipeline produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    /// Parsed from an LLM response
    Ai,
    /// Deterministic scoring, no credential supplied
    Algorithm,
    /// Deterministic scoring after the AI path failed
    Fallback,
}

impl RecommendationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationSource::Ai => "ai",
            RecommendationSource::Algorithm => "algorithm",
            RecommendationSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final answer handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    /// Highest score first, at most `MAX_RECOMMENDATIONS` entries.
    pub recommendations: Vec<ScoredProvider>,
    pub reasoning: String,
    pub source: RecommendationSource,
}

impl RecommendationResult {
    pub fn top(&self) -> Option<&ScoredProvider> {
        self.recommendations.first()
    }

    pub fn is_ai(&self) -> bool {
        self.source == RecommendationSource::Ai
    }
}
