//! Deterministic multi-factor provider scoring
//!
//! Five independent rules each award points to specific provider ids. The
//! points are summed and clamped to a ceiling of 100; the sum is never
//! rescaled, so scores from different requirement profiles are not
//! comparable in absolute terms.

use tracing::debug;

use crate::catalog::ProviderCatalog;
use crate::model::{
    assign_tiers, Budget, ExpectedTraffic, ProviderRecord, Requirements, ScoredProvider, SupportLevel,
    TechnicalLevel, Tier, WebsiteType,
};

/// Ceiling applied to the summed rule points.
pub const MAX_SCORE: u32 = 100;

/// Score and rank every provider in the catalog.
pub fn score(requirements: &Requirements, catalog: &ProviderCatalog) -> Vec<ScoredProvider> {
    score_providers(requirements, catalog.providers())
}

/// Score and rank an arbitrary candidate list.
///
/// Ordering is descending by score. The sort is stable, so equal scores keep
/// the order of `providers`. Tiers come from rank alone: a low score can
/// still be `recommended` when nothing beats it.
pub fn score_providers(
    requirements: &Requirements,
    providers: &[ProviderRecord],
) -> Vec<ScoredProvider> {
    let mut scored: Vec<ScoredProvider> = providers
        .iter()
        .map(|provider| {
            let points = match_score(requirements, &provider.id);
            debug!("Scored provider '{}': {}", provider.id, points);
            ScoredProvider::new(provider.clone(), points, Tier::Alternative)
        })
        .collect();

    // Vec::sort_by is stable
    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    assign_tiers(&mut scored);
    scored
}

/// Clamped match score of a single provider id.
pub fn match_score(requirements: &Requirements, provider_id: &str) -> u8 {
    let total = website_type_points(requirements.website_type, provider_id)
        + traffic_points(requirements.expected_traffic, provider_id)
        + budget_points(requirements.budget, provider_id)
        + technical_level_points(requirements.technical_level, provider_id)
        + support_level_points(requirements.support_level, provider_id);

    total.min(MAX_SCORE) as u8
}

fn website_type_points(website_type: WebsiteType, id: &str) -> u32 {
    use WebsiteType::*;
    match (website_type, id) {
        (Blog | Business, "netlify" | "vercel") => 30,
        (Blog | Business, "bluehost" | "hostinger") => 25,
        (App, "vercel" | "digitalocean") => 30,
        (App, "aws") => 25,
        (Ecommerce, "digitalocean" | "aws") => 30,
        (Ecommerce, "bluehost") => 20,
        (Enterprise, "aws") => 35,
        (Enterprise, "digitalocean") => 25,
        _ => 0,
    }
}

fn traffic_points(traffic: ExpectedTraffic, id: &str) -> u32 {
    use ExpectedTraffic::*;
    match (traffic, id) {
        (Low, "netlify" | "hostinger") => 25,
        (Medium, "vercel" | "digitalocean") => 25,
        (High | VeryHigh, "aws" | "digitalocean") => 25,
        _ => 0,
    }
}

fn budget_points(budget: Budget, id: &str) -> u32 {
    match (budget, id) {
        (Budget::Budget, "netlify" | "hostinger") => 30,
        // free tier
        (Budget::Budget, "vercel") => 20,
        (Budget::Standard, "vercel" | "digitalocean" | "bluehost") => 25,
        (Budget::Premium | Budget::Enterprise, "aws" | "digitalocean") => 25,
        _ => 0,
    }
}

fn technical_level_points(level: TechnicalLevel, id: &str) -> u32 {
    use TechnicalLevel::*;
    match (level, id) {
        (Beginner, "bluehost" | "hostinger") => 20,
        (Beginner, "netlify" | "vercel") => 15,
        (Advanced, "aws" | "digitalocean") => 20,
        _ => 0,
    }
}

fn support_level_points(level: SupportLevel, id: &str) -> u32 {
    match (level, id) {
        (SupportLevel::Priority, "aws" | "bluehost") => 15,
        _ => 0,
    }
}
