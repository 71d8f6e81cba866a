//! Prompt building for LLM hosting recommendations

use std::fmt::Write;

use hostwiz_core::{ProviderCatalog, ProviderRecord, Requirements, MAX_RECOMMENDATIONS};

/// System prompt sent with chat-completion requests
pub const SYSTEM_PROMPT: &str = "You are a hosting expert that provides personalized hosting recommendations. Always respond with valid JSON only.";

const RESPONSE_FORMAT: &str = r#"{
  "recommendations": [
    {
      "id": "provider_id",
      "name": "Provider Name",
      "logo": "emoji",
      "price": "price range",
      "rating": 4.5,
      "description": "customized description for this user",
      "pros": ["pro1", "pro2", "pro3"],
      "cons": ["con1", "con2"],
      "bestFor": ["use case 1", "use case 2"],
      "features": ["feature1", "feature2"],
      "matchScore": 95,
      "tier": "recommended",
      "aiRecommendationReason": "why this provider fits these requirements"
    }
  ],
  "reasoning": "overall explanation of the recommendation strategy"
}"#;

/// Build the user prompt from the requirements and every catalog entry.
pub fn build_prompt(requirements: &Requirements, catalog: &ProviderCatalog) -> String {
    let features = if requirements.features.is_empty() {
        "None specified".to_string()
    } else {
        requirements
            .features
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        r#"As a hosting expert, analyze these website requirements and provide personalized hosting recommendations:

**User Requirements:**
- Website Type: {website_type}
- Expected Traffic: {traffic}
- Budget: {budget}
- Technical Level: {technical}
- Support Level: {support}
- Special Features: {features}

**Available Hosting Providers:**
{providers}
**Instructions:**
1. Select the top {count} most suitable providers for these requirements. Only choose providers from the list above; do not invent new ones.
2. Rank them by match score (0-100).
3. Assign tiers: "recommended" (best match), "good" (2nd-3rd), "alternative" (4th).
4. Customize the description, pros and cons to these specific requirements.
5. Give a brief reasoning for each recommendation in "aiRecommendationReason" and an overall "reasoning".

**Response Format (JSON only):**
{format}

Provide only the JSON response, no additional text."#,
        website_type = requirements.website_type.label(),
        traffic = requirements.expected_traffic.label(),
        budget = requirements.budget.label(),
        technical = requirements.technical_level.label(),
        support = requirements.support_level.label(),
        features = features,
        providers = format_providers(catalog.providers()),
        count = MAX_RECOMMENDATIONS,
        format = RESPONSE_FORMAT,
    )
}

fn format_providers(providers: &[ProviderRecord]) -> String {
    let mut out = String::new();
    for p in providers {
        // writing to a String cannot fail
        let _ = writeln!(
            out,
            "{name} ({id}):\n- Price: {price}\n- Rating: {rating}/5\n- Description: {description}\n- Pros: {pros}\n- Cons: {cons}\n- Best For: {best_for}\n- Features: {features}\n",
            name = p.name,
            id = p.id,
            price = p.price_range,
            rating = p.rating,
            description = p.description,
            pros = p.pros.join(", "),
            cons = p.cons.join(", "),
            best_for = p.best_for.join(", "),
            features = p.features.join(", "),
        );
    }
    out
}
