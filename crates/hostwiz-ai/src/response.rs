//! Extraction and validation of the recommendation payload in LLM output

use hostwiz_core::{
    ProviderRecord, RecommendationResult, RecommendationSource, ScoredProvider, Tier,
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::AiError;

/// Keys every recommendation object must carry.
pub const REQUIRED_FIELDS: &[&str] = &[
    "id",
    "name",
    "logo",
    "price",
    "rating",
    "description",
    "pros",
    "cons",
    "bestFor",
    "features",
    "matchScore",
    "tier",
];

/// Locate the first complete top-level JSON object in free text.
///
/// Starts at the first `{` and returns the span up to its matching `}`.
/// Braces inside string literals, including escaped quotes, are ignored.
/// Returns `None` when there is no `{` or it is never closed.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

// Only key presence is enforced. Values of the wrong type are coerced to a
// best-effort value.

fn text_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn list_field(object: &Map<String, Value>, key: &str) -> Vec<String> {
    match object.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn number_field(object: &Map<String, Value>, key: &str) -> f64 {
    match object.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => leading_number(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Numeric prefix of strings such as "87", "4.7/5" or "92%".
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().ok()
}

fn to_scored(object: &Map<String, Value>, rank: usize) -> ScoredProvider {
    let provider = ProviderRecord {
        id: text_field(object, "id"),
        name: text_field(object, "name"),
        logo: text_field(object, "logo"),
        price_range: text_field(object, "price"),
        rating: number_field(object, "rating"),
        description: text_field(object, "description"),
        pros: list_field(object, "pros"),
        cons: list_field(object, "cons"),
        best_for: list_field(object, "bestFor"),
        features: list_field(object, "features"),
    };

    // models sometimes answer 87.5 or 120
    let score = number_field(object, "matchScore").round().clamp(0.0, 100.0) as u8;

    // the model's tier label is not trusted; tiers follow rank
    let mut scored = ScoredProvider::new(provider, score, Tier::for_rank(rank));
    scored.ai_recommendation_reason = object
        .get("aiRecommendationReason")
        .and_then(Value::as_str)
        .map(str::to_string);
    scored
}

/// Parse raw assistant text into an AI-sourced result.
///
/// Entries are returned in the order the model gave them with provisional
/// tiers; sorting by score and truncation are left to the caller.
pub fn parse_recommendations(raw: &str) -> Result<RecommendationResult, AiError> {
    let json = extract_json_object(raw)
        .ok_or_else(|| AiError::InvalidResponse("no JSON object found in response".to_string()))?;

    let payload: Value = serde_json::from_str(json)
        .map_err(|e| AiError::InvalidResponse(format!("malformed JSON: {}", e)))?;

    let items = payload
        .get("recommendations")
        .ok_or_else(|| AiError::InvalidResponse("missing 'recommendations'".to_string()))?
        .as_array()
        .ok_or_else(|| AiError::InvalidResponse("'recommendations' is not an array".to_string()))?;

    if items.is_empty() {
        return Err(AiError::InvalidResponse(
            "'recommendations' is empty".to_string(),
        ));
    }

    let mut recommendations = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let object = item.as_object().ok_or_else(|| {
            AiError::InvalidResponse(format!("recommendation {} is not an object", index))
        })?;

        if let Some(missing) = REQUIRED_FIELDS.iter().find(|k| !object.contains_key(**k)) {
            return Err(AiError::InvalidResponse(format!(
                "recommendation {} is missing '{}'",
                index, missing
            )));
        }

        recommendations.push(to_scored(object, index));
    }

    let reasoning = payload
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    debug!("Parsed {} recommendations from LLM response", recommendations.len());

    Ok(RecommendationResult {
        recommendations,
        reasoning,
        source: RecommendationSource::Ai,
    })
}
