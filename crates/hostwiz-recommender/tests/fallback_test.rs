//! End-to-end recommendation flows against mocked LLM backends

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::{json, Value};

use hostwiz_ai::{Backend, LlmClient, LlmSettings};
use hostwiz_core::{
    Budget, ExpectedTraffic, ProviderCatalog, RecommendationResult, RecommendationSource,
    Requirements, SupportLevel, TechnicalLevel, Tier, WebsiteType,
};
use hostwiz_recommender::{Recommender, FALLBACK_REASON, FALLBACK_REASONING};

const KEY: &str = "sk-test-123";

fn recommender_for(server: &MockServer) -> Recommender {
    let client = LlmClient::new(LlmSettings::with_base_url(server.base_url()));
    Recommender::new(ProviderCatalog::builtin(), client).unwrap()
}

fn blog_starter() -> Requirements {
    Requirements::new(
        WebsiteType::Blog,
        ExpectedTraffic::Low,
        Budget::Budget,
        TechnicalLevel::Beginner,
        SupportLevel::Basic,
    )
}

fn openai_reply(content: &str) -> Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
}

fn anthropic_reply(text: &str) -> Value {
    json!({ "content": [{ "type": "text", "text": text }] })
}

fn ai_entry(id: &str, score: u32, tier: &str) -> Value {
    let provider = ProviderCatalog::builtin().get(id).cloned().unwrap();
    let mut entry = serde_json::to_value(provider).unwrap();
    let object = entry.as_object_mut().unwrap();
    object.insert("matchScore".to_string(), json!(score));
    object.insert("tier".to_string(), json!(tier));
    object.insert(
        "aiRecommendationReason".to_string(),
        json!(format!("{} suits a small blog", id)),
    );
    entry
}

fn assert_fallback(result: &RecommendationResult) {
    assert_eq!(result.source, RecommendationSource::Fallback);
    assert_eq!(result.reasoning, FALLBACK_REASONING);
    assert!(result.reasoning.contains("valid API key"));
    assert_eq!(result.recommendations.len(), 4);
    assert!(result
        .recommendations
        .iter()
        .all(|p| p.ai_recommendation_reason.as_deref() == Some(FALLBACK_REASON)));

    let ids: Vec<_> = result.recommendations.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["netlify", "vercel", "bluehost", "digitalocean"]);
    assert_eq!(result.recommendations[0].tier, Tier::Recommended);
}

#[tokio::test]
async fn test_no_credential_never_calls_backend() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).json_body(openai_reply("{}"));
        })
        .await;

    let recommender = recommender_for(&server);
    let result = recommender
        .recommend(&blog_starter(), None, Backend::OpenAi)
        .await;
    let blank = recommender
        .recommend(&blog_starter(), Some("  "), Backend::Anthropic)
        .await;

    assert_eq!(mock.hits_async().await, 0);
    assert_eq!(result.source, RecommendationSource::Algorithm);
    assert_eq!(result, blank);
    assert_eq!(result.top().unwrap().id(), "netlify");
    assert_eq!(result.top().unwrap().tier, Tier::Recommended);
    assert!(result
        .recommendations
        .iter()
        .all(|p| p.ai_recommendation_reason.is_none()));
}

#[tokio::test]
async fn test_unauthorized_falls_back() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(401)
                .json_body(json!({ "error": { "message": "Incorrect API key provided" } }));
        })
        .await;

    let result = recommender_for(&server)
        .recommend(&blog_starter(), Some(KEY), Backend::OpenAi)
        .await;

    mock.assert_async().await;
    assert_fallback(&result);
}

#[tokio::test]
async fn test_server_error_falls_back() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(500).body("internal error");
        })
        .await;

    let result = recommender_for(&server)
        .recommend(&blog_starter(), Some(KEY), Backend::Anthropic)
        .await;

    // exactly one attempt, no retry
    mock.assert_hits_async(1).await;
    assert_fallback(&result);
}

#[tokio::test]
async fn test_non_json_body_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).body("<html>Bad Gateway</html>");
        })
        .await;

    let result = recommender_for(&server)
        .recommend(&blog_starter(), Some(KEY), Backend::OpenAi)
        .await;

    assert_fallback(&result);
}

#[tokio::test]
async fn test_payload_without_recommendations_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200)
                .json_body(openai_reply(r#"{"reasoning": "I could not decide"}"#));
        })
        .await;

    let result = recommender_for(&server)
        .recommend(&blog_starter(), Some(KEY), Backend::OpenAi)
        .await;

    assert_fallback(&result);
}

#[tokio::test]
async fn test_prose_without_json_matches_http_failure() {
    let prose_server = MockServer::start_async().await;
    prose_server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200).json_body(anthropic_reply(
                "I'd suggest Netlify for a small blog, it has a great free tier.",
            ));
        })
        .await;

    let failing_server = MockServer::start_async().await;
    failing_server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(503);
        })
        .await;

    let from_prose = recommender_for(&prose_server)
        .recommend(&blog_starter(), Some(KEY), Backend::Anthropic)
        .await;
    let from_failure = recommender_for(&failing_server)
        .recommend(&blog_starter(), Some(KEY), Backend::Anthropic)
        .await;

    assert_fallback(&from_prose);
    assert_eq!(from_prose, from_failure);
}

#[tokio::test]
async fn test_timeout_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(openai_reply("{}"));
        })
        .await;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let client = LlmClient::with_http_client(LlmSettings::with_base_url(server.base_url()), http);
    let recommender = Recommender::new(ProviderCatalog::builtin(), client).unwrap();

    let result = recommender
        .recommend(&blog_starter(), Some(KEY), Backend::OpenAi)
        .await;

    assert_fallback(&result);
}

#[tokio::test]
async fn test_ai_result_is_normalized() {
    let content = json!({
        "recommendations": [
            ai_entry("hostinger", 97, "good"),
            ai_entry("netlify", 94, "recommended"),
            ai_entry("bluehost", 120, "alternative"),
            ai_entry("vercel", 70, "good"),
            ai_entry("digitalocean", 40, "alternative"),
            ai_entry("aws", 10, "alternative")
        ],
        "reasoning": "Cheap, simple hosting suits a beginner blog."
    })
    .to_string();
    let text = format!("Here you go:\n```json\n{}\n```", content);

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/messages")
                .header("x-api-key", KEY)
                .body_contains("Personal Blog/Portfolio");
            then.status(200).json_body(anthropic_reply(&text));
        })
        .await;

    let result = recommender_for(&server)
        .recommend(&blog_starter(), Some(KEY), Backend::Anthropic)
        .await;

    mock.assert_async().await;
    assert!(result.is_ai());
    assert_eq!(result.reasoning, "Cheap, simple hosting suits a beginner blog.");

    let ids: Vec<_> = result.recommendations.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["bluehost", "hostinger", "netlify", "vercel"]);

    let tiers: Vec<_> = result.recommendations.iter().map(|p| p.tier).collect();
    assert_eq!(
        tiers,
        vec![Tier::Recommended, Tier::Good, Tier::Good, Tier::Alternative]
    );

    assert_eq!(result.recommendations[0].match_score, 100);
    assert_eq!(
        result.recommendations[1].ai_recommendation_reason.as_deref(),
        Some("hostinger suits a small blog")
    );
}

#[tokio::test]
async fn test_ai_result_sorted_by_score() {
    let content = json!({
        "recommendations": [
            ai_entry("hostinger", 60, "recommended"),
            ai_entry("netlify", 95, "good"),
            ai_entry("vercel", 80, "good"),
            ai_entry("bluehost", 80, "alternative")
        ],
        "reasoning": "Static hosting first."
    })
    .to_string();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(openai_reply(&content));
        })
        .await;

    let result = recommender_for(&server)
        .recommend(&blog_starter(), Some(KEY), Backend::OpenAi)
        .await;

    assert!(result.is_ai());
    let ranked: Vec<_> = result
        .recommendations
        .iter()
        .map(|p| (p.id(), p.match_score, p.tier))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("netlify", 95, Tier::Recommended),
            ("vercel", 80, Tier::Good),
            ("bluehost", 80, Tier::Good),
            ("hostinger", 60, Tier::Alternative),
        ]
    );
}

#[tokio::test]
async fn test_unsendable_credential_falls_back() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).json_body(openai_reply("{}"));
        })
        .await;

    let recommender = recommender_for(&server);
    for backend in [Backend::OpenAi, Backend::Anthropic] {
        let result = recommender
            .recommend(&blog_starter(), Some("sk-\nbad\u{7f}é"), backend)
            .await;
        assert_fallback(&result);
    }

    // the header is rejected before any request leaves the client
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_concurrent_requests_share_recommender() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(500);
        })
        .await;

    let recommender = recommender_for(&server);
    let mut handles = Vec::new();
    for _ in 0..4 {
        let r = recommender.clone();
        handles.push(tokio::spawn(async move {
            r.recommend(&blog_starter(), Some(KEY), Backend::OpenAi).await
        }));
    }

    for handle in handles {
        assert_fallback(&handle.await.unwrap());
    }
}
