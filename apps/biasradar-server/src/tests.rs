//! Tests for the BiasRadar server API
//!
//! Test categories:
//! - Input validation properties
//! - HTTP endpoints through the full router (axum-test)
//! - Regressions on texts that used to be misreported

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use crate::api::validate_text;
    use crate::error::ServerError;

    /// Strings made only of whitespace, including the empty string
    fn blank_text() -> impl Strategy<Value = String> {
        prop::collection::vec(prop_oneof![Just(' '), Just('\n'), Just('\t'), Just('\r')], 0..40)
            .prop_map(|chars| chars.into_iter().collect())
    }

    proptest! {
        /// Property: blank text is always rejected as an invalid request
        #[test]
        fn blank_text_rejected(text in blank_text(), max in 1usize..20_000) {
            prop_assert!(matches!(
                validate_text(&text, max),
                Err(ServerError::InvalidRequest(_))
            ));
        }

        /// Property: the limit counts characters, so multi-byte text at the
        /// limit is accepted and one more character is rejected
        #[test]
        fn length_limit_counts_chars(c in prop_oneof![Just('a'), Just('é'), Just('日')], max in 1usize..200) {
            let at_limit: String = std::iter::repeat(c).take(max).collect();
            prop_assert!(validate_text(&at_limit, max).is_ok());

            let over: String = std::iter::repeat(c).take(max + 1).collect();
            let rejected = matches!(
                validate_text(&over, max),
                Err(ServerError::TextTooLong { len, .. }) if len == max + 1
            );
            prop_assert!(rejected);
        }

        /// Property: any non-blank text within the limit passes validation
        #[test]
        fn ordinary_text_accepted(text in "[a-zA-Z][a-zA-Z ,.!?]{0,200}") {
            prop_assert!(validate_text(&text, 10_000).is_ok());
        }
    }
}

#[cfg(test)]
mod http_endpoint_tests {
    //! HTTP endpoint integration tests using axum-test

    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use bias_engine::{BiasEngine, EngineConfig, PolicyProfile};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use crate::api::ScanResponse;
    use crate::{build_router, AppState};

    fn create_test_server_with(engine: BiasEngine, max_text_chars: usize) -> TestServer {
        let state = AppState {
            engine: Arc::new(engine),
            ai: None,
            max_text_chars,
        };
        TestServer::new(build_router(state)).unwrap()
    }

    /// Create a test server with the default engine and no AI client
    fn create_test_server() -> TestServer {
        create_test_server_with(BiasEngine::new(), 10_000)
    }

    #[tokio::test]
    async fn test_health_returns_200() {
        let server = create_test_server();
        let response = server.get("/health").await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "biasradar-server");
    }

    #[tokio::test]
    async fn test_bias_types_lists_every_detector() {
        let server = create_test_server();
        let response = server.get("/api/bias-types").await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["count"], 13);
        assert_eq!(json["profile"], "context_aware");

        let types = json["bias_types"].as_array().unwrap();
        assert_eq!(types[0]["name"], "gender");
        assert!(types[0]["phrase_count"].as_u64().unwrap() > 0);

        let pattern = types
            .iter()
            .find(|t| t["name"] == "pattern_stereotype")
            .unwrap();
        assert_eq!(pattern["detector"], "pattern");
        assert_eq!(pattern["phrase_count"], 0);
        assert!(types.iter().all(|t| t["name"] != "intersectional"));
    }

    #[tokio::test]
    async fn test_bias_types_counts_follow_profile() {
        let aware = create_test_server();
        let strict = create_test_server_with(
            BiasEngine::with_config(EngineConfig::default().with_profile(PolicyProfile::Strict)),
            10_000,
        );

        let aware_json = aware.get("/api/bias-types").await.json::<Value>();
        let strict_json = strict.get("/api/bias-types").await.json::<Value>();
        assert_eq!(strict_json["profile"], "strict");

        let gender = |json: &Value| json["bias_types"][0]["phrase_count"].as_u64().unwrap();
        assert!(gender(&strict_json) > gender(&aware_json));
    }

    #[tokio::test]
    async fn test_scan_job_ad() {
        let server = create_test_server();
        let response = server
            .post("/api/scan")
            .json(&json!({
                "text": "We're looking for a young, energetic guy who can handle aggressive targets."
            }))
            .await;
        response.assert_status_ok();

        let body = response.json::<ScanResponse>();
        let types: Vec<String> = body
            .result
            .bias_types()
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert!(types.contains(&"age".to_string()));
        assert!(types.contains(&"gender".to_string()));
        assert!(types.contains(&"intersectional".to_string()));
        assert!(body.result.score > 0);
        assert_eq!(body.result.issue_count, body.result.issues.len());
        assert!(body.summary.starts_with("Found "));

        let json = response.json::<Value>();
        assert_eq!(json["detection_method"], "manual_with_patterns");
        assert!(json["heatmap"].as_array().unwrap().len() >= 12);
    }

    #[tokio::test]
    async fn test_scan_neutral_text() {
        let server = create_test_server();
        let response = server
            .post("/api/scan")
            .json(&json!({ "text": "Competitive salary and benefits." }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["score"], 0);
        assert_eq!(json["severity"], "none");
        assert_eq!(json["issue_count"], 0);
        assert_eq!(json["summary"], "No significant biases detected. Great job!");
    }

    #[tokio::test]
    async fn test_scan_rejects_empty_text() {
        let server = create_test_server();
        let response = server.post("/api/scan").json(&json!({ "text": "   " })).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let json = response.json::<Value>();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "INVALID_REQUEST");
        assert_eq!(json["error"], "Text cannot be empty");
    }

    #[tokio::test]
    async fn test_scan_rejects_missing_text() {
        let server = create_test_server();
        let response = server.post("/api/scan").json(&json!({})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_scan_rejects_text_too_long() {
        let server = create_test_server_with(BiasEngine::new(), 100);
        let response = server
            .post("/api/scan")
            .json(&json!({ "text": "a".repeat(101) }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let json = response.json::<Value>();
        assert_eq!(json["code"], "TEXT_TOO_LONG");
        assert_eq!(json["error"], "Text too long. Maximum 100 characters.");
    }

    #[tokio::test]
    async fn test_scan_with_bias_type_filter() {
        let server = create_test_server();
        let response = server
            .post("/api/scan")
            .json(&json!({
                "text": "The chairman called him a thug.",
                "bias_types": ["race"]
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["detection_method"], "manual");
        let issues = json["issues"].as_array().unwrap();
        assert!(!issues.is_empty());
        assert!(issues.iter().all(|i| i["bias_type"] == "race"));
    }

    #[tokio::test]
    async fn test_scan_ai_requested_without_key_falls_back() {
        let server = create_test_server();
        let response = server
            .post("/api/scan")
            .json(&json!({
                "text": "The chairman called him a thug.",
                "enable_ai": true
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["detection_method"], "manual_with_patterns");
        assert!(json["issue_count"].as_u64().unwrap() >= 2);
    }

    #[tokio::test]
    async fn test_scan_eeo_statement() {
        let server = create_test_server();
        let response = server
            .post("/api/scan")
            .json(&json!({
                "text": "We are an equal opportunity employer and welcome all applicants."
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["detection_method"], "eeo_whitelisted");
        assert_eq!(json["score"], 0);
        assert_eq!(json["issues"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_fix_without_key_returns_503() {
        let server = create_test_server();
        let response = server
            .post("/api/fix")
            .json(&json!({ "text": "The chairman will decide." }))
            .await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

        let json = response.json::<Value>();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "AI_NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn test_fix_checks_ai_before_text() {
        // Even empty text reports the missing AI service first
        let server = create_test_server();
        let response = server.post("/api/fix").json(&json!({ "text": "" })).await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }
}

#[cfg(test)]
mod regression_tests {
    use std::sync::Arc;

    use axum_test::TestServer;
    use bias_engine::BiasEngine;
    use serde_json::{json, Value};

    use crate::{build_router, AppState};

    fn create_test_server() -> TestServer {
        let state = AppState {
            engine: Arc::new(BiasEngine::new()),
            ai: None,
            max_text_chars: 10_000,
        };
        TestServer::new(build_router(state)).unwrap()
    }

    async fn issue_count(server: &TestServer, text: &str) -> u64 {
        let response = server.post("/api/scan").json(&json!({ "text": text })).await;
        response.assert_status_ok();
        response.json::<Value>()["issue_count"].as_u64().unwrap()
    }

    /// Everyday business wording must not be flagged
    #[tokio::test]
    async fn neutral_business_text_is_clean() {
        let server = create_test_server();
        for text in [
            "We offer competitive compensation packages.",
            "This is a young company with innovative technology.",
            "We are developing a new model.",
        ] {
            assert_eq!(issue_count(&server, text).await, 0, "{text}");
        }
    }

    /// Masked profanity is reported like the plain word
    #[tokio::test]
    async fn censored_profanity_is_reported() {
        let server = create_test_server();
        assert!(issue_count(&server, "f**k this").await >= 1);
    }

    /// Multi-byte text keeps byte offsets that land on the flagged word
    #[tokio::test]
    async fn positions_are_byte_offsets() {
        let server = create_test_server();
        let text = "Café talk: the chairman left.";
        let response = server.post("/api/scan").json(&json!({ "text": text })).await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        let issue = json["issues"]
            .as_array()
            .unwrap()
            .iter()
            .find(|i| i["word"] == "chairman")
            .unwrap()
            .clone();
        let position = issue["position"].as_u64().unwrap() as usize;
        assert_eq!(&text[position..position + "chairman".len()], "chairman");
    }
}
