//! Router-level tests for the claims and auth routes

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use domain_auth::{OutboxOtpSender, PhoneNumber};
use interface_api::auth::validate_token;
use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState};
use test_utils::{
    assert_claim_status, assert_document_id_format, assert_error_envelope,
    assert_success_envelope, ClaimFixtures, LoginFixtures,
};

fn test_app() -> (Router, Arc<OutboxOtpSender>) {
    let outbox = Arc::new(OutboxOtpSender::new());
    let state = AppState::with_otp_sender(ApiConfig::default(), outbox.clone());
    (create_router(state), outbox)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn initialize(app: &Router) -> String {
    let (status, body) = send(app, post_json("/api/claims/initialize", &ClaimFixtures::initialize_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    body["claim"]["documentId"].as_str().unwrap().to_string()
}

// ============================================================================
// Claims Routes
// ============================================================================

mod claims_routes {
    use super::*;

    #[tokio::test]
    async fn test_initialize_complete_results_walkthrough() {
        let (app, _) = test_app();

        let (status, body) = send(
            &app,
            post_json("/api/claims/initialize", &json!({"insuranceId": "INS1", "formData": {}})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_success_envelope(&body);
        assert_eq!(body["message"], "Claim initialized successfully");
        assert_claim_status(&body, "draft");
        let document_id = body["claim"]["documentId"].as_str().unwrap().to_string();
        assert_document_id_format(&document_id);
        assert!(body["claim"]["id"].is_string());

        let (status, body) = send(
            &app,
            post_json(
                "/api/claims/complete",
                &json!({"documentId": document_id, "media": {}, "processingResult": {}}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Claim submitted successfully");
        assert_claim_status(&body, "submitted");

        let (status, body) = send(&app, get(&format!("/api/claims/results/{}", document_id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_success_envelope(&body);
        assert_eq!(body["claim"]["documentId"], document_id.as_str());
        assert_eq!(body["claim"]["processingResult"]["final"]["risk"], "low");
        assert_eq!(body["claim"]["processingResult"]["final"]["decision"], "APPROVE");
    }

    #[tokio::test]
    async fn test_initialize_without_form_data() {
        let (app, _) = test_app();

        let (status, _) = send(&app, post_json("/api/claims/initialize", &json!({"insuranceId": "INS9"}))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = send(&app, get("/api/claims/list")).await;
        assert_eq!(body["claims"][0]["formData"], json!({}));
        assert_eq!(body["claims"][0]["insuranceId"], "INS9");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (app, _) = test_app();

        let request = Request::post("/api/claims/initialize")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_complete_unknown_document_is_not_found() {
        let (app, _) = test_app();
        initialize(&app).await;
        let (_, before) = send(&app, get("/api/claims/list")).await;

        let (status, body) = send(&app, post_json("/api/claims/complete", &ClaimFixtures::complete_body("00000000ZZ"))).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_error_envelope(&body, "Claim not found");

        let (_, after) = send(&app, get("/api/claims/list")).await;
        assert_eq!(before["claims"], after["claims"]);
    }

    #[tokio::test]
    async fn test_complete_attaches_payloads() {
        let (app, _) = test_app();
        let document_id = initialize(&app).await;

        send(&app, post_json("/api/claims/complete", &ClaimFixtures::complete_body(&document_id))).await;

        let (_, body) = send(&app, get("/api/claims/list?status=submitted")).await;
        let claim = &body["claims"][0];
        assert_eq!(claim["media"], ClaimFixtures::media());
        assert_eq!(claim["processingResult"], ClaimFixtures::processing_result());
        assert!(claim["submittedAt"].is_string());
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let (app, _) = test_app();
        let mut documents = Vec::new();
        for _ in 0..3 {
            documents.push(initialize(&app).await);
        }
        send(&app, post_json("/api/claims/complete", &ClaimFixtures::complete_body(&documents[1]))).await;

        let (status, all) = send(&app, get("/api/claims/list?status=all&page=1&limit=2")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all["claims"].as_array().unwrap().len(), 3);
        assert_eq!(
            all["pagination"],
            json!({"currentPage": 1, "totalPages": 2, "totalClaims": 3, "hasNext": true, "hasPrev": false})
        );
        let order: Vec<&str> = all["claims"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["documentId"].as_str().unwrap())
            .collect();
        assert_eq!(order, documents.iter().map(String::as_str).collect::<Vec<_>>());

        let (_, drafts) = send(&app, get("/api/claims/list?status=draft")).await;
        assert_eq!(drafts["claims"].as_array().unwrap().len(), 2);

        let (_, unknown) = send(&app, get("/api/claims/list?status=archived")).await;
        assert!(unknown["claims"].as_array().unwrap().is_empty());
        assert_eq!(unknown["pagination"]["totalClaims"], 0);
    }

    #[tokio::test]
    async fn test_list_lenient_query_values() {
        let (app, _) = test_app();
        initialize(&app).await;

        let (status, body) = send(&app, get("/api/claims/list?page=abc&limit=0")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagination"]["currentPage"], 1);
        assert_eq!(body["pagination"]["totalPages"], 1);
    }

    #[tokio::test]
    async fn test_list_repeated_query_key_uses_first_value() {
        let (app, _) = test_app();
        initialize(&app).await;

        let (status, body) = send(&app, get("/api/claims/list?page=1&page=2&limit=1&limit=5")).await;

        assert_eq!(status, StatusCode::OK);
        assert_success_envelope(&body);
        assert_eq!(body["pagination"]["currentPage"], 1);
        assert_eq!(body["pagination"]["totalPages"], 1);
        assert_eq!(body["claims"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_initialize_with_numeric_insurance_id() {
        let (app, _) = test_app();

        let (status, body) = send(
            &app,
            post_json("/api/claims/initialize", &json!({"insuranceId": 123, "formData": {}})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_claim_status(&body, "draft");

        let (_, body) = send(&app, get("/api/claims/list")).await;
        assert_eq!(body["claims"][0]["insuranceId"], 123);
    }

    #[tokio::test]
    async fn test_results_do_not_consult_store() {
        let (app, _) = test_app();

        let (status, body) = send(&app, get("/api/claims/results/12345678AB")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["claim"]["documentId"], "12345678AB");
        assert_eq!(body["claim"]["status"], "submitted");
        let media = body["claim"]["media"].as_object().unwrap();
        for key in ["corner1", "corner2", "corner3", "corner4", "damage", "overview"] {
            assert!(media.contains_key(key), "missing media entry {}", key);
        }
    }
}

// ============================================================================
// Auth Routes
// ============================================================================

mod auth_routes {
    use super::*;

    fn phone() -> PhoneNumber {
        PhoneNumber::parse(LoginFixtures::valid_phone()).unwrap()
    }

    #[tokio::test]
    async fn test_send_then_verify_issues_token() {
        let (app, outbox) = test_app();

        let (status, body) = send(
            &app,
            post_json("/api/auth/send-otp", &json!({"phoneNumber": LoginFixtures::valid_phone()})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "OTP sent successfully");

        let code = outbox.last_code(&phone()).await.unwrap();
        let verify = json!({"phoneNumber": LoginFixtures::valid_phone(), "otp": code.as_str()});
        let (status, body) = send(&app, post_json("/api/auth/verify-otp", &verify)).await;

        assert_eq!(status, StatusCode::OK);
        assert_success_envelope(&body);
        assert_eq!(body["user"]["phoneNumber"], LoginFixtures::valid_phone());

        let claims = validate_token(body["token"].as_str().unwrap(), &ApiConfig::default().jwt_secret).unwrap();
        assert_eq!(claims.sub, body["user"]["id"].as_str().unwrap());

        // Codes are single use
        let (status, body) = send(&app, post_json("/api/auth/verify-otp", &verify)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_error_envelope(&body, "Invalid or expired OTP");
    }

    #[tokio::test]
    async fn test_wrong_code_is_unauthorized() {
        let (app, outbox) = test_app();
        send(&app, post_json("/api/auth/send-otp", &json!({"phoneNumber": LoginFixtures::valid_phone()}))).await;
        let code = outbox.last_code(&phone()).await.unwrap();
        let wrong = if code.as_str() == "000000" { "111111" } else { "000000" };

        let (status, body) = send(
            &app,
            post_json("/api/auth/verify-otp", &json!({"phoneNumber": LoginFixtures::valid_phone(), "otp": wrong})),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_error_envelope(&body, "Invalid or expired OTP");
    }

    #[tokio::test]
    async fn test_invalid_phone_is_bad_request() {
        let (app, outbox) = test_app();

        let (status, body) = send(
            &app,
            post_json("/api/auth/send-otp", &json!({"phoneNumber": LoginFixtures::invalid_leading_digit_phone()})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error_envelope(&body, "Please enter a valid 10-digit mobile number");
        assert!(outbox.last_code(&phone()).await.is_none());
    }

    #[tokio::test]
    async fn test_short_otp_is_bad_request() {
        let (app, _) = test_app();

        let (status, body) = send(
            &app,
            post_json(
                "/api/auth/verify-otp",
                &json!({"phoneNumber": LoginFixtures::valid_phone(), "otp": LoginFixtures::short_otp()}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error_envelope(&body, "Please enter a valid 6-digit OTP");
    }
}

// ============================================================================
// Health
// ============================================================================

mod health_routes {
    use super::*;

    #[tokio::test]
    async fn test_health_and_readiness() {
        let (app, _) = test_app();

        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = send(&app, get("/health/ready")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["checks"][0]["adapter_id"], "in-memory-claims");
    }
}
