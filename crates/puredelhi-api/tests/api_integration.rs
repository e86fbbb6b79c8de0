use async_trait::async_trait;
use axum_test::TestServer;
use puredelhi_ai::{Advice, AdviceProvider, AdviceRequest, AdviceResult};
use puredelhi_api::{create_router, AppState};
use puredelhi_core::DashboardConfig;
use serde_json::{json, Value};
use std::sync::Arc;

fn test_config() -> DashboardConfig {
    let mut config = DashboardConfig::default();
    config.auth.jwt_secret = "integration-test-secret-which-is-long-enough".into();
    config.wards.seed = 42;
    config
}

fn test_server() -> TestServer {
    let state = AppState::new(test_config()).expect("app state");
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let server = test_server();

    let resp = server.get("/health").await;
    assert_eq!(resp.status_code(), 200);
    let body: Value = resp.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn wards_endpoint_serves_all_274() {
    let server = test_server();

    let resp = server.get("/api/wards").await;
    assert_eq!(resp.status_code(), 200);
    let wards: Vec<Value> = resp.json();
    assert_eq!(wards.len(), 274);

    let first = &wards[0];
    assert!(first["aqi"].as_u64().unwrap() <= 500);
    assert_eq!(first["trend24h"].as_array().unwrap().len(), 24);
    assert_eq!(first["history30d"].as_array().unwrap().len(), 30);
    assert!(first["rankOverall"].as_u64().unwrap() >= 1);
    assert!(first["zone"].as_str().unwrap().contains("Delhi"));
}

#[tokio::test]
async fn ward_lookup_by_id() {
    let server = test_server();

    let wards: Vec<Value> = server.get("/api/wards").await.json();
    let id = wards[5]["id"].as_str().unwrap().to_string();

    let resp = server.get(&format!("/api/wards/{id}")).await;
    assert_eq!(resp.status_code(), 200);
    let ward: Value = resp.json();
    assert_eq!(ward["id"], wards[5]["id"]);
    assert_eq!(ward["name"], wards[5]["name"]);
}

#[tokio::test]
async fn unknown_ward_is_404_and_bad_id_is_400() {
    let server = test_server();

    let resp = server
        .get("/api/wards/00000000-0000-4000-8000-000000000000")
        .await;
    assert_eq!(resp.status_code(), 404);

    let resp = server.get("/api/wards/not-a-uuid").await;
    assert_eq!(resp.status_code(), 400);
    let body: Value = resp.json();
    assert!(body["error"].as_str().unwrap().contains("Invalid ward ID"));
}

#[tokio::test]
async fn seed_endpoint_regenerates_deterministically() {
    let server = test_server();

    let before: Vec<Value> = server.get("/api/wards").await.json();

    let resp = server.post("/api/wards/seed").json(&json!({ "seed": 7 })).await;
    assert_eq!(resp.status_code(), 200);
    let body: Value = resp.json();
    assert_eq!(body["wards"], 274);

    let reseeded: Vec<Value> = server.get("/api/wards").await.json();
    assert!(before
        .iter()
        .zip(&reseeded)
        .any(|(a, b)| a["aqi"] != b["aqi"]));

    // Same seed again reproduces the dataset.
    server.post("/api/wards/seed").json(&json!({ "seed": 7 })).await;
    let again: Vec<Value> = server.get("/api/wards").await.json();
    for (a, b) in reseeded.iter().zip(&again) {
        assert_eq!(a["id"], b["id"]);
        assert_eq!(a["aqi"], b["aqi"]);
    }
}

#[tokio::test]
async fn seed_endpoint_accepts_empty_body() {
    let server = test_server();
    let resp = server.post("/api/wards/seed").await;
    assert_eq!(resp.status_code(), 200);
}

#[tokio::test]
async fn signup_login_and_report_flow() {
    let server = test_server();

    let resp = server
        .post("/api/auth/signup")
        .json(&json!({
            "email": "citizen@delhi.in",
            "password": "breathable-air",
            "name": "Asha"
        }))
        .await;
    assert_eq!(resp.status_code(), 200);
    let body: Value = resp.json();
    assert_eq!(body["message"], "User created");
    assert!(body["userId"].is_string());

    // Duplicate email is rejected.
    let resp = server
        .post("/api/auth/signup")
        .json(&json!({
            "email": "citizen@delhi.in",
            "password": "breathable-air",
            "name": "Asha"
        }))
        .await;
    assert_eq!(resp.status_code(), 400);

    // Wrong password is a 401.
    let resp = server
        .post("/api/auth/login")
        .json(&json!({ "email": "citizen@delhi.in", "password": "wrong-password" }))
        .await;
    assert_eq!(resp.status_code(), 401);

    let resp = server
        .post("/api/auth/login")
        .json(&json!({ "email": "citizen@delhi.in", "password": "breathable-air" }))
        .await;
    assert_eq!(resp.status_code(), 200);
    let body: Value = resp.json();
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["email"], "citizen@delhi.in");
    assert_eq!(body["user"]["role"], "citizen");
    assert!(body["user"].get("passwordHash").is_none());

    let resp = server
        .post("/api/reports")
        .authorization_bearer(&token)
        .json(&json!({
            "category": "Waste Burning",
            "description": "Open garbage fire near the market",
            "location": "Rohini Sector 7"
        }))
        .await;
    assert_eq!(resp.status_code(), 201);
    let report: Value = resp.json();
    assert_eq!(report["category"], "Waste Burning");

    let resp = server
        .get("/api/reports/my")
        .authorization_bearer(&token)
        .await;
    assert_eq!(resp.status_code(), 200);
    let reports: Vec<Value> = resp.json();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["location"], "Rohini Sector 7");
}

#[tokio::test]
async fn report_routes_require_a_token() {
    let server = test_server();

    let resp = server
        .post("/api/reports")
        .json(&json!({
            "category": "Dust",
            "description": "Unsheeted construction site",
            "location": "Dwarka"
        }))
        .await;
    assert_eq!(resp.status_code(), 401);

    let resp = server
        .get("/api/reports/my")
        .authorization_bearer("not-a-real-token")
        .await;
    assert_eq!(resp.status_code(), 401);
}

#[tokio::test]
async fn weak_signup_payloads_are_rejected() {
    let server = test_server();

    let resp = server
        .post("/api/auth/signup")
        .json(&json!({ "email": "no-at-sign", "password": "long-enough", "name": "X" }))
        .await;
    assert_eq!(resp.status_code(), 400);

    let resp = server
        .post("/api/auth/signup")
        .json(&json!({ "email": "a@b.in", "password": "short", "name": "X" }))
        .await;
    assert_eq!(resp.status_code(), 400);
}

#[tokio::test]
async fn advice_without_api_key_is_500() {
    let server = test_server();

    let resp = server
        .post("/api/ai/advice")
        .json(&json!({
            "aqi": 342,
            "wardName": "Rohini",
            "pollutionLevel": "Very Poor"
        }))
        .await;
    assert_eq!(resp.status_code(), 500);
    let body: Value = resp.json();
    assert!(body["error"].as_str().unwrap().contains("AI API Key"));
}

struct FailingProvider;

#[async_trait]
impl AdviceProvider for FailingProvider {
    async fn advise(&self, _request: &AdviceRequest) -> AdviceResult<Advice> {
        Err(anyhow::anyhow!("upstream unreachable"))
    }

    fn provider_name(&self) -> &str {
        "failing-stub"
    }
}

struct CannedProvider;

#[async_trait]
impl AdviceProvider for CannedProvider {
    async fn advise(&self, request: &AdviceRequest) -> AdviceResult<Advice> {
        Ok(Advice {
            advice: format!("Stay indoors in {}.", request.ward_name),
            model: "canned".into(),
        })
    }

    fn provider_name(&self) -> &str {
        "canned-stub"
    }
}

#[tokio::test]
async fn advice_upstream_failure_degrades_to_fallback_text() {
    let state = AppState::new(test_config())
        .expect("app state")
        .with_advice_provider(Arc::new(FailingProvider));
    let server = TestServer::new(create_router(state)).unwrap();

    let resp = server
        .post("/api/ai/advice")
        .json(&json!({
            "aqi": 430,
            "wardName": "Janakpuri",
            "pollutionLevel": "Severe"
        }))
        .await;

    // Upstream failure still answers 200 so the dashboard stays smooth.
    assert_eq!(resp.status_code(), 200);
    let body: Value = resp.json();
    assert!(body["advice"].as_str().unwrap().contains("N95"));
}

#[tokio::test]
async fn advice_passes_through_provider_text() {
    let state = AppState::new(test_config())
        .expect("app state")
        .with_advice_provider(Arc::new(CannedProvider));
    let server = TestServer::new(create_router(state)).unwrap();

    let resp = server
        .post("/api/ai/advice")
        .json(&json!({
            "aqi": 180,
            "wardName": "Saket",
            "pollutionLevel": "Moderate"
        }))
        .await;

    assert_eq!(resp.status_code(), 200);
    let body: Value = resp.json();
    assert_eq!(body["advice"], "Stay indoors in Saket.");
}
