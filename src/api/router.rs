use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::admin;
use super::bot;
use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::state::AppState;
use crate::config::ServerConfig;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints (no state needed)
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Organiser API
        .nest("/admin", admin::create_admin_router())
        // Messaging bot API
        .nest("/bot", bot::create_bot_router())
        // Add state and middleware
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Router served by the binary: API, optional metrics endpoint and CORS
pub fn create_app_router(
    state: AppState,
    server: &ServerConfig,
    metrics: Option<PrometheusMetrics>,
) -> Router {
    let mut router = create_router_with_state(state);

    if let Some(metrics) = metrics {
        router = router.merge(create_metrics_router(metrics));
    }

    if server.cors_permissive {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::AppConfig;

    async fn test_router() -> Router {
        let mut config = AppConfig::default();
        config.exchange.random_seed = Some(31);
        let state = crate::create_app_state_with_config(&config).await.unwrap();

        create_router_with_state(state)
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    async fn create_team(router: &Router, name: &str, count: usize) -> Value {
        let (status, team) = send(
            router,
            "POST",
            "/admin/teams",
            Some(json!({"name": name, "participant_count": count})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        team
    }

    fn codes_of(team: &Value) -> Vec<String> {
        team["codes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c.as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let router = test_router().await;

        let (status, body) = send(&router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = send(&router, "GET", "/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"].as_array().unwrap().len(), 2);

        let (status, _) = send(&router, "GET", "/live", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_team_with_defaults() {
        let router = test_router().await;

        let (status, team) = send(
            &router,
            "POST",
            "/admin/teams",
            Some(json!({"name": "  Elves  "})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(team["name"], "Elves");
        assert_eq!(team["rules"], "No rules specified");
        assert_eq!(team["participant_count"], 5);
        assert_eq!(codes_of(&team).len(), 5);
        assert!(codes_of(&team).iter().all(|c| c.starts_with("MVT") && c.len() == 6));
        assert_eq!(team["participants"], json!([]));
    }

    #[tokio::test]
    async fn test_create_team_rejects_out_of_range_count() {
        let router = test_router().await;

        for count in [1, 51] {
            let (status, body) = send(
                &router,
                "POST",
                "/admin/teams",
                Some(json!({"name": "Elves", "participant_count": count})),
            )
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["param"], "participant_count");
        }

        let (_, list) = send(&router, "GET", "/admin/teams", None).await;
        assert_eq!(list["total"], 0);
    }

    #[tokio::test]
    async fn test_create_team_rejects_blank_name() {
        let router = test_router().await;

        let (status, body) = send(
            &router,
            "POST",
            "/admin/teams",
            Some(json!({"name": "   "})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_get_unknown_team() {
        let router = test_router().await;

        let (status, body) = send(&router, "GET", "/admin/teams/nope", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "not_found_error");
    }

    #[tokio::test]
    async fn test_bot_registration_flow() {
        let router = test_router().await;
        let team = create_team(&router, "Elves", 3).await;
        let code = codes_of(&team)[0].clone();

        let (status, body) = send(
            &router,
            "POST",
            "/bot/register",
            Some(json!({"name": "Alice", "code": code.to_lowercase(), "telegram_id": 42})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["team_name"], "Elves");
        assert_eq!(body["team_rules"], "No rules specified");
        assert!(body["participant_id"].is_string());

        // Same code again
        let (status, body) = send(
            &router,
            "POST",
            "/bot/register",
            Some(json!({"name": "Mallory", "code": code})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "conflict_error");

        let (status, _) = send(
            &router,
            "POST",
            "/bot/register",
            Some(json!({"name": "Bob", "code": "XYZ000"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, info) = send(&router, "GET", "/bot/participants/42", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(info["name"], "Alice");
        assert_eq!(info["team_name"], "Elves");
        assert_eq!(info["gift_to"], Value::Null);

        let (status, _) = send(&router, "GET", "/bot/participants/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_codes_endpoint_tracks_redemption() {
        let router = test_router().await;
        let team = create_team(&router, "Elves", 2).await;
        let team_id = team["id"].as_str().unwrap().to_string();
        let code = codes_of(&team)[1].clone();

        send(
            &router,
            "POST",
            "/admin/participants",
            Some(json!({"name": "Alice", "code": code})),
        )
        .await;

        let (status, body) = send(&router, "GET", &format!("/admin/teams/{}/codes", team_id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["redeemed"], 1);
        assert_eq!(body["total"], 2);
        assert_eq!(body["codes"][0]["redeemed"], false);
        assert_eq!(body["codes"][1]["redeemed"], true);
    }

    #[tokio::test]
    async fn test_assignment_flow() {
        let router = test_router().await;
        let team = create_team(&router, "Elves", 4).await;
        let team_id = team["id"].as_str().unwrap().to_string();
        let assignments = format!("/admin/teams/{}/assignments", team_id);
        let names = ["Alice", "Bob", "Carol"];

        let (status, _) = send(&router, "POST", &assignments, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        for (i, (name, code)) in names.iter().zip(codes_of(&team)).enumerate() {
            let (status, _) = send(
                &router,
                "POST",
                "/bot/register",
                Some(json!({"name": name, "code": code, "telegram_id": 100 + i})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&router, "POST", &assignments, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);

        let mut givers: Vec<String> = body["pairs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["giver_name"].as_str().unwrap().to_string())
            .collect();
        let mut recipients: Vec<String> = body["pairs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["recipient_name"].as_str().unwrap().to_string())
            .collect();
        givers.sort();
        recipients.sort();
        assert_eq!(givers, names);
        assert_eq!(recipients, names);
        assert!(body["pairs"]
            .as_array()
            .unwrap()
            .iter()
            .all(|p| p["giver_id"] != p["recipient_id"]));

        let (status, current) = send(&router, "GET", &assignments, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(current["pairs"], body["pairs"]);

        let (_, info) = send(&router, "GET", "/bot/participants/100", None).await;
        assert!(info["gift_to"].is_string());

        let (_, members) = send(
            &router,
            "GET",
            &format!("/admin/teams/{}/participants", team_id),
            None,
        )
        .await;
        assert_eq!(members["total"], 3);
        assert_eq!(members["participants"][0]["name"], "Alice");
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_envelope() {
        let router = test_router().await;

        let request = Request::builder()
            .method("POST")
            .uri("/bot/register")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_non_numeric_telegram_id_uses_error_envelope() {
        let router = test_router().await;

        let (status, body) = send(&router, "GET", "/bot/participants/alice", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request_error");
        assert_eq!(body["error"]["code"], "path_parse_error");
    }

    #[tokio::test]
    async fn test_unmatched_non_ascii_path_is_not_found() {
        let router = test_router().await;
        let uri = format!("/admin/{}", "ж".repeat(30));

        let (status, _) = send(&router, "GET", &uri, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
