use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers::{companies, health, jobs, AppState};
use crate::middleware::require_admin;

pub fn router(state: AppState, config: &AppConfig) -> Router {
    let mut app = Router::new()
        .merge(public_routes())
        .merge(admin_routes())
        .with_state(state);

    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }
    if config.security.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    app
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/companies", get(companies::list))
        .route("/companies/:handle", get(companies::get))
        .route("/jobs", get(jobs::list))
        .route("/jobs/:title", get(jobs::get))
}

// Writes; every route here sits behind the admin gate
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/companies", post(companies::create))
        .route("/companies/:handle", patch(companies::update).delete(companies::remove))
        .route("/jobs", post(jobs::create))
        .route("/jobs/:title", patch(jobs::update).delete(jobs::remove))
        .route_layer(middleware::from_fn(require_admin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::auth::{generate_jwt, Claims};
    use crate::config;
    use crate::testing::ScriptedClient;

    fn app(client: ScriptedClient) -> Router {
        router(AppState::new(Arc::new(client)), config::config())
    }

    fn bearer(is_admin: bool) -> String {
        let token = generate_jwt(&Claims::new("tester", is_admin)).unwrap();
        format!("Bearer {}", token)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok_when_storage_answers() {
        let client = ScriptedClient::new().respond(vec![json!({ "?column?": 1 })]);
        let response = app(client)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_degrades_when_storage_fails() {
        let client = ScriptedClient::new().fail("connection refused");
        let response = app(client)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn list_companies_wraps_in_envelope() {
        let client = ScriptedClient::new().respond(vec![json!({
            "handle": "c1",
            "name": "C1",
            "description": "Desc1",
            "numEmployees": 1,
            "logoUrl": null
        })]);
        let response = app(client)
            .oneshot(Request::get("/companies").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["companies"][0]["handle"], "c1");
        assert_eq!(body["data"]["companies"][0]["numEmployees"], 1);
    }

    #[tokio::test]
    async fn contradictory_range_is_bad_request() {
        let response = app(ScriptedClient::new())
            .oneshot(
                Request::get("/companies?minEmployees=50&maxEmployees=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"], json!(["minEmployees cannot exceed maxEmployees"]));
    }

    #[tokio::test]
    async fn writes_require_a_token() {
        let response = app(ScriptedClient::new())
            .oneshot(
                Request::post("/companies")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"handle":"x"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn writes_reject_non_admin() {
        let response = app(ScriptedClient::new())
            .oneshot(
                Request::delete("/jobs/magic")
                    .header(header::AUTHORIZATION, bearer(false))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_create_job_returns_201() {
        let client = ScriptedClient::new().respond(vec![]).respond(vec![json!({
            "id": 7,
            "title": "magic",
            "salary": 500,
            "equity": 0.5,
            "company_handle": "c1"
        })]);
        let response = app(client)
            .oneshot(
                Request::post("/jobs")
                    .header(header::AUTHORIZATION, bearer(true))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({ "title": "magic", "salary": 500, "equity": 0.5, "company_handle": "c1" }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["data"]["job"]["id"], 7);
    }

    #[tokio::test]
    async fn malformed_body_gets_error_envelope() {
        let client = Arc::new(ScriptedClient::new());
        let app = router(AppState::new(client.clone()), config::config());

        let response = app
            .clone()
            .oneshot(
                Request::post("/jobs")
                    .header(header::AUTHORIZATION, bearer(true))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"title\": "))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

        let response = app
            .oneshot(
                Request::patch("/companies/c1")
                    .header(header::AUTHORIZATION, bearer(true))
                    .body(Body::from(r#"{"name":"x"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], true);
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_job_is_404() {
        let response = app(ScriptedClient::new().respond(vec![]))
            .oneshot(Request::get("/jobs/nothing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["message"], "nothing does not exist");
    }

    #[tokio::test]
    async fn admin_delete_company_reports_handle() {
        let client = ScriptedClient::new().respond(vec![json!({ "handle": "c1" })]);
        let response = app(client)
            .oneshot(
                Request::delete("/companies/c1")
                    .header(header::AUTHORIZATION, bearer(true))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"], json!({ "deleted": "c1" }));
    }
}
