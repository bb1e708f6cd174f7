//! Portal API router.
//!
//! Returns a composable `Router` with every route under `/api/`. When a
//! static page directory is configured it is served at `/`.

use std::path::Path;
use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the portal router, serving the configured web directory if any.
pub fn portal_router(core: Arc<CoreState>) -> Router {
    let web_dir = core.config.web_dir.clone();
    let api = api_router(ApiContext::new(core));
    match web_dir {
        Some(dir) => with_static(api, &dir),
        None => api,
    }
}

fn with_static(api: Router, dir: &Path) -> Router {
    tracing::info!(dir = %dir.display(), "Serving static page");
    api.fallback_service(ServeDir::new(dir))
}

fn api_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/state", get(endpoints::health::state))
        .route("/doctors", get(endpoints::doctors::list))
        .route("/doctors/book", post(endpoints::doctors::book))
        .route(
            "/appointments",
            get(endpoints::appointments::list).post(endpoints::appointments::submit),
        )
        .route(
            "/reviews",
            get(endpoints::reviews::list).post(endpoints::reviews::submit),
        )
        .route("/cart", get(endpoints::cart::list).post(endpoints::cart::add))
        .route("/cart/pick", post(endpoints::cart::pick))
        .route("/cart/:index", delete(endpoints::cart::remove))
        .route("/cart/checkout", post(endpoints::cart::checkout))
        .route(
            "/history",
            get(endpoints::history::show).post(endpoints::history::save),
        )
        .route("/symptoms", get(endpoints::symptoms::areas))
        .route("/symptoms/:area", get(endpoints::symptoms::area))
        .route("/hospitals/locate", post(endpoints::hospitals::locate))
        .route("/navigate", post(endpoints::navigation::navigate))
        .route("/voice", get(endpoints::voice::status))
        .route("/voice/start", post(endpoints::voice::start))
        .route("/voice/stop", post(endpoints::voice::stop))
        .route("/voice/result", post(endpoints::voice::result))
        .route("/chat", get(endpoints::chat::panel))
        .route("/chat/open", post(endpoints::chat::open))
        .route("/chat/close", post(endpoints::chat::close))
        .route("/chat/send", post(endpoints::chat::send))
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::core_state::test_config;

    fn test_router() -> Router {
        portal_router(Arc::new(CoreState::in_memory(test_config())))
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_empty(uri: &str) -> Request<Body> {
        Request::builder().method("POST").uri(uri).body(Body::empty()).unwrap()
    }

    /// Send one request through a clone of the router and decode the body.
    async fn call(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), 65536).await.unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn alerts(json: &serde_json::Value) -> Vec<String> {
        json["notices"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|n| n["notice"] == "alert")
            .map(|n| n["message"].as_str().unwrap().to_string())
            .collect()
    }

    fn spoken(json: &serde_json::Value) -> Vec<String> {
        json["spoken"]
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["text"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = test_router();
        let (status, json) = call(&app, get_req("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["app"], "HealCare");
        assert_eq!(json["voice_supported"], true);
    }

    #[tokio::test]
    async fn state_renders_every_section() {
        let app = test_router();
        let (status, json) = call(&app, get_req("/api/state")).await;
        assert_eq!(status, StatusCode::OK);
        let views: Vec<&str> = json["views"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["view"].as_str().unwrap())
            .collect();
        assert_eq!(views, vec!["appointments", "reviews", "cart", "history", "voice_status"]);
    }

    #[tokio::test]
    async fn doctors_lists_catalog() {
        let app = test_router();
        let (status, json) = call(&app, get_req("/api/doctors")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["grid"].as_array().unwrap().len(), 9);
        assert_eq!(json["grid"][0]["rating"], "4.9 / 5.0");
        assert_eq!(json["vets"][0], "Dr. Ava Patel — ⭐ 4.8");
    }

    #[tokio::test]
    async fn booking_unknown_doctor_is_404() {
        let app = test_router();
        let (status, json) = call(
            &app,
            post_json("/api/doctors/book", serde_json::json!({ "name": "Dr. Nobody" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn booking_known_doctor_prefills() {
        let app = test_router();
        let (status, json) = call(
            &app,
            post_json("/api/doctors/book", serde_json::json!({ "name": "Dr. Naomi Brown" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["notices"][0]["notice"], "prefill");
        assert_eq!(json["notices"][0]["value"], "Dr. Naomi Brown");
        assert_eq!(json["notices"][1]["anchor"], "#appointment");
    }

    #[tokio::test]
    async fn appointment_form_round_trip() {
        let app = test_router();
        let (status, json) = call(
            &app,
            post_form(
                "/api/appointments",
                "date=2024-05-01&time=10%3A00&doctor=Dr.+Jacob+Lee&department=Pediatrics",
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(alerts(&json), vec!["Appointment reserved!"]);
        assert_eq!(spoken(&json), vec!["Your appointment has been reserved."]);
        assert_eq!(
            json["views"][0]["items"][0],
            "2024-05-01 10:00 — Dr. Jacob Lee (Pediatrics)"
        );

        let (_, list) = call(&app, get_req("/api/appointments")).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["time"], "10:00");
    }

    #[tokio::test]
    async fn reviews_average_over_http() {
        let app = test_router();
        call(&app, post_form("/api/reviews", "hospital=North&rating=5&text=great")).await;
        let (_, json) =
            call(&app, post_form("/api/reviews", "hospital=South&rating=3&text=ok")).await;
        assert_eq!(json["views"][0]["average"], "4.00 / 5.00 (2)");

        let (_, list) = call(&app, get_req("/api/reviews")).await;
        assert_eq!(list[0]["hospital"], "South");
    }

    #[tokio::test]
    async fn cart_remove_and_checkout() {
        let app = test_router();
        call(&app, post_form("/api/cart", "medicine=Paracetamol&qty=2&address=Home")).await;
        call(&app, post_form("/api/cart", "medicine=Insulin&qty=1&address=Home")).await;

        let (status, json) = call(
            &app,
            Request::builder()
                .method("DELETE")
                .uri("/api/cart/0")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"], true);
        assert_eq!(json["views"][0]["items"][0]["text"], "1 × Insulin — Home");

        let (_, json) = call(&app, post_empty("/api/cart/checkout")).await;
        assert_eq!(json["result"], true);
        assert_eq!(spoken(&json), vec!["Your medicine order has been placed."]);

        let (_, json) = call(&app, post_empty("/api/cart/checkout")).await;
        assert_eq!(json["result"], false);
        assert_eq!(alerts(&json), vec!["Cart is empty."]);
    }

    #[tokio::test]
    async fn cart_bad_index_is_400() {
        let app = test_router();
        let (status, _) = call(
            &app,
            Request::builder()
                .method("DELETE")
                .uri("/api/cart/first")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn history_save_and_show() {
        let app = test_router();
        let (_, before) = call(&app, get_req("/api/history")).await;
        assert_eq!(before["saved"], false);
        assert_eq!(before["text"], "No records saved on this device.");

        call(&app, post_form("/api/history", "name=Ana&allergies=none")).await;
        let (_, after) = call(&app, get_req("/api/history")).await;
        assert_eq!(after["saved"], true);
        assert!(after["text"].as_str().unwrap().contains("\"allergies\": \"none\""));
    }

    #[tokio::test]
    async fn symptoms_lookup() {
        let app = test_router();
        let (status, json) = call(&app, get_req("/api/symptoms/Legs")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["symptoms"][0], "Cramps");

        let (status, _) = call(&app, get_req("/api/symptoms/Tail")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn locate_with_position_and_without() {
        let app = test_router();
        let (_, json) = call(
            &app,
            post_json(
                "/api/hospitals/locate",
                serde_json::json!({ "position": { "latitude": 10.0, "longitude": 20.0 } }),
            ),
        )
        .await;
        assert!(json["result"]["embed_url"].as_str().unwrap().contains("marker=10%2C20"));

        let (_, json) =
            call(&app, post_json("/api/hospitals/locate", serde_json::json!({}))).await;
        assert!(json["result"].is_null());
        assert_eq!(alerts(&json), vec!["Geolocation not supported"]);

        let (_, json) = call(
            &app,
            post_json("/api/hospitals/locate", serde_json::json!({ "error": "denied" })),
        )
        .await;
        assert_eq!(alerts(&json), vec!["Unable to get location: denied"]);
    }

    #[tokio::test]
    async fn voice_session_routes_commands() {
        let app = test_router();
        let (_, json) = call(&app, post_empty("/api/voice/start")).await;
        assert_eq!(json["views"][0]["text"], "Listening…");

        let (_, json) = call(
            &app,
            post_json("/api/voice/result", serde_json::json!({ "transcripts": ["Check symptoms"] })),
        )
        .await;
        assert_eq!(json["result"]["action"], "navigate");
        assert_eq!(json["result"]["section"], "symptoms");

        call(&app, post_empty("/api/voice/stop")).await;
        let (_, status) = call(&app, get_req("/api/voice")).await;
        assert_eq!(status["active"], false);
        assert_eq!(status["status"], "Stopped");
    }

    #[tokio::test]
    async fn chat_send_replies_and_records() {
        let app = test_router();
        call(&app, post_empty("/api/chat/open")).await;
        let (_, json) = call(
            &app,
            post_json("/api/chat/send", serde_json::json!({ "text": "Is this an emergency?" })),
        )
        .await;
        assert_eq!(
            json["result"],
            "If this is an emergency, call your local emergency number immediately."
        );

        let (_, panel) = call(&app, get_req("/api/chat")).await;
        assert_eq!(panel["open"], true);
        assert_eq!(panel["messages"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn medicine_pill_prefills_without_adding() {
        let app = test_router();
        let (status, json) = call(
            &app,
            post_json("/api/cart/pick", serde_json::json!({ "medicine": "Ibuprofen" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let notice = &json["notices"][0];
        assert_eq!(notice["notice"], "prefill");
        assert_eq!(notice["form"], "delivery");
        assert_eq!(notice["field"], "medicine");
        assert_eq!(notice["value"], "Ibuprofen");

        let (_, cart) = call(&app, get_req("/api/cart")).await;
        assert!(cart.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn quick_action_navigates() {
        let app = test_router();
        let (status, json) = call(
            &app,
            post_json("/api/navigate", serde_json::json!({ "section": "hospitals" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["notices"][0]["notice"], "navigate");
        assert_eq!(json["notices"][0]["section"], "hospitals");
        assert_eq!(json["notices"][0]["anchor"], "#hospitals");

        let (status, _) = call(
            &app,
            post_json("/api/navigate", serde_json::json!({ "section": "pharmacy" })),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn chat_limit_counts_characters() {
        let app = test_router();
        let at_limit = "é".repeat(2000);
        let (status, _) =
            call(&app, post_json("/api/chat/send", serde_json::json!({ "text": at_limit }))).await;
        assert_eq!(status, StatusCode::OK);

        let over = "é".repeat(2001);
        let (status, _) =
            call(&app, post_json("/api/chat/send", serde_json::json!({ "text": over }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = test_router();
        let (status, _) = call(&app, get_req("/api/nonexistent")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
