#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use busline_api::config::ServerConfig;
use busline_api::router::build_app_router;
use busline_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Expansion is capped at 62 days so window-limit tests stay small.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_expansion_days: 62,
    }
}

/// Build the full application router, with the production middleware stack,
/// over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers (go through the API, return the `data` payload)
// ---------------------------------------------------------------------------

async fn create(pool: &PgPool, uri: &str, body: Value) -> Value {
    let response = post_json(build_test_app(pool.clone()), uri, body).await;
    let status = response.status();
    let json = body_json(response).await;
    assert!(status.is_success(), "POST {uri} failed with {status}: {json}");
    json["data"].clone()
}

pub fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}

pub async fn seed_company(pool: &PgPool, name: &str) -> Value {
    create(pool, "/api/v1/companies", json!({ "name": name })).await
}

pub async fn seed_tier(pool: &PgPool, company_id: &str, name: &str) -> Value {
    create(
        pool,
        "/api/v1/seat-tiers",
        json!({ "company_id": company_id, "name": name, "base_price": 25.0 }),
    )
    .await
}

/// Single-floor `rows x seats_per_row` layout with every seat on `tier_id`.
pub fn tiered_matrix(rows: u32, seats_per_row: u32, tier_id: &str) -> Value {
    let seats: Vec<Value> = (0..rows)
        .flat_map(|row| {
            (0..seats_per_row).map(move |column| {
                json!({
                    "id": format!("f1-{row}-{column}"),
                    "name": format!("{}{}", row + 1, (b'A' + column as u8) as char),
                    "tierId": tier_id,
                    "row": row,
                    "column": column,
                    "isEmpty": false,
                })
            })
        })
        .collect();
    json!({
        "firstFloor": {
            "dimensions": { "rows": rows, "seatsPerRow": seats_per_row },
            "seats": seats,
        }
    })
}

pub async fn seed_template(pool: &PgPool, company_id: &str, matrix: Value) -> Value {
    create(
        pool,
        "/api/v1/bus-templates",
        json!({
            "company_id": company_id,
            "name": format!("Template {}", uuid::Uuid::new_v4()),
            "seat_template_matrix": matrix,
        }),
    )
    .await
}

/// A company-owned bus with a fully tiered `rows x 4` layout.
pub async fn seed_bus(pool: &PgPool, company_id: &str, plate: &str, rows: u32) -> Value {
    let tier = seed_tier(pool, company_id, &format!("Tier {plate}")).await;
    let template = seed_template(pool, company_id, tiered_matrix(rows, 4, &id_of(&tier))).await;
    create(
        pool,
        "/api/v1/buses",
        json!({
            "company_id": company_id,
            "template_id": id_of(&template),
            "plate_number": plate,
        }),
    )
    .await
}

/// A route between two fresh locations.
pub async fn seed_route(pool: &PgPool, duration_minutes: i32) -> Value {
    let suffix = uuid::Uuid::new_v4();
    let origin = create(
        pool,
        "/api/v1/locations",
        json!({ "name": format!("Origin {suffix}"), "city": "Lima" }),
    )
    .await;
    let destination = create(
        pool,
        "/api/v1/locations",
        json!({ "name": format!("Destination {suffix}"), "city": "Cusco" }),
    )
    .await;
    create(
        pool,
        "/api/v1/routes",
        json!({
            "name": format!("Route {suffix}"),
            "origin_id": id_of(&origin),
            "destination_id": id_of(&destination),
            "estimated_duration": duration_minutes,
        }),
    )
    .await
}

pub async fn seed_route_schedule(pool: &PgPool, route_id: &str, time: &str, days: &[&str]) -> Value {
    create(
        pool,
        "/api/v1/route-schedules",
        json!({ "route_id": route_id, "departure_time": time, "operating_days": days }),
    )
    .await
}

/// Expand a route schedule and return the full response body.
pub async fn generate_schedules(
    pool: &PgPool,
    route_id: &str,
    route_schedule_id: &str,
    start: &str,
    end: &str,
) -> Response<Body> {
    post_json(
        build_test_app(pool.clone()),
        "/api/v1/schedules",
        json!({
            "route_id": route_id,
            "route_schedule_id": route_schedule_id,
            "start_date": start,
            "end_date": end,
            "price": 40.0,
        }),
    )
    .await
}

pub async fn seed_customer(pool: &PgPool, document_id: &str) -> Value {
    create(
        pool,
        "/api/v1/customers",
        json!({ "full_name": "Rosa Quispe", "document_id": document_id }),
    )
    .await
}
