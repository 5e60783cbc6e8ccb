//! HTTP tests for bus assignments and the overlap rule.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, generate_schedules, get, id_of, patch_json, post_json, seed_bus, seed_company,
    seed_route, seed_route_schedule,
};
use serde_json::{json, Value};
use sqlx::PgPool;

struct Fixture {
    bus_id: String,
    route_id: String,
    schedule_id: String,
}

async fn fixture(pool: &PgPool) -> Fixture {
    let company = id_of(&seed_company(pool, "Assign Co").await);
    let bus = seed_bus(pool, &company, "ASG-100", 2).await;
    let route = id_of(&seed_route(pool, 120).await);
    let pattern = id_of(&seed_route_schedule(pool, &route, "10:00", &["monday"]).await);
    let schedules = body_json(
        generate_schedules(pool, &route, &pattern, "2024-03-04", "2024-03-04").await,
    )
    .await;
    Fixture {
        bus_id: id_of(&bus),
        route_id: route,
        schedule_id: id_of(&schedules["data"][0]),
    }
}

fn window(f: &Fixture, start: &str, end: &str) -> Value {
    json!({
        "bus_id": f.bus_id,
        "route_id": f.route_id,
        "schedule_id": f.schedule_id,
        "start_time": format!("2024-03-04T{start}:00Z"),
        "end_time": format!("2024-03-04T{end}:00Z"),
    })
}

async fn assign(pool: &PgPool, body: Value) -> axum::response::Response {
    post_json(common::build_test_app(pool.clone()), "/api/v1/bus-assignments", body).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn assignment_attaches_bus_to_schedule(pool: PgPool) {
    let f = fixture(&pool).await;

    let response = assign(&pool, window(&f, "10:00", "12:00")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "active");

    let schedule = body_json(
        get(common::build_test_app(pool), &format!("/api/v1/schedules/{}", f.schedule_id)).await,
    )
    .await;
    assert_eq!(schedule["data"]["bus_id"], f.bus_id.as_str());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlapping_and_touching_windows_conflict(pool: PgPool) {
    let f = fixture(&pool).await;
    assert_eq!(assign(&pool, window(&f, "10:00", "12:00")).await.status(), StatusCode::OK);

    for (start, end) in [("11:00", "13:00"), ("09:00", "10:00"), ("12:00", "13:00")] {
        let response = assign(&pool, window(&f, start, end)).await;
        assert_eq!(response.status(), StatusCode::CONFLICT, "[{start}, {end}]");
        let json = body_json(response).await;
        assert_eq!(json["code"], "CONFLICT");
        assert_eq!(json["error"], "Conflicto de horario");
    }

    let clear = assign(&pool, window(&f, "12:01", "13:00")).await;
    assert_eq!(clear.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reversed_window_is_400(pool: PgPool) {
    let f = fixture(&pool).await;
    let response = assign(&pool, window(&f, "12:00", "10:00")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Horario inválido");
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["details"]["start_time"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_references_are_404(pool: PgPool) {
    let f = fixture(&pool).await;
    let nil = "00000000-0000-0000-0000-000000000000";

    for field in ["bus_id", "route_id", "schedule_id"] {
        let mut body = window(&f, "10:00", "12:00");
        body[field] = json!(nil);
        let response = assign(&pool, body).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{field}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancelled_assignment_frees_the_window(pool: PgPool) {
    let f = fixture(&pool).await;
    let created = body_json(assign(&pool, window(&f, "10:00", "12:00")).await).await;
    let id = id_of(&created["data"]);

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/bus-assignments/{id}/status"),
        json!({ "status": "cancelled" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let schedule = body_json(
        get(common::build_test_app(pool.clone()), &format!("/api/v1/schedules/{}", f.schedule_id)).await,
    )
    .await;
    assert!(schedule["data"]["bus_id"].is_null());

    assert_eq!(assign(&pool, window(&f, "10:00", "12:00")).await.status(), StatusCode::OK);

    let again = patch_json(
        common::build_test_app(pool),
        &format!("/api/v1/bus-assignments/{id}/status"),
        json!({ "status": "completed" }),
    )
    .await;
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_requests_create_one_assignment(pool: PgPool) {
    let f = fixture(&pool).await;

    let (a, b) = tokio::join!(
        assign(&pool, window(&f, "10:00", "12:00")),
        assign(&pool, window(&f, "11:00", "13:00")),
    );
    let mut statuses = [a.status(), b.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);

    let (active,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM bus_assignments WHERE status = 'active'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(active, 1);
}
