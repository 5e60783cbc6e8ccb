//! HTTP tests for bus creation and seat materialization.

mod common;

use axum::body::Body;
use axum::http::{Response, StatusCode};
use common::{
    body_json, delete, get, id_of, patch_json, post_json, put_json, seed_bus, seed_company,
    seed_template, seed_tier, tiered_matrix,
};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn bus_count(pool: &PgPool) -> (i64, i64) {
    let buses: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM buses")
        .fetch_one(pool)
        .await
        .unwrap();
    let seats: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bus_seats")
        .fetch_one(pool)
        .await
        .unwrap();
    (buses.0, seats.0)
}

async fn create_bus(
    pool: &PgPool,
    company_id: &str,
    template_id: &str,
    plate: &str,
) -> Response<Body> {
    post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/buses",
        json!({ "company_id": company_id, "template_id": template_id, "plate_number": plate }),
    )
    .await
}

// ---------------------------------------------------------------------------
// Materialization
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn one_seat_per_non_empty_position(pool: PgPool) {
    let company = id_of(&seed_company(&pool, "Cruz del Sur").await);
    let tier = id_of(&seed_tier(&pool, &company, "VIP").await);

    let mut matrix = tiered_matrix(3, 4, &tier);
    // Turn 2B into an aisle gap with no tier.
    matrix["firstFloor"]["seats"][5]["isEmpty"] = json!(true);
    matrix["firstFloor"]["seats"][5]["tierId"] = json!("");
    let template = id_of(&seed_template(&pool, &company, matrix).await);

    let response = create_bus(&pool, &company, &template, "  abc-123 ").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["plate_number"], "ABC-123");
    let seats = json["data"]["seats"].as_array().unwrap();
    assert_eq!(seats.len(), 11);
    assert!(seats.iter().all(|s| s["tier_id"] == tier.as_str()));
    assert!(seats.iter().all(|s| s["status"] == "available"));
    assert!(!seats.iter().any(|s| s["seat_number"] == "2B"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_tier_rejects_whole_bus(pool: PgPool) {
    let company = id_of(&seed_company(&pool, "Oltursa").await);
    let tier = id_of(&seed_tier(&pool, &company, "Economy").await);

    let mut matrix = tiered_matrix(2, 4, &tier);
    matrix["firstFloor"]["seats"][0]["tierId"] = json!("not-a-uuid");
    matrix["firstFloor"]["seats"][1]["tierId"] = json!("");
    let template = id_of(&seed_template(&pool, &company, matrix).await);

    let response = create_bus(&pool, &company, &template, "XYZ-999").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid seat tier IDs");
    assert_eq!(json["details"]["invalid_seat_count"], 2);
    assert_eq!(bus_count(&pool).await, (0, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tier_of_another_company_is_rejected(pool: PgPool) {
    let company = id_of(&seed_company(&pool, "Owner").await);
    let other = id_of(&seed_company(&pool, "Other").await);
    let foreign_tier = id_of(&seed_tier(&pool, &other, "Foreign").await);

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/bus-templates",
        json!({
            "company_id": company,
            "name": "Borrowed tiers",
            "seat_template_matrix": tiered_matrix(2, 2, &foreign_tier),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["details"]["invalid_seat_count"], 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn template_of_another_company_is_404(pool: PgPool) {
    let company = id_of(&seed_company(&pool, "A").await);
    let other = id_of(&seed_company(&pool, "B").await);
    let tier = id_of(&seed_tier(&pool, &other, "T").await);
    let template = id_of(&seed_template(&pool, &other, tiered_matrix(1, 4, &tier)).await);

    let response = create_bus(&pool, &company, &template, "AAA-111").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_plate_is_409(pool: PgPool) {
    let company = id_of(&seed_company(&pool, "Plates").await);
    seed_bus(&pool, &company, "DUP-001", 2).await;

    let tier = id_of(&seed_tier(&pool, &company, "Second").await);
    let template = id_of(&seed_template(&pool, &company, tiered_matrix(2, 4, &tier)).await);
    let response = create_bus(&pool, &company, &template, "dup-001").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(bus_count(&pool).await, (1, 8));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_company_is_404(pool: PgPool) {
    let response = create_bus(
        &pool,
        "00000000-0000-0000-0000-000000000000",
        "00000000-0000-0000-0000-000000000000",
        "NOPE-1",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Snapshot, updates, retirement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn template_edit_does_not_touch_existing_bus(pool: PgPool) {
    let company = id_of(&seed_company(&pool, "Snap").await);
    let bus = seed_bus(&pool, &company, "SNAP-1", 2).await;
    let template_id = bus["template_id"].as_str().unwrap().to_string();

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/bus-templates/{template_id}/layout"),
        json!({ "actions": [
            { "type": "resize", "floor": "first", "rows": 5, "seats_per_row": 4 }
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(
        get(common::build_test_app(pool), &format!("/api/v1/buses/{}", id_of(&bus))).await,
    )
    .await;
    assert_eq!(fetched["data"]["seats"].as_array().unwrap().len(), 8);
    assert_eq!(fetched["data"]["seat_matrix"], bus["seat_matrix"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_normalizes_plate_and_checks_status(pool: PgPool) {
    let company = id_of(&seed_company(&pool, "Upd").await);
    let bus = id_of(&seed_bus(&pool, &company, "OLD-1", 1).await);

    let ok = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/buses/{bus}"),
        json!({ "plate_number": " new-2 ", "maintenance_status": "in_maintenance" }),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
    let json = body_json(ok).await;
    assert_eq!(json["data"]["plate_number"], "NEW-2");
    assert_eq!(json["data"]["maintenance_status"], "in_maintenance");

    let bad = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/buses/{bus}"),
        json!({ "maintenance_status": "exploded" }),
    )
    .await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn seat_status_can_be_changed(pool: PgPool) {
    let company = id_of(&seed_company(&pool, "Seats").await);
    let bus = seed_bus(&pool, &company, "SEAT-1", 1).await;
    let seat = &bus["seats"][0];
    let uri = format!("/api/v1/buses/{}/seats/{}", id_of(&bus), id_of(seat));

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "status": "maintenance" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "maintenance");

    let invalid = patch_json(common::build_test_app(pool), &uri, json!({ "status": "broken" })).await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn retired_bus_drops_out_of_listing(pool: PgPool) {
    let company = id_of(&seed_company(&pool, "Retire").await);
    let bus = id_of(&seed_bus(&pool, &company, "RET-1", 1).await);

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/v1/buses/{bus}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let list: Value = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/buses?company_id={company}"),
        )
        .await,
    )
    .await;
    assert!(list["data"].as_array().unwrap().is_empty());
}
