//! Bus creation writes the bus and its seats atomically.

mod common;

use sqlx::PgPool;
use busline_core::types::DbId;
use busline_db::repositories::bus_repo::NewBus;
use busline_db::repositories::{BusRepo, BusTemplateRepo};

use common::{company, tier, tiered_matrix};

async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    n
}

// ---------------------------------------------------------------------------
// Test: one seat row per non-empty cell
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_materializes_one_seat_per_non_empty_cell(pool: PgPool) {
    let co = company(&pool, "Andes Express").await;
    let vip = tier(&pool, co.id, "VIP").await;

    let mut matrix = tiered_matrix(3, 4, vip.id);
    // Aisle cell in row 2.
    let aisle = &mut matrix.first_floor.seats[5];
    aisle.is_empty = true;
    aisle.tier_id.clear();

    let created = common::bus(&pool, co.id, "ABC-123", &matrix).await;

    assert_eq!(created.seats.len(), 11);
    assert!(created.seats.iter().all(|s| s.tier_id == vip.id));
    assert!(created.seats.iter().all(|s| s.status == "available" && s.is_active));
    assert!(!created.seats.iter().any(|s| s.seat_number == "2B"));
    assert_eq!(created.bus.seat_matrix, matrix.to_json());
}

// ---------------------------------------------------------------------------
// Test: a failing seat insert leaves no bus behind
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seat_failure_rolls_back_bus(pool: PgPool) {
    let co = company(&pool, "Andes Express").await;
    let vip = tier(&pool, co.id, "VIP").await;
    let matrix = tiered_matrix(1, 2, vip.id);
    let template = BusTemplateRepo::create(&pool, co.id, "Mini", None, &matrix)
        .await
        .unwrap();

    let mut seats = matrix.materialize().unwrap();
    // Unknown tier id violates the bus_seats foreign key.
    seats[1].tier_id = DbId::new_v4();

    let json = matrix.to_json();
    let result = BusRepo::create_with_seats(
        &pool,
        &NewBus {
            company_id: co.id,
            template_id: template.id,
            plate_number: "ROLL-1",
            model: None,
            year: None,
            seat_matrix: &json,
        },
        &seats,
    )
    .await;

    assert!(result.is_err());
    assert_eq!(count_rows(&pool, "buses").await, 0);
    assert_eq!(count_rows(&pool, "bus_seats").await, 0);
}

// ---------------------------------------------------------------------------
// Test: plate numbers are unique
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_plate_hits_unique_constraint(pool: PgPool) {
    let co = company(&pool, "Andes Express").await;
    let vip = tier(&pool, co.id, "VIP").await;
    let matrix = tiered_matrix(1, 2, vip.id);
    common::bus(&pool, co.id, "DUP-1", &matrix).await;

    let template = BusTemplateRepo::create(&pool, co.id, "Second", None, &matrix)
        .await
        .unwrap();
    let json = matrix.to_json();
    let err = BusRepo::create_with_seats(
        &pool,
        &NewBus {
            company_id: co.id,
            template_id: template.id,
            plate_number: "DUP-1",
            model: None,
            year: None,
            seat_matrix: &json,
        },
        &matrix.materialize().unwrap(),
    )
    .await
    .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_buses_plate_number"));
}

// ---------------------------------------------------------------------------
// Test: template edits do not reach existing buses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bus_keeps_snapshot_after_template_edit(pool: PgPool) {
    let co = company(&pool, "Andes Express").await;
    let vip = tier(&pool, co.id, "VIP").await;
    let matrix = tiered_matrix(2, 2, vip.id);
    let created = common::bus(&pool, co.id, "SNAP-1", &matrix).await;

    let bigger = tiered_matrix(5, 4, vip.id);
    let updated = BusTemplateRepo::update(&pool, created.bus.template_id, None, None, Some(&bigger))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.total_capacity, 20);

    let bus = BusRepo::find_by_id(&pool, created.bus.id).await.unwrap().unwrap();
    assert_eq!(bus.seat_matrix, matrix.to_json());
    assert_eq!(BusRepo::list_seats(&pool, bus.id).await.unwrap().len(), 4);
}
