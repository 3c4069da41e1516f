//! Integration tests for the location and panorama repositories.
//!
//! Exercises the repository layer against a real database:
//! - Name-based era/category filtering, including unknown names
//! - Detail lookups with joined taxonomy names
//! - Panorama lookup through the location reference
//! - Coordinate range constraints

use archmap_core::tour::{HotspotKind, Scene, Tour};
use archmap_core::types::DbId;
use archmap_db::models::location::{CreateLocation, LocationFilter};
use archmap_db::models::panorama::CreatePanorama;
use archmap_db::repositories::{CategoryRepo, EraRepo, LocationRepo, PanoramaRepo};
use assert_matches::assert_matches;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn era_id(pool: &PgPool, name: &str) -> DbId {
    EraRepo::find_by_name(pool, name).await.unwrap().unwrap().id
}

async fn category_id(pool: &PgPool, name: &str) -> DbId {
    CategoryRepo::find_by_name(pool, name).await.unwrap().unwrap().id
}

async fn insert_location(
    pool: &PgPool,
    name: &str,
    era: &str,
    category: &str,
    panorama_id: Option<DbId>,
) -> DbId {
    let input = CreateLocation {
        name: name.to_string(),
        address: None,
        description: None,
        historical_context: None,
        latitude: 54.87,
        longitude: 69.15,
        icon: None,
        image: None,
        era_id: era_id(pool, era).await,
        category_id: category_id(pool, category).await,
        panorama_id,
    };
    LocationRepo::create(pool, &input).await.unwrap().id
}

fn scene(id: &str, targets: &[&str]) -> Scene {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": id,
        "image": format!("/panoramas/{id}.jpg"),
        "hotspots": targets
            .iter()
            .map(|t| serde_json::json!({ "type": "panorama", "id": format!("to-{t}"), "targetPanorama": t }))
            .collect::<Vec<_>>(),
    }))
    .unwrap()
}

fn filter(era: Option<&str>, category: Option<&str>) -> LocationFilter {
    LocationFilter {
        era: era.map(str::to_string),
        category: category.map(str::to_string),
    }
}

// ---------------------------------------------------------------------------
// Listing and filtering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn list_without_filter_returns_all(pool: PgPool) {
    insert_location(&pool, "Ботай", "Каменный век", "Поселения", None).await;
    insert_location(&pool, "Кызылжар", "Бронзовый век", "Захоронения", None).await;

    let rows = LocationRepo::list(&pool, &LocationFilter::default()).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Ботай");
    assert_eq!(rows[0].era_name, "Каменный век");
    assert_eq!(rows[1].category_name, "Захоронения");
}

#[sqlx::test(migrations = "./migrations")]
async fn list_filters_by_era_name(pool: PgPool) {
    insert_location(&pool, "Ботай", "Каменный век", "Поселения", None).await;
    insert_location(&pool, "Кызылжар", "Бронзовый век", "Захоронения", None).await;
    insert_location(&pool, "Явленка", "Бронзовый век", "Поселения", None).await;

    let rows = LocationRepo::list(&pool, &filter(Some("Бронзовый век"), None))
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.era_name == "Бронзовый век"));
}

#[sqlx::test(migrations = "./migrations")]
async fn list_combines_era_and_category(pool: PgPool) {
    insert_location(&pool, "Кызылжар", "Бронзовый век", "Захоронения", None).await;
    insert_location(&pool, "Явленка", "Бронзовый век", "Поселения", None).await;

    let rows = LocationRepo::list(&pool, &filter(Some("Бронзовый век"), Some("Поселения")))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Явленка");
}

#[sqlx::test(migrations = "./migrations")]
async fn unknown_era_name_is_ignored(pool: PgPool) {
    insert_location(&pool, "Ботай", "Каменный век", "Поселения", None).await;
    insert_location(&pool, "Кызылжар", "Бронзовый век", "Захоронения", None).await;

    let rows = LocationRepo::list(&pool, &filter(Some("Bronze Age"), None))
        .await
        .unwrap();
    assert_eq!(rows.len(), 2, "unknown era must not constrain the query");

    let rows = LocationRepo::list(&pool, &filter(Some("Bronze Age"), Some("Поселения")))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1, "known category still applies");
}

#[sqlx::test(migrations = "./migrations")]
async fn empty_filter_values_are_ignored(pool: PgPool) {
    insert_location(&pool, "Ботай", "Каменный век", "Поселения", None).await;

    let rows = LocationRepo::list(&pool, &filter(Some(""), Some("")))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

// ---------------------------------------------------------------------------
// Detail and panorama lookups
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn find_by_id_returns_joined_names(pool: PgPool) {
    let id = insert_location(&pool, "Ботай", "Каменный век", "Поселения", None).await;

    let row = LocationRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(row.name, "Ботай");
    assert_eq!(row.era_name, "Каменный век");
    assert_eq!(row.category_name, "Поселения");
    assert_eq!(row.panorama_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn find_by_id_missing_returns_none(pool: PgPool) {
    assert!(LocationRepo::find_by_id(&pool, 999_999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn find_panorama_through_location(pool: PgPool) {
    let panorama = PanoramaRepo::create(
        &pool,
        &CreatePanorama {
            name: "Ботай".into(),
            initial_panorama: "entrance".into(),
            scenes: vec![scene("entrance", &["yard"]), scene("yard", &["entrance"])],
        },
    )
    .await
    .unwrap();
    let id = insert_location(&pool, "Ботай", "Каменный век", "Поселения", Some(panorama.id)).await;
    assert!(PanoramaRepo::set_location(&pool, panorama.id, id).await.unwrap());

    let stored = PanoramaRepo::find_by_id(&pool, panorama.id).await.unwrap().unwrap();
    assert_eq!(stored.location_id, Some(id));

    let found = LocationRepo::find_panorama(&pool, id).await.unwrap().unwrap();
    let tour = Tour::from(found);
    assert_eq!(tour.id, panorama.id);
    assert_eq!(tour.location_id, Some(id));
    assert_eq!(tour.scenes.len(), 2);
    assert_eq!(tour.scenes[0].hotspots[0].kind, HotspotKind::Panorama);
    assert!(tour.dangling_hotspots().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn find_panorama_without_tour_returns_none(pool: PgPool) {
    let id = insert_location(&pool, "Ботай", "Каменный век", "Поселения", None).await;
    assert!(LocationRepo::find_panorama(&pool, id).await.unwrap().is_none());
    assert!(LocationRepo::find_panorama(&pool, id + 1000).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn set_location_on_missing_panorama_returns_false(pool: PgPool) {
    let id = insert_location(&pool, "Ботай", "Каменный век", "Поселения", None).await;
    assert!(!PanoramaRepo::set_location(&pool, 999_999, id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn out_of_range_latitude_is_rejected(pool: PgPool) {
    let input = CreateLocation {
        name: "Nowhere".into(),
        address: None,
        description: None,
        historical_context: None,
        latitude: 91.0,
        longitude: 0.0,
        icon: None,
        image: None,
        era_id: era_id(&pool, "Современность").await,
        category_id: category_id(&pool, "Остальное").await,
        panorama_id: None,
    };

    let err = LocationRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.constraint() == Some("ck_locations_latitude")
    );
}
