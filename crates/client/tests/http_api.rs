//! Round trips of [`HttpLocationsApi`] against a local axum server.
//!
//! Each test mounts the same paths under a different prefix so one server
//! can answer with well-formed bodies, wrong shapes, or failures.

use std::collections::HashMap;

use archmap_client::api::{HttpLocationsApi, LocationQuery, LocationsApi};
use archmap_client::error::ClientError;
use archmap_core::taxonomy::{Category, Era};
use assert_matches::assert_matches;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Stub server
// ---------------------------------------------------------------------------

async fn echo_query(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!([{ "query": params }]))
}

async fn site(Path(id): Path<String>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if id != "7" {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Location not found", "code": "NOT_FOUND" })),
        ));
    }
    Ok(Json(json!({
        "id": 7,
        "name": "Ботай",
        "description": "Поселение",
        "historicalContext": "",
        "coordinates": [53.3, 67.6],
        "image": "/img/botai.jpg",
        "category": "Поселения",
        "era": "Каменный век",
        "has3DTour": true
    })))
}

async fn tour(Path(_id): Path<String>) -> Json<Value> {
    Json(json!({
        "id": 3,
        "name": "Тур",
        "initialPanorama": "entrance",
        "locationId": 7,
        "scenes": [
            { "id": "entrance", "name": "Вход", "image": "/p/entrance.jpg", "hotspots": [] }
        ]
    }))
}

async fn object_body() -> Json<Value> {
    Json(json!({ "locations": [] }))
}

async fn server_error() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Failed to fetch locations", "code": "INTERNAL_ERROR" })),
    )
}

/// Serve the stub on an ephemeral port and return its base URL.
async fn spawn_server() -> String {
    let app = Router::new()
        .route("/ok/api/locations", get(echo_query))
        .route("/ok/api/locations/{id}", get(site))
        .route("/ok/api/locations/{id}/panorama", get(tour))
        .route("/object/api/locations", get(object_body))
        .route("/broken/api/locations", get(server_error));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// list_locations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_sends_canonical_filter_names() {
    let base = spawn_server().await;
    let api = HttpLocationsApi::new(format!("{base}/ok/api"));
    let query = LocationQuery {
        era: Some(Era::BronzeAge),
        category: Some(Category::Burial),
    };

    let items = api.list_locations(&query).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["query"]["era"], "Бронзовый век");
    assert_eq!(items[0]["query"]["category"], Category::Burial.name());
}

#[tokio::test]
async fn list_without_filter_sends_no_query() {
    let base = spawn_server().await;
    let api = HttpLocationsApi::new(format!("{base}/ok/api/"));

    let items = api.list_locations(&LocationQuery::default()).await.unwrap();

    assert_eq!(items[0]["query"], json!({}));
}

#[tokio::test]
async fn list_rejects_non_array_body() {
    let base = spawn_server().await;
    let api = HttpLocationsApi::new(format!("{base}/object/api"));

    let err = api.list_locations(&LocationQuery::default()).await.unwrap_err();

    assert_matches!(err, ClientError::InvalidFormat(msg) if msg == "Invalid data format");
}

#[tokio::test]
async fn list_surfaces_server_failure() {
    let base = spawn_server().await;
    let api = HttpLocationsApi::new(format!("{base}/broken/api"));

    let err = api.list_locations(&LocationQuery::default()).await.unwrap_err();

    assert_matches!(
        err,
        ClientError::ApiError { status: 500, body } if body.contains("Failed to fetch locations")
    );
}

// ---------------------------------------------------------------------------
// get_location / get_panorama
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_location_decodes_enriched_site() {
    let base = spawn_server().await;
    let api = HttpLocationsApi::new(format!("{base}/ok/api"));

    let site = api.get_location("7").await.unwrap();

    assert_eq!(site.id, 7);
    assert_eq!(site.coordinates, [53.3, 67.6]);
    assert!(site.has_3d_tour);
    assert!(site.features.is_empty());
}

#[tokio::test]
async fn get_location_reports_not_found_status() {
    let base = spawn_server().await;
    let api = HttpLocationsApi::new(format!("{base}/ok/api"));

    let err = api.get_location("999").await.unwrap_err();

    assert_matches!(err, ClientError::ApiError { status: 404, .. });
}

#[tokio::test]
async fn get_panorama_decodes_tour() {
    let base = spawn_server().await;
    let api = HttpLocationsApi::new(format!("{base}/ok/api"));

    let tour = api.get_panorama("7").await.unwrap();

    assert_eq!(tour.initial_panorama, "entrance");
    assert_eq!(tour.location_id, Some(7));
    assert_eq!(tour.initial_scene().unwrap().name, "Вход");
}
