mod common;

use axum::http::StatusCode;
use common::{TestApp, id_of};
use serde_json::json;

#[tokio::test]
async fn created_club_can_be_fetched_back() {
    let app = TestApp::new();

    let created = app
        .post(
            "/clubs",
            json!({
                "fullName": "Arsenal Football Club",
                "commonName": "Arsenal",
                "shortName": "ARS",
                "country": "England",
                "stadium": "Emirates Stadium",
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = id_of(&created.body);

    let fetched = app.get(&format!("/clubs/{}", id)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    for field in ["fullName", "commonName", "shortName", "country", "stadium"] {
        assert_eq!(fetched.body[field], created.body[field], "{}", field);
    }
    assert!(fetched.body["createdAt"].is_string());
    assert!(fetched.body["updatedAt"].is_string());
}

#[tokio::test]
async fn missing_names_are_rejected_with_one_message() {
    let app = TestApp::new();

    let response = app
        .post("/clubs", json!({ "commonName": "Arsenal", "country": "England" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "Club must have a full name, common name, and short name"
    );
}

#[tokio::test]
async fn malformed_id_is_a_bad_request() {
    let app = TestApp::new();

    let response = app.get("/clubs/not-an-id").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Invalid club id");
}

#[tokio::test]
async fn unknown_club_is_not_found() {
    let app = TestApp::new();

    let response = app
        .get("/clubs/6f1c1a38-43a5-4a5e-9a0e-0f6b4b0a2d11")
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Club not found");
}

#[tokio::test]
async fn deleted_club_is_gone() {
    let app = TestApp::new();
    let id = app.create_club("Chelsea", "England").await;

    let deleted = app.delete(&format!("/clubs/{}", id)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    assert_eq!(app.get(&format!("/clubs/{}", id)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        app.delete(&format!("/clubs/{}", id)).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn replacing_a_club_keeps_its_identity() {
    let app = TestApp::new();
    let id = app.create_club("Everton", "England").await;

    let updated = app
        .patch(
            &format!("/clubs/{}", id),
            json!({
                "fullName": "Everton Football Club",
                "commonName": "Everton",
                "shortName": "EVE",
                "country": "England",
                "stadium": "Hill Dickinson Stadium",
            }),
        )
        .await;

    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(id_of(&updated.body), id);
    assert_eq!(updated.body["stadium"], "Hill Dickinson Stadium");
}

#[tokio::test]
async fn search_matches_any_name_case_insensitively() {
    let app = TestApp::new();
    app.create_club("Arsenal", "England").await;
    app.create_club("Barcelona", "Spain").await;

    let response = app.get("/clubs/search?value=arsen").await;

    assert_eq!(response.status, StatusCode::OK);
    let clubs = response.body.as_array().unwrap();
    assert_eq!(clubs.len(), 1);
    assert_eq!(clubs[0]["commonName"], "Arsenal");

    let blank = app.get("/clubs/search?value=").await;
    assert_eq!(blank.body, json!([]));
}

#[tokio::test]
async fn country_filter_narrows_the_list() {
    let app = TestApp::new();
    app.create_club("Arsenal", "England").await;
    app.create_club("Barcelona", "Spain").await;
    app.create_club("Chelsea", "England").await;

    let response = app
        .get("/clubs?filterData%5Bcountry%5D=England&sortData%5Bindicator%5D=commonName&sortData%5Border%5D=asc")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["clubsCount"], 2);
    let names: Vec<&str> = response.body["clubs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["commonName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Arsenal", "Chelsea"]);
}

#[tokio::test]
async fn unknown_endpoint_uses_the_error_envelope() {
    let app = TestApp::new();

    let response = app.get("/stadiums").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Endpoint not found");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::new();

    let response = app.post("/clubs", json!("not an object")).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());
}
