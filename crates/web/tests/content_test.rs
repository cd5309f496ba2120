mod common;

use axum::http::StatusCode;
use common::{TestApp, id_of};
use serde_json::json;

#[tokio::test]
async fn sections_list_their_materials_in_order() {
    let app = TestApp::new();
    let (author, _) = app.sign_up("editor@example.com", "long-enough").await;
    let mut ids = Vec::new();
    for title in ["Lead story", "Second story"] {
        let id = app
            .create_material(
                &author,
                json!({
                    "type": "article",
                    "title": title,
                    "content": "Body",
                    "status": "published",
                }),
            )
            .await;
        ids.push(id);
    }

    let created = app
        .post(
            "/content",
            json!({ "name": "Headlines", "maxLength": 5, "materials": [ids[1], ids[0]] }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);

    let sections = app.get("/content").await;
    assert_eq!(sections.status, StatusCode::OK);
    let sections = sections.body.as_array().unwrap();
    assert_eq!(sections.len(), 1);
    let titles: Vec<&str> = sections[0]["materials"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Second story", "Lead story"]);
}

#[tokio::test]
async fn deleted_materials_drop_out_of_sections() {
    let app = TestApp::new();
    let (author, _) = app.sign_up("editor@example.com", "long-enough").await;
    let material = app
        .create_material(
            &author,
            json!({ "type": "note", "content": "Body", "status": "draft" }),
        )
        .await;
    let section = app
        .post(
            "/content",
            json!({ "name": "Notes", "maxLength": 3, "materials": [material] }),
        )
        .await;
    let section = id_of(&section.body);

    app.delete(&format!("/materials/{}", material)).await;

    let response = app.get(&format!("/content/{}", section)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["materials"], json!([]));
}

#[tokio::test]
async fn section_needs_a_name() {
    let app = TestApp::new();

    let response = app.post("/content", json!({ "maxLength": 3 })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Content section must have a name");
}

#[tokio::test]
async fn deleting_a_section_is_final() {
    let app = TestApp::new();
    let created = app
        .post("/content", json!({ "name": "Empty", "maxLength": 1 }))
        .await;
    let id = id_of(&created.body);

    assert_eq!(
        app.delete(&format!("/content/{}", id)).await.status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.get(&format!("/content/{}", id)).await.status,
        StatusCode::NOT_FOUND
    );
}
