mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_create_and_get_note() {
    let app = TestApp::spawn().await;
    let token = app.register("ada@example.com").await;

    let response = app
        .post_authenticated("/api/notes", &token)
        .json(&json!({ "title": "  Groceries ", "description": "milk, eggs" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["title"], "Groceries");
    assert_eq!(body["data"]["description"], "milk, eggs");
    assert!(body["data"]["createdAt"].is_string());
    assert_eq!(body["data"]["createdAt"], body["data"]["updatedAt"]);

    let id = body["data"]["id"].as_str().unwrap();
    let response = app
        .get_authenticated(&format!("/api/notes/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(fetched["data"], body["data"]);
}

#[tokio::test]
async fn test_create_note_validation() {
    let app = TestApp::spawn().await;
    let token = app.register("ada@example.com").await;

    for body in [
        json!({ "title": "   " }),
        json!({ "title": "t".repeat(201) }),
        json!({ "title": "ok", "description": "d".repeat(10_001) }),
    ] {
        let response = app
            .post_authenticated("/api/notes", &token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn test_list_notes_newest_first_and_scoped_to_owner() {
    let app = TestApp::spawn().await;
    let ada = app.register("ada@example.com").await;
    let grace = app.register("grace@example.com").await;

    app.create_note(&ada, "first").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    app.create_note(&ada, "second").await;
    app.create_note(&grace, "not yours").await;

    let response = app
        .get_authenticated("/api/notes", &ada)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|note| note["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["second", "first"]);
}

#[tokio::test]
async fn test_foreign_note_is_not_found() {
    let app = TestApp::spawn().await;
    let ada = app.register("ada@example.com").await;
    let grace = app.register("grace@example.com").await;
    let id = app.create_note(&ada, "private").await;
    let path = format!("/api/notes/{}", id);

    let get = app
        .get_authenticated(&path, &grace)
        .send()
        .await
        .expect("Failed to execute request");
    let put = app
        .put_authenticated(&path, &grace)
        .json(&json!({ "title": "mine now" }))
        .send()
        .await
        .expect("Failed to execute request");
    let delete = app
        .delete_authenticated(&path, &grace)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(get.status(), StatusCode::NOT_FOUND);
    assert_eq!(put.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);

    let response = app
        .get_authenticated(&path, &ada)
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["title"], "private");
}

#[tokio::test]
async fn test_update_note_partially() {
    let app = TestApp::spawn().await;
    let token = app.register("ada@example.com").await;

    let response = app
        .post_authenticated("/api/notes", &token)
        .json(&json!({ "title": "Groceries", "description": "milk" }))
        .send()
        .await
        .expect("Failed to execute request");
    let created: Value = response.json().await.expect("Failed to parse response");
    let id = created["data"]["id"].as_str().unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let response = app
        .put_authenticated(&format!("/api/notes/{}", id), &token)
        .json(&json!({ "title": "Shopping" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["data"]["title"], "Shopping");
    assert_eq!(updated["data"]["description"], "milk");
    assert_eq!(updated["data"]["createdAt"], created["data"]["createdAt"]);
    assert_ne!(updated["data"]["updatedAt"], created["data"]["updatedAt"]);
}

#[tokio::test]
async fn test_delete_note() {
    let app = TestApp::spawn().await;
    let token = app.register("ada@example.com").await;
    let id = app.create_note(&token, "temporary").await;
    let path = format!("/api/notes/{}", id);

    let response = app
        .delete_authenticated(&path, &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated(&path, &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_note_id_is_unprocessable() {
    let app = TestApp::spawn().await;
    let token = app.register("ada@example.com").await;

    let response = app
        .get_authenticated("/api/notes/not-a-uuid", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
