//! Business endpoints: CRUD, pagination and the aggregate detail view.

mod common;

use common::{business, photo, review, TestApp};
use serde_json::json;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn create_then_fetch_aggregate_view() {
    let app = TestApp::spawn().await;

    let (status, created) = app.post("/businesses", &business(1, "Block 15")).await;
    assert_eq!(status, 201);
    assert_eq!(created["id"], json!(0));
    assert_eq!(created["links"]["business"], json!("/businesses/0"));

    let (status, detail) = app.get("/businesses/0").await;
    assert_eq!(status, 200);
    assert_eq!(detail["business"]["name"], json!("Block 15"));
    assert_eq!(detail["business"]["id"], json!(0));
    assert_eq!(detail["businessPhotos"], json!([]));
    assert_eq!(detail["businessReviews"], json!([]));

    let (status, _) = app.post("/reviews", &review(7, 0, 5)).await;
    assert_eq!(status, 201);
    let (status, _) = app.post("/photos", &photo(7, 0, "Pepperoni")).await;
    assert_eq!(status, 201);

    let (_, detail) = app.get("/businesses/0").await;
    assert_eq!(detail["businessPhotos"].as_array().unwrap().len(), 1);
    assert_eq!(detail["businessReviews"].as_array().unwrap().len(), 1);
    assert_eq!(detail["businessPhotos"][0]["caption"], json!("Pepperoni"));
    assert_eq!(detail["businessReviews"][0]["stars"], json!(5));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn create_rejects_missing_fields_and_bad_json() {
    let app = TestApp::spawn().await;

    let mut incomplete = business(1, "No Phone");
    incomplete.as_object_mut().unwrap().remove("phone");
    let (status, body) = app.post("/businesses", &incomplete).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], json!("Request body is not a valid business object"));

    let resp = app
        .client
        .post(app.url("/businesses"))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], json!("Request body is not a valid business object"));

    let (_, page) = app.get("/businesses").await;
    assert_eq!(page["businesses"], json!([]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn create_drops_undeclared_fields() {
    let app = TestApp::spawn().await;

    let mut body = business(1, "Extra");
    body["website"] = json!("https://example.com");
    body["rating"] = json!(11);
    body["id"] = json!(500);
    let (status, created) = app.post("/businesses", &body).await;
    assert_eq!(status, 201);
    assert_eq!(created["id"], json!(0));

    let (_, detail) = app.get("/businesses/0").await;
    assert_eq!(detail["business"]["website"], json!("https://example.com"));
    assert!(detail["business"].get("rating").is_none());
    assert!(detail["business"].get("email").is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn list_pages_five_at_a_time() {
    let app = TestApp::spawn().await;
    for i in 0..12 {
        let (status, _) = app.post("/businesses", &business(1, &format!("Shop {}", i))).await;
        assert_eq!(status, 201);
    }

    let names = |page: &serde_json::Value| -> Vec<String> {
        page["businesses"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["name"].as_str().unwrap().to_string())
            .collect()
    };

    let (status, first) = app.get("/businesses").await;
    assert_eq!(status, 200);
    assert_eq!(names(&first), ["Shop 0", "Shop 1", "Shop 2", "Shop 3", "Shop 4"]);

    let (_, second) = app.get("/businesses?page=2").await;
    assert_eq!(names(&second), ["Shop 5", "Shop 6", "Shop 7", "Shop 8", "Shop 9"]);

    let (_, third) = app.get("/businesses?page=3").await;
    assert_eq!(names(&third), ["Shop 10", "Shop 11"]);

    let (status, beyond) = app.get("/businesses?page=9").await;
    assert_eq!(status, 200);
    assert_eq!(beyond["businesses"], json!([]));

    let (status, huge) = app.get("/businesses?page=99999999999999999999999").await;
    assert_eq!(status, 200);
    assert_eq!(huge["businesses"], json!([]));

    for clamped in [
        "/businesses?page=0",
        "/businesses?page=-2",
        "/businesses?page=abc",
        "/businesses?page=2&page=3",
        "/businesses?page=%ZZ",
    ] {
        let (status, page) = app.get(clamped).await;
        assert_eq!(status, 200, "{}", clamped);
        assert_eq!(names(&page), names(&first), "{}", clamped);
    }

    // No paging metadata on the wire.
    assert_eq!(first.as_object().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn update_replaces_declared_fields_including_owner() {
    let app = TestApp::spawn().await;
    let mut original = business(1, "Old Name");
    original["email"] = json!("old@example.com");
    app.post("/businesses", &original).await;

    let (status, body) = app.put("/businesses/0", &business(2, "New Name")).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "links": { "business": "/businesses/0" } }));

    let (_, detail) = app.get("/businesses/0").await;
    assert_eq!(detail["business"]["ownerid"], json!(2));
    assert_eq!(detail["business"]["name"], json!("New Name"));
    // Not part of the new body, so left as stored.
    assert_eq!(detail["business"]["email"], json!("old@example.com"));
    assert_eq!(detail["business"]["id"], json!(0));

    let (status, body) = app.put("/businesses/0", &json!({ "name": "Partial" })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], json!("Request body is not a valid business object"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn delete_is_terminal_and_ids_are_not_reused() {
    let app = TestApp::spawn().await;
    app.post("/businesses", &business(1, "First")).await;
    app.post("/businesses", &business(1, "Second")).await;

    let (status, body) = app.delete("/businesses/1").await;
    assert_eq!(status, 204);
    assert_eq!(body, serde_json::Value::Null);

    let (status, _) = app.get("/businesses/1").await;
    assert_eq!(status, 404);
    let (status, _) = app.delete("/businesses/1").await;
    assert_eq!(status, 404);

    let (_, created) = app.post("/businesses", &business(1, "Third")).await;
    assert_eq!(created["id"], json!(2));
}
