mod common;

use common::{business, photo, review, TestApp};
use serde_json::json;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn user_listings_read_their_own_collections() {
    let app = TestApp::spawn().await;
    app.post("/businesses", &business(7, "Owned A")).await;
    app.post("/businesses", &business(8, "Someone else's")).await;
    app.post("/businesses", &business(7, "Owned B")).await;
    app.post("/reviews", &review(7, 1, 3)).await;
    app.post("/reviews", &review(8, 0, 5)).await;
    app.post("/photos", &photo(7, 1, "Mine")).await;
    app.post("/photos", &photo(7, 2, "Also mine")).await;

    let (status, body) = app.get("/users/7/businesses").await;
    assert_eq!(status, 200);
    let names: Vec<_> = body["businesses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("Owned A"), json!("Owned B")]);

    let (status, body) = app.get("/users/7/reviews").await;
    assert_eq!(status, 200);
    let reviews = body["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["stars"], json!(3));

    let (status, body) = app.get("/users/7/photos").await;
    assert_eq!(status, 200);
    let captions: Vec<_> = body["photos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["caption"].clone())
        .collect();
    assert_eq!(captions, vec![json!("Mine"), json!("Also mine")]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unknown_or_non_numeric_users_get_empty_lists() {
    let app = TestApp::spawn().await;
    app.post("/businesses", &business(7, "Owned")).await;

    assert_eq!(app.get("/users/99/businesses").await, (200, json!({ "businesses": [] })));
    assert_eq!(app.get("/users/bob/reviews").await, (200, json!({ "reviews": [] })));
    assert_eq!(app.get("/users/bob/photos").await, (200, json!({ "photos": [] })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_ids_fall_through_to_uniform_not_found() {
    let app = TestApp::spawn().await;

    for collection in ["businesses", "reviews", "photos"] {
        let path = format!("/{}/42", collection);
        let expected = json!({ "error": format!("Requested resource {} does not exist", path) });

        assert_eq!(app.get(&path).await, (404, expected.clone()), "GET {}", path);
        assert_eq!(app.delete(&path).await, (404, expected.clone()), "DELETE {}", path);
        // Even an invalid body reports the missing record first.
        assert_eq!(app.put(&path, &json!({})).await, (404, expected), "PUT {}", path);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unroutable_requests_share_the_not_found_body() {
    let app = TestApp::spawn().await;

    assert_eq!(
        app.get("/businesses/abc").await,
        (404, json!({ "error": "Requested resource /businesses/abc does not exist" }))
    );
    assert_eq!(
        app.get("/nowhere").await,
        (404, json!({ "error": "Requested resource /nowhere does not exist" }))
    );
    // Unsupported method on a known path.
    assert_eq!(
        app.post("/businesses/3", &business(1, "x")).await,
        (404, json!({ "error": "Requested resource /businesses/3 does not exist" }))
    );
    assert_eq!(
        app.get("/reviews").await,
        (404, json!({ "error": "Requested resource /reviews does not exist" }))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn lenient_id_parsing_matches_leading_digits() {
    let app = TestApp::spawn().await;
    app.post("/businesses", &business(1, "Zero")).await;
    app.post("/businesses", &business(1, "One")).await;

    let (status, detail) = app.get("/businesses/1xyz").await;
    assert_eq!(status, 200);
    assert_eq!(detail["business"]["name"], json!("One"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn health_reports_ok_for_memory_store() {
    let app = TestApp::spawn().await;
    assert_eq!(app.get("/health").await, (200, json!({ "status": "ok" })));
}
