//! Shared harness: runs the real router on an ephemeral port over the in-memory store.

#![allow(dead_code)]
use bizdir_api::{transport, InMemoryDocumentStore, ResourceService};
use serde_json::{json, Value};
use std::sync::Arc;

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    _server: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let service = ResourceService::new(Arc::new(InMemoryDocumentStore::new()));
        let router = transport::http::create_router(transport::http::AppState::new(service));

        // Bind to an ephemeral port so tests can run in parallel.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            _server: server,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        read(resp).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> (u16, Value) {
        let resp = self.client.post(self.url(path)).json(body).send().await.unwrap();
        read(resp).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> (u16, Value) {
        let resp = self.client.put(self.url(path)).json(body).send().await.unwrap();
        read(resp).await
    }

    pub async fn delete(&self, path: &str) -> (u16, Value) {
        let resp = self.client.delete(self.url(path)).send().await.unwrap();
        read(resp).await
    }
}

/// Status plus JSON body (`Null` for empty bodies).
async fn read(resp: reqwest::Response) -> (u16, Value) {
    let status = resp.status().as_u16();
    let bytes = resp.bytes().await.unwrap();
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub fn business(ownerid: i64, name: &str) -> Value {
    json!({
        "ownerid": ownerid,
        "name": name,
        "address": "2300 NW Monroe Ave",
        "city": "Corvallis",
        "state": "OR",
        "zip": "97330",
        "phone": "541-555-0123",
        "category": "Restaurant",
        "subcategory": "Pizza"
    })
}

pub fn review(userid: i64, businessid: i64, stars: i64) -> Value {
    json!({ "userid": userid, "businessid": businessid, "dollars": 2, "stars": stars })
}

pub fn photo(userid: i64, businessid: i64, caption: &str) -> Value {
    json!({ "userid": userid, "businessid": businessid, "caption": caption })
}
