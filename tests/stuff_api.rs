use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use stuffd::app::build_router;
use stuffd::serve_with_shutdown;
use stuffd::stuff::{MemoryStore, StoreError, Stuff, StuffId, StuffStore};

struct TestServer {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(store: Arc<dyn StuffStore>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (tx, rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            serve_with_shutdown(listener, build_router(store), shutdown)
                .await
                .unwrap();
        });

        Self { base_url, shutdown: Some(tx), handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.abort();
    }
}

/// Every call fails, as if the database were unreachable.
struct UnreachableStore;

#[async_trait]
impl StuffStore for UnreachableStore {
    async fn find_all(&self) -> Result<Vec<Stuff>, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn find_by_id(&self, _id: StuffId) -> Result<Option<Stuff>, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn insert(&self, _stuff: &Stuff) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn delete_by_id(&self, _id: StuffId) -> Result<u64, StoreError> {
        Err(StoreError::Backend("connection refused".into()))
    }
}

async fn create(client: &reqwest::Client, srv: &TestServer, body: Value) -> Value {
    let res = client.post(srv.url("/stuff")).json(&body).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let srv = TestServer::spawn(Arc::new(MemoryStore::new())).await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/stuff"))
        .json(&json!({"title": "T", "body": "B"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let location = res.headers()[LOCATION].to_str().unwrap().to_owned();
    let created: Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap();
    assert_eq!(id.len(), 24);
    assert!(location.ends_with(&format!("/stuff/{id}")));
    assert!(!location.contains('"'));

    let res = client.get(srv.url(&format!("/stuff/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await.unwrap();
    assert_eq!(fetched, json!({"id": id, "title": "T", "body": "B"}));
}

#[tokio::test]
async fn client_supplied_id_is_replaced() {
    let srv = TestServer::spawn(Arc::new(MemoryStore::new())).await;
    let client = reqwest::Client::new();
    let supplied = "5f1d7b3c9a0e4b2d8c6a1f00";

    let created = create(&client, &srv, json!({"id": supplied, "title": "T"})).await;

    assert_ne!(created["id"], supplied);
}

#[tokio::test]
async fn empty_object_creates_bare_record() {
    let srv = TestServer::spawn(Arc::new(MemoryStore::new())).await;
    let client = reqwest::Client::new();

    let created = create(&client, &srv, json!({})).await;

    let object = created.as_object().unwrap();
    assert!(object.contains_key("id"));
    assert!(!object.contains_key("title"));
    assert!(!object.contains_key("body"));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let srv = TestServer::spawn(Arc::new(MemoryStore::new())).await;
    let client = reqwest::Client::new();

    let res = client.post(srv.url("/stuff")).body("{\"title\":").send().await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn list_with_and_without_trailing_slash() {
    let srv = TestServer::spawn(Arc::new(MemoryStore::new())).await;
    let client = reqwest::Client::new();
    create(&client, &srv, json!({"title": "one"})).await;
    create(&client, &srv, json!({"title": "two"})).await;

    let plain: Value = client.get(srv.url("/stuff")).send().await.unwrap().json().await.unwrap();
    let slashed: Value = client.get(srv.url("/stuff/")).send().await.unwrap().json().await.unwrap();

    assert_eq!(plain, slashed);
    let titles: Vec<&str> = plain.as_array().unwrap().iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["one", "two"]);
}

#[tokio::test]
async fn empty_collection_lists_as_empty_array() {
    let srv = TestServer::spawn(Arc::new(MemoryStore::new())).await;

    let res = reqwest::get(srv.url("/stuff")).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "[]");
}

#[tokio::test]
async fn get_with_invalid_or_unknown_id() {
    let srv = TestServer::spawn(Arc::new(MemoryStore::new())).await;

    let invalid = reqwest::get(srv.url("/stuff/not-a-valid-id")).await.unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let unknown = reqwest::get(srv.url("/stuff/5f1d7b3c9a0e4b2d8c6a1f00")).await.unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_ok_then_not_found() {
    let srv = TestServer::spawn(Arc::new(MemoryStore::new())).await;
    let client = reqwest::Client::new();
    let created = create(&client, &srv, json!({"title": "gone soon"})).await;
    let url = srv.url(&format!("/stuff/{}", created["id"].as_str().unwrap()));

    let first = client.delete(&url).send().await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = client.delete(&url).send().await.unwrap();
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    let fetched = client.get(&url).send().await.unwrap();
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_with_invalid_id_is_bad_request() {
    let srv = TestServer::spawn(Arc::new(MemoryStore::new())).await;
    let client = reqwest::Client::new();

    let res = client.delete(srv.url("/stuff/123")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn every_response_is_json() {
    let srv = TestServer::spawn(Arc::new(MemoryStore::new())).await;
    let client = reqwest::Client::new();

    for res in [
        client.get(srv.url("/test")).send().await.unwrap(),
        client.get(srv.url("/stuff")).send().await.unwrap(),
        client.get(srv.url("/nowhere")).send().await.unwrap(),
        client.delete(srv.url("/stuff/5f1d7b3c9a0e4b2d8c6a1f00")).send().await.unwrap(),
    ] {
        assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
    }
}

#[tokio::test]
async fn unrouted_requests() {
    let srv = TestServer::spawn(Arc::new(MemoryStore::new())).await;
    let client = reqwest::Client::new();

    let missing = client.get(srv.url("/nowhere")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let wrong_method = client.put(srv.url("/stuff")).send().await.unwrap();
    assert_eq!(wrong_method.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn health_check_ignores_store_outage() {
    let srv = TestServer::spawn(Arc::new(UnreachableStore)).await;

    let res = reqwest::get(srv.url("/test")).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn store_outage_is_server_error() {
    let srv = TestServer::spawn(Arc::new(UnreachableStore)).await;
    let client = reqwest::Client::new();
    let known_id = srv.url("/stuff/5f1d7b3c9a0e4b2d8c6a1f00");

    let list = client.get(srv.url("/stuff")).send().await.unwrap();
    assert_eq!(list.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = list.json().await.unwrap();
    assert_eq!(body, json!({"error": "internal server error"}));

    let get = client.get(&known_id).send().await.unwrap();
    assert_eq!(get.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let create = client.post(srv.url("/stuff")).json(&json!({})).send().await.unwrap();
    assert_eq!(create.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let delete = client.delete(&known_id).send().await.unwrap();
    assert_eq!(delete.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn server_stops_on_shutdown_signal() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    let store: Arc<dyn StuffStore> = Arc::new(MemoryStore::new());

    let handle = tokio::spawn(serve_with_shutdown(listener, build_router(store), async {
        let _ = rx.await;
    }));

    tx.send(()).unwrap();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
