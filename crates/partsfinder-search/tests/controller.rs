//! End-to-end tests for `SearchController`: submit, supersession, tab
//! selection and subscription.
//!
//! Ordering-sensitive tests use `GatedTransport`, whose responses are
//! released by the test through oneshot channels, so the arrival order of
//! overlapping responses is fully controlled.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::oneshot;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use partsfinder_core::StoreRegistry;
use partsfinder_search::projection::{active_products, summary};
use partsfinder_search::{
    SearchClient, SearchController, SearchError, SearchStatus, SearchTransport,
};

type Gate = oneshot::Receiver<Result<Value, SearchError>>;

/// Transport whose response for each query is supplied later by the test.
/// Clones share the same gates.
#[derive(Clone, Default)]
struct GatedTransport {
    gates: Arc<Mutex<HashMap<String, Gate>>>,
}

impl GatedTransport {
    fn gate(&self, query: &str) -> oneshot::Sender<Result<Value, SearchError>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(query.to_owned(), rx);
        tx
    }
}

impl SearchTransport for GatedTransport {
    async fn search(&self, query: &str) -> Result<Value, SearchError> {
        let gate = self
            .gates
            .lock()
            .unwrap()
            .remove(query)
            .expect("no gate registered for query");
        gate.await.expect("gate sender dropped")
    }
}

fn registry() -> Arc<StoreRegistry> {
    Arc::new(StoreRegistry::builtin())
}

fn gated() -> (GatedTransport, SearchController<GatedTransport>) {
    let transport = GatedTransport::default();
    let controller = SearchController::new(transport.clone(), registry());
    (transport, controller)
}

#[tokio::test]
async fn blank_submit_is_ignored() {
    let (_, controller) = gated();
    assert!(controller.submit("   ").is_none());
    assert_eq!(controller.snapshot().status(), SearchStatus::Idle);
}

#[tokio::test]
async fn submit_is_pending_until_response_arrives() {
    let (transport, controller) = gated();
    let tx = transport.gate("camera");

    let handle = controller.submit("camera").expect("query accepted");
    assert_eq!(controller.snapshot().status(), SearchStatus::Pending);

    tx.send(Ok(json!({ "wesco": [{ "name": "Camera X", "price": "$10" }] })))
        .unwrap();
    handle.await.unwrap();

    let session = controller.snapshot();
    assert_eq!(session.status(), SearchStatus::Success);
    assert_eq!(session.active_store_id(), Some("wesco"));
    let products = active_products(&session);
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].title, "Camera X");
    assert_eq!(products[0].store_id, "wesco");
}

#[tokio::test]
async fn older_response_arriving_late_is_discarded() {
    let (transport, controller) = gated();
    let tx_camera = transport.gate("camera");
    let tx_strike = transport.gate("strike");

    let first = controller.submit("camera").unwrap();
    let second = controller.submit("strike").unwrap();

    tx_strike
        .send(Ok(json!({ "seclock": [{ "title": "Electric Strike" }] })))
        .unwrap();
    second.await.unwrap();

    tx_camera
        .send(Ok(json!({ "wesco": [{ "title": "Camera X" }] })))
        .unwrap();
    first.await.unwrap();

    let session = controller.snapshot();
    assert_eq!(session.status(), SearchStatus::Success);
    assert_eq!(session.query_text(), "strike");
    assert!(session.results().get("wesco").is_none());
    assert_eq!(session.active_store_id(), Some("seclock"));
}

#[tokio::test]
async fn older_failure_arriving_late_is_discarded() {
    let (transport, controller) = gated();
    let tx_camera = transport.gate("camera");
    let tx_strike = transport.gate("strike");

    let first = controller.submit("camera").unwrap();
    let second = controller.submit("strike").unwrap();

    tx_strike.send(Ok(json!({}))).unwrap();
    second.await.unwrap();
    tx_camera
        .send(Err(SearchError::RateLimited {
            retry_after_secs: 1,
        }))
        .unwrap();
    first.await.unwrap();

    let session = controller.snapshot();
    assert_eq!(session.status(), SearchStatus::Success);
    assert!(session.error_message().is_none());
}

#[tokio::test]
async fn select_tab_through_controller() {
    let (transport, controller) = gated();
    let tx = transport.gate("camera");
    let handle = controller.submit("camera").unwrap();
    tx.send(Ok(json!({
        "wesco": [{ "title": "Camera A" }],
        "adi-global": [{ "title": "Camera B" }]
    })))
    .unwrap();
    handle.await.unwrap();

    assert!(!controller.select_tab("banner-solutions"));
    assert_eq!(controller.snapshot().active_store_id(), Some("wesco"));
    assert!(controller.select_tab("adi-global"));
    assert_eq!(controller.snapshot().active_store_id(), Some("adi-global"));
}

#[tokio::test]
async fn subscribers_see_pending_then_success() {
    let (transport, controller) = gated();
    let mut rx = controller.subscribe();
    let tx = transport.gate("camera");

    let handle = controller.submit("camera").unwrap();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().status(), SearchStatus::Pending);

    tx.send(Ok(json!({ "wesco": [{ "title": "Camera" }] })))
        .unwrap();
    handle.await.unwrap();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().status(), SearchStatus::Success);
}

#[tokio::test]
async fn rejected_tab_selection_does_not_notify() {
    let (_, controller) = gated();
    let mut rx = controller.subscribe();
    assert!(!controller.select_tab("wesco"));
    assert!(!rx.has_changed().unwrap());
}

// ---------------------------------------------------------------------------
// Over HTTP
// ---------------------------------------------------------------------------

fn http_controller(server: &MockServer) -> SearchController<SearchClient> {
    let client = SearchClient::new(&server.uri(), 5, "partsfinder-test/0.1", 0, 0)
        .expect("failed to build test SearchClient");
    SearchController::new(client, registry())
}

#[tokio::test]
async fn http_result_list_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "camera"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "success": false, "site": "IML Home" },
                { "success": true, "site": "SECLOCK", "data": { "products": [
                    { "title": "Camera Housing", "price": "$35.00", "link": "https://seclock.example/1" },
                    { "title": "Exit Device" }
                ] } },
                { "success": true, "site": "Wesco", "data": { "products": [
                    { "name": "IP Camera", "sku": "WES-9" }
                ] } }
            ]
        })))
        .mount(&server)
        .await;

    let controller = http_controller(&server);
    controller.submit("camera").unwrap().await.unwrap();

    let session = controller.snapshot();
    assert_eq!(session.status(), SearchStatus::Success);
    assert!(session.results().get("iml-home").is_none());
    assert_eq!(session.active_store_id(), Some("wesco"));
    assert_eq!(
        summary(&session).as_deref(),
        Some("Found 2 products in 2 stores")
    );
}

#[tokio::test]
async fn http_error_status_fails_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let controller = http_controller(&server);
    controller.submit("camera").unwrap().await.unwrap();

    let session = controller.snapshot();
    assert_eq!(session.status(), SearchStatus::Failed);
    assert!(session.results().is_empty());
    assert!(session.error_message().unwrap().contains("500"));
}

#[tokio::test]
async fn http_slow_superseded_response_is_discarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "camera"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "wesco": [{ "title": "Camera" }] }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "strike"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "seclock": [{ "title": "Strike" }] })),
        )
        .mount(&server)
        .await;

    let controller = http_controller(&server);
    let slow = controller.submit("camera").unwrap();
    let fast = controller.submit("strike").unwrap();
    fast.await.unwrap();
    slow.await.unwrap();

    let session = controller.snapshot();
    assert_eq!(session.query_text(), "strike");
    assert_eq!(session.active_store_id(), Some("seclock"));
    assert!(session.results().get("wesco").is_none());
}
