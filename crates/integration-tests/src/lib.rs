//! Integration tests for the Dapr Store API client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p dapr-store-integration-tests
//! ```
//!
//! Tests drive [`dapr_store_client::StoreApi`] over the real `reqwest`
//! transport against [`MockGateway`], an in-process `axum` server that speaks
//! the gateway's `v1.0/invoke/<service>/method/<op>` paths and keeps users,
//! carts and orders in memory. Every request it receives is recorded so tests
//! can assert on the exact method, path, headers and body that went over the
//! wire.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

const INVOKE_PREFIX: &str = "/v1.0/invoke/";

/// A request as seen by the mock gateway.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path as received, still percent-encoded.
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Default)]
struct GatewayState {
    requests: Vec<RecordedRequest>,
    users: HashMap<String, Value>,
    carts: HashMap<String, BTreeMap<String, i64>>,
    orders: Vec<Value>,
}

type SharedState = Arc<Mutex<GatewayState>>;

/// In-process stand-in for the service-invocation gateway.
///
/// The server is aborted when the gateway is dropped.
pub struct MockGateway {
    base_url: String,
    state: SharedState,
    server: tokio::task::JoinHandle<()>,
}

impl MockGateway {
    /// Bind to an ephemeral local port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let state = SharedState::default();
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock gateway");
        let addr = listener
            .local_addr()
            .expect("Mock gateway has no local address");

        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}/"),
            state,
            server,
        }
    }

    /// Base URL with a trailing slash, suitable for `API_ENDPOINT`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every request received so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the state lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// The most recent request.
    ///
    /// # Panics
    ///
    /// Panics if no request has been received.
    #[must_use]
    pub fn last_request(&self) -> RecordedRequest {
        self.requests()
            .pop()
            .expect("Mock gateway received no requests")
    }

    /// Current cart contents for a user.
    #[must_use]
    pub fn cart(&self, username: &str) -> BTreeMap<String, i64> {
        self.lock().carts.get(username).cloned().unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GatewayState> {
        self.state.lock().expect("Mock gateway state poisoned")
    }
}

impl Drop for MockGateway {
    fn drop(&mut self) {
        self.server.abort();
    }
}

// =============================================================================
// Request handling
// =============================================================================

async fn handle(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };

    let mut state = state.lock().expect("Mock gateway state poisoned");
    state.requests.push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: body.clone(),
    });

    if uri.path() == "/boom" {
        return text(StatusCode::INTERNAL_SERVER_ERROR, "boom");
    }

    let Some(route) = uri.path().strip_prefix(INVOKE_PREFIX) else {
        return text(StatusCode::NOT_FOUND, "no such route");
    };
    let segments: Vec<&str> = route.split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["products", "method", "catalog"]) => json_ok(&Value::Array(catalog())),
        ("GET", ["products", "method", "offers"]) => {
            let offers = catalog()
                .into_iter()
                .filter(|p| p["onOffer"] == json!(true))
                .collect();
            json_ok(&Value::Array(offers))
        }
        ("GET", ["products", "method", "get", id]) => find_product(id).map_or_else(
            || problem(StatusCode::NOT_FOUND, &format!("Product {id} not found")),
            |p| json_ok(&p),
        ),
        ("GET", ["products", "method", "search", query]) => {
            let needle = query.replace("%20", " ").to_lowercase();
            let hits = catalog()
                .into_iter()
                .filter(|p| {
                    p["name"]
                        .as_str()
                        .is_some_and(|name| name.to_lowercase().contains(&needle))
                })
                .collect();
            json_ok(&Value::Array(hits))
        }
        ("POST", ["users", "method", "register"]) => {
            match serde_json::from_str::<Value>(&body) {
                Ok(user) => {
                    let Some(username) = user["username"].as_str().map(String::from) else {
                        return problem(StatusCode::BAD_REQUEST, "username is required");
                    };
                    if state.users.contains_key(&username) {
                        return problem(StatusCode::BAD_REQUEST, "user already exists");
                    }
                    state.users.insert(username, user.clone());
                    json_ok(&user)
                }
                Err(e) => problem(StatusCode::BAD_REQUEST, &e.to_string()),
            }
        }
        ("GET", ["users", "method", "get", username]) => state.users.get(*username).map_or_else(
            || problem(StatusCode::NOT_FOUND, &format!("User {username} not found")),
            json_ok,
        ),
        ("GET", ["users", "method", "isregistered", username]) => {
            json_ok(&json!({"registered": state.users.contains_key(*username)}))
        }
        ("GET", ["cart", "method", "get", username]) => json_ok(&cart_json(&state, username)),
        ("PUT", ["cart", "method", "setProduct", username, product_id, count]) => {
            let Ok(count) = count.parse::<i64>() else {
                return problem(StatusCode::BAD_REQUEST, "count must be an integer");
            };
            let cart = state.carts.entry((*username).to_string()).or_default();
            if count <= 0 {
                cart.remove(*product_id);
            } else {
                cart.insert((*product_id).to_string(), count);
            }
            json_ok(&cart_json(&state, username))
        }
        ("POST", ["cart", "method", "submit"]) => submit_cart(&mut state, &body),
        ("PUT", ["cart", "method", "clear", username]) => {
            state.carts.remove(*username);
            json_ok(&cart_json(&state, username))
        }
        ("GET", ["orders", "method", "get", order_id]) => state
            .orders
            .iter()
            .find(|o| o["id"] == json!(order_id))
            .cloned()
            .map_or_else(
                || problem(StatusCode::NOT_FOUND, &format!("Order {order_id} not found")),
                |o| json_ok(&o),
            ),
        ("GET", ["orders", "method", "getForUser", username]) => {
            let ids: Vec<Value> = state
                .orders
                .iter()
                .filter(|o| o["forUser"] == json!(username))
                .map(|o| o["id"].clone())
                .collect();
            json_ok(&Value::Array(ids))
        }
        _ => text(StatusCode::NOT_FOUND, "no such method"),
    }
}

fn submit_cart(state: &mut GatewayState, body: &str) -> Response {
    let Ok(Value::String(username)) = serde_json::from_str::<Value>(body) else {
        return problem(
            StatusCode::BAD_REQUEST,
            "body must be the username as a JSON string",
        );
    };

    let cart = state.carts.remove(&username).unwrap_or_default();
    if cart.is_empty() {
        return problem(StatusCode::BAD_REQUEST, "cart is empty");
    }

    let mut amount = 0.0;
    let mut line_items = Vec::new();
    for (product_id, count) in &cart {
        if let Some(product) = find_product(product_id) {
            #[allow(clippy::cast_precision_loss)]
            let line_total = product["cost"].as_f64().unwrap_or_default() * *count as f64;
            amount += line_total;
            line_items.push(json!({"product": product, "count": count}));
        }
    }

    let order = json!({
        "id": format!("ORD-{}", state.orders.len() + 1),
        "title": format!("Order for {username}"),
        "amount": amount,
        "lineItems": line_items,
        "status": "new",
        "forUser": username,
    });
    state.orders.push(order.clone());
    json_ok(&order)
}

fn catalog() -> Vec<Value> {
    vec![
        json!({"id": "1", "name": "Top Hat", "cost": 12.5, "description": "Tall", "image": "1.jpg", "onOffer": true}),
        json!({"id": "2", "name": "Red Hat", "cost": 8, "description": "Red", "image": "2.jpg", "onOffer": false}),
        json!({"id": "3", "name": "Blue Scarf", "cost": 15, "description": "Long", "image": "3.jpg", "onOffer": false}),
        json!({"id": "4", "name": "Green Socks", "cost": 4.5, "description": "Pair", "image": "4.jpg", "onOffer": true}),
    ]
}

fn find_product(id: &str) -> Option<Value> {
    catalog().into_iter().find(|p| p["id"] == json!(id))
}

fn cart_json(state: &GatewayState, username: &str) -> Value {
    json!({
        "forUser": username,
        "products": state.carts.get(username).cloned().unwrap_or_default(),
    })
}

fn json_ok(value: &Value) -> Response {
    (StatusCode::OK, axum::Json(value.clone())).into_response()
}

fn problem(status: StatusCode, detail: &str) -> Response {
    let body = json!({
        "type": "store-error",
        "title": status.canonical_reason().unwrap_or("Error"),
        "status": status.as_u16(),
        "detail": detail,
    });
    (
        status,
        [(header::CONTENT_TYPE, "application/problem+json")],
        body.to_string(),
    )
        .into_response()
}

fn text(status: StatusCode, message: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, "text/plain")], message).into_response()
}
