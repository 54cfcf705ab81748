//! HTTP adapter: cart, packing and checkout endpoints over the domain core.

use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use validator::Validate;
use crate::config::PackingConfig;
use crate::domain::aggregates::{Cart, CartAction, LineItem, Order, OrderError, ShippingAddress};
use crate::domain::services::{allocations, pack, validate, Container, ProductAllocation, ValidationReport};
use crate::domain::value_objects::Weight;
use crate::StorefrontError;

#[derive(Clone)] pub struct AppState { pub packing: PackingConfig }

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "uattach-storefront"})) }))
        .route("/api/v1/config", get(get_config))
        .route("/api/v1/containers", post(pack_containers))
        .route("/api/v1/cart", post(apply_cart_action))
        .route("/api/v1/checkout", post(checkout))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()))
        .with_state(state)
}

fn reject(e: impl Into<StorefrontError>) -> (StatusCode, String) {
    let e = e.into();
    let status = match &e {
        StorefrontError::Shipping(_) | StorefrontError::Order(OrderError::NotShippable(_)) => StatusCode::CONFLICT,
        StorefrontError::Value(_) | StorefrontError::Packing(_) | StorefrontError::Order(OrderError::Unpackable(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        StorefrontError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string())
}

async fn get_config(State(s): State<AppState>) -> Json<PackingConfig> { Json(s.packing) }

#[derive(Debug, Deserialize)] pub struct PackRequest { pub items: Vec<LineItem> }
#[derive(Debug, Serialize, Deserialize)] pub struct PackResponse { pub containers: Vec<Container>, pub allocations: Vec<ProductAllocation>, pub validation: ValidationReport, pub total_weight: Weight }

async fn pack_containers(State(s): State<AppState>, Json(r): Json<PackRequest>) -> Result<Json<PackResponse>, (StatusCode, String)> {
    let containers = pack(&r.items, s.packing.max_weight).map_err(reject)?;
    let validation = validate(&containers, s.packing.min_weight);
    let total_weight = containers.iter().map(Container::total_weight).sum();
    Ok(Json(PackResponse { allocations: allocations(&containers), containers, validation, total_weight }))
}

#[derive(Debug, Deserialize)] pub struct CartRequest { #[serde(default)] pub items: Vec<LineItem>, pub action: CartAction }
#[derive(Debug, Serialize, Deserialize)] pub struct CartResponse { pub items: Cart, pub containers: Vec<Container>, pub validation: ValidationReport }

async fn apply_cart_action(State(s): State<AppState>, Json(r): Json<CartRequest>) -> Result<Json<CartResponse>, (StatusCode, String)> {
    let cart = Cart::try_from(r.items).and_then(|cart| cart.apply(r.action)).map_err(reject)?;
    let containers = cart.pack(&s.packing).map_err(reject)?;
    let validation = validate(&containers, s.packing.min_weight);
    Ok(Json(CartResponse { items: cart, containers, validation }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, max = 64))]
    pub customer_id: Option<String>,
    pub shipping_address: ShippingAddress,
    pub items: Vec<LineItem>,
}

async fn checkout(State(s): State<AppState>, Json(r): Json<CheckoutRequest>) -> Result<(StatusCode, Json<Order>), (StatusCode, String)> {
    r.validate().map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    r.shipping_address.validate().map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let cart = Cart::try_from(r.items).map_err(reject)?;
    let mut order = Order::submit(r.customer_id, r.shipping_address, &cart, &s.packing).map_err(reject)?;
    for event in order.take_events() {
        tracing::info!(?event, "order submitted");
    }
    Ok((StatusCode::CREATED, Json(order)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router { router(AppState { packing: PackingConfig::default() }) }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Vec<u8>) {
        let request = Request::builder().method("POST").uri(uri).header("content-type", "application/json")
            .body(Body::from(body.to_string())).unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn line(id: &str, kg: u32, qty: u32) -> Value {
        json!({"product": {"id": id, "name": format!("Bucket {id}"), "unit_weight": kg}, "quantity": qty})
    }

    fn address() -> Value {
        json!({"first_name": "Dana", "last_name": "Reyes", "email": "dana@example.com", "phone": "555-0100",
               "line1": "12 Quarry Rd", "city": "Billings", "state": "MT", "zip": "59101"})
    }

    #[tokio::test]
    async fn test_health() {
        let response = app().oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_pack_endpoint_reports_underweight() {
        let (status, body) = post_json("/api/v1/containers", json!({"items": [line("a", 300, 10)]})).await;
        assert_eq!(status, StatusCode::OK);
        let packed: PackResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(packed.containers.len(), 2);
        assert_eq!(packed.total_weight, Weight::whole_kg(3000));
        assert!(!packed.validation.valid);
        assert_eq!(packed.allocations[0].splits.len(), 2);
    }

    #[tokio::test]
    async fn test_pack_endpoint_rejects_oversized_unit() {
        let (status, body) = post_json("/api/v1/containers", json!({"items": [line("huge", 2500, 1)]})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(String::from_utf8(body).unwrap().contains("huge"));
    }

    #[tokio::test]
    async fn test_pack_endpoint_rejects_sub_milligram_weight() {
        let dust = json!({"product": {"id": "dust", "name": "Dust", "unit_weight": "0.0000000000000000000000000001"}, "quantity": 3});
        let (status, _) = post_json("/api/v1/containers", json!({"items": [dust]})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_cart_endpoint_refuses_quantity_overflow() {
        let (status, body) = post_json("/api/v1/cart", json!({
            "items": [line("a", 1, u32::MAX)],
            "action": {"type": "add", "product": {"id": "a", "name": "Bucket a", "unit_weight": 1}, "quantity": 5}
        })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(String::from_utf8(body).unwrap().contains("overflows"));
    }

    #[tokio::test]
    async fn test_cart_endpoint_applies_action() {
        let (status, body) = post_json("/api/v1/cart", json!({
            "items": [line("a", 500, 3)],
            "action": {"type": "add", "product": {"id": "b", "name": "Bucket b", "unit_weight": 400}, "quantity": 4}
        })).await;
        assert_eq!(status, StatusCode::OK);
        let cart: CartResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(cart.items.item_count(), 2);
        assert_eq!(cart.containers.len(), 2);
        assert!(cart.validation.valid);
    }

    #[tokio::test]
    async fn test_checkout_creates_order() {
        let (status, body) = post_json("/api/v1/checkout", json!({"shipping_address": address(), "items": [line("a", 440, 5)]})).await;
        assert_eq!(status, StatusCode::CREATED);
        let order: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(order["split_strategy"], "weight_optimized");
        assert_eq!(order["containers"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_checkout_refuses_empty_cart() {
        let (status, body) = post_json("/api/v1/checkout", json!({"shipping_address": address(), "items": []})).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(String::from_utf8(body).unwrap().contains("cart is empty"));
    }

    #[tokio::test]
    async fn test_checkout_rejects_bad_address() {
        let mut bad = address();
        bad["email"] = json!("nope");
        let (status, _) = post_json("/api/v1/checkout", json!({"shipping_address": bad, "items": [line("a", 440, 5)]})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
