//! Order Aggregate
//!
//! An order is the immutable snapshot taken at checkout: the line items, the
//! container layout they packed into, and where to ship them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use crate::config::PackingConfig;
use crate::domain::aggregates::cart::{Cart, CartCheckError};
use crate::domain::aggregates::product::LineItem;
use crate::domain::events::{DomainEvent, OrderEvent};
use crate::domain::services::{Container, PackingError, ShippingError};
use crate::domain::value_objects::Weight;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: Uuid,
    customer_id: Option<String>,
    status: OrderStatus,
    items: Vec<LineItem>,
    containers: Vec<Container>,
    shipping_address: ShippingAddress,
    total_weight: Weight,
    split_strategy: SplitStrategy,
    created_at: DateTime<Utc>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ShippingAddress {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 2, max = 2))]
    pub state: String,
    #[validate(length(min = 5, max = 10))]
    pub zip: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus { #[default] Pending }

/// How the cart was split into containers. Greedy weight fill is the only strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy { #[default] WeightOptimized }

impl Order {
    /// Re-pack `cart` and snapshot it. Fails when the cart cannot be packed or
    /// its final container is below the minimum shipping weight.
    pub fn submit(customer_id: Option<String>, shipping_address: ShippingAddress, cart: &Cart, config: &PackingConfig) -> Result<Self, OrderError> {
        let containers = cart.check_shippable(config)?;
        let total_weight = containers.iter().map(Container::total_weight).sum();
        let mut order = Self {
            id: Uuid::now_v7(), customer_id, status: OrderStatus::Pending, items: cart.items().to_vec(),
            containers, shipping_address, total_weight, split_strategy: SplitStrategy::WeightOptimized,
            created_at: Utc::now(), events: vec![],
        };
        order.raise_event(DomainEvent::Order(OrderEvent::Submitted { order_id: order.id, containers: order.containers.len(), total_weight }));
        Ok(order)
    }

    pub fn id(&self) -> Uuid { self.id }
    pub fn customer_id(&self) -> Option<&str> { self.customer_id.as_deref() }
    pub fn status(&self) -> OrderStatus { self.status }
    pub fn items(&self) -> &[LineItem] { &self.items }
    pub fn containers(&self) -> &[Container] { &self.containers }
    pub fn shipping_address(&self) -> &ShippingAddress { &self.shipping_address }
    pub fn total_weight(&self) -> Weight { self.total_weight }
    pub fn split_strategy(&self) -> SplitStrategy { self.split_strategy }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("order cannot be packed: {0}")]
    Unpackable(PackingError),
    #[error("order is not shippable: {0}")]
    NotShippable(ShippingError),
}

impl From<CartCheckError> for OrderError {
    fn from(e: CartCheckError) -> Self {
        match e {
            CartCheckError::Packing(e) => Self::Unpackable(e),
            CartCheckError::Shipping(e) => Self::NotShippable(e),
        }
    }
}
