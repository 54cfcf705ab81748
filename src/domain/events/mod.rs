//! Domain events
use serde::Serialize;
use uuid::Uuid;
use crate::domain::value_objects::Weight;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DomainEvent {
    Order(OrderEvent),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum OrderEvent {
    Submitted { order_id: Uuid, containers: usize, total_weight: Weight },
}
