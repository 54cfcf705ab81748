//! Greedy weight-based container packing
//!
//! Line items are poured, in cart order, into a single open container until it
//! can take no further unit of the item being placed. The container is then
//! sealed and a fresh one opened. A line item whose quantity does not fit is
//! split across as many containers as it needs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::domain::aggregates::{LineItem, Product};
use crate::domain::value_objects::{ProductId, Quantity, ValueError, Weight};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackingError {
    #[error("container capacity must be greater than zero")]
    InvalidCapacity,

    #[error("invalid line item for product {product_id}: {reason}")]
    InvalidInput { product_id: ProductId, reason: String },

    #[error("product {product_id} weighs {unit_weight} kg per unit, over the {max_weight} kg container capacity")]
    UnpackableItem { product_id: ProductId, unit_weight: Weight, max_weight: Weight },

    #[error("product {product_id} cannot be packed: {reason}")]
    Overflow { product_id: ProductId, reason: ValueError },
}

/// Quantity of a single product placed in one container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerLineItem {
    pub product: Product,
    pub quantity: Quantity,
    weight: Weight,
}

impl ContainerLineItem {
    pub fn product_id(&self) -> &ProductId { &self.product.id }
    pub fn line_weight(&self) -> Weight { self.weight }
}

/// A sealed shipping container. Built only by [`pack`]; never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    id: String,
    number: u32,
    items: Vec<ContainerLineItem>,
    total_weight: Weight,
    max_weight: Weight,
}

impl Container {
    pub fn id(&self) -> &str { &self.id }
    /// 1-based position in emission order.
    pub fn number(&self) -> u32 { self.number }
    pub fn items(&self) -> &[ContainerLineItem] { &self.items }
    pub fn total_weight(&self) -> Weight { self.total_weight }
    pub fn max_weight(&self) -> Weight { self.max_weight }

    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.items.iter().find(|i| i.product_id() == product_id).map_or(0, |i| i.quantity.value())
    }

    pub fn remaining_capacity(&self) -> Weight {
        self.max_weight.checked_sub(self.total_weight).unwrap_or(Weight::ZERO)
    }

    /// Share of capacity in use, capped at 1.
    pub fn fill_ratio(&self) -> Decimal {
        if self.max_weight.is_zero() { return Decimal::ONE; }
        (self.total_weight.value() / self.max_weight.value()).min(Decimal::ONE)
    }
}

/// The container currently being filled.
#[derive(Default)]
struct OpenContainer {
    items: Vec<ContainerLineItem>,
    weight: Weight,
}

impl OpenContainer {
    fn place(&mut self, product: &Product, units: Quantity) -> Result<(), PackingError> {
        let overflow = |reason| PackingError::Overflow { product_id: product.id.clone(), reason };
        let added = product.unit_weight.checked_times(units.value()).map_err(overflow)?;
        let weight = self.weight.checked_add(added).map_err(overflow)?;
        if let Some(existing) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            existing.quantity = existing.quantity.checked_add(units).map_err(overflow)?;
            existing.weight = existing.weight.checked_add(added).map_err(overflow)?;
        } else {
            self.items.push(ContainerLineItem { product: product.clone(), quantity: units, weight: added });
        }
        self.weight = weight;
        Ok(())
    }

    fn is_empty(&self) -> bool { self.items.is_empty() }

    fn seal(&mut self, number: u32, max_weight: Weight) -> Container {
        let sealed = std::mem::take(self);
        Container { id: format!("cnt-{number}"), number, items: sealed.items, total_weight: sealed.weight, max_weight }
    }
}

fn check_line_item(item: &LineItem, max_weight: Weight) -> Result<(), PackingError> {
    let unit_weight = item.unit_weight();
    if unit_weight.is_zero() {
        return Err(PackingError::InvalidInput { product_id: item.product_id().clone(), reason: "unit weight must be positive".into() });
    }
    if unit_weight > max_weight {
        return Err(PackingError::UnpackableItem { product_id: item.product_id().clone(), unit_weight, max_weight });
    }
    Ok(())
}

/// Pack `items` into containers of capacity `max_weight`.
///
/// Deterministic and order-dependent. Every line item is checked before any
/// container is built, so the call either packs the whole cart or rejects it.
/// An empty cart packs into an empty list.
pub fn pack(items: &[LineItem], max_weight: Weight) -> Result<Vec<Container>, PackingError> {
    if max_weight.is_zero() { return Err(PackingError::InvalidCapacity); }
    if let Err(e) = items.iter().try_for_each(|item| check_line_item(item, max_weight)) {
        tracing::warn!(error = %e, "rejecting cart for packing");
        return Err(e);
    }

    let mut containers: Vec<Container> = Vec::new();
    let mut open = OpenContainer::default();

    for item in items {
        let unit_weight = item.unit_weight();
        let mut remaining = item.quantity.value();

        while remaining > 0 {
            let capacity_left = max_weight.checked_sub(open.weight).unwrap_or(Weight::ZERO);
            let fits = unit_weight.units_within(capacity_left).ok_or_else(|| PackingError::InvalidInput {
                product_id: item.product_id().clone(),
                reason: "unit weight must be positive".into(),
            })?;
            let take = remaining.min(fits);

            if let Ok(units) = Quantity::new(take) {
                open.place(&item.product, units)?;
                remaining -= take;
            }

            if open.weight >= max_weight || (take == 0 && remaining > 0) {
                // Only reachable if a checked unit still fits nowhere.
                if open.is_empty() {
                    return Err(PackingError::UnpackableItem { product_id: item.product_id().clone(), unit_weight, max_weight });
                }
                let number = containers.len() as u32 + 1;
                containers.push(open.seal(number, max_weight));
            }
        }
    }

    if !open.is_empty() {
        let number = containers.len() as u32 + 1;
        containers.push(open.seal(number, max_weight));
    }

    tracing::debug!(line_items = items.len(), containers = containers.len(), "packed cart");
    Ok(containers)
}
