//! Cart Aggregate
//!
//! A cart is a value: every change goes through [`Cart::apply`], which returns
//! the next cart or refuses the change. Containers are derived from it on
//! demand with [`Cart::pack`].

use serde::{Deserialize, Serialize};
use crate::config::PackingConfig;
use crate::domain::aggregates::product::{LineItem, Product};
use crate::domain::services::{check_shippable, pack, Container, PackingError, ShippingError};
use crate::domain::value_objects::{ProductId, Quantity, ValueError, Weight};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartAction {
    Add { product: Product, quantity: Quantity },
    /// Zero removes the line.
    UpdateQuantity { product_id: ProductId, quantity: u32 },
    Remove { product_id: ProductId },
    Clear,
}

impl Cart {
    pub fn new() -> Self { Self::default() }

    pub fn items(&self) -> &[LineItem] { &self.items }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn item_count(&self) -> usize { self.items.len() }
    pub fn total_units(&self) -> u64 { self.items.iter().map(|i| u64::from(i.quantity.value())).sum() }
    pub fn total_weight(&self) -> Result<Weight, ValueError> {
        self.items.iter().try_fold(Weight::ZERO, |total, line| total.checked_add(line.line_weight()?))
    }

    /// Fails only when merging an `Add` would overflow the line's quantity.
    pub fn apply(mut self, action: CartAction) -> Result<Cart, ValueError> {
        match action {
            CartAction::Add { product, quantity } => {
                if let Some(existing) = self.items.iter_mut().find(|i| i.product.id == product.id) {
                    existing.quantity = existing.quantity.checked_add(quantity)?;
                } else {
                    self.items.push(LineItem::new(product, quantity));
                }
            }
            CartAction::UpdateQuantity { product_id, quantity } => match Quantity::new(quantity) {
                Ok(quantity) => {
                    if let Some(existing) = self.items.iter_mut().find(|i| i.product.id == product_id) {
                        existing.quantity = quantity;
                    }
                }
                Err(_) => self.items.retain(|i| i.product.id != product_id),
            },
            CartAction::Remove { product_id } => self.items.retain(|i| i.product.id != product_id),
            CartAction::Clear => self.items.clear(),
        }
        Ok(self)
    }

    pub fn pack(&self, config: &PackingConfig) -> Result<Vec<Container>, PackingError> {
        pack(&self.items, config.max_weight)
    }

    pub fn check_shippable(&self, config: &PackingConfig) -> Result<Vec<Container>, CartCheckError> {
        let containers = self.pack(config)?;
        check_shippable(&containers, config.min_weight)?;
        Ok(containers)
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = ValueError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        items.into_iter().try_fold(Cart::new(), |cart, line| cart.apply(CartAction::Add { product: line.product, quantity: line.quantity }))
    }
}

/// Why a cart cannot go to checkout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartCheckError {
    #[error(transparent)]
    Packing(#[from] PackingError),
    #[error(transparent)]
    Shipping(#[from] ShippingError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bucket(id: &str, kg: u32) -> Product {
        Product::new(ProductId::new(id).unwrap(), format!("Bucket {id}"), Weight::whole_kg(kg))
    }

    fn add(id: &str, kg: u32, qty: u32) -> CartAction {
        CartAction::Add { product: bucket(id, kg), quantity: Quantity::new(qty).unwrap() }
    }

    fn pid(id: &str) -> ProductId { ProductId::new(id).unwrap() }

    #[test]
    fn test_cart_operations() {
        let cart = Cart::new().apply(add("p1", 280, 2)).unwrap().apply(add("p2", 320, 1)).unwrap().apply(add("p1", 280, 3)).unwrap();
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.items()[0].quantity.value(), 5); // Merged
        assert_eq!(cart.total_units(), 6);
        assert_eq!(cart.total_weight(), Ok(Weight::whole_kg(1720)));

        let cart = cart.apply(CartAction::UpdateQuantity { product_id: pid("p2"), quantity: 0 }).unwrap();
        assert_eq!(cart.item_count(), 1);
        let cart = cart.apply(CartAction::Remove { product_id: pid("p1") }).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merge_past_quantity_limit_is_refused() {
        let cart = Cart::new().apply(add("a", 1, u32::MAX)).unwrap();
        assert_eq!(cart.clone().apply(add("a", 1, 5)), Err(ValueError::QuantityOverflow));
        assert_eq!(cart.total_units(), u64::from(u32::MAX));

        let lines = vec![cart.items()[0].clone(), cart.items()[0].clone()];
        assert_eq!(Cart::try_from(lines), Err(ValueError::QuantityOverflow));
    }

    #[test]
    fn test_unknown_product_is_noop() {
        let cart = Cart::new().apply(add("p1", 280, 2)).unwrap();
        let next = cart.clone().apply(CartAction::UpdateQuantity { product_id: pid("nope"), quantity: 4 }).unwrap();
        assert_eq!(next, cart);
        assert_eq!(next.clone().apply(CartAction::Remove { product_id: pid("nope") }), Ok(cart));
    }

    #[test]
    fn test_noop_update_keeps_packing() {
        let config = PackingConfig::default();
        let cart = Cart::new().apply(add("a", 500, 3)).unwrap().apply(add("b", 400, 4)).unwrap();
        let before = cart.pack(&config).unwrap();
        let after = cart.apply(CartAction::UpdateQuantity { product_id: pid("b"), quantity: 4 }).unwrap().pack(&config).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_previous_packing_survives_mutation() {
        let config = PackingConfig::default();
        let cart = Cart::new().apply(add("a", 300, 10)).unwrap();
        let first = cart.pack(&config).unwrap();
        let second = cart.apply(add("a", 300, 4)).unwrap().pack(&config).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        assert_eq!(second[1].total_weight(), Weight::whole_kg(2100));
        assert_eq!(first[1].total_weight(), Weight::whole_kg(900));
    }

    #[test]
    fn test_check_shippable() {
        let config = PackingConfig::default();
        assert_eq!(Cart::new().check_shippable(&config), Err(CartCheckError::Shipping(ShippingError::EmptyCart)));
        let heavy = Cart::new().apply(add("x", 2500, 1)).unwrap();
        assert!(matches!(heavy.check_shippable(&config), Err(CartCheckError::Packing(PackingError::UnpackableItem { .. }))));
        assert_eq!(Cart::new().apply(add("a", 440, 5)).unwrap().check_shippable(&config).unwrap().len(), 1);
    }

    proptest! {
        #[test]
        fn prop_same_quantity_update_repacks_identically(lines in prop::collection::vec((1u32..=2200, 1u32..=30), 1..6), pick in 0usize..6) {
            let config = PackingConfig::default();
            let cart = lines.iter().enumerate().try_fold(Cart::new(), |cart, (i, (kg, qty))| cart.apply(add(&format!("p{i}"), *kg, *qty))).unwrap();
            let target = &cart.items()[pick % cart.item_count()];
            let action = CartAction::UpdateQuantity { product_id: target.product.id.clone(), quantity: target.quantity.value() };
            let next = cart.clone().apply(action).unwrap();
            prop_assert_eq!(&next, &cart);
            prop_assert_eq!(next.pack(&config), cart.pack(&config));
        }
    }

    #[test]
    fn test_action_wire_format() {
        let action: CartAction = serde_json::from_str(r#"{"type":"update_quantity","product_id":"p1","quantity":0}"#).unwrap();
        assert_eq!(action, CartAction::UpdateQuantity { product_id: pid("p1"), quantity: 0 });
        let cleared = Cart::new().apply(add("p1", 1, 1)).unwrap().apply(serde_json::from_str(r#"{"type":"clear"}"#).unwrap()).unwrap();
        assert!(cleared.is_empty());
    }
}
