//! UAttach Storefront
//!
//! Attachment storefront whose carts ship as weight-limited containers.
//!
//! ## Features
//! - Cart state transitions (add, update quantity, remove, clear)
//! - Greedy container packing under a fixed capacity
//! - Minimum-weight shippability check on the final container
//! - Order snapshots carrying the container layout
//!
//! The packing core (`domain::services`) is pure and synchronous: every call
//! builds fresh containers from its input, so callers may keep an older result
//! while computing a new one.

use thiserror::Error;

pub mod config;
pub mod domain;
pub mod http;

pub use config::{AppConfig, ConfigError, PackingConfig};
pub use domain::aggregates::{Cart, CartAction, CartCheckError, LineItem, Order, OrderError, Product, ShippingAddress};
pub use domain::services::{allocations, check_shippable, pack, validate, Container, ContainerLineItem, PackingError, ShippingError, ValidationReport};
pub use domain::value_objects::{ProductId, Quantity, ValueError, Weight};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    Packing(#[from] PackingError),

    #[error(transparent)]
    Shipping(#[from] ShippingError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<CartCheckError> for StorefrontError {
    fn from(e: CartCheckError) -> Self {
        match e {
            CartCheckError::Packing(e) => Self::Packing(e),
            CartCheckError::Shipping(e) => Self::Shipping(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
