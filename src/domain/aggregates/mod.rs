//! Aggregates module
pub mod product;
pub mod order;
pub mod cart;

pub use product::{LineItem, Product};
pub use order::{Order, OrderError, OrderStatus, ShippingAddress, SplitStrategy};
pub use cart::{Cart, CartAction, CartCheckError};
