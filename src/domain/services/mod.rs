//! Domain services: pure derivations over cart contents
pub mod packing;
pub mod validation;
pub mod distribution;

pub use packing::{pack, Container, ContainerLineItem, PackingError};
pub use validation::{check_shippable, validate, ShippingError, ValidationReport};
pub use distribution::{allocations, ContainerSplit, ProductAllocation};
