//! Shippability check on a packed cart

use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::domain::services::packing::Container;
use crate::domain::value_objects::Weight;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShippingError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("last container under minimum weight ({actual}/{required} kg required), add more items")]
    UnderweightFinalContainer { actual: Weight, required: Weight },
}

/// `{ valid, message? }` shape consumed by the cart and checkout screens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<Result<(), ShippingError>> for ValidationReport {
    fn from(outcome: Result<(), ShippingError>) -> Self {
        match outcome {
            Ok(()) => Self { valid: true, message: None },
            Err(e) => Self { valid: false, message: Some(e.to_string()) },
        }
    }
}

/// Only the final container can be short: every earlier one was sealed
/// because it could not take another unit.
pub fn check_shippable(containers: &[Container], min_weight: Weight) -> Result<(), ShippingError> {
    let last = containers.last().ok_or(ShippingError::EmptyCart)?;
    if last.total_weight() < min_weight {
        return Err(ShippingError::UnderweightFinalContainer { actual: last.total_weight(), required: min_weight });
    }
    Ok(())
}

pub fn validate(containers: &[Container], min_weight: Weight) -> ValidationReport {
    check_shippable(containers, min_weight).into()
}
