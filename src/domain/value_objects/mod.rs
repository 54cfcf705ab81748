//! Value Objects for the storefront domain

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("product id must not be empty")]
    EmptyProductId,
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    #[error("quantity overflows {} units", u32::MAX)]
    QuantityOverflow,
    #[error("weight must not be negative (got {0} kg)")]
    NegativeWeight(Decimal),
    #[error("weight {0} kg is finer than a milligram")]
    TooPrecise(Decimal),
    #[error("weight overflows the representable range")]
    WeightOverflow,
}

/// Catalog product identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Result<Self, ValueError> {
        let value = value.into().trim().to_string();
        if value.is_empty() { return Err(ValueError::EmptyProductId); }
        Ok(Self(value))
    }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl TryFrom<String> for ProductId {
    type Error = ValueError;
    fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self { id.0 }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Quantity value object, always at least one unit
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> Result<Self, ValueError> {
        if value == 0 { return Err(ValueError::ZeroQuantity); }
        Ok(Self(value))
    }
    pub fn value(&self) -> u32 { self.0 }
    pub fn checked_add(&self, other: Quantity) -> Result<Self, ValueError> {
        self.0.checked_add(other.0).map(Self).ok_or(ValueError::QuantityOverflow)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = ValueError;
    fn try_from(value: u32) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self { q.0 }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Weight in kilograms. Never negative, never finer than a milligram.
///
/// Backed by [`Decimal`] so that capacity arithmetic (and in particular the
/// floor division used when filling a container) is exact for fractional
/// catalog weights such as `412.5`. Capping the scale keeps sums of
/// container-sized weights within Decimal's 28 significant digits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Weight(Decimal);

impl Weight {
    pub const ZERO: Weight = Weight(Decimal::ZERO);
    /// Decimal places allowed in kilograms (milligram resolution).
    pub const MAX_SCALE: u32 = 6;

    pub fn kg(value: Decimal) -> Result<Self, ValueError> {
        if value.is_sign_negative() && !value.is_zero() { return Err(ValueError::NegativeWeight(value)); }
        let value = value.normalize();
        if value.scale() > Self::MAX_SCALE { return Err(ValueError::TooPrecise(value)); }
        Ok(Self(value))
    }

    /// Whole kilograms; convenient for constants and tests.
    pub fn whole_kg(value: u32) -> Self { Self(Decimal::from(value)) }

    pub fn value(&self) -> Decimal { self.0 }
    pub fn is_zero(&self) -> bool { self.0.is_zero() }

    pub fn checked_sub(&self, other: Weight) -> Option<Weight> {
        if other.0 > self.0 { None } else { Some(Weight(self.0 - other.0)) }
    }

    pub fn checked_add(&self, other: Weight) -> Result<Weight, ValueError> {
        self.0.checked_add(other.0).map(Weight).ok_or(ValueError::WeightOverflow)
    }

    pub fn checked_times(&self, units: u32) -> Result<Weight, ValueError> {
        self.0.checked_mul(Decimal::from(units)).map(Weight).ok_or(ValueError::WeightOverflow)
    }

    /// How many whole units of this weight fit in `capacity`.
    ///
    /// Returns `None` for a zero unit weight, where the answer is unbounded.
    /// Saturates at `u32::MAX`, including when the quotient itself overflows.
    pub fn units_within(&self, capacity: Weight) -> Option<u32> {
        if self.is_zero() { return None; }
        let Some(ratio) = capacity.0.checked_div(self.0) else { return Some(u32::MAX) };
        let units = ratio.floor().to_u32().unwrap_or(u32::MAX);
        // The quotient is rounded to 28 digits and may land one unit high.
        if units > 0 && self.checked_times(units).map_or(true, |w| w > capacity) {
            return Some(units - 1);
        }
        Some(units)
    }
}

impl Add for Weight {
    type Output = Weight;
    fn add(self, rhs: Weight) -> Weight { Weight(self.0 + rhs.0) }
}

impl std::iter::Sum for Weight {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Self { iter.fold(Weight::ZERO, Add::add) }
}

impl TryFrom<Decimal> for Weight {
    type Error = ValueError;
    fn try_from(value: Decimal) -> Result<Self, Self::Error> { Self::kg(value) }
}

impl From<Weight> for Decimal {
    fn from(w: Weight) -> Self { w.0 }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0.normalize()) }
}
