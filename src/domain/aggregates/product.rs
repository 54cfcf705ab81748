//! Product Aggregate

use serde::{Deserialize, Serialize};
use crate::domain::value_objects::{ProductId, Quantity, ValueError, Weight};

/// Catalog entry. Only `id` and `unit_weight` matter for packing, the rest is
/// display metadata carried through to container listings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub unit_weight: Weight,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, unit_weight: Weight) -> Self {
        Self {
            id, name: name.into(), category: String::new(), description: String::new(), unit_weight,
            pdf_url: None, image_url: None, features: vec![],
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self { self.category = category.into(); self }
    pub fn with_description(mut self, description: impl Into<String>) -> Self { self.description = description.into(); self }
}

/// A (product, quantity) demand entry in a cart or order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: Product,
    pub quantity: Quantity,
}

impl LineItem {
    pub fn new(product: Product, quantity: Quantity) -> Self { Self { product, quantity } }
    pub fn product_id(&self) -> &ProductId { &self.product.id }
    pub fn unit_weight(&self) -> Weight { self.product.unit_weight }
    pub fn line_weight(&self) -> Result<Weight, ValueError> { self.product.unit_weight.checked_times(self.quantity.value()) }
}
