//! Per-product view of a packing: where each product's units ended up.

use serde::{Deserialize, Serialize};
use crate::domain::services::packing::Container;
use crate::domain::value_objects::{ProductId, Weight};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSplit {
    pub container: u32,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAllocation {
    pub product_id: ProductId,
    pub name: String,
    pub total_quantity: u32,
    pub total_weight: Weight,
    pub splits: Vec<ContainerSplit>,
}

impl ProductAllocation {
    pub fn is_split(&self) -> bool { self.splits.len() > 1 }
}

/// Group container contents by product, in order of first appearance.
pub fn allocations(containers: &[Container]) -> Vec<ProductAllocation> {
    let mut grouped: Vec<ProductAllocation> = Vec::new();
    for container in containers {
        for item in container.items() {
            let split = ContainerSplit { container: container.number(), quantity: item.quantity.value() };
            match grouped.iter_mut().find(|a| &a.product_id == item.product_id()) {
                Some(existing) => {
                    existing.total_quantity += split.quantity;
                    existing.total_weight = existing.total_weight + item.line_weight();
                    existing.splits.push(split);
                }
                None => grouped.push(ProductAllocation {
                    product_id: item.product_id().clone(),
                    name: item.product.name.clone(),
                    total_quantity: split.quantity,
                    total_weight: item.line_weight(),
                    splits: vec![split],
                }),
            }
        }
    }
    grouped
}
