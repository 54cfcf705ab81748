//! Storefront domain: catalog lines, cart transitions, container packing and order snapshots
pub mod aggregates;
pub mod events;
pub mod services;
pub mod value_objects;
