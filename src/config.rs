//! Deployment configuration, read once from the environment at startup.

use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;
use crate::domain::value_objects::Weight;

pub const MAX_WEIGHT_VAR: &str = "CONTAINER_MAX_WEIGHT_KG";
pub const MIN_WEIGHT_VAR: &str = "CONTAINER_MIN_WEIGHT_KG";
pub const PORT_VAR: &str = "PORT";

const DEFAULT_MAX_WEIGHT_KG: u32 = 2200;
const DEFAULT_MIN_WEIGHT_KG: u32 = 1000;
const DEFAULT_PORT: u16 = 8083;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    NonPositive(&'static str),

    #[error("minimum container weight {min} kg exceeds capacity {max} kg")]
    MinAboveMax { min: Weight, max: Weight },
}

/// Container thresholds shared by every cart in the deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PackingConfig {
    pub max_weight: Weight,
    pub min_weight: Weight,
}

impl PackingConfig {
    pub fn new(max_weight: Weight, min_weight: Weight) -> Result<Self, ConfigError> {
        if max_weight.is_zero() { return Err(ConfigError::NonPositive(MAX_WEIGHT_VAR)); }
        if min_weight.is_zero() { return Err(ConfigError::NonPositive(MIN_WEIGHT_VAR)); }
        if min_weight > max_weight { return Err(ConfigError::MinAboveMax { min: min_weight, max: max_weight }); }
        Ok(Self { max_weight, min_weight })
    }
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self { max_weight: Weight::whole_kg(DEFAULT_MAX_WEIGHT_KG), min_weight: Weight::whole_kg(DEFAULT_MIN_WEIGHT_KG) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub packing: PackingConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let weight = |key: &'static str, default: u32| -> Result<Weight, ConfigError> {
            match lookup(key) {
                None => Ok(Weight::whole_kg(default)),
                Some(raw) => Decimal::from_str(raw.trim())
                    .ok()
                    .and_then(|d| Weight::kg(d).ok())
                    .ok_or(ConfigError::Invalid { key, value: raw }),
            }
        };
        let port = match lookup(PORT_VAR) {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key: PORT_VAR, value: raw })?,
        };
        let packing = PackingConfig::new(
            weight(MAX_WEIGHT_VAR, DEFAULT_MAX_WEIGHT_KG)?,
            weight(MIN_WEIGHT_VAR, DEFAULT_MIN_WEIGHT_KG)?,
        )?;
        Ok(Self { port, packing })
    }
}
