use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::attribute::{InvalidModifierKey, ModifierKey};
use crate::bonus::BonusRule;
use crate::error::ConfigError;

pub const DEFAULT_NAMESPACE: &str = "healthboost";
pub const DEFAULT_MODIFIER_KEY: &str = "boundary_hp_boost_modifier";
pub const DEFAULT_TRACE_FILTER: &str = "info";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoostConfig {
    #[serde(default)]
    pub bonus: BonusRule,
    #[serde(default)]
    pub modifier: ModifierConfig,
    #[serde(default)]
    pub join: JoinConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl BoostConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg = Self::from_toml(&data)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(cfg)
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        let cfg: BoostConfig = toml::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rule = &self.bonus;
        for (field, value) in [
            ("step_distance", rule.step_distance),
            ("nether_scale", rule.nether_scale),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(rule.amount_per_step.is_finite() && rule.amount_per_step >= 0.0) {
            return Err(ConfigError::NegativeAmount(rule.amount_per_step));
        }
        self.modifier.key()?;
        Ok(())
    }

    pub fn modifier_key(&self) -> Result<ModifierKey, InvalidModifierKey> {
        self.modifier.key()
    }

    pub fn trace_filter(&self) -> &str {
        self.telemetry
            .trace_filter
            .as_deref()
            .unwrap_or(DEFAULT_TRACE_FILTER)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_key")]
    pub key: String,
}

impl ModifierConfig {
    pub fn key(&self) -> Result<ModifierKey, InvalidModifierKey> {
        ModifierKey::new(&self.namespace, &self.key)
    }
}

impl Default for ModifierConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            key: default_key(),
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_key() -> String {
    DEFAULT_MODIFIER_KEY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinConfig {
    /// Reset a base max health above the host default when a player joins.
    #[serde(default = "default_true")]
    pub reset_base_to_default: bool,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            reset_base_to_default: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub trace_filter: Option<String>,
}
