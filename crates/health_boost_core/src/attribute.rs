//! Max-health attribute model.
//!
//! The host owns the attribute; [`HealthCapacity`] is the slice of it this
//! crate needs. [`MaxHealthAttribute`] is a plain in-memory implementation
//! that follows the usual stacking order:
//!
//! ```text
//! value = clamp((base + Σ add) × (1 + Σ scalar) × Π (1 + multiplier), min, max)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_MODIFIER_KEY, DEFAULT_NAMESPACE};

/// Default base max health of a player.
pub const DEFAULT_MAX_HEALTH: f64 = 20.0;
pub const MAX_HEALTH_MIN: f64 = 1.0;
pub const MAX_HEALTH_MAX: f64 = 1024.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidModifierKey {
    #[error("modifier key namespace must not be empty")]
    EmptyNamespace,
    #[error("modifier key must not be empty")]
    EmptyKey,
    #[error("invalid character {ch:?} in `{value}`")]
    InvalidCharacter { value: String, ch: char },
    #[error("modifier key `{0}` is not of the form `namespace:key`")]
    MissingSeparator(String),
}

/// Namespaced identifier of a modifier, rendered as `namespace:key`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModifierKey {
    namespace: String,
    key: String,
}

impl ModifierKey {
    pub fn new(
        namespace: impl Into<String>,
        key: impl Into<String>,
    ) -> Result<Self, InvalidModifierKey> {
        let namespace = namespace.into().to_ascii_lowercase();
        let key = key.into().to_ascii_lowercase();
        if namespace.is_empty() {
            return Err(InvalidModifierKey::EmptyNamespace);
        }
        if key.is_empty() {
            return Err(InvalidModifierKey::EmptyKey);
        }
        check_chars(&namespace, is_key_char)?;
        check_chars(&key, |c| is_key_char(c) || c == '/')?;
        Ok(Self { namespace, key })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.')
}

fn check_chars(value: &str, allowed: impl Fn(char) -> bool) -> Result<(), InvalidModifierKey> {
    match value.chars().find(|c| !allowed(*c)) {
        Some(ch) => Err(InvalidModifierKey::InvalidCharacter {
            value: value.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}

impl Default for ModifierKey {
    /// `healthboost:boundary_hp_boost_modifier`
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            key: DEFAULT_MODIFIER_KEY.to_string(),
        }
    }
}

impl FromStr for ModifierKey {
    type Err = InvalidModifierKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (namespace, key) = value
            .split_once(':')
            .ok_or_else(|| InvalidModifierKey::MissingSeparator(value.to_string()))?;
        Self::new(namespace, key)
    }
}

impl TryFrom<String> for ModifierKey {
    type Error = InvalidModifierKey;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModifierKey> for String {
    fn from(key: ModifierKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for ModifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    AddNumber,
    AddScalar,
    MultiplyScalar1,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeModifier {
    pub key: ModifierKey,
    pub amount: f64,
    pub operation: Operation,
}

impl AttributeModifier {
    pub fn add_number(key: ModifierKey, amount: f64) -> Self {
        Self {
            key,
            amount,
            operation: Operation::AddNumber,
        }
    }
}

/// Reasons a host may refuse a modifier.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModifierRejected {
    #[error("modifier {0} is already applied")]
    Duplicate(ModifierKey),
    #[error("modifier {key} has a non-finite amount {amount}")]
    InvalidAmount { key: ModifierKey, amount: f64 },
}

/// Mutable max-health attribute of a single player.
pub trait HealthCapacity {
    fn base_value(&self) -> f64;

    fn set_base_value(&mut self, value: f64);

    /// Host default for the base value.
    fn default_value(&self) -> f64;

    /// Effective maximum after every modifier.
    fn value(&self) -> f64;

    fn modifiers(&self) -> &[AttributeModifier];

    fn add_modifier(&mut self, modifier: AttributeModifier) -> Result<(), ModifierRejected>;

    /// Removes every modifier tagged with `key` and returns how many went.
    fn remove_modifiers(&mut self, key: &ModifierKey) -> usize;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxHealthAttribute {
    base: f64,
    default: f64,
    min: f64,
    max: f64,
    modifiers: Vec<AttributeModifier>,
}

impl Default for MaxHealthAttribute {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HEALTH)
    }
}

impl MaxHealthAttribute {
    pub fn new(default: f64) -> Self {
        Self {
            base: default,
            default,
            min: MAX_HEALTH_MIN,
            max: MAX_HEALTH_MAX,
            modifiers: Vec::new(),
        }
    }

    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    /// Pushes a modifier without the duplicate check. Hosts can end up with
    /// stacked copies after a crash or a hot reload.
    pub fn push_unchecked(&mut self, modifier: AttributeModifier) {
        self.modifiers.push(modifier);
    }

    fn sum(&self, operation: Operation) -> f64 {
        self.modifiers
            .iter()
            .filter(|m| m.operation == operation)
            .map(|m| m.amount)
            .sum()
    }
}

impl HealthCapacity for MaxHealthAttribute {
    fn base_value(&self) -> f64 {
        self.base
    }

    fn set_base_value(&mut self, value: f64) {
        self.base = value;
    }

    fn default_value(&self) -> f64 {
        self.default
    }

    fn value(&self) -> f64 {
        let added = self.base + self.sum(Operation::AddNumber);
        let scaled = added * (1.0 + self.sum(Operation::AddScalar));
        let multiplied = self
            .modifiers
            .iter()
            .filter(|m| m.operation == Operation::MultiplyScalar1)
            .fold(scaled, |acc, m| acc * (1.0 + m.amount));
        if multiplied.is_nan() {
            return self.min;
        }
        multiplied.clamp(self.min, self.max)
    }

    fn modifiers(&self) -> &[AttributeModifier] {
        &self.modifiers
    }

    fn add_modifier(&mut self, modifier: AttributeModifier) -> Result<(), ModifierRejected> {
        if !modifier.amount.is_finite() {
            return Err(ModifierRejected::InvalidAmount {
                key: modifier.key,
                amount: modifier.amount,
            });
        }
        if self.modifiers.iter().any(|m| m.key == modifier.key) {
            return Err(ModifierRejected::Duplicate(modifier.key));
        }
        self.modifiers.push(modifier);
        Ok(())
    }

    fn remove_modifiers(&mut self, key: &ModifierKey) -> usize {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| &m.key != key);
        before - self.modifiers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> ModifierKey {
        ModifierKey::new("test", name).unwrap()
    }

    #[test]
    fn value_follows_stacking_order() {
        let mut attr = MaxHealthAttribute::default();
        attr.add_modifier(AttributeModifier::add_number(key("flat"), 4.0)).unwrap();
        attr.add_modifier(AttributeModifier {
            key: key("scalar"),
            amount: 0.5,
            operation: Operation::AddScalar,
        })
        .unwrap();
        attr.add_modifier(AttributeModifier {
            key: key("multiply"),
            amount: 1.0,
            operation: Operation::MultiplyScalar1,
        })
        .unwrap();
        // (20 + 4) * 1.5 * 2
        assert_eq!(72.0, attr.value());
    }

    #[test]
    fn value_is_clamped_to_range() {
        let attr = MaxHealthAttribute::default().with_base(0.0);
        assert_eq!(MAX_HEALTH_MIN, attr.value());
        let attr = MaxHealthAttribute::default().with_base(5000.0);
        assert_eq!(MAX_HEALTH_MAX, attr.value());
    }

    #[test]
    fn duplicate_and_non_finite_modifiers_are_rejected() {
        let mut attr = MaxHealthAttribute::default();
        attr.add_modifier(AttributeModifier::add_number(key("a"), 2.0)).unwrap();
        assert_eq!(
            Err(ModifierRejected::Duplicate(key("a"))),
            attr.add_modifier(AttributeModifier::add_number(key("a"), 4.0))
        );
        assert!(matches!(
            attr.add_modifier(AttributeModifier::add_number(key("b"), f64::NAN)),
            Err(ModifierRejected::InvalidAmount { .. })
        ));
        assert_eq!(22.0, attr.value());
    }

    #[test]
    fn remove_modifiers_drops_every_copy() {
        let mut attr = MaxHealthAttribute::default();
        attr.push_unchecked(AttributeModifier::add_number(key("a"), 2.0));
        attr.push_unchecked(AttributeModifier::add_number(key("a"), 2.0));
        attr.push_unchecked(AttributeModifier::add_number(key("b"), 1.0));
        assert_eq!(2, attr.remove_modifiers(&key("a")));
        assert_eq!(0, attr.remove_modifiers(&key("a")));
        assert_eq!(1, attr.modifiers().len());
    }

    #[test]
    fn keys_are_normalised_and_validated() {
        let k = ModifierKey::new("HealthBoost", "boundary_hp_boost_modifier").unwrap();
        assert_eq!("healthboost:boundary_hp_boost_modifier", k.to_string());
        assert_eq!(ModifierKey::default(), k);
        assert!(ModifierKey::new("ns", "nested/path").is_ok());
        assert_eq!(Err(InvalidModifierKey::EmptyKey), ModifierKey::new("ns", ""));
        assert!(matches!(
            ModifierKey::new("bad/ns", "key"),
            Err(InvalidModifierKey::InvalidCharacter { ch: '/', .. })
        ));
    }

    #[test]
    fn deserialised_keys_are_validated() {
        let json = "\"HealthBoost:boundary_hp_boost_modifier\"";
        let k: ModifierKey = serde_json::from_str(json).unwrap();
        assert_eq!(ModifierKey::default(), k);
        assert_eq!(
            "\"healthboost:boundary_hp_boost_modifier\"",
            serde_json::to_string(&k).unwrap()
        );

        assert!(serde_json::from_str::<ModifierKey>("\"bad ns:key\"").is_err());
        assert!(serde_json::from_str::<ModifierKey>("\"no_separator\"").is_err());
        assert!(serde_json::from_str::<ModifierKey>("\":key\"").is_err());
        assert!(serde_json::from_str::<AttributeModifier>(
            r#"{"key": "ns:Bad Key", "amount": 2.0, "operation": "add_number"}"#
        )
        .is_err());
    }
}
