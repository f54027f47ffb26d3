//! Distance-scaled maximum health.
//!
//! Players gain a fixed amount of maximum health for every step they travel
//! away from the world origin. [`bonus`] holds the pure calculation,
//! [`reconcile`] applies it to a host-owned max-health attribute and
//! [`lifecycle`] maps host callbacks onto it.

pub mod attribute;
pub mod bonus;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod location;
pub mod player;
pub mod reconcile;
pub mod report;

pub use attribute::{
    AttributeModifier, HealthCapacity, InvalidModifierKey, MaxHealthAttribute, ModifierKey,
    ModifierRejected, Operation, DEFAULT_MAX_HEALTH,
};
pub use bonus::{compute, BonusRule, Position, UnknownWorldKind, WorldKind};
pub use config::BoostConfig;
pub use error::{ConfigError, ReconcileError};
pub use lifecycle::HealthBoost;
pub use location::Location;
pub use player::PlayerHandle;
pub use reconcile::HealthReconciler;
pub use report::{BaseReset, ReconcileOutcome};
