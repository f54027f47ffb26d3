//! Distance based health bonus.
//!
//! The bonus grows in fixed steps with the Manhattan distance from the world
//! origin. Nether coordinates are scaled to their overworld equivalent first,
//! and worlds without a surface never grant a bonus.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_STEP_DISTANCE: f64 = 5000.0;
pub const DEFAULT_AMOUNT_PER_STEP: f64 = 2.0;
pub const DEFAULT_NETHER_SCALE: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorldKind {
    Normal,
    Nether,
    Other,
}

impl WorldKind {
    /// Worlds whose coordinates map onto the overworld surface.
    pub fn is_surface_bound(self) -> bool {
        matches!(self, WorldKind::Normal | WorldKind::Nether)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorldKind::Normal => "normal",
            WorldKind::Nether => "nether",
            WorldKind::Other => "other",
        }
    }
}

impl fmt::Display for WorldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown world kind `{0}` (expected normal, nether or other)")]
pub struct UnknownWorldKind(pub String);

impl FromStr for WorldKind {
    type Err = UnknownWorldKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" | "overworld" => Ok(WorldKind::Normal),
            "nether" => Ok(WorldKind::Nether),
            "other" | "end" | "the_end" | "custom" => Ok(WorldKind::Other),
            _ => Err(UnknownWorldKind(s.to_string())),
        }
    }
}

/// Snapshot of where a player stands, taken when the bonus is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub world: WorldKind,
    pub x: f64,
    pub z: f64,
}

impl Position {
    pub fn new(world: WorldKind, x: f64, z: f64) -> Self {
        Self { world, x, z }
    }
}

/// Tunables of the bonus curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusRule {
    pub step_distance: f64,
    pub amount_per_step: f64,
    pub nether_scale: f64,
}

impl Default for BonusRule {
    fn default() -> Self {
        Self {
            step_distance: DEFAULT_STEP_DISTANCE,
            amount_per_step: DEFAULT_AMOUNT_PER_STEP,
            nether_scale: DEFAULT_NETHER_SCALE,
        }
    }
}

impl BonusRule {
    /// Number of whole steps the position is away from the origin.
    ///
    /// The float to integer cast saturates, so NaN yields zero steps and an
    /// infinite distance yields `u32::MAX`.
    pub fn steps(&self, position: &Position) -> u32 {
        if !position.world.is_surface_bound() {
            return 0;
        }
        let scale = match position.world {
            WorldKind::Nether => self.nether_scale,
            _ => 1.0,
        };
        let distance = (position.x * scale).abs() + (position.z * scale).abs();
        (distance / self.step_distance).floor() as u32
    }

    pub fn compute(&self, position: &Position) -> f64 {
        self.amount_per_step * f64::from(self.steps(position))
    }
}

/// Bonus for `position` under the default curve.
pub fn compute(position: &Position) -> f64 {
    BonusRule::default().compute(position)
}
