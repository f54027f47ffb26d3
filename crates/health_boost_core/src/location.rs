use serde::{Deserialize, Serialize};

use crate::bonus::{Position, WorldKind};

/// Full location as reported by movement callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub world: String,
    pub kind: WorldKind,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub fn new(world: impl Into<String>, kind: WorldKind, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            kind,
            x,
            y,
            z,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.kind, self.x, self.z)
    }

    pub fn block(&self) -> (i64, i64, i64) {
        (
            self.x.floor() as i64,
            self.y.floor() as i64,
            self.z.floor() as i64,
        )
    }

    /// True when moving from `self` to `other` crosses a block boundary or
    /// changes world. Sub-block motion is ignored.
    pub fn crosses_block(&self, other: &Location) -> bool {
        self.world != other.world || self.block() != other.block()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overworld(x: f64, y: f64, z: f64) -> Location {
        Location::new("world", WorldKind::Normal, x, y, z)
    }

    #[test]
    fn sub_block_motion_is_ignored() {
        let from = overworld(10.1, 64.0, -3.2);
        let to = overworld(10.9, 64.5, -3.9);
        assert!(!from.crosses_block(&to));
    }

    #[test]
    fn negative_coordinates_floor_towards_minus_infinity() {
        let from = overworld(-0.5, 64.0, 0.0);
        let to = overworld(0.5, 64.0, 0.0);
        assert_eq!((-1, 64, 0), from.block());
        assert!(from.crosses_block(&to));
    }

    #[test]
    fn vertical_and_world_changes_count() {
        let from = overworld(1.0, 64.0, 1.0);
        assert!(from.crosses_block(&overworld(1.0, 65.0, 1.0)));

        let nether = Location::new("world_nether", WorldKind::Nether, 1.0, 64.0, 1.0);
        assert!(from.crosses_block(&nether));
    }
}
