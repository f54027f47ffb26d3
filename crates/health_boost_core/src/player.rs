use crate::attribute::HealthCapacity;
use crate::bonus::Position;

/// Host view of one online player.
///
/// Implementations hand out the player's max-health attribute and current
/// health. The attribute may be missing for entities without health.
pub trait PlayerHandle {
    type Capacity: HealthCapacity;

    fn name(&self) -> &str;

    fn position(&self) -> Position;

    fn health(&self) -> f64;

    fn set_health(&mut self, health: f64);

    fn is_dead(&self) -> bool;

    fn max_health(&self) -> Option<&Self::Capacity>;

    fn max_health_mut(&mut self) -> Option<&mut Self::Capacity>;
}

impl<P: PlayerHandle + ?Sized> PlayerHandle for &mut P {
    type Capacity = P::Capacity;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn position(&self) -> Position {
        (**self).position()
    }

    fn health(&self) -> f64 {
        (**self).health()
    }

    fn set_health(&mut self, health: f64) {
        (**self).set_health(health);
    }

    fn is_dead(&self) -> bool {
        (**self).is_dead()
    }

    fn max_health(&self) -> Option<&Self::Capacity> {
        (**self).max_health()
    }

    fn max_health_mut(&mut self) -> Option<&mut Self::Capacity> {
        (**self).max_health_mut()
    }
}
