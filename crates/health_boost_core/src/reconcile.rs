//! Keeps a player's tagged max-health modifier in line with their position.

use tracing::{debug, info};

use crate::attribute::{AttributeModifier, HealthCapacity, ModifierKey};
use crate::bonus::BonusRule;
use crate::error::ReconcileError;
use crate::player::PlayerHandle;
use crate::report::{BaseReset, ReconcileOutcome};

#[derive(Debug, Clone, Default)]
pub struct HealthReconciler {
    rule: BonusRule,
    key: Option<ModifierKey>,
}

impl HealthReconciler {
    /// Creates an inactive reconciler. Call [`Self::activate`] before use.
    pub fn new(rule: BonusRule) -> Self {
        Self { rule, key: None }
    }

    pub fn activate(&mut self, key: ModifierKey) {
        self.key = Some(key);
    }

    pub fn deactivate(&mut self) -> Option<ModifierKey> {
        self.key.take()
    }

    pub fn is_active(&self) -> bool {
        self.key.is_some()
    }

    pub fn key(&self) -> Option<&ModifierKey> {
        self.key.as_ref()
    }

    pub fn rule(&self) -> &BonusRule {
        &self.rule
    }

    /// Bonus currently carried by `player` under this reconciler's key.
    pub fn applied_bonus<P: PlayerHandle>(&self, player: &P) -> f64 {
        match (self.key.as_ref(), player.max_health()) {
            (Some(key), Some(attribute)) => attribute
                .modifiers()
                .iter()
                .find(|m| &m.key == key)
                .map_or(0.0, |m| m.amount),
            _ => 0.0,
        }
    }

    /// Replaces the tagged modifier with the bonus for the player's current
    /// position, keeping current health unless it no longer fits.
    ///
    /// A rejected modifier leaves the player without a bonus until the next
    /// successful cycle.
    pub fn reconcile<P: PlayerHandle>(
        &self,
        player: &mut P,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let key = self.key.as_ref().ok_or(ReconcileError::Inactive)?;
        let name = player.name().to_owned();
        let required = self.rule.compute(&player.position());
        let health_before = player.health();
        let dead = player.is_dead();

        let attribute = player
            .max_health_mut()
            .ok_or_else(|| ReconcileError::MissingAttribute {
                player: name.clone(),
            })?;

        let mut tagged = attribute.modifiers().iter().filter(|m| &m.key == key);
        let previous = tagged.next().map_or(0.0, |m| m.amount);
        let stacked = tagged.next().is_some();
        if !stacked && previous == required {
            return Ok(ReconcileOutcome::Unchanged { bonus: required });
        }

        let removed = attribute.remove_modifiers(key);
        if removed >= 2 {
            info!(
                target: "health_boost.reconcile",
                player = %name,
                removed,
                key = %key,
                "removed stacked health modifiers"
            );
        }

        if required > 0.0 {
            attribute
                .add_modifier(AttributeModifier::add_number(key.clone(), required))
                .map_err(|source| ReconcileError::ModifierRejected {
                    player: name.clone(),
                    source,
                })?;
        }

        let max_health = attribute.value();
        let mut target = health_before.min(max_health);
        if target <= 0.0 && !dead {
            target = 1.0_f64.min(max_health);
        }
        if player.health() != target {
            player.set_health(target);
        }

        debug!(
            target: "health_boost.reconcile",
            player = %name,
            previous,
            bonus = required,
            max_health,
            health = target,
            "health bonus applied"
        );

        Ok(ReconcileOutcome::Applied {
            previous,
            bonus: required,
            removed,
            max_health,
            health: target,
        })
    }

    /// Strips every tagged modifier from `player` without touching current
    /// health. Players without the attribute are left alone.
    pub fn strip_bonus<P: PlayerHandle>(&self, player: &mut P) -> Result<usize, ReconcileError> {
        let key = self.key.as_ref().ok_or(ReconcileError::Inactive)?;
        let name = player.name().to_owned();
        let Some(attribute) = player.max_health_mut() else {
            return Ok(0);
        };

        let removed = attribute.remove_modifiers(key);
        if removed >= 2 {
            info!(
                target: "health_boost.reconcile",
                player = %name,
                removed,
                key = %key,
                "removed stacked health modifiers"
            );
        }
        Ok(removed)
    }

    /// Like [`strip_bonus`](Self::strip_bonus), then clamps current health to
    /// the reduced maximum.
    pub fn remove_bonus<P: PlayerHandle>(&self, player: &mut P) -> Result<usize, ReconcileError> {
        let removed = self.strip_bonus(player)?;
        let max_health = player.max_health().map(|attribute| attribute.value());
        if let Some(max_health) = max_health.filter(|max| removed > 0 && player.health() > *max) {
            player.set_health(max_health);
        }
        Ok(removed)
    }

    /// Resets a base value that was pushed above the host default back down
    /// to it. Returns `None` when nothing needed correcting.
    pub fn reset_base_to_default<P: PlayerHandle>(&self, player: &mut P) -> Option<BaseReset> {
        let attribute = player.max_health_mut()?;
        let previous_base = attribute.base_value();
        let default = attribute.default_value();
        if previous_base <= default {
            return None;
        }
        attribute.set_base_value(default);

        let health_clamped = player.health() > default;
        if health_clamped {
            player.set_health(default);
        }
        Some(BaseReset {
            previous_base,
            base: default,
            health_clamped,
        })
    }
}
