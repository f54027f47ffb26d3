//! Host callbacks mapped onto the reconciler.
//!
//! Every handler runs synchronously and never fails: a skipped cycle is
//! logged and retried on the next event for that player.

use tracing::{info, warn};

use crate::attribute::ModifierKey;
use crate::config::BoostConfig;
use crate::error::{ConfigError, ReconcileError};
use crate::location::Location;
use crate::player::PlayerHandle;
use crate::reconcile::HealthReconciler;
use crate::report::ReconcileOutcome;

#[derive(Debug, Clone)]
pub struct HealthBoost {
    reconciler: HealthReconciler,
    key: ModifierKey,
    reset_base_on_join: bool,
}

impl Default for HealthBoost {
    fn default() -> Self {
        let config = BoostConfig::default();
        Self {
            reconciler: HealthReconciler::new(config.bonus),
            key: ModifierKey::default(),
            reset_base_on_join: config.join.reset_base_to_default,
        }
    }
}

impl HealthBoost {
    pub fn new(config: &BoostConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            reconciler: HealthReconciler::new(config.bonus),
            key: config.modifier_key()?,
            reset_base_on_join: config.join.reset_base_to_default,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.reconciler.is_active()
    }

    pub fn reconciler(&self) -> &HealthReconciler {
        &self.reconciler
    }

    pub fn key(&self) -> &ModifierKey {
        &self.key
    }

    /// Activates the modifier key and re-applies bonuses to every online
    /// player, e.g. after a reload. Returns how many players were updated.
    pub fn enable<I>(&mut self, players: I) -> usize
    where
        I: IntoIterator,
        I::Item: PlayerHandle,
    {
        self.reconciler.activate(self.key.clone());
        let updated = players
            .into_iter()
            .filter_map(|mut player| self.reconcile(&mut player))
            .filter(ReconcileOutcome::changed)
            .count();
        info!(
            target: "health_boost.lifecycle",
            key = %self.key,
            updated,
            "health boost enabled"
        );
        updated
    }

    /// Strips the bonus from every online player and deactivates the key.
    pub fn disable<I>(&mut self, players: I) -> usize
    where
        I: IntoIterator,
        I::Item: PlayerHandle,
    {
        let removed: usize = players
            .into_iter()
            .map(|mut player| self.remove(&mut player))
            .sum();
        self.reconciler.deactivate();
        info!(
            target: "health_boost.lifecycle",
            removed,
            "health boost disabled and all health modifiers removed"
        );
        removed
    }

    /// Clears leftovers without clamping health, so the reconcile that follows
    /// measures health against the restored maximum.
    pub fn on_join<P: PlayerHandle>(&self, player: &mut P) -> Option<ReconcileOutcome> {
        if let Err(err) = self.reconciler.strip_bonus(player) {
            log_skipped(player.name(), &err);
        }
        if self.reset_base_on_join {
            if let Some(reset) = self.reconciler.reset_base_to_default(player) {
                info!(
                    target: "health_boost.lifecycle",
                    player = player.name(),
                    previous_base = reset.previous_base,
                    base = reset.base,
                    health_clamped = reset.health_clamped,
                    "base max health above server default, reset"
                );
            }
        }
        self.reconcile(player)
    }

    pub fn on_quit<P: PlayerHandle>(&self, player: &mut P) -> usize {
        self.remove(player)
    }

    /// Reconciles only when the move crosses a block boundary or a world.
    pub fn on_move<P: PlayerHandle>(
        &self,
        player: &mut P,
        from: &Location,
        to: &Location,
    ) -> Option<ReconcileOutcome> {
        if !from.crosses_block(to) {
            return None;
        }
        self.reconcile(player)
    }

    pub fn on_world_change<P: PlayerHandle>(&self, player: &mut P) -> Option<ReconcileOutcome> {
        self.reconcile(player)
    }

    fn reconcile<P: PlayerHandle>(&self, player: &mut P) -> Option<ReconcileOutcome> {
        match self.reconciler.reconcile(player) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                log_skipped(player.name(), &err);
                None
            }
        }
    }

    fn remove<P: PlayerHandle>(&self, player: &mut P) -> usize {
        match self.reconciler.remove_bonus(player) {
            Ok(removed) => removed,
            Err(err) => {
                log_skipped(player.name(), &err);
                0
            }
        }
    }
}

fn log_skipped(player: &str, err: &ReconcileError) {
    warn!(
        target: "health_boost.lifecycle",
        player,
        code = err.code(),
        "skipping health reconciliation: {err}"
    );
}
