use crate::attribute::{InvalidModifierKey, ModifierRejected};

/// Why a reconciliation cycle was skipped.
///
/// Every variant is recoverable: the next triggering event retries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReconcileError {
    #[error("player {player} has no max-health attribute")]
    MissingAttribute { player: String },
    #[error("health boost is not active; modifier key is not initialised")]
    Inactive,
    #[error("host rejected the health modifier for {player}: {source}")]
    ModifierRejected {
        player: String,
        #[source]
        source: ModifierRejected,
    },
}

impl ReconcileError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            ReconcileError::MissingAttribute { .. }
            | ReconcileError::Inactive
            | ReconcileError::ModifierRejected { .. } => true,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ReconcileError::MissingAttribute { .. } => "missing_attribute",
            ReconcileError::Inactive => "inactive",
            ReconcileError::ModifierRejected { .. } => "modifier_rejected",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("bonus.{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("bonus.amount_per_step must be a non-negative finite number, got {0}")]
    NegativeAmount(f64),
    #[error("invalid modifier key: {0}")]
    Key(#[from] InvalidModifierKey),
}
