use serde::{Deserialize, Serialize};

/// Result of a successful reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ReconcileOutcome {
    /// The applied bonus already matched the position.
    Unchanged { bonus: f64 },
    Applied {
        previous: f64,
        bonus: f64,
        /// Tagged modifiers removed before applying `bonus`.
        removed: usize,
        max_health: f64,
        health: f64,
    },
}

impl ReconcileOutcome {
    pub fn bonus(&self) -> f64 {
        match self {
            ReconcileOutcome::Unchanged { bonus } | ReconcileOutcome::Applied { bonus, .. } => {
                *bonus
            }
        }
    }

    pub fn changed(&self) -> bool {
        matches!(self, ReconcileOutcome::Applied { .. })
    }
}

/// Outcome of the join-time base value correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseReset {
    pub previous_base: f64,
    pub base: f64,
    pub health_clamped: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcomes_serialise_with_a_status_tag() {
        let unchanged = serde_json::to_value(ReconcileOutcome::Unchanged { bonus: 2.0 }).unwrap();
        assert_eq!(json!({ "status": "unchanged", "bonus": 2.0 }), unchanged);

        let applied = serde_json::to_value(ReconcileOutcome::Applied {
            previous: 0.0,
            bonus: 4.0,
            removed: 1,
            max_health: 24.0,
            health: 20.0,
        })
        .unwrap();
        assert_eq!("applied", applied["status"]);
        assert_eq!(1, applied["removed"]);
    }
}
