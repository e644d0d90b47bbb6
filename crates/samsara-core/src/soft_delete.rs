// ── Soft-delete toggle ──
//
// active ⇄ inactive, reversible without limit. Some entities insist on a
// reason when deactivating; reactivation always clears it.

use serde::Serialize;

use crate::error::CoreError;

/// Whether a deactivation must carry a `motivo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonPolicy {
    Required,
    Optional,
}

/// Activation state of a soft-deletable record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Active,
    Inactive { motivo: String },
}

impl Activation {
    /// Read the state off a record's `inativo` / `motivo` fields.
    pub fn from_fields(inativo: bool, motivo: &str) -> Self {
        if inativo {
            Self::Inactive {
                motivo: motivo.to_owned(),
            }
        } else {
            Self::Active
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Transition to inactive.
    ///
    /// Under [`ReasonPolicy::Required`] a missing or blank reason is
    /// rejected and the state is left unchanged.
    pub fn deactivate(
        self,
        motivo: Option<&str>,
        policy: ReasonPolicy,
        entity: &'static str,
    ) -> Result<Self, CoreError> {
        let motivo = motivo.map(str::trim).unwrap_or_default();
        if policy == ReasonPolicy::Required && motivo.is_empty() {
            return Err(CoreError::ReasonRequired { entity });
        }
        Ok(Self::Inactive {
            motivo: motivo.to_owned(),
        })
    }

    /// Transition to active, clearing the reason.
    pub fn reactivate(self) -> Self {
        Self::Active
    }

    pub fn to_patch(&self) -> ActivationPatch {
        match self {
            Self::Active => ActivationPatch {
                inativo: false,
                motivo: String::new(),
            },
            Self::Inactive { motivo } => ActivationPatch {
                inativo: true,
                motivo: motivo.clone(),
            },
        }
    }
}

/// PATCH body for the toggle. `motivo` is always sent so reactivation
/// clears it on the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivationPatch {
    pub inativo: bool,
    pub motivo: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn required_reason_rejects_blank() {
        let err = Activation::Active
            .deactivate(Some("   "), ReasonPolicy::Required, "operador")
            .unwrap_err();
        assert!(matches!(err, CoreError::ReasonRequired { entity: "operador" }));

        let err = Activation::Active
            .deactivate(None, ReasonPolicy::Required, "multa")
            .unwrap_err();
        assert!(matches!(err, CoreError::ReasonRequired { .. }));
    }

    #[test]
    fn optional_reason_allows_none() {
        let state = Activation::Active
            .deactivate(None, ReasonPolicy::Optional, "equipamento")
            .unwrap();
        assert_eq!(
            state.to_patch(),
            ActivationPatch {
                inativo: true,
                motivo: String::new()
            }
        );
    }

    #[test]
    fn deactivate_then_reactivate_clears_reason() {
        let inactive = Activation::Active
            .deactivate(Some("inactive license"), ReasonPolicy::Required, "operador")
            .unwrap();
        assert_eq!(
            inactive,
            Activation::Inactive {
                motivo: "inactive license".into()
            }
        );

        let active = inactive.reactivate();
        assert!(active.is_active());
        assert_eq!(
            active.to_patch(),
            ActivationPatch {
                inativo: false,
                motivo: String::new()
            }
        );
    }

    #[test]
    fn toggle_is_reversible_repeatedly() {
        let mut state = Activation::from_fields(false, "");
        for round in 0..3 {
            state = state
                .deactivate(Some("parado"), ReasonPolicy::Optional, "obra")
                .unwrap();
            assert!(!state.is_active(), "round {round}");
            state = state.reactivate();
            assert!(state.is_active(), "round {round}");
        }
    }
}
