//! PIN-gated enable/disable protocol for the blocker toggle.
//!
//! The gate asks for a PIN on the *disabling* edge, and sets one lazily on
//! the first enabling edge when none exists yet. Turning protection on is
//! never blocked by a challenge once a PIN is on record.
//!
//! [`transition`] is pure: it computes the next state and a persistence
//! effect from the current state, the request, and the stored digest. The
//! command layer owns applying the effect (persist, then resync rules) and
//! holds the single live [`GateState`].

use serde::Serialize;

use crate::core::pin;
use crate::error::AppError;

/// Current position of the toggle protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Disabled,
    Enabled,
    /// First enable with no PIN on record: waiting for the user to choose one.
    AwaitingPinSetup,
    /// Disable requested with a PIN on record: waiting for verification.
    AwaitingPinVerification,
}

impl GateState {
    /// Derive the resting state from the persisted enabled flag.
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            GateState::Enabled
        } else {
            GateState::Disabled
        }
    }

}

/// A UI-originated request against the gate.
#[derive(Debug, Clone)]
pub enum GateRequest {
    Enable,
    Disable,
    SubmitPin(String),
    Cancel,
}

/// Persistence side effect of a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEffect {
    /// Nothing to persist; the stored toggle state is unchanged.
    None,
    /// Persist the enabled flag (plus a newly created PIN digest on first
    /// setup), then run a full rule resync.
    Persist {
        enabled: bool,
        new_pin_digest: Option<String>,
    },
}

/// Outcome of a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: GateState,
    pub effect: GateEffect,
}

impl Transition {
    fn stay(state: GateState) -> Self {
        Transition {
            next: state,
            effect: GateEffect::None,
        }
    }
}

/// Compute the next gate state for `request`, given the stored PIN digest.
///
/// Pure: no storage or engine access happens here. A rejected submission
/// (bad length during setup, digest mismatch during verification) returns
/// `InvalidInput` and the caller keeps its current state; nothing is
/// persisted and no resync runs.
pub fn transition(
    current: GateState,
    request: &GateRequest,
    stored_digest: Option<&str>,
) -> Result<Transition, AppError> {
    match (current, request) {
        // Requests for the state we are already in are idempotent no-ops.
        (GateState::Enabled, GateRequest::Enable)
        | (GateState::Disabled, GateRequest::Disable) => Ok(Transition::stay(current)),

        (GateState::Disabled, GateRequest::Enable) => match stored_digest {
            None => Ok(Transition::stay(GateState::AwaitingPinSetup)),
            Some(_) => Ok(Transition {
                next: GateState::Enabled,
                effect: GateEffect::Persist {
                    enabled: true,
                    new_pin_digest: None,
                },
            }),
        },

        (GateState::Enabled, GateRequest::Disable) => match stored_digest {
            None => Ok(Transition {
                next: GateState::Disabled,
                effect: GateEffect::Persist {
                    enabled: false,
                    new_pin_digest: None,
                },
            }),
            Some(_) => Ok(Transition::stay(GateState::AwaitingPinVerification)),
        },

        (GateState::AwaitingPinSetup, GateRequest::SubmitPin(p)) => {
            pin::validate_pin_length(p)?;
            Ok(Transition {
                next: GateState::Enabled,
                effect: GateEffect::Persist {
                    enabled: true,
                    new_pin_digest: Some(pin::pin_digest(p)),
                },
            })
        }

        (GateState::AwaitingPinVerification, GateRequest::SubmitPin(p)) => {
            match stored_digest {
                // No PIN on record means no PIN protection is configured;
                // disable unconditionally rather than locking the user out.
                None => Ok(Transition {
                    next: GateState::Disabled,
                    effect: GateEffect::Persist {
                        enabled: false,
                        new_pin_digest: None,
                    },
                }),
                Some(stored) if pin::pin_digest(p) == *stored => Ok(Transition {
                    next: GateState::Disabled,
                    effect: GateEffect::Persist {
                        enabled: false,
                        new_pin_digest: None,
                    },
                }),
                Some(_) => Err(AppError::InvalidInput("Incorrect PIN".into())),
            }
        }

        // Cancel abandons the challenge and reverts to the persisted state.
        (GateState::AwaitingPinSetup, GateRequest::Cancel) => {
            Ok(Transition::stay(GateState::Disabled))
        }
        (GateState::AwaitingPinVerification, GateRequest::Cancel) => {
            Ok(Transition::stay(GateState::Enabled))
        }
        (GateState::Disabled, GateRequest::Cancel)
        | (GateState::Enabled, GateRequest::Cancel) => Ok(Transition::stay(current)),

        // Toggle requests while a challenge is up keep the challenge open.
        (GateState::AwaitingPinSetup, GateRequest::Enable)
        | (GateState::AwaitingPinSetup, GateRequest::Disable)
        | (GateState::AwaitingPinVerification, GateRequest::Enable)
        | (GateState::AwaitingPinVerification, GateRequest::Disable) => {
            Ok(Transition::stay(current))
        }

        (GateState::Disabled, GateRequest::SubmitPin(_))
        | (GateState::Enabled, GateRequest::SubmitPin(_)) => Err(AppError::InvalidInput(
            "No PIN challenge in progress".into(),
        )),
    }
}
