//! Envelope lifecycle: `Unsigned → Signing → Signed → Submitting → Confirmed | Failed`.
//!
//! Transitions never skip a state. `Confirmed` and `Failed` are terminal, and a
//! failed envelope is never resubmitted: a retry means building a new envelope
//! with a fresh nonce.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use crate::error::StateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeState {
    Unsigned,
    Signing,
    Signed,
    Submitting,
    Confirmed,
    Failed,
}

impl EnvelopeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unsigned => "unsigned",
            Self::Signing => "signing",
            Self::Signed => "signed",
            Self::Submitting => "submitting",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }

    /// Whether `next` directly follows `self`.
    pub fn can_transition_to(&self, next: EnvelopeState) -> bool {
        matches!(
            (self, next),
            (Self::Unsigned, Self::Signing)
                | (Self::Signing, Self::Signed)
                | (Self::Signed, Self::Submitting)
                | (Self::Submitting, Self::Confirmed)
                | (Self::Submitting, Self::Failed)
        )
    }
}

impl std::fmt::Display for EnvelopeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tracks one envelope's position in the lifecycle plus every state it passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeLifecycle {
    state: EnvelopeState,
    history: Vec<EnvelopeState>,
    tx_hash: Option<B256>,
    failure: Option<String>,
}

impl EnvelopeLifecycle {
    pub fn new() -> Self {
        Self {
            state: EnvelopeState::Unsigned,
            history: vec![EnvelopeState::Unsigned],
            tx_hash: None,
            failure: None,
        }
    }

    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Every state visited so far, starting with `Unsigned`.
    pub fn history(&self) -> &[EnvelopeState] {
        &self.history
    }

    pub fn tx_hash(&self) -> Option<B256> {
        self.tx_hash
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    fn transition(&mut self, next: EnvelopeState) -> Result<(), StateError> {
        if self.state.is_terminal() {
            return Err(StateError::Terminal(self.state));
        }
        if !self.state.can_transition_to(next) {
            return Err(StateError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::debug!(from = %self.state, to = %next, "Envelope transition");
        self.state = next;
        self.history.push(next);
        Ok(())
    }

    pub fn begin_signing(&mut self) -> Result<(), StateError> {
        self.transition(EnvelopeState::Signing)
    }

    pub fn mark_signed(&mut self) -> Result<(), StateError> {
        self.transition(EnvelopeState::Signed)
    }

    pub fn begin_submitting(&mut self) -> Result<(), StateError> {
        self.transition(EnvelopeState::Submitting)
    }

    pub fn confirm(&mut self, tx_hash: B256) -> Result<(), StateError> {
        self.transition(EnvelopeState::Confirmed)?;
        self.tx_hash = Some(tx_hash);
        Ok(())
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), StateError> {
        self.transition(EnvelopeState::Failed)?;
        self.failure = Some(reason.into());
        Ok(())
    }
}

impl Default for EnvelopeLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
