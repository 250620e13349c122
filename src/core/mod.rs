//! Core logic: domain handling, PIN digests, gating, rule compilation.
//!
//! - [`domain`] — blocklist entry normalization and validation
//! - [`pin`] — one-way PIN digest and length policy
//! - [`gating`] — PIN-gated enable/disable state machine
//! - [`rules`] — declarative block-rule compilation

pub mod domain;
pub mod gating;
pub mod pin;
pub mod rules;

pub use gating::{GateEffect, GateRequest, GateState};
pub use rules::{BlockRule, RuleAction};
