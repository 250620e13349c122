//! Enforcement-engine seam: declarative rules in, request blocking out.
//!
//! The engine is an external collaborator from the blocker's point of view.
//! It holds whatever rule set was last installed and applies it to network
//! requests on its own; the blocker only ever talks to it through this
//! trait, and only in terms of full-set replacement (remove ids, add rules).
//!
//! Backends:
//! - [`memory::MemoryRuleEngine`] — in-process filter table consulted by the
//!   webview layer to veto navigations (`is_url_blocked`).

pub mod memory;

use async_trait::async_trait;

use crate::core::BlockRule;

/// Declarative rule store applied to all network requests.
///
/// The engine's primitive is additive/subtractive, not transactional: a
/// failed update may leave a partial state, which the next full sync
/// rebuilds. Implementations must tolerate removal of unknown ids.
#[async_trait]
pub trait RuleEngine: Send + Sync {
    /// Ids of every rule currently installed.
    async fn list_rule_ids(&self) -> anyhow::Result<Vec<u32>>;

    /// Remove the listed ids, then install the given rules.
    async fn update_rules(&self, remove: &[u32], add: &[BlockRule]) -> anyhow::Result<()>;
}
