//! Declarative block-rule compilation from the persisted blocklist.
//!
//! Rules are ephemeral: each compilation assigns fresh sequential ids and
//! every sync replaces the engine's installed set wholesale. Two runs over
//! the same `(enabled, domains)` input produce identical patterns and
//! resource coverage, only the numeric ids are reissued.

use serde::{Deserialize, Serialize};

use crate::config;

/// What the enforcement engine should do with a matching request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Block,
}

/// Resource-fetch categories a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    MainFrame,
    SubFrame,
    Script,
    Image,
    Stylesheet,
    Object,
    Xmlhttprequest,
    Ping,
    CspReport,
    Media,
    Websocket,
    Webtransport,
    Font,
    Other,
}

impl ResourceType {
    /// Every resource category. Blocklist rules are blanket blocks, not
    /// content-type-selective, so each compiled rule carries all of these.
    pub const ALL: [ResourceType; 14] = [
        ResourceType::MainFrame,
        ResourceType::SubFrame,
        ResourceType::Script,
        ResourceType::Image,
        ResourceType::Stylesheet,
        ResourceType::Object,
        ResourceType::Xmlhttprequest,
        ResourceType::Ping,
        ResourceType::CspReport,
        ResourceType::Media,
        ResourceType::Websocket,
        ResourceType::Webtransport,
        ResourceType::Font,
        ResourceType::Other,
    ];
}

/// A single declarative block rule handed to the enforcement engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRule {
    pub id: u32,
    pub priority: u32,
    pub action: RuleAction,
    /// `||domain^` pattern: matches the domain and all of its subdomains
    /// on any scheme.
    pub url_filter: String,
    pub resource_types: Vec<ResourceType>,
}

/// The `||domain^` filter pattern for a domain.
pub fn url_filter_for(domain: &str) -> String {
    format!("||{domain}^")
}

/// Compile the exact rule set that should be active for the given state.
///
/// Disabled means an empty set. Enabled means one blanket block rule per
/// domain, ids assigned sequentially from [`config::FIRST_RULE_ID`] within
/// this batch. Blank entries are skipped with a warning rather than
/// poisoning the whole batch.
pub fn compile_rules(enabled: bool, domains: &[String]) -> Vec<BlockRule> {
    if !enabled {
        return Vec::new();
    }

    let mut next_id = config::FIRST_RULE_ID;
    let mut rules = Vec::with_capacity(domains.len());
    for entry in domains {
        let domain = entry.trim().to_ascii_lowercase();
        if domain.is_empty() {
            tracing::warn!("Skipping blank blocklist entry");
            continue;
        }
        rules.push(BlockRule {
            id: next_id,
            priority: config::BLOCK_RULE_PRIORITY,
            action: RuleAction::Block,
            url_filter: url_filter_for(&domain),
            resource_types: ResourceType::ALL.to_vec(),
        });
        next_id += 1;
    }
    rules
}
