//! Centralized runtime constants for FocusGuard.
//!
//! All tunable limits and defaults are collected here so they can be found
//! and adjusted in a single place rather than scattered across modules.

/// Minimum accepted PIN length (characters).
pub const PIN_MIN_LEN: usize = 4;

/// Maximum accepted PIN length (characters).
pub const PIN_MAX_LEN: usize = 8;

/// Blocker state assumed when no flag has ever been persisted.
pub const DEFAULT_BLOCKER_ENABLED: bool = true;

/// First rule id assigned within each compiled batch. Ids restart here on
/// every sync; they carry no meaning across syncs.
pub const FIRST_RULE_ID: u32 = 1;

/// Priority assigned to every compiled block rule.
pub const BLOCK_RULE_PRIORITY: u32 = 1;

/// Maximum length of a single domain label (RFC 1035).
pub const MAX_DOMAIN_LABEL_LEN: usize = 63;
