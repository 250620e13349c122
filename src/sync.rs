//! Full-replacement synchronization of engine rules from persisted state.
//!
//! Every trigger (blocklist edit, gating transition, app startup) routes
//! through [`sync_rules`]: read `(enabled, blocklist)` from the store,
//! compile the target rule set, remove everything currently installed, then
//! install the fresh batch. There is no incremental patching; numeric rule
//! ids are reissued per batch and carry no meaning across syncs.
//!
//! Best-effort semantics: a failed engine query is treated as "nothing
//! installed" and the sync proceeds; a failed update is logged and surfaced
//! without retry, since the next trigger rebuilds from scratch anyway.

use serde::Serialize;

use crate::core::rules::compile_rules;
use crate::db::Database;
use crate::engine::RuleEngine;
use crate::error::AppError;

/// Outcome of one synchronization pass, for logging and acknowledgments.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SyncSummary {
    pub enabled: bool,
    pub removed: usize,
    pub added: usize,
}

/// Make the engine's installed rules match the persisted state exactly.
pub async fn sync_rules(db: &Database, engine: &dyn RuleEngine) -> Result<SyncSummary, AppError> {
    let enabled = db
        .blocker_enabled()
        .map_err(|e| AppError::Storage(e.to_string()))?;
    let domains = db
        .blocked_domains()
        .map_err(|e| AppError::Storage(e.to_string()))?;

    let stale_ids = match engine.list_rule_ids().await {
        Ok(ids) => ids,
        Err(e) => {
            let err = AppError::EngineQuery(e.to_string());
            tracing::warn!("Failed to list installed rules, assuming none: {err}");
            Vec::new()
        }
    };

    let rules = compile_rules(enabled, &domains);

    if !stale_ids.is_empty() {
        engine.update_rules(&stale_ids, &[]).await.map_err(|e| {
            tracing::error!("Failed to remove {} stale rule(s): {e:#}", stale_ids.len());
            AppError::EngineUpdate(e.to_string())
        })?;
    }

    if !rules.is_empty() {
        engine.update_rules(&[], &rules).await.map_err(|e| {
            tracing::error!("Failed to install {} rule(s): {e:#}", rules.len());
            AppError::EngineUpdate(e.to_string())
        })?;
    }

    let summary = SyncSummary {
        enabled,
        removed: stale_ids.len(),
        added: rules.len(),
    };
    if summary.enabled {
        tracing::info!(
            "Rules synchronized: removed {}, installed {}",
            summary.removed,
            summary.added
        );
    } else {
        tracing::info!(
            "Blocker disabled: removed {} stale rule(s), none installed",
            summary.removed
        );
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::core::rules::BlockRule;
    use crate::db::tests::open_memory_db;
    use crate::engine::memory::MemoryRuleEngine;

    /// Engine wrapper with switchable failures and an update-call counter.
    struct FlakyEngine {
        inner: MemoryRuleEngine,
        fail_list: bool,
        fail_update: bool,
        update_calls: AtomicUsize,
    }

    impl FlakyEngine {
        fn new(fail_list: bool, fail_update: bool) -> Self {
            Self {
                inner: MemoryRuleEngine::new(),
                fail_list,
                fail_update,
                update_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RuleEngine for FlakyEngine {
        async fn list_rule_ids(&self) -> anyhow::Result<Vec<u32>> {
            if self.fail_list {
                anyhow::bail!("engine unavailable");
            }
            self.inner.list_rule_ids().await
        }

        async fn update_rules(&self, remove: &[u32], add: &[BlockRule]) -> anyhow::Result<()> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_update {
                anyhow::bail!("rule batch rejected");
            }
            self.inner.update_rules(remove, add).await
        }
    }

    #[tokio::test]
    async fn test_sync_installs_one_rule_per_domain() {
        let db = open_memory_db();
        db.add_domain("example.com").unwrap();
        db.add_domain("sub.example.com").unwrap();
        let engine = MemoryRuleEngine::new();

        let summary = sync_rules(&db, &engine).await.unwrap();
        assert!(summary.enabled);
        assert_eq!(summary.added, 2);

        let installed = engine.installed_rules();
        assert_eq!(installed.len(), 2);
        assert_eq!(installed[0].url_filter, "||example.com^");
        assert_eq!(installed[1].url_filter, "||sub.example.com^");
    }

    #[tokio::test]
    async fn test_sync_disabled_clears_all_rules() {
        let db = open_memory_db();
        db.add_domain("example.com").unwrap();
        let engine = MemoryRuleEngine::new();
        sync_rules(&db, &engine).await.unwrap();
        assert_eq!(engine.rule_count(), 1);

        db.set_blocker_enabled(false).unwrap();
        let summary = sync_rules(&db, &engine).await.unwrap();
        assert!(!summary.enabled);
        assert_eq!(summary.removed, 1);
        assert_eq!(summary.added, 0);
        assert_eq!(engine.rule_count(), 0);
    }

    #[tokio::test]
    async fn test_sync_twice_is_idempotent() {
        let db = open_memory_db();
        db.add_domain("example.com").unwrap();
        db.add_domain("news.site.org").unwrap();
        let engine = MemoryRuleEngine::new();

        sync_rules(&db, &engine).await.unwrap();
        let first: Vec<_> = engine
            .installed_rules()
            .iter()
            .map(|r| (r.url_filter.clone(), r.resource_types.clone()))
            .collect();

        sync_rules(&db, &engine).await.unwrap();
        let second: Vec<_> = engine
            .installed_rules()
            .iter()
            .map(|r| (r.url_filter.clone(), r.resource_types.clone()))
            .collect();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_sync_replaces_stale_rules_wholesale() {
        let db = open_memory_db();
        db.add_domain("example.com").unwrap();
        db.add_domain("other.net").unwrap();
        let engine = MemoryRuleEngine::new();
        sync_rules(&db, &engine).await.unwrap();

        db.remove_domain("example.com").unwrap();
        let summary = sync_rules(&db, &engine).await.unwrap();
        assert_eq!(summary.removed, 2);
        assert_eq!(summary.added, 1);

        let installed = engine.installed_rules();
        assert_eq!(installed.len(), 1);
        assert_eq!(installed[0].url_filter, "||other.net^");
        // Ids restart from 1 in the fresh batch.
        assert_eq!(installed[0].id, 1);
    }

    #[tokio::test]
    async fn test_sync_survives_query_failure() {
        let db = open_memory_db();
        db.add_domain("example.com").unwrap();
        let engine = FlakyEngine::new(true, false);

        let summary = sync_rules(&db, &engine).await.unwrap();
        assert_eq!(summary.removed, 0);
        assert_eq!(summary.added, 1);
        assert_eq!(engine.inner.rule_count(), 1);
    }

    #[tokio::test]
    async fn test_sync_surfaces_update_failure_without_retry() {
        let db = open_memory_db();
        db.add_domain("example.com").unwrap();
        let engine = FlakyEngine::new(false, true);

        let err = sync_rules(&db, &engine).await.unwrap_err();
        assert_eq!(err.kind(), "EngineUpdate");
        assert_eq!(engine.update_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sync_with_nothing_to_do_makes_no_update_calls() {
        let db = open_memory_db();
        let engine = FlakyEngine::new(false, false);

        let summary = sync_rules(&db, &engine).await.unwrap();
        assert_eq!(summary.removed, 0);
        assert_eq!(summary.added, 0);
        assert_eq!(engine.update_calls.load(Ordering::SeqCst), 0);
    }
}
