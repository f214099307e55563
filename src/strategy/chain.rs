//! Incremental failure chains.
//!
//! Tests in a chain depend on everything that ran before them in the same
//! scope. Once one of them fails, running the rest is pointless: the
//! [`ChainTracker`] remembers the first failure per scope and turns every
//! later chain member of that scope into an expected failure without running
//! it.
//!
//! The harness asks [`ChainTracker::gate`] right before a chain member runs
//! and reports the outcome through [`ChainTracker::record`] right after.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{outcome::TestStatus, test::TestMeta};

/// The state of one chain scope.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChainState {
    /// No member of the chain failed yet.
    #[default]
    Clean,

    /// A member failed, the rest of the chain is short circuited.
    Failed { at: String },
}

/// Tracks the [`ChainState`] of every scope during a run.
///
/// Scopes start out clean and only get an entry once a member fails.
#[derive(Debug, Default)]
pub struct ChainTracker {
    scopes: HashMap<String, ChainState>,
}

impl ChainTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, scope: &str) -> &ChainState {
        const CLEAN: &ChainState = &ChainState::Clean;
        self.scopes.get(scope).unwrap_or(CLEAN)
    }

    /// Check whether a chain member may run.
    ///
    /// Returns the expected failure reason if an earlier member of the same
    /// scope failed.
    pub fn gate<Extra>(&self, meta: &TestMeta<Extra>) -> Option<String> {
        match self.state(&meta.scope) {
            ChainState::Clean => None,
            ChainState::Failed { at } => {
                trace!(test = %meta.name, failed = %at, "short circuiting chain member");
                Some(format!("previous test failed ({at})"))
            }
        }
    }

    /// Record the status of a chain member that ran.
    ///
    /// Only real failures move a scope into [`ChainState::Failed`], ignored
    /// and expected failures leave it as it is. The first failure sticks.
    pub fn record<Extra>(&mut self, meta: &TestMeta<Extra>, status: &TestStatus) {
        if !status.failed() {
            return;
        }

        if matches!(self.state(&meta.scope), ChainState::Clean) {
            debug!(scope = %meta.scope, test = %meta.name, "incremental chain failed");
            self.scopes.insert(
                meta.scope.to_string(),
                ChainState::Failed {
                    at: meta.name.to_string(),
                },
            );
        }
    }
}
