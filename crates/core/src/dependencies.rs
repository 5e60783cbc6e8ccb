//! Dependency guards for soft deactivation and hard deletion.
//!
//! Repositories count referencing rows; this module decides whether the
//! operation may proceed and shapes the breakdown returned to the client.

use serde::Serialize;

use crate::error::CoreError;

/// Number of active rows of one kind that reference the entity being removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyCount {
    pub kind: &'static str,
    pub count: i64,
}

impl DependencyCount {
    pub fn new(kind: &'static str, count: i64) -> Self {
        Self { kind, count }
    }
}

/// Fail with [`CoreError::HasDependencies`] if any count is non-zero.
///
/// Only the non-zero counts are reported.
pub fn ensure_no_dependencies(
    entity: &'static str,
    counts: impl IntoIterator<Item = DependencyCount>,
) -> Result<(), CoreError> {
    let blocking: Vec<DependencyCount> = counts.into_iter().filter(|c| c.count > 0).collect();
    if blocking.is_empty() {
        Ok(())
    } else {
        Err(CoreError::HasDependencies {
            entity,
            dependencies: blocking,
        })
    }
}
