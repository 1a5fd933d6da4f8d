//! Audit log store interface

use async_trait::async_trait;

use aspire_types::AuditEvent;

use crate::error::StoreError;

/// Append-only sink for audit events.
///
/// Appends must be at-least-once from the caller's perspective: duplicate
/// entries are acceptable, lost ones are not. Callers retry on failure.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Append one event to the audit log.
    async fn append(&self, event: &AuditEvent) -> Result<(), StoreError>;
}
