//! Durable audit sink with bounded retries

use std::sync::Arc;

use tracing::{debug, error};

use aspire_config::AuditConfig;
use aspire_interfaces::AuditStore;
use aspire_types::AuditEvent;

use crate::error::AuditWriteError;

/// Appends audit events through the injected store.
///
/// Each append gets a bounded per-attempt timeout and a bounded number of
/// retries (at-least-once: duplicates are acceptable, losses are not). The
/// write runs in a spawned task, so a client disconnect that drops the
/// request future cannot cancel an append already under way; the caller may
/// still await the outcome.
#[derive(Clone)]
pub struct AuditSink {
    store: Arc<dyn AuditStore>,
    config: AuditConfig,
}

impl AuditSink {
    pub fn new(store: Arc<dyn AuditStore>, config: AuditConfig) -> Self {
        Self { store, config }
    }

    /// Append one role-change event.
    ///
    /// On exhausted retries the gap is alerted under `target: "audit"` and
    /// the error returned; callers on the request path must not propagate it
    /// to the user whose mutation already committed.
    pub async fn log_role_change(&self, event: AuditEvent) -> Result<(), AuditWriteError> {
        if !self.config.enabled {
            return Ok(());
        }

        let store = Arc::clone(&self.store);
        let config = self.config.clone();

        let task = tokio::spawn(async move { Self::append_with_retry(store, config, event).await });

        match task.await {
            Ok(result) => result,
            Err(e) => Err(AuditWriteError {
                attempts: 0,
                message: format!("audit task failed: {}", e),
            }),
        }
    }

    async fn append_with_retry(
        store: Arc<dyn AuditStore>,
        config: AuditConfig,
        event: AuditEvent,
    ) -> Result<(), AuditWriteError> {
        let mut last_error = String::new();

        for attempt in 1..=config.retry_attempts {
            match tokio::time::timeout(config.write_timeout, store.append(&event)).await {
                Ok(Ok(())) => {
                    if attempt > 1 {
                        debug!(target: "audit", attempt, "audit append succeeded after retry");
                    }
                    return Ok(());
                }
                Ok(Err(e)) => last_error = e.to_string(),
                Err(_) => {
                    last_error = format!(
                        "append timed out after {}ms",
                        config.write_timeout.as_millis()
                    )
                }
            }

            if attempt < config.retry_attempts {
                tokio::time::sleep(config.retry_delay).await;
            }
        }

        // A privilege change without its audit record is a security-relevant
        // gap; alert loudly even though the mutation stands.
        error!(
            target: "audit",
            subject = %event.subject_user_id,
            actor = %event.actor_user_id,
            old_role = %event.old_role,
            new_role = %event.new_role,
            error = %last_error,
            "audit record for a committed role change could not be persisted"
        );

        Err(AuditWriteError {
            attempts: config.retry_attempts,
            message: last_error,
        })
    }
}
