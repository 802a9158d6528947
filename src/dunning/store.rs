//! The external store that owns payment recovery records.
//!
//! Records live in a hosted datastore; sending reminders and marking payments
//! recovered are remote calls. [`RecoveryStore`] abstracts that collaborator
//! and [`InMemoryRecoveryStore`] stands in for it in the bundled service and
//! in tests.

use std::fs;
use std::path::Path;
use std::sync::RwLock;

use chrono::Utc;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{MAX_REMINDER_EMAILS, PaymentRecoveryRecord};

/// The collaborator that fetches and mutates recovery records.
///
/// Implementations report failures as [`EngineError::RemoteOperation`] (or
/// [`EngineError::RecordNotFound`] for unknown ids) and never retry.
///
/// Calls are synchronous and may block. Async callers must not hold a lock
/// other readers need across [`fetch_all`](Self::fetch_all); a store backed by
/// a network service should be driven from a blocking context such as
/// `tokio::task::spawn_blocking`.
pub trait RecoveryStore: Send + Sync {
    /// Fetches every record.
    fn fetch_all(&self) -> EngineResult<Vec<PaymentRecoveryRecord>>;

    /// Sends the next reminder email and returns the updated record.
    fn send_next_email(&self, id: &str) -> EngineResult<PaymentRecoveryRecord>;

    /// Marks the payment recovered and returns the updated record.
    fn resolve(&self, id: &str) -> EngineResult<PaymentRecoveryRecord>;
}

/// A process-local [`RecoveryStore`].
#[derive(Debug, Default)]
pub struct InMemoryRecoveryStore {
    records: RwLock<Vec<PaymentRecoveryRecord>>,
}

fn poisoned(operation: &str) -> EngineError {
    EngineError::RemoteOperation {
        operation: operation.to_string(),
        message: "record store lock poisoned".to_string(),
    }
}

impl InMemoryRecoveryStore {
    /// Creates a store holding `records`, rejecting any that break their invariants.
    pub fn with_records(records: Vec<PaymentRecoveryRecord>) -> EngineResult<Self> {
        for record in &records {
            record.validate()?;
        }

        Ok(Self {
            records: RwLock::new(records),
        })
    }

    /// Loads records from a JSON array file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;
        let records: Vec<PaymentRecoveryRecord> =
            serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Self::with_records(records)
    }

    fn update<F>(&self, operation: &str, id: &str, apply: F) -> EngineResult<PaymentRecoveryRecord>
    where
        F: FnOnce(&mut PaymentRecoveryRecord) -> EngineResult<()>,
    {
        let mut records = self.records.write().map_err(|_| poisoned(operation))?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| EngineError::RecordNotFound { id: id.to_string() })?;

        apply(record)?;
        Ok(record.clone())
    }
}

impl RecoveryStore for InMemoryRecoveryStore {
    fn fetch_all(&self) -> EngineResult<Vec<PaymentRecoveryRecord>> {
        let records = self.records.read().map_err(|_| poisoned("fetch_all"))?;
        Ok(records.clone())
    }

    fn send_next_email(&self, id: &str) -> EngineResult<PaymentRecoveryRecord> {
        let updated = self.update("send_next_email", id, |record| {
            if !record.can_send_next_email() {
                return Err(EngineError::InvalidOperation {
                    id: record.id.clone(),
                    message: if record.resolved {
                        "payment already recovered".to_string()
                    } else {
                        format!("all {} reminders already sent", MAX_REMINDER_EMAILS)
                    },
                });
            }

            let now = Utc::now();
            record.emails_sent += 1;
            match record.emails_sent {
                1 => record.email_1_sent_at = Some(now),
                2 => record.email_2_sent_at = Some(now),
                _ => record.email_3_sent_at = Some(now),
            }
            record.updated_at = now;
            Ok(())
        })?;

        info!(record_id = %id, emails_sent = updated.emails_sent, "Reminder email sent");
        Ok(updated)
    }

    fn resolve(&self, id: &str) -> EngineResult<PaymentRecoveryRecord> {
        let updated = self.update("resolve", id, |record| {
            if record.resolved {
                return Err(EngineError::InvalidOperation {
                    id: record.id.clone(),
                    message: "payment already recovered".to_string(),
                });
            }

            let now = Utc::now();
            record.resolved = true;
            record.resolved_at = Some(now);
            record.updated_at = now;
            Ok(())
        })?;

        info!(record_id = %id, "Payment marked recovered");
        Ok(updated)
    }
}
