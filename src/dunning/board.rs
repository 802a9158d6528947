//! The admin dunning board: a local snapshot of recovery records.
//!
//! The board never mutates records itself. It asks the [`RecoveryStore`] to
//! act and then swaps in whatever record the store hands back.

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{MAX_REMINDER_EMAILS, PaymentRecoveryRecord};

use super::aggregate::DunningSummary;
use super::export::export_csv;
use super::grouping::{StageGroup, group_by_stage};
use super::search::filter_by_search;
use super::store::RecoveryStore;

/// The admin view's current snapshot of recovery records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DunningBoard {
    records: Vec<PaymentRecoveryRecord>,
}

impl DunningBoard {
    /// Creates a board over an existing snapshot.
    pub fn new(records: Vec<PaymentRecoveryRecord>) -> Self {
        Self { records }
    }

    /// Returns the current snapshot.
    pub fn records(&self) -> &[PaymentRecoveryRecord] {
        &self.records
    }

    /// Replaces the snapshot with a fresh fetch from the store.
    ///
    /// Records that break their invariants are kept and logged; they still
    /// classify into exactly one stage.
    pub fn refresh(&mut self, store: &dyn RecoveryStore) -> EngineResult<()> {
        self.replace_snapshot(store.fetch_all()?);
        Ok(())
    }

    /// Replaces the snapshot with records fetched elsewhere.
    ///
    /// Lets callers fetch without holding whatever guards the board.
    pub fn replace_snapshot(&mut self, records: Vec<PaymentRecoveryRecord>) {
        for record in &records {
            if let Err(err) = record.validate() {
                warn!(record_id = %record.id, error = %err, "Inconsistent recovery record");
            }
        }

        debug!(count = records.len(), "Dunning board refreshed");
        self.records = records;
    }

    fn find(&self, id: &str) -> EngineResult<&PaymentRecoveryRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| EngineError::RecordNotFound { id: id.to_string() })
    }

    fn replace(&mut self, updated: PaymentRecoveryRecord) -> PaymentRecoveryRecord {
        match self.records.iter_mut().find(|r| r.id == updated.id) {
            Some(slot) => *slot = updated.clone(),
            None => self.records.push(updated.clone()),
        }
        updated
    }

    /// Asks the store to send the next reminder for `id`.
    ///
    /// Refused locally, without calling the store, once the record is
    /// resolved or has had all three reminders.
    pub fn send_next_email(
        &mut self,
        store: &dyn RecoveryStore,
        id: &str,
    ) -> EngineResult<PaymentRecoveryRecord> {
        let record = self.find(id)?;
        if record.resolved {
            return Err(EngineError::InvalidOperation {
                id: id.to_string(),
                message: "payment already recovered".to_string(),
            });
        }
        if record.emails_sent >= MAX_REMINDER_EMAILS {
            return Err(EngineError::InvalidOperation {
                id: id.to_string(),
                message: format!("all {} reminders already sent", MAX_REMINDER_EMAILS),
            });
        }

        let updated = store.send_next_email(id)?;
        Ok(self.replace(updated))
    }

    /// Asks the store to mark `id` recovered.
    pub fn resolve(
        &mut self,
        store: &dyn RecoveryStore,
        id: &str,
    ) -> EngineResult<PaymentRecoveryRecord> {
        if self.find(id)?.resolved {
            return Err(EngineError::InvalidOperation {
                id: id.to_string(),
                message: "payment already recovered".to_string(),
            });
        }

        let updated = store.resolve(id)?;
        Ok(self.replace(updated))
    }

    /// Summarises the whole snapshot.
    pub fn summary(&self) -> DunningSummary {
        DunningSummary::from_records(&self.records)
    }

    /// Groups the records matching `query` by stage.
    pub fn groups(&self, query: &str) -> Vec<StageGroup<'_>> {
        group_by_stage(filter_by_search(&self.records, query))
    }

    /// Exports every record, regardless of any search, as CSV.
    pub fn export_csv(&self) -> EngineResult<String> {
        export_csv(&self.records)
    }
}
