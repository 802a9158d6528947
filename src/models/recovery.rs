//! Payment recovery records and dunning stages.
//!
//! A [`PaymentRecoveryRecord`] is created by the external store whenever a
//! recurring payment fails, and is updated there each time a reminder email
//! goes out or the payment is recovered. This crate only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EngineError, EngineResult};

/// The maximum number of reminder emails sent for one failed payment.
pub const MAX_REMINDER_EMAILS: u8 = 3;

fn default_currency() -> String {
    "gbp".to_string()
}

/// A failed recurring payment moving through the dunning sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecoveryRecord {
    /// Opaque record identifier.
    pub id: String,
    /// The user who owes the payment.
    pub user_id: String,
    /// The user's display name, if known.
    #[serde(default)]
    pub user_name: Option<String>,
    /// The user's email address, if known.
    #[serde(default)]
    pub user_email: Option<String>,
    /// The invoice the failed payment belongs to.
    #[serde(default)]
    pub invoice_id: Option<String>,
    /// ISO currency code, lower case.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Amount due in minor units (pence).
    pub amount_due: u64,
    /// Number of reminder emails sent so far.
    pub emails_sent: u8,
    /// Whether the payment has been recovered.
    pub resolved: bool,
    /// When the payment was recovered.
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last changed.
    pub updated_at: DateTime<Utc>,
    /// When the first reminder was sent.
    #[serde(default)]
    pub email_1_sent_at: Option<DateTime<Utc>>,
    /// When the second reminder was sent.
    #[serde(default)]
    pub email_2_sent_at: Option<DateTime<Utc>>,
    /// When the final notice was sent.
    #[serde(default)]
    pub email_3_sent_at: Option<DateTime<Utc>>,
}

impl PaymentRecoveryRecord {
    /// Returns the best available name for the user: their name, then their
    /// email, then their user id.
    pub fn display_name(&self) -> &str {
        self.user_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| {
                self.user_email
                    .as_deref()
                    .filter(|email| !email.trim().is_empty())
            })
            .unwrap_or(&self.user_id)
    }

    /// Returns the send timestamps in order.
    pub fn email_timestamps(&self) -> [Option<DateTime<Utc>>; 3] {
        [self.email_1_sent_at, self.email_2_sent_at, self.email_3_sent_at]
    }

    /// Returns whether another reminder may still be sent.
    pub fn can_send_next_email(&self) -> bool {
        !self.resolved && self.emails_sent < MAX_REMINDER_EMAILS
    }

    /// Checks the record's invariants.
    ///
    /// `emails_sent` must not exceed 3 and must equal the number of
    /// `email_N_sent_at` timestamps that are set.
    pub fn validate(&self) -> EngineResult<()> {
        if self.emails_sent > MAX_REMINDER_EMAILS {
            return Err(EngineError::InvalidRecord {
                id: self.id.clone(),
                message: format!(
                    "emails_sent is {} but at most {} reminders are sent",
                    self.emails_sent, MAX_REMINDER_EMAILS
                ),
            });
        }

        let stamped = self
            .email_timestamps()
            .iter()
            .filter(|sent_at| sent_at.is_some())
            .count();
        if stamped != usize::from(self.emails_sent) {
            return Err(EngineError::InvalidRecord {
                id: self.id.clone(),
                message: format!(
                    "emails_sent is {} but {} send timestamps are recorded",
                    self.emails_sent, stamped
                ),
            });
        }

        Ok(())
    }
}

/// A record's position in the dunning sequence.
///
/// Stages are ordered by progress: `Pending < Email1Sent < Email2Sent <
/// FinalNotice < Recovered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DunningStage {
    /// No reminder sent yet.
    Pending,
    /// First reminder sent.
    Email1Sent,
    /// Second reminder sent.
    Email2Sent,
    /// Final notice sent.
    FinalNotice,
    /// Payment recovered.
    Recovered,
}

impl DunningStage {
    /// All stages in display order.
    pub const ALL: [DunningStage; 5] = [
        DunningStage::Pending,
        DunningStage::Email1Sent,
        DunningStage::Email2Sent,
        DunningStage::FinalNotice,
        DunningStage::Recovered,
    ];

    /// Returns the stage's position in display order, 0 through 4.
    pub fn order(self) -> u8 {
        match self {
            DunningStage::Pending => 0,
            DunningStage::Email1Sent => 1,
            DunningStage::Email2Sent => 2,
            DunningStage::FinalNotice => 3,
            DunningStage::Recovered => 4,
        }
    }

    /// Returns the human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            DunningStage::Pending => "Pending",
            DunningStage::Email1Sent => "Email 1 Sent",
            DunningStage::Email2Sent => "Email 2 Sent",
            DunningStage::FinalNotice => "Final Notice",
            DunningStage::Recovered => "Recovered",
        }
    }
}

impl fmt::Display for DunningStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
