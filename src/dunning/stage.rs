//! Dunning stage classification.

use crate::models::{DunningStage, PaymentRecoveryRecord};

/// Assigns a record to exactly one dunning stage.
///
/// Rules are checked in order and the first match wins: a resolved record is
/// `Recovered` whatever its email count; otherwise the number of emails sent
/// picks the stage.
///
/// # Examples
///
/// ```
/// use tradepay_engine::dunning::classify_stage;
/// use tradepay_engine::models::{DunningStage, PaymentRecoveryRecord};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let record = PaymentRecoveryRecord {
///     id: "fp_001".to_string(),
///     user_id: "user_001".to_string(),
///     user_name: None,
///     user_email: None,
///     invoice_id: None,
///     currency: "gbp".to_string(),
///     amount_due: 2999,
///     emails_sent: 2,
///     resolved: false,
///     resolved_at: None,
///     created_at: now,
///     updated_at: now,
///     email_1_sent_at: Some(now),
///     email_2_sent_at: Some(now),
///     email_3_sent_at: None,
/// };
/// assert_eq!(classify_stage(&record), DunningStage::Email2Sent);
/// ```
pub fn classify_stage(record: &PaymentRecoveryRecord) -> DunningStage {
    if record.resolved {
        return DunningStage::Recovered;
    }

    match record.emails_sent {
        0 => DunningStage::Pending,
        1 => DunningStage::Email1Sent,
        2 => DunningStage::Email2Sent,
        _ => DunningStage::FinalNotice,
    }
}
