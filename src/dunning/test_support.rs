//! Record builders shared by the dunning unit tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::PaymentRecoveryRecord;

pub(crate) fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, 9, 30, 0).unwrap()
}

/// A consistent record with `emails_sent` timestamps filled in.
pub(crate) fn record(id: &str, emails_sent: u8, resolved: bool) -> PaymentRecoveryRecord {
    let sent_at = |n: u8| (n <= emails_sent).then(|| at(u32::from(n) + 1));
    PaymentRecoveryRecord {
        id: id.to_string(),
        user_id: format!("user_{}", id),
        user_name: Some(format!("User {}", id)),
        user_email: Some(format!("{}@example.com", id)),
        invoice_id: Some(format!("in_{}", id)),
        currency: "gbp".to_string(),
        amount_due: 2999,
        emails_sent,
        resolved,
        resolved_at: resolved.then(|| at(10)),
        created_at: at(1),
        updated_at: at(1),
        email_1_sent_at: sent_at(1),
        email_2_sent_at: sent_at(2),
        email_3_sent_at: sent_at(3),
    }
}

fn named(
    id: &str,
    name: Option<&str>,
    amount_due: u64,
    emails_sent: u8,
    resolved: bool,
) -> PaymentRecoveryRecord {
    let mut r = record(id, emails_sent, resolved);
    r.user_name = name.map(str::to_string);
    r.amount_due = amount_due;
    r
}

/// Six records: one per unresolved stage, a second final notice and one recovery.
pub(crate) fn sample_records() -> Vec<PaymentRecoveryRecord> {
    vec![
        named("1001", Some("Alice Watts"), 2999, 0, false),
        named("1002", Some("Bob Ohm"), 4500, 1, false),
        named("1003", Some("Carys Volt, Ltd"), 12000, 2, false),
        named("1004", Some("Dan \"Sparky\" Jones"), 7500, 3, false),
        named("1005", None, 1999, 3, false),
        named("1006", Some("Fay Ampere"), 3500, 2, true),
    ]
}
