//! Free-text search over recovery records.

use crate::models::PaymentRecoveryRecord;

/// Returns whether a record matches a lower-cased search needle.
fn matches(record: &PaymentRecoveryRecord, needle: &str) -> bool {
    record.display_name().to_lowercase().contains(needle)
        || record
            .invoice_id
            .as_deref()
            .is_some_and(|invoice| invoice.to_lowercase().contains(needle))
}

/// Keeps records whose display name or invoice id contains `query`,
/// ignoring case. A blank query keeps every record.
///
/// # Examples
///
/// ```
/// use tradepay_engine::dunning::filter_by_search;
///
/// assert!(filter_by_search(&[], "anything").is_empty());
/// ```
pub fn filter_by_search<'a>(
    records: &'a [PaymentRecoveryRecord],
    query: &str,
) -> Vec<&'a PaymentRecoveryRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }

    records.iter().filter(|r| matches(r, &needle)).collect()
}
