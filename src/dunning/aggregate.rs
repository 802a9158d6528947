//! Counts, funnel and recovery rate over a snapshot of recovery records.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::PaymentRecoveryRecord;

/// Counts the records matching a predicate.
pub fn count_by_filter<F>(records: &[PaymentRecoveryRecord], predicate: F) -> usize
where
    F: Fn(&PaymentRecoveryRecord) -> bool,
{
    records.iter().filter(|record| predicate(record)).count()
}

/// The four named buckets shown on the dunning dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DunningCounts {
    /// All records.
    pub total: usize,
    /// Unresolved records.
    pub active: usize,
    /// Unresolved records with at least one email sent.
    pub emailed: usize,
    /// Unresolved records that have had the final notice.
    pub final_notice: usize,
    /// Resolved records.
    pub recovered: usize,
}

impl DunningCounts {
    /// Counts each bucket.
    pub fn from_records(records: &[PaymentRecoveryRecord]) -> Self {
        Self {
            total: records.len(),
            active: count_by_filter(records, |r| !r.resolved),
            emailed: count_by_filter(records, |r| r.emails_sent >= 1 && !r.resolved),
            final_notice: count_by_filter(records, |r| r.emails_sent == 3 && !r.resolved),
            recovered: count_by_filter(records, |r| r.resolved),
        }
    }
}

/// How far unresolved records have got through the email sequence.
///
/// `email1 >= email2 >= email3` always holds: each threshold is a subset of
/// the one before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineFunnel {
    /// Unresolved records with at least one email sent.
    pub email1: usize,
    /// Unresolved records with at least two emails sent.
    pub email2: usize,
    /// Unresolved records with all three emails sent.
    pub email3: usize,
    /// Resolved records.
    pub recovered: usize,
    /// Sum of amounts due on unresolved records, in minor units, saturating
    /// at `u64::MAX`.
    pub total_outstanding_minor_units: u64,
}

/// Builds the pipeline funnel for a snapshot.
///
/// # Examples
///
/// ```
/// use tradepay_engine::dunning::pipeline_funnel;
///
/// let funnel = pipeline_funnel(&[]);
/// assert_eq!(funnel.email1, 0);
/// assert_eq!(funnel.total_outstanding_minor_units, 0);
/// ```
pub fn pipeline_funnel(records: &[PaymentRecoveryRecord]) -> PipelineFunnel {
    let unresolved = || records.iter().filter(|r| !r.resolved);
    let reached = |threshold: u8| unresolved().filter(|r| r.emails_sent >= threshold).count();

    PipelineFunnel {
        email1: reached(1),
        email2: reached(2),
        email3: reached(3),
        recovered: count_by_filter(records, |r| r.resolved),
        total_outstanding_minor_units: unresolved()
            .fold(0u64, |total, r| total.saturating_add(r.amount_due)),
    }
}

/// Returns `recovered / total` as a percentage rounded to one decimal place,
/// or zero when there are no records.
///
/// # Examples
///
/// ```
/// use tradepay_engine::dunning::recovery_rate_percent;
/// use rust_decimal::Decimal;
///
/// assert_eq!(recovery_rate_percent(1, 4), Decimal::new(250, 1));
/// assert_eq!(recovery_rate_percent(0, 0), Decimal::ZERO);
/// ```
pub fn recovery_rate_percent(recovered: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }

    (Decimal::from(recovered) * Decimal::ONE_HUNDRED / Decimal::from(total))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a recovery rate with exactly one decimal place, e.g. `"25.0"`.
pub fn format_recovery_rate(rate: Decimal) -> String {
    format!("{:.1}", rate)
}

/// Everything the dashboard header shows, computed in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DunningSummary {
    /// Bucket counts.
    pub counts: DunningCounts,
    /// Pipeline funnel.
    pub funnel: PipelineFunnel,
    /// Recovery rate formatted to one decimal place.
    pub recovery_rate_percent: String,
}

impl DunningSummary {
    /// Summarises a snapshot of records.
    pub fn from_records(records: &[PaymentRecoveryRecord]) -> Self {
        let counts = DunningCounts::from_records(records);
        let rate = recovery_rate_percent(counts.recovered, counts.total);

        Self {
            counts,
            funnel: pipeline_funnel(records),
            recovery_rate_percent: format_recovery_rate(rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dunning::test_support::{record, sample_records};

    #[test]
    fn test_count_by_filter() {
        let records = sample_records();
        assert_eq!(count_by_filter(&records, |r| r.amount_due > 5000), 2);
        assert_eq!(count_by_filter(&[], |_| true), 0);
    }

    #[test]
    fn test_named_buckets() {
        let counts = DunningCounts::from_records(&sample_records());

        assert_eq!(counts.total, 6);
        assert_eq!(counts.active, 5);
        assert_eq!(counts.emailed, 4);
        assert_eq!(counts.final_notice, 2);
        assert_eq!(counts.recovered, 1);
    }

    #[test]
    fn test_funnel_counts_unresolved_only() {
        let funnel = pipeline_funnel(&sample_records());

        assert_eq!(funnel.email1, 4);
        assert_eq!(funnel.email2, 3);
        assert_eq!(funnel.email3, 2);
        assert_eq!(funnel.recovered, 1);
    }

    #[test]
    fn test_funnel_outstanding_excludes_resolved() {
        let records = vec![record("a", 0, false), record("b", 3, true)];
        let funnel = pipeline_funnel(&records);

        assert_eq!(funnel.total_outstanding_minor_units, records[0].amount_due);
    }

    #[test]
    fn test_funnel_outstanding_saturates() {
        let mut huge = record("huge", 1, false);
        huge.amount_due = u64::MAX;
        let records = vec![huge, record("b", 0, false)];

        let funnel = pipeline_funnel(&records);
        assert_eq!(funnel.total_outstanding_minor_units, u64::MAX);
    }

    #[test]
    fn test_recovery_rate_boundaries() {
        assert_eq!(recovery_rate_percent(0, 0), Decimal::ZERO);
        assert_eq!(recovery_rate_percent(1, 4), Decimal::new(25, 0));
        assert_eq!(recovery_rate_percent(1, 3), Decimal::new(333, 1));
        assert_eq!(recovery_rate_percent(2, 3), Decimal::new(667, 1));
        assert_eq!(recovery_rate_percent(5, 5), Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_format_recovery_rate_always_one_place() {
        assert_eq!(format_recovery_rate(recovery_rate_percent(1, 4)), "25.0");
        assert_eq!(format_recovery_rate(recovery_rate_percent(0, 0)), "0.0");
        assert_eq!(format_recovery_rate(recovery_rate_percent(1, 3)), "33.3");
    }

    #[test]
    fn test_summary_of_empty_snapshot() {
        let summary = DunningSummary::from_records(&[]);

        assert_eq!(summary.counts.total, 0);
        assert_eq!(summary.funnel.email1, 0);
        assert_eq!(summary.recovery_rate_percent, "0.0");
    }

    #[test]
    fn test_summary_is_repeatable() {
        let records = sample_records();
        assert_eq!(
            DunningSummary::from_records(&records),
            DunningSummary::from_records(&records)
        );
    }
}
