//! Grouping records by dunning stage.

use serde::Serialize;

use crate::models::{DunningStage, PaymentRecoveryRecord};

use super::stage::classify_stage;

/// The records sharing one dunning stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageGroup<'a> {
    /// The stage.
    pub stage: DunningStage,
    /// Human-readable stage label.
    pub label: &'static str,
    /// Records in this stage, in input order.
    pub records: Vec<&'a PaymentRecoveryRecord>,
}

/// Partitions records by stage.
///
/// Only stages with at least one record are returned, sorted from
/// `Pending` to `Recovered`. Each group keeps its records in input order.
pub fn group_by_stage<'a, I>(records: I) -> Vec<StageGroup<'a>>
where
    I: IntoIterator<Item = &'a PaymentRecoveryRecord>,
{
    let mut buckets: [Vec<&'a PaymentRecoveryRecord>; 5] = Default::default();
    for record in records {
        buckets[usize::from(classify_stage(record).order())].push(record);
    }

    DunningStage::ALL
        .into_iter()
        .zip(buckets)
        .filter(|(_, records)| !records.is_empty())
        .map(|(stage, records)| StageGroup {
            stage,
            label: stage.label(),
            records,
        })
        .collect()
}
