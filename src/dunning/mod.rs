//! Dunning stage classification and aggregation.
//!
//! This module classifies failed-payment recovery records into the five
//! dunning stages and derives everything the admin dashboard shows from a
//! snapshot: bucket counts, the pipeline funnel, the recovery rate, stage
//! groups, search results and the CSV export. All of these are pure
//! functions of the snapshot; [`DunningBoard`] keeps the snapshot current
//! against a [`RecoveryStore`].

mod aggregate;
mod board;
mod export;
mod grouping;
mod search;
mod stage;
mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregate::{
    DunningCounts, DunningSummary, PipelineFunnel, count_by_filter, format_recovery_rate,
    pipeline_funnel, recovery_rate_percent,
};
pub use board::DunningBoard;
pub use export::{EXPORT_HEADERS, EXPORT_MIME_TYPE, export_csv, export_filename, format_minor_units};
pub use grouping::{StageGroup, group_by_stage};
pub use search::filter_by_search;
pub use stage::classify_stage;
pub use store::{InMemoryRecoveryStore, RecoveryStore};
