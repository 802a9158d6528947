//! Trade Pay Engine
//!
//! This crate estimates UK take-home pay for hourly trade workers and tracks
//! failed-payment recovery (dunning) for the admin dashboard. Wage
//! calculations carry a full audit trail; dunning summaries, stage groups
//! and CSV exports are derived from a snapshot of recovery records.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod dunning;
pub mod error;
pub mod models;
