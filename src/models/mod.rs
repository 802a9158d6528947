//! Core data models for the pay and dunning engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod recovery;
mod wage;
mod wage_result;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use recovery::{DunningStage, MAX_REMINDER_EMAILS, PaymentRecoveryRecord};
pub use wage::{MAX_HOURLY_RATE, MAX_HOURS_PER_WEEK, Region, WageForm, WageInputs};
pub use wage_result::{
    Deductions, OvertimeProjection, PayFigures, WageCalculationResult, round_money,
};
