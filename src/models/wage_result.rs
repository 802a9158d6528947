//! Wage calculation result models.
//!
//! This module contains the [`WageCalculationResult`] type and the figures
//! it is built from: gross and net [`PayFigures`], statutory [`Deductions`]
//! and the [`OvertimeProjection`].

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AuditTrace, WageInputs};

/// Rounds a monetary value to pence for display.
///
/// # Example
///
/// ```
/// use tradepay_engine::models::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("441.675").unwrap()).to_string(), "441.68");
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Annual statutory deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Income tax.
    pub income_tax: Decimal,
    /// Employee National Insurance contributions.
    pub national_insurance: Decimal,
    /// Plan 2 student loan repayment.
    pub student_loan: Decimal,
    /// Pension contribution.
    pub pension: Decimal,
}

impl Deductions {
    /// Returns the sum of all four deductions.
    pub fn total(&self) -> Decimal {
        self.income_tax + self.national_insurance + self.student_loan + self.pension
    }

    /// Returns a copy with every figure rounded to pence.
    pub fn rounded(&self) -> Self {
        Self {
            income_tax: round_money(self.income_tax),
            national_insurance: round_money(self.national_insurance),
            student_loan: round_money(self.student_loan),
            pension: round_money(self.pension),
        }
    }
}

/// Pay at weekly, monthly and annual granularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayFigures {
    /// Pay per week.
    pub weekly: Decimal,
    /// Pay per month.
    pub monthly: Decimal,
    /// Pay per year.
    pub annual: Decimal,
}

impl PayFigures {
    /// Returns a copy with every figure rounded to pence.
    pub fn rounded(&self) -> Self {
        Self {
            weekly: round_money(self.weekly),
            monthly: round_money(self.monthly),
            annual: round_money(self.annual),
        }
    }
}

/// Take-home pay if a fixed block of overtime is worked every week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeProjection {
    /// Overtime hours assumed per week.
    pub hours_per_week: Decimal,
    /// Hourly rate paid for overtime.
    pub hourly_rate: Decimal,
    /// Weekly overtime earnings before deductions.
    pub weekly_gross: Decimal,
    /// Annual overtime earnings before deductions.
    pub annual_gross: Decimal,
    /// Deductions on base pay plus overtime combined.
    pub deductions: Deductions,
    /// Annual net pay including overtime.
    pub annual_net: Decimal,
    /// Monthly net pay including overtime.
    pub monthly_net: Decimal,
}

impl OvertimeProjection {
    /// Returns a copy with every monetary figure rounded to pence.
    pub fn rounded(&self) -> Self {
        Self {
            hours_per_week: self.hours_per_week,
            hourly_rate: round_money(self.hourly_rate),
            weekly_gross: round_money(self.weekly_gross),
            annual_gross: round_money(self.annual_gross),
            deductions: self.deductions.rounded(),
            annual_net: round_money(self.annual_net),
            monthly_net: round_money(self.monthly_net),
        }
    }
}

/// The complete result of a wage calculation.
///
/// Monetary values are rounded to pence. The audit trace keeps the
/// unrounded intermediate values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageCalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The tax year whose bands were applied.
    pub tax_year: String,
    /// The inputs the calculation ran on.
    pub inputs: WageInputs,
    /// Hourly rate after regional adjustment.
    pub effective_hourly_rate: Decimal,
    /// Gross pay.
    pub gross: PayFigures,
    /// Annual deductions on base pay.
    pub deductions: Deductions,
    /// Net pay.
    pub net: PayFigures,
    /// Overtime projection.
    pub overtime: OvertimeProjection,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
