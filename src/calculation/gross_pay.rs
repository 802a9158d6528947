//! Gross pay calculation.
//!
//! Weekly gross is hours times the effective rate. Monthly gross uses the
//! fixed 4.33 weeks-per-month factor from `pay.yaml` rather than deriving
//! 52/12 per call.

use rust_decimal::Decimal;

use crate::config::WageConfig;
use crate::models::{AuditStep, PayFigures};

/// The result of a gross pay calculation, including the figures and audit step.
#[derive(Debug, Clone)]
pub struct GrossPayResult {
    /// Gross pay at full precision.
    pub gross: PayFigures,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates weekly, monthly and annual gross pay.
///
/// # Examples
///
/// ```
/// use tradepay_engine::calculation::calculate_gross_pay;
/// use tradepay_engine::config::WageConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let hours = Decimal::from_str("37.5").unwrap();
/// let rate = Decimal::from_str("7.55").unwrap();
/// let result = calculate_gross_pay(hours, rate, &WageConfig::default(), 1);
///
/// assert_eq!(result.gross.weekly, Decimal::from_str("283.125").unwrap());
/// assert_eq!(result.gross.annual, Decimal::from_str("14722.5").unwrap());
/// ```
pub fn calculate_gross_pay(
    hours_per_week: Decimal,
    effective_rate: Decimal,
    config: &WageConfig,
    step_number: u32,
) -> GrossPayResult {
    let pay = config.pay();
    let weekly = hours_per_week * effective_rate;
    let monthly = weekly * pay.weeks_per_month;
    let annual = weekly * pay.weeks_per_year;

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        input: serde_json::json!({
            "hours_per_week": hours_per_week.normalize().to_string(),
            "effective_rate": effective_rate.normalize().to_string(),
            "weeks_per_month": pay.weeks_per_month.normalize().to_string(),
            "weeks_per_year": pay.weeks_per_year.normalize().to_string()
        }),
        output: serde_json::json!({
            "weekly": weekly.normalize().to_string(),
            "monthly": monthly.normalize().to_string(),
            "annual": annual.normalize().to_string()
        }),
        reasoning: format!(
            "{} hours x £{} = £{} per week; x {} = £{} per month; x {} = £{} per year",
            hours_per_week.normalize(),
            effective_rate.normalize(),
            weekly.normalize(),
            pay.weeks_per_month.normalize(),
            monthly.normalize(),
            pay.weeks_per_year.normalize(),
            annual.normalize()
        ),
    };

    GrossPayResult {
        gross: PayFigures {
            weekly,
            monthly,
            annual,
        },
        audit_step,
    }
}
