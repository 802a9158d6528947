//! Overtime projection.
//!
//! Projects take-home pay if a fixed block of overtime (5 hours a week at
//! time and a half by default) is worked every week. Deductions are re-run
//! on base pay plus overtime together, so overtime that crosses a band edge
//! is taxed at the right marginal rates.

use rust_decimal::Decimal;

use crate::config::WageConfig;
use crate::models::{AuditStep, OvertimeProjection, WageInputs};

use super::deductions::calculate_deductions;

/// The result of an overtime projection, including the projection and audit steps.
#[derive(Debug, Clone)]
pub struct OvertimeProjectionResult {
    /// The projection at full precision.
    pub projection: OvertimeProjection,
    /// Audit steps for the overtime earnings and the combined deductions.
    pub audit_steps: Vec<AuditStep>,
}

/// Projects net pay with the configured weekly overtime added.
///
/// # Arguments
///
/// * `effective_rate` - The regionally adjusted hourly rate
/// * `annual_gross` - Annual gross pay without overtime
/// * `inputs` - The calculation inputs (student loan and pension settings)
/// * `config` - The wage configuration
/// * `step_number` - The step number of the first audit step produced
///
/// # Examples
///
/// ```
/// use tradepay_engine::calculation::calculate_overtime_projection;
/// use tradepay_engine::config::WageConfig;
/// use tradepay_engine::models::{Region, WageInputs};
/// use rust_decimal::Decimal;
///
/// let inputs = WageInputs {
///     hours_per_week: Decimal::from(40),
///     hourly_rate: Decimal::from(10),
///     region: Region::Standard,
///     has_student_loan: false,
///     pension_contribution_percent: Decimal::ZERO,
/// };
/// let result = calculate_overtime_projection(
///     Decimal::from(10),
///     Decimal::from(20800),
///     &inputs,
///     &WageConfig::default(),
///     1,
/// );
/// assert_eq!(result.projection.weekly_gross, Decimal::from(75));
/// ```
pub fn calculate_overtime_projection(
    effective_rate: Decimal,
    annual_gross: Decimal,
    inputs: &WageInputs,
    config: &WageConfig,
    step_number: u32,
) -> OvertimeProjectionResult {
    let pay = config.pay();
    let hours_per_week = pay.overtime.hours_per_week;
    let hourly_rate = effective_rate * pay.overtime.multiplier;
    let weekly_gross = hours_per_week * hourly_rate;
    let annual_overtime = weekly_gross * pay.weeks_per_year;
    let combined_gross = annual_gross + annual_overtime;

    let earnings_step = AuditStep {
        step_number,
        rule_id: "overtime_earnings".to_string(),
        rule_name: "Overtime Earnings".to_string(),
        input: serde_json::json!({
            "effective_rate": effective_rate.normalize().to_string(),
            "overtime_hours_per_week": hours_per_week.normalize().to_string(),
            "multiplier": pay.overtime.multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "overtime_rate": hourly_rate.normalize().to_string(),
            "weekly_gross": weekly_gross.normalize().to_string(),
            "annual_gross": annual_overtime.normalize().to_string(),
            "combined_annual_gross": combined_gross.normalize().to_string()
        }),
        reasoning: format!(
            "{} hours x £{} (£{} x {}) = £{} per week, £{} per year",
            hours_per_week.normalize(),
            hourly_rate.normalize(),
            effective_rate.normalize(),
            pay.overtime.multiplier.normalize(),
            weekly_gross.normalize(),
            annual_overtime.normalize()
        ),
    };

    let combined = calculate_deductions(
        combined_gross,
        inputs.has_student_loan,
        inputs.pension_contribution_percent,
        config,
        step_number + 1,
    );

    let annual_net = combined_gross - combined.deductions.total();
    let monthly_net = annual_net / pay.months_per_year;

    OvertimeProjectionResult {
        projection: OvertimeProjection {
            hours_per_week,
            hourly_rate,
            weekly_gross,
            annual_gross: annual_overtime,
            deductions: combined.deductions,
            annual_net,
            monthly_net,
        },
        audit_steps: vec![earnings_step, combined.audit_step],
    }
}
