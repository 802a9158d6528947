//! Net pay calculation.

use rust_decimal::Decimal;

use crate::config::WageConfig;
use crate::models::{AuditStep, Deductions, PayFigures};

/// The result of a net pay calculation, including the figures and audit step.
#[derive(Debug, Clone)]
pub struct NetPayResult {
    /// Net pay at full precision.
    pub net: PayFigures,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Subtracts annual deductions from annual gross and spreads the result
/// over months and weeks.
///
/// # Examples
///
/// ```
/// use tradepay_engine::calculation::calculate_net_pay;
/// use tradepay_engine::config::WageConfig;
/// use tradepay_engine::models::Deductions;
/// use rust_decimal::Decimal;
///
/// let deductions = Deductions {
///     income_tax: Decimal::from(1000),
///     national_insurance: Decimal::from(600),
///     student_loan: Decimal::ZERO,
///     pension: Decimal::ZERO,
/// };
/// let result = calculate_net_pay(Decimal::from(20000), &deductions, &WageConfig::default(), 1);
/// assert_eq!(result.net.annual, Decimal::from(18400));
/// ```
pub fn calculate_net_pay(
    annual_gross: Decimal,
    deductions: &Deductions,
    config: &WageConfig,
    step_number: u32,
) -> NetPayResult {
    let pay = config.pay();
    let total_deductions = deductions.total();
    let annual = annual_gross - total_deductions;
    let monthly = annual / pay.months_per_year;
    let weekly = annual / pay.weeks_per_year;

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "annual_gross": annual_gross.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "annual": annual.normalize().to_string(),
            "monthly": monthly.normalize().to_string(),
            "weekly": weekly.normalize().to_string()
        }),
        reasoning: format!(
            "£{} - £{} = £{} a year",
            annual_gross.normalize(),
            total_deductions.normalize(),
            annual.normalize()
        ),
    };

    NetPayResult {
        net: PayFigures {
            weekly,
            monthly,
            annual,
        },
        audit_step,
    }
}
