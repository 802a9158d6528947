//! Statutory deduction calculations.
//!
//! Income tax, National Insurance, Plan 2 student loan and pension are all
//! computed on annual gross pay. Each band charges only the slice of income
//! that falls inside it.
//!
//! Income above the higher-rate threshold is still taxed at the higher rate;
//! there is no additional-rate band.

use rust_decimal::Decimal;

use crate::config::{TaxConfig, WageConfig};
use crate::models::{AuditStep, Deductions};

/// The result of a deductions calculation, including the figures and audit step.
#[derive(Debug, Clone)]
pub struct DeductionsResult {
    /// Deductions at full precision.
    pub deductions: Deductions,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the part of `amount` that lies between `lower` and `upper`.
fn slice_between(amount: Decimal, lower: Decimal, upper: Decimal) -> Decimal {
    (amount.min(upper) - lower).max(Decimal::ZERO)
}

/// Calculates annual income tax.
///
/// Nothing is charged up to the personal allowance, the basic rate applies
/// up to the basic-rate threshold, and the higher rate applies to everything
/// above it.
///
/// # Examples
///
/// ```
/// use tradepay_engine::calculation::calculate_income_tax;
/// use tradepay_engine::config::WageConfig;
/// use rust_decimal::Decimal;
///
/// let config = WageConfig::default();
/// let tax = calculate_income_tax(Decimal::from(50270), config.tax());
/// assert_eq!(tax, Decimal::from(7540));
/// ```
pub fn calculate_income_tax(annual_gross: Decimal, tax: &TaxConfig) -> Decimal {
    let bands = &tax.income_tax;
    let basic = slice_between(
        annual_gross,
        bands.personal_allowance,
        bands.basic_rate_threshold,
    );
    let higher = (annual_gross - bands.basic_rate_threshold).max(Decimal::ZERO);

    basic * bands.basic_rate + higher * bands.higher_rate
}

/// Calculates annual employee National Insurance.
///
/// Only the slice between the lower and upper thresholds is charged.
pub fn calculate_national_insurance(annual_gross: Decimal, tax: &TaxConfig) -> Decimal {
    let ni = &tax.national_insurance;
    slice_between(annual_gross, ni.lower_threshold, ni.upper_threshold) * ni.rate
}

/// Calculates the annual Plan 2 student loan repayment.
pub fn calculate_student_loan(
    annual_gross: Decimal,
    has_student_loan: bool,
    tax: &TaxConfig,
) -> Decimal {
    if !has_student_loan {
        return Decimal::ZERO;
    }

    let terms = &tax.student_loan;
    (annual_gross - terms.threshold).max(Decimal::ZERO) * terms.rate
}

/// Calculates the annual pension contribution.
pub fn calculate_pension(annual_gross: Decimal, contribution_percent: Decimal) -> Decimal {
    annual_gross * contribution_percent / Decimal::ONE_HUNDRED
}

/// Calculates all four deductions on an annual gross figure.
///
/// # Examples
///
/// ```
/// use tradepay_engine::calculation::calculate_deductions;
/// use tradepay_engine::config::WageConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let annual = Decimal::from_str("14722.5").unwrap();
/// let result = calculate_deductions(annual, false, Decimal::from(3), &WageConfig::default(), 1);
///
/// assert_eq!(result.deductions.income_tax, Decimal::from_str("430.50").unwrap());
/// assert_eq!(result.deductions.national_insurance, Decimal::from_str("258.30").unwrap());
/// assert_eq!(result.deductions.pension, Decimal::from_str("441.675").unwrap());
/// ```
pub fn calculate_deductions(
    annual_gross: Decimal,
    has_student_loan: bool,
    pension_contribution_percent: Decimal,
    config: &WageConfig,
    step_number: u32,
) -> DeductionsResult {
    let tax = config.tax();
    let deductions = Deductions {
        income_tax: calculate_income_tax(annual_gross, tax),
        national_insurance: calculate_national_insurance(annual_gross, tax),
        student_loan: calculate_student_loan(annual_gross, has_student_loan, tax),
        pension: calculate_pension(annual_gross, pension_contribution_percent),
    };
    let total = deductions.total();

    let audit_step = AuditStep {
        step_number,
        rule_id: "statutory_deductions".to_string(),
        rule_name: "Statutory Deductions".to_string(),
        input: serde_json::json!({
            "annual_gross": annual_gross.normalize().to_string(),
            "has_student_loan": has_student_loan,
            "pension_contribution_percent": pension_contribution_percent.normalize().to_string(),
            "tax_year": tax.tax_year
        }),
        output: serde_json::json!({
            "income_tax": deductions.income_tax.normalize().to_string(),
            "national_insurance": deductions.national_insurance.normalize().to_string(),
            "student_loan": deductions.student_loan.normalize().to_string(),
            "pension": deductions.pension.normalize().to_string(),
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "On £{} a year: tax £{} + NI £{} + student loan £{} + pension £{} = £{}",
            annual_gross.normalize(),
            deductions.income_tax.normalize(),
            deductions.national_insurance.normalize(),
            deductions.student_loan.normalize(),
            deductions.pension.normalize(),
            total.normalize()
        ),
    };

    DeductionsResult {
        deductions,
        audit_step,
    }
}
