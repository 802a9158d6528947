//! The full wage calculation pipeline.
//!
//! Runs regional adjustment, gross pay, deductions, net pay and the overtime
//! projection in order at full precision, then rounds every monetary figure
//! to pence once at the end.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::WageConfig;
use crate::error::EngineResult;
use crate::models::{AuditTrace, AuditWarning, WageCalculationResult, WageInputs, round_money};

use super::deductions::calculate_deductions;
use super::gross_pay::calculate_gross_pay;
use super::net_pay::calculate_net_pay;
use super::overtime::calculate_overtime_projection;
use super::regional_rate::apply_regional_adjustment;

/// Warning code raised when income reaches the unmodelled additional-rate band.
pub const ADDITIONAL_RATE_WARNING: &str = "ADDITIONAL_RATE_NOT_MODELLED";

fn additional_rate_warning(annual_gross: Decimal, config: &WageConfig) -> Option<AuditWarning> {
    let bands = &config.tax().income_tax;
    (annual_gross > bands.higher_rate_threshold).then(|| AuditWarning {
        code: ADDITIONAL_RATE_WARNING.to_string(),
        message: format!(
            "Annual gross £{} is above £{}; income over that threshold is taxed at {}% \
             because no additional-rate band is applied",
            round_money(annual_gross),
            bands.higher_rate_threshold.normalize(),
            (bands.higher_rate * Decimal::ONE_HUNDRED).normalize()
        ),
        severity: "medium".to_string(),
    })
}

/// Calculates gross pay, deductions, net pay and the overtime projection.
///
/// # Errors
///
/// Returns `InvalidInput` if hours or rate are negative or the pension
/// percentage is outside `[0, 100]`.
///
/// # Examples
///
/// ```
/// use tradepay_engine::calculation::calculate_wages;
/// use tradepay_engine::config::WageConfig;
/// use tradepay_engine::models::{Region, WageInputs};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let inputs = WageInputs {
///     hours_per_week: Decimal::from_str("37.5").unwrap(),
///     hourly_rate: Decimal::from_str("7.55").unwrap(),
///     region: Region::Standard,
///     has_student_loan: false,
///     pension_contribution_percent: Decimal::from(3),
/// };
/// let result = calculate_wages(&inputs, &WageConfig::default()).unwrap();
/// assert_eq!(result.net.annual.to_string(), "13592.03");
/// ```
pub fn calculate_wages(
    inputs: &WageInputs,
    config: &WageConfig,
) -> EngineResult<WageCalculationResult> {
    let start_time = Instant::now();
    inputs.validate()?;

    let mut steps = Vec::new();
    let mut warnings = Vec::new();

    let regional = apply_regional_adjustment(inputs.hourly_rate, &inputs.region, config, 1);
    let effective_rate = regional.effective_rate;
    steps.push(regional.audit_step);

    let gross = calculate_gross_pay(inputs.hours_per_week, effective_rate, config, 2);
    let annual_gross = gross.gross.annual;
    steps.push(gross.audit_step);

    let deductions = calculate_deductions(
        annual_gross,
        inputs.has_student_loan,
        inputs.pension_contribution_percent,
        config,
        3,
    );
    steps.push(deductions.audit_step);

    let net = calculate_net_pay(annual_gross, &deductions.deductions, config, 4);
    steps.push(net.audit_step);

    let overtime = calculate_overtime_projection(effective_rate, annual_gross, inputs, config, 5);
    steps.extend(overtime.audit_steps);

    let combined_gross = annual_gross + overtime.projection.annual_gross;
    if let Some(warning) = additional_rate_warning(combined_gross, config) {
        warn!(
            annual_gross = %round_money(combined_gross),
            "Income above higher-rate threshold taxed at higher rate"
        );
        warnings.push(warning);
    }

    let duration_us = start_time.elapsed().as_micros() as u64;
    debug!(
        region = %inputs.region,
        annual_gross = %round_money(annual_gross),
        annual_net = %round_money(net.net.annual),
        duration_us,
        "Wage calculation completed"
    );

    Ok(WageCalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        tax_year: config.tax().tax_year.clone(),
        inputs: inputs.clone(),
        effective_hourly_rate: round_money(effective_rate),
        gross: gross.gross.rounded(),
        deductions: deductions.deductions.rounded(),
        net: net.net.rounded(),
        overtime: overtime.projection.rounded(),
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::Region;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn inputs(hours: &str, rate: &str, region: Region) -> WageInputs {
        WageInputs {
            hours_per_week: dec(hours),
            hourly_rate: dec(rate),
            region,
            has_student_loan: false,
            pension_contribution_percent: Decimal::ZERO,
        }
    }

    #[test]
    fn test_end_to_end_apprentice_scenario() {
        let mut wage_inputs = inputs("37.5", "7.55", Region::Standard);
        wage_inputs.pension_contribution_percent = dec("3");

        let result = calculate_wages(&wage_inputs, &WageConfig::default()).unwrap();

        assert_eq!(result.effective_hourly_rate, dec("7.55"));
        assert_eq!(result.gross.weekly, dec("283.13"));
        assert_eq!(result.gross.annual, dec("14722.50"));
        assert_eq!(result.deductions.income_tax, dec("430.50"));
        assert_eq!(result.deductions.national_insurance, dec("258.30"));
        assert_eq!(result.deductions.student_loan, Decimal::ZERO);
        assert_eq!(result.deductions.pension, dec("441.68"));
        assert_eq!(result.net.annual, dec("13592.03"));
        assert_eq!(result.net.monthly, dec("1132.67"));
        assert_eq!(result.net.weekly, dec("261.39"));
    }

    #[test]
    fn test_rounding_happens_once_at_the_end() {
        let mut wage_inputs = inputs("37.5", "7.55", Region::Standard);
        wage_inputs.pension_contribution_percent = dec("3");

        let result = calculate_wages(&wage_inputs, &WageConfig::default()).unwrap();

        // Unrounded intermediates stay in the audit trace.
        let net_step = &result.audit_trace.steps[3];
        assert_eq!(net_step.rule_id, "net_pay");
        assert_eq!(net_step.output["annual"].as_str().unwrap(), "13592.025");
    }

    #[test]
    fn test_london_rate_adjustment() {
        let result =
            calculate_wages(&inputs("40", "10", Region::London), &WageConfig::default()).unwrap();

        assert_eq!(result.effective_hourly_rate, dec("12.50"));
        assert_eq!(result.gross.weekly, dec("500.00"));
        assert_eq!(result.gross.annual, dec("26000.00"));
    }

    #[test]
    fn test_overtime_projection_is_included() {
        let result =
            calculate_wages(&inputs("40", "10", Region::Standard), &WageConfig::default())
                .unwrap();

        assert_eq!(result.overtime.hourly_rate, dec("15.00"));
        assert_eq!(result.overtime.annual_gross, dec("3900.00"));
        assert_eq!(result.overtime.annual_net, dec("20818.40"));
        assert_eq!(result.overtime.monthly_net, dec("1734.87"));
    }

    #[test]
    fn test_audit_trace_has_six_ordered_steps() {
        let result =
            calculate_wages(&inputs("40", "10", Region::Standard), &WageConfig::default())
                .unwrap();

        let rule_ids: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "regional_adjustment",
                "gross_pay",
                "statutory_deductions",
                "net_pay",
                "overtime_earnings",
                "statutory_deductions",
            ]
        );
        let numbers: Vec<u32> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.step_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_high_earner_gets_additional_rate_warning() {
        let result =
            calculate_wages(&inputs("50", "60", Region::London), &WageConfig::default()).unwrap();

        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, ADDITIONAL_RATE_WARNING);
    }

    #[test]
    fn test_negative_hours_rejected() {
        let result = calculate_wages(&inputs("-1", "10", Region::Standard), &WageConfig::default());

        match result {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "hours_per_week"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_inputs_rejected_before_arithmetic() {
        let result = calculate_wages(
            &inputs("100000000000000000", "1000000000000", Region::London),
            &WageConfig::default(),
        );

        match result {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "hours_per_week"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_largest_accepted_inputs_calculate() {
        let mut wage_inputs = inputs("168", "10000", Region::London);
        wage_inputs.has_student_loan = true;
        wage_inputs.pension_contribution_percent = dec("100");

        let result = calculate_wages(&wage_inputs, &WageConfig::default()).unwrap();
        // 168 x 12500 x 52
        assert_eq!(result.gross.annual, dec("109200000.00"));
        assert_eq!(result.audit_trace.warnings.len(), 1);
    }

    #[test]
    fn test_audit_text_uses_pounds() {
        let result =
            calculate_wages(&inputs("50", "60", Region::London), &WageConfig::default()).unwrap();

        assert!(result.audit_trace.warnings[0].message.contains("£"));
        for step in &result.audit_trace.steps {
            assert!(
                !step.reasoning.contains('$'),
                "step {} reasoning: {}",
                step.rule_id,
                step.reasoning
            );
        }
        assert!(result.audit_trace.steps[1].reasoning.contains("£75"));
    }

    #[test]
    fn test_identical_inputs_give_identical_figures() {
        let wage_inputs = inputs("42", "18.75", Region::SouthEast);
        let first = calculate_wages(&wage_inputs, &WageConfig::default()).unwrap();
        let second = calculate_wages(&wage_inputs, &WageConfig::default()).unwrap();

        assert_eq!(first.gross, second.gross);
        assert_eq!(first.deductions, second.deductions);
        assert_eq!(first.net, second.net);
        assert_eq!(first.overtime, second.overtime);
    }
}
