//! Configuration types for pay calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Income tax bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxBands {
    /// Income up to this amount is untaxed.
    pub personal_allowance: Decimal,
    /// Upper edge of the basic-rate band.
    pub basic_rate_threshold: Decimal,
    /// Upper edge of the higher-rate band. Declared but not applied.
    pub higher_rate_threshold: Decimal,
    /// Rate charged between the allowance and the basic-rate threshold.
    pub basic_rate: Decimal,
    /// Rate charged on everything above the basic-rate threshold.
    pub higher_rate: Decimal,
}

/// National Insurance band. Nothing is charged outside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalInsuranceBand {
    /// Lower edge of the charged slice.
    pub lower_threshold: Decimal,
    /// Upper edge of the charged slice.
    pub upper_threshold: Decimal,
    /// Rate charged on the slice.
    pub rate: Decimal,
}

/// Student loan repayment terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentLoanTerms {
    /// The repayment plan name (e.g., "plan_2").
    pub plan: String,
    /// Income above this threshold is subject to repayment.
    pub threshold: Decimal,
    /// Repayment rate applied above the threshold.
    pub rate: Decimal,
}

/// Tax configuration from tax.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    /// The tax year these figures belong to (e.g., "2025/26").
    pub tax_year: String,
    /// Income tax bands.
    pub income_tax: IncomeTaxBands,
    /// National Insurance band.
    pub national_insurance: NationalInsuranceBand,
    /// Student loan terms.
    pub student_loan: StudentLoanTerms,
}

/// Overtime assumptions used by the projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeAssumption {
    /// Overtime hours assumed per week.
    pub hours_per_week: Decimal,
    /// Multiplier applied to the effective hourly rate.
    pub multiplier: Decimal,
}

/// Pay period configuration from pay.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayConfig {
    /// Fixed weeks-per-month factor (4.33).
    pub weeks_per_month: Decimal,
    /// Weeks in a pay year.
    pub weeks_per_year: Decimal,
    /// Months in a pay year.
    pub months_per_year: Decimal,
    /// Overtime projection assumptions.
    pub overtime: OvertimeAssumption,
    /// Map of region code to hourly rate multiplier.
    pub regional_multipliers: HashMap<String, Decimal>,
}

/// The complete wage configuration loaded from YAML files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WageConfig {
    tax: TaxConfig,
    pay: PayConfig,
}

impl WageConfig {
    /// Creates a new WageConfig from its component parts.
    pub fn new(tax: TaxConfig, pay: PayConfig) -> Self {
        Self { tax, pay }
    }

    /// Returns the tax configuration.
    pub fn tax(&self) -> &TaxConfig {
        &self.tax
    }

    /// Returns the pay period configuration.
    pub fn pay(&self) -> &PayConfig {
        &self.pay
    }

    /// Returns the multiplier for a region code, or 1.0 when the code is unknown.
    pub fn regional_multiplier(&self, code: &str) -> Decimal {
        self.pay
            .regional_multipliers
            .get(code)
            .copied()
            .unwrap_or(Decimal::ONE)
    }
}

impl Default for WageConfig {
    /// The 2025/26 UK figures, matching `config/uk`.
    fn default() -> Self {
        let regional_multipliers = [
            ("london", Decimal::new(125, 2)),
            ("southeast", Decimal::new(115, 2)),
            ("standard", Decimal::new(100, 2)),
            ("wales", Decimal::new(95, 2)),
            ("northern_ireland", Decimal::new(95, 2)),
        ]
        .into_iter()
        .map(|(code, multiplier)| (code.to_string(), multiplier))
        .collect();

        Self {
            tax: TaxConfig {
                tax_year: "2025/26".to_string(),
                income_tax: IncomeTaxBands {
                    personal_allowance: Decimal::new(12570, 0),
                    basic_rate_threshold: Decimal::new(50270, 0),
                    higher_rate_threshold: Decimal::new(125140, 0),
                    basic_rate: Decimal::new(20, 2),
                    higher_rate: Decimal::new(40, 2),
                },
                national_insurance: NationalInsuranceBand {
                    lower_threshold: Decimal::new(12570, 0),
                    upper_threshold: Decimal::new(50270, 0),
                    rate: Decimal::new(12, 2),
                },
                student_loan: StudentLoanTerms {
                    plan: "plan_2".to_string(),
                    threshold: Decimal::new(27295, 0),
                    rate: Decimal::new(9, 2),
                },
            },
            pay: PayConfig {
                weeks_per_month: Decimal::new(433, 2),
                weeks_per_year: Decimal::new(52, 0),
                months_per_year: Decimal::new(12, 0),
                overtime: OvertimeAssumption {
                    hours_per_week: Decimal::new(5, 0),
                    multiplier: Decimal::new(15, 1),
                },
                regional_multipliers,
            },
        }
    }
}
