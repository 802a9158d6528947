//! Wage calculator inputs.
//!
//! This module defines the [`Region`] enum, the validated [`WageInputs`]
//! struct passed into the calculator, and the raw [`WageForm`] that form
//! submissions arrive as.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// Upper bound on weekly hours: the hours in a week.
pub const MAX_HOURS_PER_WEEK: Decimal = Decimal::from_parts(168, 0, 0, false, 0);

/// Upper bound on the hourly rate, in pounds.
pub const MAX_HOURLY_RATE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// The UK region an hourly rate is adjusted for.
///
/// Parsing is lenient: unrecognised codes are kept as [`Region::Other`]
/// and receive a multiplier of 1.0.
///
/// # Example
///
/// ```
/// use tradepay_engine::models::Region;
///
/// assert_eq!(Region::from("London"), Region::London);
/// assert_eq!(Region::from("south_east"), Region::SouthEast);
/// assert_eq!(Region::from("scotland").code(), "scotland");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Region {
    /// Greater London.
    London,
    /// South East England.
    SouthEast,
    /// Rest of England and Scotland.
    #[default]
    Standard,
    /// Wales.
    Wales,
    /// Northern Ireland.
    NorthernIreland,
    /// Any other region code.
    Other(String),
}

impl Region {
    /// Returns the configuration code for this region.
    pub fn code(&self) -> &str {
        match self {
            Region::London => "london",
            Region::SouthEast => "southeast",
            Region::Standard => "standard",
            Region::Wales => "wales",
            Region::NorthernIreland => "northern_ireland",
            Region::Other(code) => code,
        }
    }
}

impl From<&str> for Region {
    fn from(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "london" => Region::London,
            "southeast" | "south_east" => Region::SouthEast,
            "standard" | "" => Region::Standard,
            "wales" => Region::Wales,
            "northern_ireland" | "northernireland" => Region::NorthernIreland,
            _ => Region::Other(normalized),
        }
    }
}

impl From<String> for Region {
    fn from(value: String) -> Self {
        Region::from(value.as_str())
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.code().to_string()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Validated inputs to a single wage calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageInputs {
    /// Hours worked per week.
    pub hours_per_week: Decimal,
    /// Base hourly rate before regional adjustment.
    pub hourly_rate: Decimal,
    /// The region the rate is adjusted for.
    #[serde(default)]
    pub region: Region,
    /// Whether Plan 2 student loan repayments apply.
    #[serde(default)]
    pub has_student_loan: bool,
    /// Pension contribution as a percentage of gross pay.
    #[serde(default)]
    pub pension_contribution_percent: Decimal,
}

impl WageInputs {
    /// Checks that hours lie within `[0, 168]`, the rate within
    /// `[0, 10000]` and the pension percentage within `[0, 100]`.
    ///
    /// The upper bounds keep every derived figure well inside `Decimal`'s
    /// range, so the calculation steps cannot overflow.
    ///
    /// # Example
    ///
    /// ```
    /// use tradepay_engine::models::{Region, WageInputs};
    /// use rust_decimal::Decimal;
    ///
    /// let inputs = WageInputs {
    ///     hours_per_week: Decimal::new(-1, 0),
    ///     hourly_rate: Decimal::new(10, 0),
    ///     region: Region::Standard,
    ///     has_student_loan: false,
    ///     pension_contribution_percent: Decimal::ZERO,
    /// };
    /// assert!(inputs.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.hours_per_week < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "hours_per_week",
                format!("must not be negative (got {})", self.hours_per_week),
            ));
        }

        if self.hours_per_week > MAX_HOURS_PER_WEEK {
            return Err(EngineError::invalid_input(
                "hours_per_week",
                format!(
                    "must be at most {} (got {})",
                    MAX_HOURS_PER_WEEK, self.hours_per_week
                ),
            ));
        }

        if self.hourly_rate < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "hourly_rate",
                format!("must not be negative (got {})", self.hourly_rate),
            ));
        }

        if self.hourly_rate > MAX_HOURLY_RATE {
            return Err(EngineError::invalid_input(
                "hourly_rate",
                format!("must be at most {} (got {})", MAX_HOURLY_RATE, self.hourly_rate),
            ));
        }

        let percent = self.pension_contribution_percent;
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(EngineError::invalid_input(
                "pension_contribution_percent",
                format!("must be between 0 and 100 (got {})", percent),
            ));
        }

        Ok(())
    }
}

/// Raw wage calculator form fields, exactly as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageForm {
    /// Hours per week as entered.
    pub hours_per_week: String,
    /// Hourly rate as entered.
    pub hourly_rate: String,
    /// Region code as selected.
    #[serde(default)]
    pub region: String,
    /// Student loan checkbox value ("on", "true", "yes", "1" or blank).
    #[serde(default)]
    pub has_student_loan: String,
    /// Pension percentage as entered; blank means 0.
    #[serde(default)]
    pub pension_contribution_percent: String,
}

fn parse_number(field: &str, raw: &str, required: bool) -> EngineResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return if required {
            Err(EngineError::invalid_input(field, "is required"))
        } else {
            Ok(Decimal::ZERO)
        };
    }

    Decimal::from_str(trimmed)
        .map_err(|_| EngineError::invalid_input(field, format!("'{}' is not a number", trimmed)))
}

fn parse_flag(field: &str, raw: &str) -> EngineResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "off" | "no" | "0" => Ok(false),
        "true" | "on" | "yes" | "1" => Ok(true),
        other => Err(EngineError::invalid_input(
            field,
            format!("'{}' is not a yes/no value", other),
        )),
    }
}

impl TryFrom<WageForm> for WageInputs {
    type Error = EngineError;

    fn try_from(form: WageForm) -> EngineResult<Self> {
        let inputs = WageInputs {
            hours_per_week: parse_number("hours_per_week", &form.hours_per_week, true)?,
            hourly_rate: parse_number("hourly_rate", &form.hourly_rate, true)?,
            region: Region::from(form.region),
            has_student_loan: parse_flag("has_student_loan", &form.has_student_loan)?,
            pension_contribution_percent: parse_number(
                "pension_contribution_percent",
                &form.pension_contribution_percent,
                false,
            )?,
        };
        inputs.validate()?;
        Ok(inputs)
    }
}
