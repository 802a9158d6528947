//! Calculation logic for the wage calculator.
//!
//! This module contains the calculation steps for turning an hourly rate into
//! take-home pay: regional rate adjustment, gross pay, statutory deductions
//! (income tax, National Insurance, student loan and pension), net pay and
//! the overtime projection, plus the [`calculate_wages`] pipeline that runs
//! them in order.

mod deductions;
mod gross_pay;
mod net_pay;
mod overtime;
mod pipeline;
mod regional_rate;

pub use deductions::{
    DeductionsResult, calculate_deductions, calculate_income_tax, calculate_national_insurance,
    calculate_pension, calculate_student_loan,
};
pub use gross_pay::{GrossPayResult, calculate_gross_pay};
pub use net_pay::{NetPayResult, calculate_net_pay};
pub use overtime::{OvertimeProjectionResult, calculate_overtime_projection};
pub use pipeline::{ADDITIONAL_RATE_WARNING, calculate_wages};
pub use regional_rate::{RegionalRateResult, apply_regional_adjustment};
