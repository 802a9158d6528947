//! Regional rate adjustment.
//!
//! Hourly rates are scaled by a per-region multiplier before any pay is
//! calculated: London work pays 25% more than the standard rate, Wales and
//! Northern Ireland 5% less.

use rust_decimal::Decimal;

use crate::config::WageConfig;
use crate::models::{AuditStep, Region};

/// The result of a regional rate adjustment, including the rate and audit step.
#[derive(Debug, Clone)]
pub struct RegionalRateResult {
    /// The hourly rate after adjustment.
    pub effective_rate: Decimal,
    /// The multiplier that was applied.
    pub multiplier: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies the regional multiplier to an hourly rate.
///
/// Regions missing from the configuration use a multiplier of 1.0.
///
/// # Examples
///
/// ```
/// use tradepay_engine::calculation::apply_regional_adjustment;
/// use tradepay_engine::config::WageConfig;
/// use tradepay_engine::models::Region;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = WageConfig::default();
/// let result = apply_regional_adjustment(Decimal::from(10), &Region::London, &config, 1);
/// assert_eq!(result.effective_rate, Decimal::from_str("12.50").unwrap());
/// ```
pub fn apply_regional_adjustment(
    hourly_rate: Decimal,
    region: &Region,
    config: &WageConfig,
    step_number: u32,
) -> RegionalRateResult {
    let multiplier = config.regional_multiplier(region.code());
    let effective_rate = hourly_rate * multiplier;

    let reasoning = if config.pay().regional_multipliers.contains_key(region.code()) {
        format!(
            "£{} x {} ({}) = £{}",
            hourly_rate.normalize(),
            multiplier.normalize(),
            region,
            effective_rate.normalize()
        )
    } else {
        format!(
            "Region '{}' has no configured multiplier, rate unchanged at £{}",
            region,
            effective_rate.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "regional_adjustment".to_string(),
        rule_name: "Regional Rate Adjustment".to_string(),
        input: serde_json::json!({
            "hourly_rate": hourly_rate.normalize().to_string(),
            "region": region.code()
        }),
        output: serde_json::json!({
            "multiplier": multiplier.normalize().to_string(),
            "effective_rate": effective_rate.normalize().to_string()
        }),
        reasoning,
    };

    RegionalRateResult {
        effective_rate,
        multiplier,
        audit_step,
    }
}
