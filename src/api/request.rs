//! Request types for the API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Region, WageInputs};

/// Request body for `POST /wages/calculate`.
///
/// Decimals may be sent as JSON numbers or strings. Omitted optional fields
/// fall back to the calculator defaults: standard region, no student loan
/// and no pension contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageCalculationRequest {
    /// Hours worked per week.
    pub hours_per_week: Decimal,
    /// Base hourly rate.
    pub hourly_rate: Decimal,
    /// Region code, e.g. "london".
    #[serde(default)]
    pub region: Option<String>,
    /// Whether Plan 2 student loan repayments apply.
    #[serde(default)]
    pub has_student_loan: bool,
    /// Pension contribution percentage.
    #[serde(default)]
    pub pension_contribution_percent: Option<Decimal>,
}

impl From<WageCalculationRequest> for WageInputs {
    fn from(req: WageCalculationRequest) -> Self {
        WageInputs {
            hours_per_week: req.hours_per_week,
            hourly_rate: req.hourly_rate,
            region: req.region.map(Region::from).unwrap_or_default(),
            has_student_loan: req.has_student_loan,
            pension_contribution_percent: req.pension_contribution_percent.unwrap_or_default(),
        }
    }
}

/// Query string for `GET /dunning/records`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive search over display name and invoice ID.
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchQuery {
    /// The search text, or an empty string when absent.
    pub fn text(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_minimal_request() {
        let json = r#"{ "hours_per_week": 37.5, "hourly_rate": "7.55" }"#;

        let request: WageCalculationRequest = serde_json::from_str(json).unwrap();
        let inputs: WageInputs = request.into();

        assert_eq!(inputs.hours_per_week, Decimal::from_str("37.5").unwrap());
        assert_eq!(inputs.hourly_rate, Decimal::from_str("7.55").unwrap());
        assert_eq!(inputs.region, Region::Standard);
        assert!(!inputs.has_student_loan);
        assert_eq!(inputs.pension_contribution_percent, Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_full_request() {
        let json = r#"{
            "hours_per_week": "40",
            "hourly_rate": 12.5,
            "region": "London",
            "has_student_loan": true,
            "pension_contribution_percent": 5
        }"#;

        let inputs: WageInputs = serde_json::from_str::<WageCalculationRequest>(json)
            .unwrap()
            .into();
        assert_eq!(inputs.region, Region::London);
        assert!(inputs.has_student_loan);
        assert_eq!(inputs.pension_contribution_percent, Decimal::from(5));
    }

    #[test]
    fn test_missing_rate_is_rejected() {
        let result = serde_json::from_str::<WageCalculationRequest>(r#"{ "hours_per_week": 10 }"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("missing field"), "got: {}", err);
    }

    #[test]
    fn test_search_query_text() {
        assert_eq!(SearchQuery::default().text(), "");
        let query = SearchQuery {
            q: Some("alice".to_string()),
        };
        assert_eq!(query.text(), "alice");
    }
}
