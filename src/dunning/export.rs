//! CSV export of recovery records.
//!
//! The export always covers every record in the snapshot, not just the ones
//! matching the current search.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::PaymentRecoveryRecord;

use super::stage::classify_stage;

/// MIME type of the export.
pub const EXPORT_MIME_TYPE: &str = "text/csv";

/// Column headings, in order.
pub const EXPORT_HEADERS: [&str; 6] = [
    "User",
    "Amount",
    "Invoice ID",
    "Emails Sent",
    "Status",
    "Created",
];

/// Returns the download filename for an export made on `date`.
///
/// # Examples
///
/// ```
/// use tradepay_engine::dunning::export_filename;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
/// assert_eq!(export_filename(date), "admin-failed-payments-2026-10-18.csv");
/// ```
pub fn export_filename(date: NaiveDate) -> String {
    format!("admin-failed-payments-{}.csv", date.format("%Y-%m-%d"))
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_ascii_lowercase().as_str() {
        "gbp" => Some("£"),
        "eur" => Some("€"),
        "usd" => Some("$"),
        _ => None,
    }
}

/// Formats an amount in minor units as a currency string with thousands
/// separators.
///
/// # Examples
///
/// ```
/// use tradepay_engine::dunning::format_minor_units;
///
/// assert_eq!(format_minor_units(2999, "gbp"), "£29.99");
/// assert_eq!(format_minor_units(123456789, "gbp"), "£1,234,567.89");
/// assert_eq!(format_minor_units(500, "chf"), "CHF 5.00");
/// ```
pub fn format_minor_units(amount: u64, currency: &str) -> String {
    let major = (amount / 100).to_string();
    let minor = amount % 100;

    let mut grouped = String::with_capacity(major.len() + major.len() / 3);
    for (i, digit) in major.chars().enumerate() {
        if i > 0 && (major.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match currency_symbol(currency) {
        Some(symbol) => format!("{}{}.{:02}", symbol, grouped, minor),
        None => format!("{} {}.{:02}", currency.to_ascii_uppercase(), grouped, minor),
    }
}

/// Serialises records to CSV text.
///
/// Fields containing a comma, quote or newline are quoted and embedded
/// quotes are doubled. An empty slice produces just the header row.
pub fn export_csv(records: &[PaymentRecoveryRecord]) -> EngineResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for record in records {
        writer.write_record([
            record.display_name().to_string(),
            format_minor_units(record.amount_due, &record.currency),
            record.invoice_id.clone().unwrap_or_default(),
            record.emails_sent.to_string(),
            classify_stage(record).label().to_string(),
            record.created_at.format("%Y-%m-%d").to_string(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| EngineError::Export {
        message: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|e| EngineError::Export {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dunning::test_support::{record, sample_records};

    const HEADER: &str = "User,Amount,Invoice ID,Emails Sent,Status,Created";

    #[test]
    fn test_empty_export_is_header_only() {
        let csv_text = export_csv(&[]).unwrap();
        assert_eq!(csv_text.lines().collect::<Vec<_>>(), vec![HEADER]);
    }

    #[test]
    fn test_row_contents() {
        let csv_text = export_csv(&[record("1001", 2, false)]).unwrap();
        let lines: Vec<&str> = csv_text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "User 1001,£29.99,in_1001,2,Email 2 Sent,2026-03-01");
    }

    #[test]
    fn test_comma_in_name_is_quoted() {
        let records = sample_records();
        let csv_text = export_csv(&records[2..3]).unwrap();
        assert!(csv_text.contains("\"Carys Volt, Ltd\","));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let records = sample_records();
        let csv_text = export_csv(&records[3..4]).unwrap();
        assert!(csv_text.contains("\"Dan \"\"Sparky\"\" Jones\""));
    }

    #[test]
    fn test_amount_with_thousands_separator_is_quoted() {
        let mut r = record("big", 1, false);
        r.amount_due = 125_000;
        let csv_text = export_csv(&[r]).unwrap();
        assert!(csv_text.contains(",\"£1,250.00\","));
    }

    #[test]
    fn test_round_trip_through_csv_reader() {
        let records = sample_records();
        let csv_text = export_csv(&records).unwrap();

        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), EXPORT_HEADERS.to_vec());

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), records.len());
        assert_eq!(&rows[2][0], "Carys Volt, Ltd");
        assert_eq!(&rows[3][0], "Dan \"Sparky\" Jones");
        assert_eq!(&rows[4][0], "1005@example.com");
        assert_eq!(&rows[5][4], "Recovered");
    }

    #[test]
    fn test_missing_invoice_is_blank() {
        let mut r = record("x", 0, false);
        r.invoice_id = None;
        let csv_text = export_csv(&[r]).unwrap();
        assert!(csv_text.lines().nth(1).unwrap().contains(",,0,Pending,"));
    }

    #[test]
    fn test_format_minor_units() {
        assert_eq!(format_minor_units(0, "gbp"), "£0.00");
        assert_eq!(format_minor_units(5, "GBP"), "£0.05");
        assert_eq!(format_minor_units(100_000, "gbp"), "£1,000.00");
        assert_eq!(format_minor_units(99_999, "usd"), "$999.99");
    }
}
