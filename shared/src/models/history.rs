//! Stock-withdrawal history models

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line item of a stock withdrawal, as returned by the remote API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockHistoryRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub bill_id: String,
    /// Raw date string as sent by the API
    pub date: String,
    #[serde(default)]
    pub location: String,
    /// Requester of the withdrawal
    #[serde(default)]
    pub username: String,
    pub product_name: String,
    pub quantity: Decimal,
    #[serde(default)]
    pub description: String,
    /// Line total (currency)
    pub total: Decimal,
}

impl StockHistoryRecord {
    /// Parsed timestamp of the record, `None` if the date string is not understood
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_record_date(&self.date)
    }

    /// Implied unit price (`total / quantity`), `None` when quantity is zero
    pub fn unit_price(&self) -> Option<Decimal> {
        self.total.checked_div(self.quantity)
    }
}

/// Body of `GET /stock-history/withdraw`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockHistoryResponse {
    #[serde(default)]
    pub history: Option<Vec<StockHistoryRecord>>,
}

impl StockHistoryResponse {
    /// Records of the response; an absent `history` field is an empty list
    pub fn into_records(self) -> Vec<StockHistoryRecord> {
        self.history.unwrap_or_default()
    }
}

/// Parse the date formats the API is known to send.
///
/// Accepts RFC 3339 (`2024-01-05T08:30:00.000Z`), a zone-less date-time
/// (taken as UTC) and a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_record_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
