//! Display formatting: Thai dates, money and quantities

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};
use rust_decimal::Decimal;

use crate::models::StockHistoryRecord;
use crate::types::PLACEHOLDER;

/// How dates and amounts are shown
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOptions {
    pub utc_offset: FixedOffset,
    pub currency_symbol: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            utc_offset: bangkok_offset(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl DisplayOptions {
    pub fn date(&self, raw: &str) -> String {
        display_date(raw, self.utc_offset)
    }

    pub fn money(&self, amount: Decimal) -> String {
        format_money(amount, &self.currency_symbol)
    }

    pub fn unit_price(&self, record: &StockHistoryRecord) -> String {
        format_unit_price(record, &self.currency_symbol)
    }
}

/// Offset between the Buddhist era and the Gregorian calendar
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Fixed offset from whole hours; out-of-range values fall back to UTC
pub fn utc_offset(hours: i32) -> FixedOffset {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or(Utc.fix())
}

/// Bangkok local time (UTC+7)
pub fn bangkok_offset() -> FixedOffset {
    utc_offset(7)
}

/// Format a timestamp the way `th-TH` locales show short dates: `d/m/yyyy` (B.E.)
pub fn format_thai_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    let local = timestamp.with_timezone(&offset);
    format!(
        "{}/{}/{}",
        local.day(),
        local.month(),
        local.year() + BUDDHIST_ERA_OFFSET
    )
}

/// Date column of a record; falls back to the raw string when it cannot be parsed
pub fn display_record_date(record: &StockHistoryRecord, offset: FixedOffset) -> String {
    display_date(&record.date, offset)
}

pub fn display_date(raw: &str, offset: FixedOffset) -> String {
    match crate::models::parse_record_date(raw) {
        Some(ts) => format_thai_date(ts, offset),
        None => raw.to_string(),
    }
}

/// Two decimals with thousands separators, e.g. `$1,234.50`
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, dec_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}{}.{}", sign, symbol, grouped, dec_part)
}

/// Quantity without trailing zeros
pub fn format_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}

/// Unit price column, or the placeholder when quantity is zero
pub fn format_unit_price(record: &StockHistoryRecord, symbol: &str) -> String {
    match record.unit_price() {
        Some(price) => format_money(price, symbol),
        None => PLACEHOLDER.to_string(),
    }
}

/// File name of a bill's PDF export: `{billId}-order-history.pdf`.
///
/// Characters that are not allowed in file names are replaced with `_`.
pub fn export_file_name(bill_id: &str) -> String {
    let safe: String = bill_id
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let safe = if safe.is_empty() { "bill".to_string() } else { safe };
    format!("{}-order-history.pdf", safe)
}
