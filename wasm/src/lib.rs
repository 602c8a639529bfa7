//! WebAssembly module for the Stock Withdrawal Management pages
//!
//! Provides client-side computation for:
//! - Grouping withdrawal history by bill and per-bill totals
//! - Latest/oldest sorting and expanded-bill state
//! - Unit price display
//! - Print document rendering
//! - User form validation

use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::format::*;
pub use shared::grouping::*;
pub use shared::models::*;
pub use shared::view::*;

/// One line of a bill, ready for display
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LineView {
    id: String,
    product_name: String,
    quantity: String,
    unit_price: String,
    description: String,
    total: String,
}

/// One bill, ready for display
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BillView {
    bill_id: String,
    date: String,
    location: String,
    requester: String,
    total: String,
    expanded: bool,
    lines: Vec<LineView>,
}

fn parse_history(history_json: &str) -> Result<Vec<StockHistoryRecord>, JsValue> {
    // Accept either the raw API body or a bare array of records.
    if let Ok(records) = serde_json::from_str::<Vec<StockHistoryRecord>>(history_json) {
        return Ok(records);
    }
    serde_json::from_str::<StockHistoryResponse>(history_json)
        .map(StockHistoryResponse::into_records)
        .map_err(|e| {
            log_error(&format!("Invalid history JSON: {}", e));
            JsValue::from_str(&format!("Invalid history JSON: {}", e))
        })
}

fn parse_order(order: &str) -> Result<SortOrder, JsValue> {
    order.parse::<SortOrder>().map_err(|e| JsValue::from_str(&e))
}

fn log_error(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

fn bill_views(view: &HistoryView, options: &DisplayOptions) -> Vec<BillView> {
    view.grouped()
        .iter()
        .map(|group| {
            let summary = group.summary();
            BillView {
                expanded: view.is_expanded(&summary.bill_id),
                date: options.date(&summary.date),
                total: options.money(summary.total),
                location: summary.location,
                requester: summary.requester,
                lines: group
                    .records()
                    .iter()
                    .map(|r| LineView {
                        id: r.id.clone(),
                        product_name: r.product_name.clone(),
                        quantity: format_quantity(r.quantity),
                        unit_price: options.unit_price(r),
                        description: r.description.clone(),
                        total: options.money(r.total),
                    })
                    .collect(),
                bill_id: summary.bill_id,
            }
        })
        .collect()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// History page view state, owned by the page for the duration of a visit
#[wasm_bindgen]
pub struct HistoryPage {
    view: HistoryView,
    options: DisplayOptions,
}

#[wasm_bindgen]
impl HistoryPage {
    /// Build the page state from the `GET /stock-history/withdraw` body
    #[wasm_bindgen(constructor)]
    pub fn new(history_json: &str) -> Result<HistoryPage, JsValue> {
        Ok(HistoryPage {
            view: HistoryView::new(parse_history(history_json)?),
            options: DisplayOptions::default(),
        })
    }

    /// Override the currency symbol used in amounts
    #[wasm_bindgen(js_name = setCurrencySymbol)]
    pub fn set_currency_symbol(&mut self, symbol: &str) {
        self.options.currency_symbol = symbol.to_string();
    }

    #[wasm_bindgen(js_name = setSortOrder)]
    pub fn set_sort_order(&mut self, order: &str) -> Result<(), JsValue> {
        self.view.set_sort_order(parse_order(order)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = sortOrder)]
    pub fn sort_order(&self) -> String {
        self.view.sort_order().to_string()
    }

    #[wasm_bindgen(js_name = toggleBill)]
    pub fn toggle_bill(&mut self, bill_id: &str) -> bool {
        self.view.toggle_bill(bill_id)
    }

    #[wasm_bindgen(js_name = isExpanded)]
    pub fn is_expanded(&self, bill_id: &str) -> bool {
        self.view.is_expanded(bill_id)
    }

    /// Bills in the current order as JSON
    #[wasm_bindgen(js_name = billsJson)]
    pub fn bills_json(&self) -> Result<String, JsValue> {
        to_json(&bill_views(&self.view, &self.options))
    }

    /// Printable document for one bill, to be written into a new window
    #[wasm_bindgen(js_name = printDocument)]
    pub fn print_document(&self, bill_id: &str) -> Result<String, JsValue> {
        let grouping = self.view.grouped();
        let group = grouping
            .get(bill_id)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown bill: {}", bill_id)))?;
        Ok(shared::html::render_print_document([group], &self.options))
    }

    /// File name for the PDF export of a bill
    #[wasm_bindgen(js_name = pdfFileName)]
    pub fn pdf_file_name(&self, bill_id: &str) -> String {
        shared::export_file_name(bill_id)
    }
}

/// Per-bill totals as JSON `[[billId, "total"], ...]`, bills in the given order
#[wasm_bindgen]
pub fn bill_totals(history_json: &str, order: &str) -> Result<String, JsValue> {
    let mut records = parse_history(history_json)?;
    sort_records_in_place(&mut records, parse_order(order)?);
    let grouping = group_by_bill(&records);
    let totals: Vec<(String, String)> = grouping
        .iter()
        .map(|g| (g.bill_id().to_string(), g.total().to_string()))
        .collect();
    to_json(&totals)
}

/// Unit price text for a line; the placeholder when quantity is zero or either number is not finite
#[wasm_bindgen]
pub fn unit_price_display(quantity: f64, total: f64, currency_symbol: &str) -> String {
    let price = Decimal::try_from(quantity)
        .ok()
        .zip(Decimal::try_from(total).ok())
        .and_then(|(quantity, total)| total.checked_div(quantity));
    match price {
        Some(price) => format_money(price, currency_symbol),
        None => shared::PLACEHOLDER.to_string(),
    }
}

/// Validate the add-user form; returns the request body JSON or a Thai error message
#[wasm_bindgen]
pub fn validate_user_form(username: &str, password: &str, role: &str) -> Result<String, JsValue> {
    let request = shared::build_user_request(username, password, role)
        .map_err(|e| JsValue::from_str(&e.message_th()))?;
    to_json(&request)
}
