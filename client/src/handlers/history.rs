//! History page: load, sort, group and render as a text table

use std::fmt::Write;

use shared::{format_quantity, DisplayOptions, HistoryView, Language, SortOrder, HISTORY_TITLE_TH};

use crate::error::{AppError, AppResult};
use crate::external::HistorySource;
use crate::services::history::{HistoryLoader, LoadState, HISTORY_LOAD_FAILED_TH};

/// Load the history once and build the page's view state
pub async fn fetch_view<S>(source: &S, order: SortOrder, expand: &[String]) -> AppResult<HistoryView>
where
    S: HistorySource + ?Sized,
{
    let loader = HistoryLoader::new();
    match loader.load(source).await {
        LoadState::Loaded(records) => {
            let mut view = HistoryView::new(records);
            view.set_sort_order(order);
            for bill_id in expand {
                if !view.is_expanded(bill_id) {
                    view.toggle_bill(bill_id);
                }
            }
            Ok(view)
        }
        LoadState::Failed(message) => Err(AppError::HistoryUnavailable(message)),
        LoadState::Idle | LoadState::Loading => {
            Err(AppError::HistoryUnavailable(HISTORY_LOAD_FAILED_TH.to_string()))
        }
    }
}

/// Render the grouped history; expanded bills list their line items
pub fn render_history(view: &HistoryView, options: &DisplayOptions) -> String {
    let grouping = view.grouped();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} [{}]",
        HISTORY_TITLE_TH,
        view.sort_order().label(Language::Thai)
    );

    if grouping.is_empty() {
        let _ = writeln!(out, "ไม่มีประวัติการเบิกสินค้า");
        return out;
    }

    let _ = writeln!(out, "  วันที่ | เลขที่เอกสาร | สถานที่ | ผู้เบิก | รายการ | ราคารวม");
    for group in &grouping {
        let summary = group.summary();
        let marker = if view.is_expanded(group.bill_id()) { "▾" } else { "▸" };
        let _ = writeln!(
            out,
            "{} {} | {} | {} | {} | {} | {}",
            marker,
            options.date(&summary.date),
            summary.bill_id,
            summary.location,
            summary.requester,
            summary.line_count,
            options.money(summary.total),
        );

        if view.is_expanded(group.bill_id()) {
            for record in group.records() {
                let _ = writeln!(
                    out,
                    "    {} | {} | {} | {} | {}",
                    record.product_name,
                    format_quantity(record.quantity),
                    options.unit_price(record),
                    record.description,
                    options.money(record.total),
                );
            }
        }
    }
    let _ = writeln!(out, "รวมทั้งสิ้น {}", options.money(grouping.grand_total()));
    out
}

/// `swm history`
pub async fn show_history<S>(
    source: &S,
    options: &DisplayOptions,
    order: SortOrder,
    expand: &[String],
) -> AppResult<String>
where
    S: HistorySource + ?Sized,
{
    let view = fetch_view(source, order, expand).await?;
    Ok(render_history(&view, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::StockHistoryRecord;

    fn record(id: &str, bill: &str, date: &str, quantity: i64, total: i64) -> StockHistoryRecord {
        StockHistoryRecord {
            id: id.to_string(),
            bill_id: bill.to_string(),
            date: date.to_string(),
            location: "คลัง".to_string(),
            username: "somchai".to_string(),
            product_name: format!("p{}", id),
            quantity: Decimal::from(quantity),
            description: String::new(),
            total: Decimal::from(total),
        }
    }

    #[test]
    fn test_render_collapsed_and_expanded() {
        let mut view = HistoryView::new(vec![
            record("1", "B1", "2024-01-01", 2, 100),
            record("2", "B1", "2024-01-01", 0, 50),
            record("3", "B2", "2024-01-05", 4, 200),
        ]);
        view.toggle_bill("B1");

        let out = render_history(&view, &DisplayOptions::default());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "ประวัติการเบิกสินค้า [ล่าสุด]");
        assert!(lines[2].starts_with("▸ 5/1/2567 | B2"));
        assert!(lines[3].starts_with("▾ 1/1/2567 | B1"));
        assert!(lines[3].ends_with("| 2 | $150.00"));
        assert!(lines[4].contains("p1 | 2 | $50.00"));
        assert!(lines[5].contains("p2 | 0 | —"));
        assert_eq!(*lines.last().unwrap(), "รวมทั้งสิ้น $350.00");
    }

    #[test]
    fn test_render_empty_history() {
        let out = render_history(&HistoryView::default(), &DisplayOptions::default());
        assert!(out.contains("ไม่มีประวัติการเบิกสินค้า"));
    }
}
