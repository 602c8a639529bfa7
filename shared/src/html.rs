//! Print-formatted HTML rendering of bills
//!
//! The document is self-contained and meant to be opened in its own
//! window or tab. Interactive controls carry the `no-print` class and are
//! hidden by the print stylesheet.

use std::fmt::Write;

use crate::format::{format_quantity, DisplayOptions};
use crate::grouping::BillGroup;
use crate::types::HISTORY_TITLE_TH;

const PRINT_STYLE: &str = r#"
body { font-family: 'Sarabun', 'Noto Sans Thai', 'Tahoma', sans-serif; margin: 24px; color: #111; }
h1 { font-size: 20px; margin-bottom: 16px; }
.bill { margin-bottom: 32px; page-break-inside: avoid; }
.bill-header { display: grid; grid-template-columns: 1fr 1fr; gap: 4px 24px; margin-bottom: 8px; }
table { width: 100%; border-collapse: collapse; }
th, td { border: 1px solid #ccc; padding: 6px 8px; text-align: left; }
td.num, th.num { text-align: right; }
tr.grand-total td { font-weight: bold; }
.toolbar { margin-bottom: 16px; }
@media print {
  .no-print { display: none !important; }
  body { margin: 0; }
}
"#;

const PRINT_SCRIPT: &str = r#"
window.addEventListener('load', function () { window.print(); });
window.addEventListener('afterprint', function () { window.close(); });
"#;

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Render one bill as an HTML fragment (header fields, line items, grand total)
pub fn render_bill_fragment(group: &BillGroup, options: &DisplayOptions) -> String {
    let summary = group.summary();
    let mut html = String::new();

    let _ = writeln!(html, r#"<section class="bill" data-bill-id="{}">"#, escape_html(&summary.bill_id));
    let _ = writeln!(html, r#"  <div class="bill-header">"#);
    for (label, value) in [
        ("เลขที่เอกสาร", summary.bill_id.clone()),
        ("วันที่", options.date(&summary.date)),
        ("สถานที่", summary.location.clone()),
        ("ผู้เบิก", summary.requester.clone()),
    ] {
        let _ = writeln!(
            html,
            "    <div><strong>{}:</strong> {}</div>",
            label,
            escape_html(&value)
        );
    }
    let _ = writeln!(html, "  </div>");

    let _ = writeln!(html, "  <table>");
    let _ = writeln!(
        html,
        r#"    <thead><tr><th>สินค้า</th><th class="num">จำนวน</th><th class="num">ราคาต่อหน่วย</th><th>รายละเอียด</th><th class="num">ราคารวม</th></tr></thead>"#
    );
    let _ = writeln!(html, "    <tbody>");
    for record in group.records() {
        let _ = writeln!(
            html,
            r#"      <tr><td>{}</td><td class="num">{}</td><td class="num">{}</td><td>{}</td><td class="num">{}</td></tr>"#,
            escape_html(&record.product_name),
            escape_html(&format_quantity(record.quantity)),
            escape_html(&options.unit_price(record)),
            escape_html(&record.description),
            escape_html(&options.money(record.total)),
        );
    }
    let _ = writeln!(
        html,
        r#"      <tr class="grand-total"><td colspan="4">รวมทั้งสิ้น</td><td class="num">{}</td></tr>"#,
        escape_html(&options.money(summary.total))
    );
    let _ = writeln!(html, "    </tbody>");
    let _ = writeln!(html, "  </table>");
    let _ = writeln!(html, "</section>");
    html
}

/// Render a complete printable document for the given bills
pub fn render_print_document<'a, I>(groups: I, options: &DisplayOptions) -> String
where
    I: IntoIterator<Item = &'a BillGroup>,
{
    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, r#"<html lang="th">"#);
    let _ = writeln!(html, "<head>");
    let _ = writeln!(html, r#"<meta charset="utf-8">"#);
    let _ = writeln!(html, "<title>{}</title>", HISTORY_TITLE_TH);
    let _ = writeln!(html, "<style>{}</style>", PRINT_STYLE);
    let _ = writeln!(html, "</head>");
    let _ = writeln!(html, "<body>");
    let _ = writeln!(
        html,
        r#"<div class="toolbar no-print"><button onclick="window.print()">พิมพ์</button> <button onclick="window.close()">ปิด</button></div>"#
    );
    let _ = writeln!(html, "<h1>{}</h1>", HISTORY_TITLE_TH);
    for group in groups {
        html.push_str(&render_bill_fragment(group, options));
    }
    let _ = writeln!(html, "<script>{}</script>", PRINT_SCRIPT);
    let _ = writeln!(html, "</body>");
    let _ = writeln!(html, "</html>");
    html
}
