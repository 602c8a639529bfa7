//! PDF export of a single bill
//!
//! The page layout is computed first as positioned text runs and rules, then
//! drawn with `printpdf`. Built-in PDF fonts only cover Latin text, so an
//! external TTF with Thai coverage is embedded.

use std::fs;
use std::io::{BufWriter, Cursor};
use std::path::{Path, PathBuf};

use printpdf::{Line, Mm, PdfDocument, Point};
use shared::{export_file_name, format_quantity, BillGroup, DisplayOptions, HISTORY_TITLE_TH};

use crate::config::ExportConfig;
use crate::error::{AppError, AppResult};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const TOP_MM: f32 = 280.0;
const BOTTOM_MM: f32 = 20.0;
const ROW_MM: f32 = 6.0;

const COL_PRODUCT: f32 = MARGIN_MM;
const COL_QUANTITY: f32 = 105.0;
const COL_UNIT_PRICE: f32 = 130.0;
const COL_TOTAL: f32 = 165.0;

const MAX_PRODUCT_CHARS: usize = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// Text placed at a position on the page (millimetres from bottom-left)
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub weight: Weight,
}

/// Content of one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub runs: Vec<TextRun>,
    /// Horizontal rules across the content width, by y position
    pub rules: Vec<f32>,
}

impl PageLayout {
    fn text(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, weight: Weight) {
        self.runs.push(TextRun {
            text: text.into(),
            x,
            y,
            size,
            weight,
        });
    }

    /// All text on the page, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.runs.iter().map(|r| r.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub product: String,
    pub quantity: String,
    pub unit_price: String,
    pub total: String,
}

/// Display-ready content of a bill's PDF
#[derive(Debug, Clone, PartialEq)]
pub struct BillDocument {
    pub bill_id: String,
    pub header: Vec<(&'static str, String)>,
    pub lines: Vec<LineItem>,
    pub grand_total: String,
}

impl BillDocument {
    pub fn from_group(group: &BillGroup, options: &DisplayOptions) -> Self {
        let summary = group.summary();
        let lines = group
            .records()
            .iter()
            .map(|r| LineItem {
                product: truncate(&r.product_name, MAX_PRODUCT_CHARS),
                quantity: format_quantity(r.quantity),
                unit_price: options.unit_price(r),
                total: options.money(r.total),
            })
            .collect();

        Self {
            header: vec![
                ("เลขที่เอกสาร", summary.bill_id.clone()),
                ("วันที่", options.date(&summary.date)),
                ("สถานที่", summary.location.clone()),
                ("ผู้เบิก", summary.requester.clone()),
            ],
            lines,
            grand_total: options.money(summary.total),
            bill_id: summary.bill_id,
        }
    }

    pub fn file_name(&self) -> String {
        export_file_name(&self.bill_id)
    }

    fn table_header(page: &mut PageLayout, y: f32) -> f32 {
        page.text("สินค้า", COL_PRODUCT, y, 10.0, Weight::Bold);
        page.text("จำนวน", COL_QUANTITY, y, 10.0, Weight::Bold);
        page.text("ราคาต่อหน่วย", COL_UNIT_PRICE, y, 10.0, Weight::Bold);
        page.text("ราคารวม", COL_TOTAL, y, 10.0, Weight::Bold);
        page.rules.push(y - 2.5);
        y - ROW_MM - 2.0
    }

    /// Lay the bill out on as many A4 pages as needed
    pub fn layout(&self) -> Vec<PageLayout> {
        let mut pages = Vec::new();
        let mut page = PageLayout::default();
        let mut y = TOP_MM;

        page.text(HISTORY_TITLE_TH, MARGIN_MM, y, 16.0, Weight::Bold);
        y -= 10.0;
        for (label, value) in &self.header {
            page.text(format!("{}: {}", label, value), MARGIN_MM, y, 11.0, Weight::Regular);
            y -= ROW_MM;
        }
        page.rules.push(y);
        y -= ROW_MM;

        y = Self::table_header(&mut page, y);
        for line in &self.lines {
            if y < BOTTOM_MM {
                pages.push(std::mem::take(&mut page));
                y = Self::table_header(&mut page, TOP_MM);
            }
            page.text(line.product.clone(), COL_PRODUCT, y, 10.0, Weight::Regular);
            page.text(line.quantity.clone(), COL_QUANTITY, y, 10.0, Weight::Regular);
            page.text(line.unit_price.clone(), COL_UNIT_PRICE, y, 10.0, Weight::Regular);
            page.text(line.total.clone(), COL_TOTAL, y, 10.0, Weight::Regular);
            y -= ROW_MM;
        }

        if y - ROW_MM < BOTTOM_MM {
            pages.push(std::mem::take(&mut page));
            y = TOP_MM;
        }
        page.rules.push(y + 2.5);
        y -= ROW_MM;
        page.text("รวมทั้งสิ้น", COL_UNIT_PRICE, y, 12.0, Weight::Bold);
        page.text(self.grand_total.clone(), COL_TOTAL, y, 12.0, Weight::Bold);

        pages.push(page);
        pages
    }

    /// Draw the document and return the PDF bytes
    pub fn render(&self, fonts: &FontSet) -> AppResult<Vec<u8>> {
        let title = format!("{} {}", HISTORY_TITLE_TH, self.bill_id);
        let (doc, first_page, first_layer) =
            PdfDocument::new(title.as_str(), Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

        let regular = doc
            .add_external_font(fonts.regular.as_slice())
            .map_err(|e| AppError::Export(format!("Failed to embed font: {}", e)))?;
        let bold = match &fonts.bold {
            Some(bytes) => doc
                .add_external_font(bytes.as_slice())
                .map_err(|e| AppError::Export(format!("Failed to embed bold font: {}", e)))?,
            None => regular.clone(),
        };

        for (index, page) in self.layout().iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (p, l) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                doc.get_page(p).get_layer(l)
            };

            for run in &page.runs {
                let font = match run.weight {
                    Weight::Regular => &regular,
                    Weight::Bold => &bold,
                };
                layer.use_text(run.text.clone(), run.size, Mm(run.x), Mm(run.y), font);
            }
            for y in &page.rules {
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(MARGIN_MM), Mm(*y)), false),
                        (Point::new(Mm(PAGE_WIDTH_MM - MARGIN_MM), Mm(*y)), false),
                    ],
                    is_closed: false,
                });
            }
        }

        let mut writer = BufWriter::new(Cursor::new(Vec::<u8>::new()));
        doc.save(&mut writer)
            .map_err(|e| AppError::Export(format!("Failed to write PDF: {}", e)))?;
        writer
            .into_inner()
            .map(Cursor::into_inner)
            .map_err(|e| AppError::Export(format!("Failed to write PDF: {}", e)))
    }
}

/// Font faces embedded into exported PDFs
#[derive(Debug, Clone)]
pub struct FontSet {
    regular: Vec<u8>,
    bold: Option<Vec<u8>>,
}

impl FontSet {
    pub fn from_bytes(regular: Vec<u8>, bold: Option<Vec<u8>>) -> Self {
        Self { regular, bold }
    }

    /// Read the configured font, falling back to the first readable system font
    pub fn load(config: &ExportConfig) -> AppResult<Self> {
        let regular = std::iter::once(&config.font_path)
            .chain(&config.font_fallbacks)
            .find_map(|path| match fs::read(path) {
                Ok(bytes) => {
                    tracing::debug!("Using PDF font {}", path.display());
                    Some(bytes)
                }
                Err(_) => None,
            })
            .ok_or_else(|| {
                AppError::Export(format!(
                    "No readable font: {} (and {} fallback(s))",
                    config.font_path.display(),
                    config.font_fallbacks.len()
                ))
            })?;
        let bold = config.bold_font_path.as_deref().map(read_font).transpose()?;
        Ok(Self { regular, bold })
    }
}

fn read_font(path: &Path) -> AppResult<Vec<u8>> {
    fs::read(path).map_err(|e| AppError::Export(format!("Cannot read font {}: {}", path.display(), e)))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Render a bill and save it as `{billId}-order-history.pdf` in `dir`
pub fn write_bill_pdf(
    group: &BillGroup,
    options: &DisplayOptions,
    fonts: &FontSet,
    dir: &Path,
) -> AppResult<PathBuf> {
    let document = BillDocument::from_group(group, options);
    let bytes = document.render(fonts)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(document.file_name());
    fs::write(&path, bytes)?;
    tracing::info!("Exported bill {} to {}", document.bill_id, path.display());
    Ok(path)
}
