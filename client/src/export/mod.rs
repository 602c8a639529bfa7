//! Export of bills to PDF and to a printable document
//!
//! Export failures never leave the page in a broken state: the operation is
//! abandoned and a transient notification is raised.

pub mod pdf;
pub mod print;

use std::path::{Path, PathBuf};

use shared::{BillGroup, DisplayOptions};

use crate::config::{Config, ExportConfig};
use crate::error::AppResult;
use crate::services::Notifier;

pub use pdf::{write_bill_pdf, BillDocument, FontSet};
pub use print::{open_print_document, write_print_document};

/// Export operations bound to the current configuration
#[derive(Debug, Clone)]
pub struct Exporter {
    config: ExportConfig,
    options: DisplayOptions,
}

impl Exporter {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.export.clone(),
            options: config.display.options(),
        }
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Save a bill as PDF into `dir`, or the configured output directory
    pub fn export_pdf(&self, group: &BillGroup, dir: Option<&Path>) -> AppResult<PathBuf> {
        let fonts = FontSet::load(&self.config)?;
        let dir = dir.unwrap_or(self.config.output_dir.as_path());
        write_bill_pdf(group, &self.options, &fonts, dir)
    }

    /// Write the print document to the temp directory and open it in its own tab
    pub fn print(&self, groups: &[&BillGroup]) -> AppResult<PathBuf> {
        let dir = std::env::temp_dir().join("swm-print");
        let path = write_print_document(groups, &self.options, &dir)?;
        if self.config.open_print_document {
            open_print_document(&path)?;
        }
        Ok(path)
    }
}

/// Turn an export failure into a transient notification
pub fn notify_on_failure<T>(result: AppResult<T>, notifier: &mut Notifier) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!("Export failed: {}", e);
            notifier.error(e.message_th());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::NotificationKind;

    #[test]
    fn test_failure_becomes_notification() {
        let mut notifier = Notifier::default();
        let result: AppResult<()> = Err(AppError::Export("boom".into()));

        assert!(notify_on_failure(result, &mut notifier).is_none());
        let active = notifier.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].kind, NotificationKind::Error);
        assert_eq!(active[0].message, "ไม่สามารถส่งออกเอกสารได้ กรุณาลองใหม่อีกครั้ง");
    }

    #[test]
    fn test_success_passes_through() {
        let mut notifier = Notifier::default();
        assert_eq!(notify_on_failure(Ok(5), &mut notifier), Some(5));
        assert!(notifier.active().is_empty());
    }

    #[test]
    fn test_export_pdf_without_font_fails_cleanly() {
        let mut config = Config::default();
        config.export.font_path = PathBuf::from("/nonexistent/NotoSansThai.ttf");
        config.export.font_fallbacks.clear();
        let exporter = Exporter::new(&config);

        let records = vec![shared::StockHistoryRecord {
            id: "1".into(),
            bill_id: "B1".into(),
            date: "2024-01-01".into(),
            location: String::new(),
            username: String::new(),
            product_name: "p".into(),
            quantity: rust_decimal::Decimal::ONE,
            description: String::new(),
            total: rust_decimal::Decimal::ONE,
        }];
        let grouping = shared::group_by_bill(&records);
        let dir = tempfile::tempdir().unwrap();

        let result = exporter.export_pdf(grouping.get("B1").unwrap(), Some(dir.path()));
        assert!(matches!(result, Err(AppError::Export(_))));
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
