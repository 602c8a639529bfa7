//! Print export
//!
//! The print document is written to its own file and opened in a separate
//! browser tab, so the page it was started from is never modified.

use std::fs;
use std::path::{Path, PathBuf};

use shared::{render_print_document, BillGroup, DisplayOptions};

use crate::error::{AppError, AppResult};

/// Write the printable document for `groups` into `dir`
pub fn write_print_document(
    groups: &[&BillGroup],
    options: &DisplayOptions,
    dir: &Path,
) -> AppResult<PathBuf> {
    if groups.is_empty() {
        return Err(AppError::Export("Nothing to print".to_string()));
    }

    let html = render_print_document(groups.iter().copied(), options);
    fs::create_dir_all(dir)?;
    let path = dir.join(print_file_name(groups));
    fs::write(&path, html)?;
    tracing::info!("Wrote print document for {} bill(s) to {}", groups.len(), path.display());
    Ok(path)
}

/// Open the written document in the default browser
pub fn open_print_document(path: &Path) -> AppResult<()> {
    open::that(path).map_err(|e| {
        AppError::Export(format!("Failed to open print document {}: {}", path.display(), e))
    })
}

fn print_file_name(groups: &[&BillGroup]) -> String {
    let stem = match groups {
        [single] => shared::export_file_name(single.bill_id())
            .trim_end_matches(".pdf")
            .to_string(),
        _ => format!("{}-bills-order-history", groups.len()),
    };
    format!("{}-print.html", stem)
}
