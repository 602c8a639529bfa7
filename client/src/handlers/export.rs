//! Export commands: PDF of one bill, print document of one or more bills

use std::path::{Path, PathBuf};

use shared::{BillGroup, SortOrder};

use crate::error::{AppError, AppResult};
use crate::export::Exporter;
use crate::external::HistorySource;
use crate::handlers::history::fetch_view;

/// `swm export-pdf BILL`
pub async fn export_pdf<S>(
    source: &S,
    exporter: &Exporter,
    bill_id: &str,
    out_dir: Option<&Path>,
) -> AppResult<PathBuf>
where
    S: HistorySource + ?Sized,
{
    let view = fetch_view(source, SortOrder::default(), &[]).await?;
    let grouping = view.grouped();
    let group = grouping
        .get(bill_id)
        .ok_or_else(|| AppError::BillNotFound(bill_id.to_string()))?;
    exporter.export_pdf(group, out_dir)
}

/// `swm print [BILL]...`; no bill ids prints every bill, newest first
pub async fn print_bills<S>(source: &S, exporter: &Exporter, bill_ids: &[String]) -> AppResult<PathBuf>
where
    S: HistorySource + ?Sized,
{
    let view = fetch_view(source, SortOrder::default(), &[]).await?;
    let grouping = view.grouped();

    let groups: Vec<&BillGroup> = if bill_ids.is_empty() {
        grouping.iter().collect()
    } else {
        bill_ids
            .iter()
            .map(|id| {
                grouping
                    .get(id)
                    .ok_or_else(|| AppError::BillNotFound(id.clone()))
            })
            .collect::<AppResult<_>>()?
    };

    exporter.print(&groups)
}
