//! Sort order and view state of the history page

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::grouping::{group_by_bill, BillGrouping};
use crate::models::StockHistoryRecord;
use crate::types::Language;

/// Order in which history is listed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest first
    #[default]
    Latest,
    /// Oldest first
    Oldest,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Latest => "latest",
            SortOrder::Oldest => "oldest",
        }
    }

    /// Tab label
    pub fn label(&self, language: Language) -> &'static str {
        match self {
            SortOrder::Latest => language.pick("ล่าสุด", "Latest"),
            SortOrder::Oldest => language.pick("เก่าที่สุด", "Oldest"),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(SortOrder::Latest),
            "oldest" => Ok(SortOrder::Oldest),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Sort records by date.
///
/// The sort is stable in both directions: records with equal dates keep
/// their input order. Records whose date cannot be parsed count as the
/// earliest instant.
pub fn sort_records(records: &[StockHistoryRecord], order: SortOrder) -> Vec<StockHistoryRecord> {
    let mut sorted = records.to_vec();
    sort_records_in_place(&mut sorted, order);
    sorted
}

pub fn sort_records_in_place(records: &mut [StockHistoryRecord], order: SortOrder) {
    match order {
        SortOrder::Oldest => records.sort_by_cached_key(|r| r.timestamp()),
        SortOrder::Latest => records.sort_by_cached_key(|r| Reverse(r.timestamp())),
    }
}

/// View state of the history page: fetched records, chosen order, expanded bills
#[derive(Debug, Clone, Default)]
pub struct HistoryView {
    records: Vec<StockHistoryRecord>,
    order: SortOrder,
    expanded: BTreeSet<String>,
}

impl HistoryView {
    pub fn new(records: Vec<StockHistoryRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[StockHistoryRecord] {
        &self.records
    }

    pub fn sort_order(&self) -> SortOrder {
        self.order
    }

    /// Change the order; expanded bills stay expanded
    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.order = order;
    }

    /// Flip whether a bill's line items are shown. Returns the new state.
    pub fn toggle_bill(&mut self, bill_id: &str) -> bool {
        if self.expanded.remove(bill_id) {
            false
        } else {
            self.expanded.insert(bill_id.to_string());
            true
        }
    }

    pub fn is_expanded(&self, bill_id: &str) -> bool {
        self.expanded.contains(bill_id)
    }

    pub fn expanded(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }

    pub fn sorted_records(&self) -> Vec<StockHistoryRecord> {
        sort_records(&self.records, self.order)
    }

    /// Records sorted by the current order, then grouped by bill
    pub fn grouped(&self) -> BillGrouping {
        group_by_bill(&self.sorted_records())
    }
}
