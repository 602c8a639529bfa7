//! Grouping of history records by bill
//!
//! A bill is one withdrawal transaction; every record is one of its line
//! items. Grouping keeps bills in the order their first record appears in the
//! input, so grouping an already-sorted sequence yields sorted bills.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::StockHistoryRecord;

/// The records of one bill, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct BillGroup {
    bill_id: String,
    records: Vec<StockHistoryRecord>,
    /// Position of each record in the grouped input
    positions: Vec<usize>,
}

/// Header fields of a bill, taken from its first record
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    pub bill_id: String,
    pub date: String,
    #[serde(skip)]
    pub timestamp: Option<DateTime<Utc>>,
    pub location: String,
    pub requester: String,
    pub line_count: usize,
    pub total: Decimal,
}

impl BillGroup {
    fn new(bill_id: String) -> Self {
        Self {
            bill_id,
            records: Vec::new(),
            positions: Vec::new(),
        }
    }

    pub fn bill_id(&self) -> &str {
        &self.bill_id
    }

    pub fn records(&self) -> &[StockHistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of the `total` field of every line; never derived from quantity
    pub fn total(&self) -> Decimal {
        self.records.iter().map(|r| r.total).sum()
    }

    pub fn summary(&self) -> BillSummary {
        let first = self.records.first();
        BillSummary {
            bill_id: self.bill_id.clone(),
            date: first.map(|r| r.date.clone()).unwrap_or_default(),
            timestamp: first.and_then(|r| r.timestamp()),
            location: first.map(|r| r.location.clone()).unwrap_or_default(),
            requester: first.map(|r| r.username.clone()).unwrap_or_default(),
            line_count: self.records.len(),
            total: self.total(),
        }
    }
}

/// Records partitioned by bill id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillGrouping {
    groups: IndexMap<String, BillGroup>,
    record_count: usize,
}

impl BillGrouping {
    pub fn get(&self, bill_id: &str) -> Option<&BillGroup> {
        self.groups.get(bill_id)
    }

    /// Bills in order of first appearance
    pub fn iter(&self) -> impl Iterator<Item = &BillGroup> {
        self.groups.values()
    }

    pub fn bill_ids(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Number of bills
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Sum over all bills
    pub fn grand_total(&self) -> Decimal {
        self.groups.values().map(BillGroup::total).sum()
    }

    /// All records back in the order they were grouped from
    pub fn flatten(&self) -> Vec<StockHistoryRecord> {
        let mut indexed: Vec<(usize, &StockHistoryRecord)> = self
            .groups
            .values()
            .flat_map(|g| g.positions.iter().copied().zip(g.records.iter()))
            .collect();
        indexed.sort_unstable_by_key(|(pos, _)| *pos);
        indexed.into_iter().map(|(_, r)| r.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a BillGrouping {
    type Item = &'a BillGroup;
    type IntoIter = indexmap::map::Values<'a, String, BillGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.values()
    }
}

/// Partition records by bill id, keeping first-appearance order of bills
pub fn group_by_bill<'a, I>(records: I) -> BillGrouping
where
    I: IntoIterator<Item = &'a StockHistoryRecord>,
{
    let mut grouping = BillGrouping::default();
    for (position, record) in records.into_iter().enumerate() {
        let group = grouping
            .groups
            .entry(record.bill_id.clone())
            .or_insert_with(|| BillGroup::new(record.bill_id.clone()));
        group.records.push(record.clone());
        group.positions.push(position);
        grouping.record_count += 1;
    }
    grouping
}
