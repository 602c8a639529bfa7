//! Common types used across the client

use serde::{Deserialize, Serialize};

/// Supported languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Thai,
    English,
}

impl Language {
    /// Pick the text matching this language
    pub fn pick(&self, th: &'static str, en: &'static str) -> &'static str {
        match self {
            Language::Thai => th,
            Language::English => en,
        }
    }
}

/// Title of the stock-withdrawal history page and its printed document
pub const HISTORY_TITLE_TH: &str = "ประวัติการเบิกสินค้า";

/// Placeholder shown wherever a value cannot be derived (e.g. unit price of a zero-quantity line)
pub const PLACEHOLDER: &str = "—";
