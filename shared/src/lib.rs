//! Shared types and logic for the Stock Withdrawal Management client
//!
//! This crate contains the pure parts of the system, shared between the
//! native client and the browser (via WASM): record models, grouping by bill,
//! sorting, view state and display formatting.

pub mod format;
pub mod grouping;
pub mod html;
pub mod models;
pub mod types;
pub mod validation;
pub mod view;

pub use format::*;
pub use grouping::*;
pub use html::*;
pub use models::*;
pub use types::*;
pub use validation::*;
pub use view::*;
