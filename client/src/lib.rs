//! Stock Withdrawal Management client
//!
//! Talks to the remote stock API, keeps page state for the history and
//! add-user pages, and exports bills to PDF and print documents.

pub mod config;
pub mod error;
pub mod export;
pub mod external;
pub mod handlers;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
