//! Domain models for the Stock Withdrawal Management client

mod history;
mod user;

pub use history::*;
pub use user::*;
