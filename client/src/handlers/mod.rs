//! Command handlers for the `swm` binary

pub mod export;
pub mod history;
pub mod user;

pub use export::{export_pdf, print_bills};
pub use history::{fetch_view, render_history, show_history};
pub use user::add_user;
