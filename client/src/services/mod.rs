//! Page-level state: history loading, the add-user form and notifications

pub mod history;
pub mod notification;
pub mod user_form;

pub use history::{HistoryLoader, LoadState};
pub use notification::{Notification, NotificationKind, Notifier};
pub use user_form::{AddUserForm, FormStatus, SubmitOutcome};
