//! Add-user form state
//!
//! `Idle -> Submitting -> Idle`. A successful submission clears the fields
//! back to their defaults; a failed one keeps them and shows an error.

use shared::{build_user_request, Role, UserCreationRequest};

use crate::error::{AppError, AppResult};
use crate::external::UserDirectory;
use crate::services::notification::Notifier;

/// Notice raised after a user is created
pub const USER_CREATED_TH: &str = "เพิ่มผู้ใช้เรียบร้อยแล้ว";

/// Error shown when the API rejects or cannot be reached
pub const USER_CREATE_FAILED_TH: &str = "ไม่สามารถเพิ่มผู้ใช้ได้ กรุณาลองใหม่อีกครั้ง";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
}

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    /// Remote failure; fields retained
    Failed(String),
    /// Refused before sending (empty field or a submission already running)
    Rejected(String),
}

/// Fields and status of the add-user form
#[derive(Debug, Clone, Default)]
pub struct AddUserForm {
    pub username: String,
    pub password: String,
    pub role: Role,
    status: FormStatus,
    error: Option<String>,
}

impl AddUserForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// The submit button is disabled while a submission is in flight
    pub fn can_submit(&self) -> bool {
        self.status == FormStatus::Idle
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Label of the submit button
    pub fn submit_label(&self) -> &'static str {
        match self.status {
            FormStatus::Idle => "บันทึก",
            FormStatus::Submitting => "กำลังบันทึก...",
        }
    }

    fn reset_fields(&mut self) {
        self.username.clear();
        self.password.clear();
        self.role = Role::default();
    }

    /// Validate the fields and enter `Submitting`
    pub fn begin_submit(&mut self) -> AppResult<UserCreationRequest> {
        if self.status == FormStatus::Submitting {
            return Err(AppError::SubmissionInProgress);
        }
        let request = build_user_request(&self.username, &self.password, self.role.as_str())?;
        self.status = FormStatus::Submitting;
        self.error = None;
        Ok(request)
    }

    /// Apply the API outcome and return to `Idle`
    pub fn finish_submit(&mut self, result: AppResult<()>, notifier: &mut Notifier) -> SubmitOutcome {
        self.status = FormStatus::Idle;
        match result {
            Ok(()) => {
                tracing::info!("User created");
                self.reset_fields();
                notifier.success(USER_CREATED_TH);
                SubmitOutcome::Created
            }
            Err(e) => {
                tracing::error!("Error adding user: {}", e);
                self.error = Some(USER_CREATE_FAILED_TH.to_string());
                SubmitOutcome::Failed(USER_CREATE_FAILED_TH.to_string())
            }
        }
    }

    /// Submit the form to the API
    pub async fn submit<D>(&mut self, directory: &D, notifier: &mut Notifier) -> SubmitOutcome
    where
        D: UserDirectory + ?Sized,
    {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(e) => {
                let message = e.message_th();
                if let AppError::Validation(_) = e {
                    self.error = Some(message.clone());
                }
                return SubmitOutcome::Rejected(message);
            }
        };

        let result = directory.create_user(&request).await;
        self.finish_submit(result, notifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingDirectory {
        fail: bool,
        received: Mutex<Vec<UserCreationRequest>>,
    }

    impl RecordingDirectory {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                received: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UserDirectory for RecordingDirectory {
        async fn create_user(&self, request: &UserCreationRequest) -> AppResult<()> {
            self.received.lock().unwrap().push(request.clone());
            if self.fail {
                Err(AppError::Configuration("down".into()))
            } else {
                Ok(())
            }
        }
    }

    fn filled_form() -> AddUserForm {
        let mut form = AddUserForm::new();
        form.username = "alice".into();
        form.password = "secret".into();
        form.role = Role::User;
        form
    }

    #[tokio::test]
    async fn test_success_resets_fields() {
        let directory = RecordingDirectory::new(false);
        let mut notifier = Notifier::default();
        let mut form = filled_form();
        form.role = Role::Admin;

        let outcome = form.submit(&directory, &mut notifier).await;

        assert_eq!(outcome, SubmitOutcome::Created);
        assert_eq!((form.username.as_str(), form.password.as_str(), form.role), ("", "", Role::User));
        assert_eq!(form.error(), None);
        assert_eq!(form.status(), FormStatus::Idle);
        assert_eq!(notifier.active()[0].message, USER_CREATED_TH);
        assert_eq!(directory.received.lock().unwrap()[0].role, Role::Admin);
    }

    #[tokio::test]
    async fn test_failure_keeps_fields_and_shows_error() {
        let directory = RecordingDirectory::new(true);
        let mut notifier = Notifier::default();
        let mut form = filled_form();

        let outcome = form.submit(&directory, &mut notifier).await;

        assert_eq!(outcome, SubmitOutcome::Failed(USER_CREATE_FAILED_TH.to_string()));
        assert_eq!((form.username.as_str(), form.password.as_str(), form.role), ("alice", "secret", Role::User));
        assert_eq!(form.error(), Some(USER_CREATE_FAILED_TH));
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn test_empty_username_is_not_sent() {
        let directory = RecordingDirectory::new(false);
        let mut notifier = Notifier::default();
        let mut form = filled_form();
        form.username.clear();

        let outcome = form.submit(&directory, &mut notifier).await;

        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert!(directory.received.lock().unwrap().is_empty());
        assert_eq!(form.password, "secret");
    }

    #[test]
    fn test_no_duplicate_submission_while_submitting() {
        let mut form = filled_form();
        assert!(form.begin_submit().is_ok());
        assert!(!form.can_submit());
        assert_eq!(form.submit_label(), "กำลังบันทึก...");
        assert!(matches!(form.begin_submit(), Err(AppError::SubmissionInProgress)));
    }

    #[test]
    fn test_new_submission_clears_previous_error() {
        let mut form = filled_form();
        let mut notifier = Notifier::default();
        form.begin_submit().unwrap();
        form.finish_submit(Err(AppError::Configuration("x".into())), &mut notifier);
        assert!(form.error().is_some());

        form.begin_submit().unwrap();
        assert_eq!(form.error(), None);
    }
}
