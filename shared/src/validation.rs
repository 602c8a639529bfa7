//! Validation utilities for the user creation form

use thiserror::Error;
use validator::Validate;

use crate::models::{Role, UserCreationRequest};

/// Reasons a form submission is refused before it reaches the network
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("unknown role: {0}")]
    UnknownRole(String),
}

impl ValidationError {
    /// Localized message shown next to the form
    pub fn message_th(&self) -> String {
        match self {
            ValidationError::Required("username") => "กรุณากรอกชื่อผู้ใช้".to_string(),
            ValidationError::Required("password") => "กรุณากรอกรหัสผ่าน".to_string(),
            ValidationError::Required(field) => format!("กรุณากรอก {}", field),
            ValidationError::UnknownRole(role) => format!("ไม่รู้จักตำแหน่ง: {}", role),
        }
    }
}

/// Fields checked by `UserCreationRequest`'s derive, in the order they are reported
const REQUIRED_FIELDS: [&str; 2] = ["username", "password"];

/// Build and validate a user creation request from raw form fields.
///
/// Empty fields are reported before an unknown role.
pub fn build_user_request(
    username: &str,
    password: &str,
    role: &str,
) -> Result<UserCreationRequest, ValidationError> {
    let mut request = UserCreationRequest {
        username: username.to_string(),
        password: password.to_string(),
        role: Role::default(),
    };

    if let Err(errors) = request.validate() {
        let failed = errors.field_errors();
        if let Some(field) = REQUIRED_FIELDS.into_iter().find(|f| failed.contains_key(f)) {
            return Err(ValidationError::Required(field));
        }
    }

    request.role = role.parse()?;
    Ok(request)
}
