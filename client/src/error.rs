//! Error handling for the Stock Withdrawal Management client
//!
//! Provides consistent user-facing messages in Thai and English

use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Network errors
    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// History could not be loaded; carries the localized message
    #[error("History unavailable: {0}")]
    HistoryUnavailable(String),

    // Form errors
    #[error("Validation error: {0}")]
    Validation(#[from] shared::ValidationError),

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    // Export errors
    #[error("Bill not found: {0}")]
    BillNotFound(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error detail shown to the user
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_th: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// True for failures of the remote API (request, status or body)
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            AppError::Network { .. } | AppError::UnexpectedStatus { .. } | AppError::Decode { .. }
        )
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Network { .. } => "NETWORK_ERROR",
            AppError::UnexpectedStatus { .. } => "UNEXPECTED_STATUS",
            AppError::Decode { .. } => "DECODE_ERROR",
            AppError::HistoryUnavailable(_) => "HISTORY_UNAVAILABLE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::SubmissionInProgress => "SUBMISSION_IN_PROGRESS",
            AppError::BillNotFound(_) => "BILL_NOT_FOUND",
            AppError::Export(_) => "EXPORT_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
        }
    }

    /// User-facing detail. Raw causes are left out; they only go to the log.
    pub fn detail(&self) -> ErrorDetail {
        let (message_en, message_th, field) = match self {
            AppError::Network { .. } | AppError::UnexpectedStatus { .. } | AppError::Decode { .. } => (
                "Could not reach the server. Please try again.".to_string(),
                "ไม่สามารถเชื่อมต่อเซิร์ฟเวอร์ได้ กรุณาลองใหม่อีกครั้ง".to_string(),
                None,
            ),
            AppError::HistoryUnavailable(message) => (
                "Could not load the withdrawal history".to_string(),
                message.clone(),
                None,
            ),
            AppError::Validation(err) => {
                let field = match err {
                    shared::ValidationError::Required(field) => Some(field.to_string()),
                    shared::ValidationError::UnknownRole(_) => Some("role".to_string()),
                };
                (err.to_string(), err.message_th(), field)
            }
            AppError::SubmissionInProgress => (
                "Saving, please wait".to_string(),
                "กำลังบันทึก...".to_string(),
                None,
            ),
            AppError::BillNotFound(bill_id) => (
                format!("Bill {} not found", bill_id),
                format!("ไม่พบเอกสารเลขที่ {}", bill_id),
                None,
            ),
            AppError::Export(_) | AppError::Io(_) => (
                "Export failed. Please try again.".to_string(),
                "ไม่สามารถส่งออกเอกสารได้ กรุณาลองใหม่อีกครั้ง".to_string(),
                None,
            ),
            AppError::Configuration(msg) => (
                format!("Configuration error: {}", msg),
                format!("เกิดข้อผิดพลาดในการตั้งค่า: {}", msg),
                None,
            ),
        };

        ErrorDetail {
            code: self.code().to_string(),
            message_en,
            message_th,
            field,
        }
    }

    pub fn message_th(&self) -> String {
        self.detail().message_th
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_detail_names_field() {
        let err = AppError::from(shared::ValidationError::Required("password"));
        let detail = err.detail();
        assert_eq!(detail.code, "VALIDATION_ERROR");
        assert_eq!(detail.field.as_deref(), Some("password"));
        assert_eq!(detail.message_th, "กรุณากรอกรหัสผ่าน");
    }

    #[test]
    fn test_status_error_is_network_and_hides_cause() {
        let err = AppError::UnexpectedStatus {
            url: "http://localhost/users".into(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert!(err.is_network());
        let detail = err.detail();
        assert!(!detail.message_en.contains("500"));
        assert!(!detail.message_th.contains("localhost"));
    }

    #[test]
    fn test_export_detail() {
        let err = AppError::Export("font missing".into());
        assert!(!err.is_network());
        assert_eq!(err.code(), "EXPORT_ERROR");
        assert!(!err.message_th().contains("font"));
    }
}
