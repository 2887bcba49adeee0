//! User-facing dialogs.

use crate::errors::AppError;

/// How prominent a notice is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    fn tag(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "ok",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A dismissable message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, title, message)
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Success, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, title, message)
    }

    pub fn from_error(err: &AppError) -> Self {
        let title = match err {
            AppError::Unauthorized(_) => "Not authorized".to_string(),
            AppError::Forbidden(_) => "Not allowed".to_string(),
            AppError::NotFound(_) => "Not found".to_string(),
            AppError::Validation(_) => "Invalid input".to_string(),
            AppError::Network(_) => "Connection error".to_string(),
            AppError::Backend { status, .. } => format!("Backend error ({})", status.as_u16()),
            AppError::Storage(_) | AppError::Internal(_) => "Error".to_string(),
        };
        Self::error(title, err.message())
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity.tag(), self.title)?;
        if !self.message.is_empty() {
            write!(f, "\n{}", self.message)?;
        }
        Ok(())
    }
}
