//! Application error model shared by every layer.
//!
//! # Responsibility
//! - Define the closed error taxonomy (`ErrorKind`) used across repository,
//!   service and transport boundaries.
//! - Carry internal diagnostics (`message`, `cause`) separately from the
//!   caller-safe surface (`code`, `safe_message`, validation `details`).
//!
//! # Invariants
//! - Every `AppError` built through the factories has a `safe_message`.
//! - `infra_db`, `infra_external` and `unknown` never expose the wrapped cause
//!   in their safe message.
//! - Fallible core APIs return `AppResult<T>`; nothing panics across layers.

use crate::contract::FieldIssue;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AppResult<T> = Result<T, AppError>;

type BoxedCause = Box<dyn Error + Send + Sync + 'static>;

/// Closed set of failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or out-of-range input, detected before storage access.
    Validation,
    /// Business rule violation.
    Domain,
    /// Target row absent or owned by someone else.
    NotFound,
    Conflict,
    Auth,
    Permission,
    /// Storage engine failure.
    InfraDb,
    /// Upstream dependency failure.
    InfraExternal,
    Unknown,
}

impl ErrorKind {
    /// Stable snake_case label used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Domain => "domain",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::InfraDb => "infra_db",
            Self::InfraExternal => "infra_external",
            Self::Unknown => "unknown",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error value returned by every fallible core operation.
///
/// Build instances through the per-kind factories so the caller-safe message
/// is always populated.
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    code: String,
    message: Option<String>,
    safe_message: Option<String>,
    details: Option<Vec<FieldIssue>>,
    cause: Option<BoxedCause>,
}

impl AppError {
    fn new(kind: ErrorKind, code: impl Into<String>, safe_message: &str) -> Self {
        Self {
            kind,
            code: code.into(),
            message: None,
            safe_message: Some(safe_message.to_string()),
            details: None,
            cause: None,
        }
    }

    /// Invalid input with field-level issues attached as details.
    pub fn validation(code: impl Into<String>, issues: Vec<FieldIssue>) -> Self {
        let mut err = Self::new(ErrorKind::Validation, code, "invalid input");
        err.details = Some(issues);
        err
    }

    /// Business rule violation with a caller-provided safe message.
    pub fn domain(code: impl Into<String>, safe_message: &str) -> Self {
        Self::new(ErrorKind::Domain, code, safe_message)
    }

    /// Missing (or not owned) target, using the default `NOT_FOUND` code.
    pub fn not_found() -> Self {
        Self::not_found_with_code("NOT_FOUND")
    }

    pub fn not_found_with_code(code: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, code, "not found")
    }

    pub fn conflict() -> Self {
        Self::new(ErrorKind::Conflict, "CONFLICT", "conflict")
    }

    pub fn auth() -> Self {
        Self::new(ErrorKind::Auth, "UNAUTHORIZED", "unauthorized")
    }

    pub fn permission() -> Self {
        Self::new(ErrorKind::Permission, "FORBIDDEN", "forbidden")
    }

    /// Storage failure. The cause is kept for diagnostics only.
    pub fn infra_db(code: impl Into<String>, cause: Option<BoxedCause>) -> Self {
        let mut err = Self::new(ErrorKind::InfraDb, code, "database error");
        err.cause = cause;
        err
    }

    /// Upstream dependency failure. The cause is kept for diagnostics only.
    pub fn infra_external(code: impl Into<String>, cause: Option<BoxedCause>) -> Self {
        let mut err = Self::new(ErrorKind::InfraExternal, code, "upstream error");
        err.cause = cause;
        err
    }

    /// Unclassified failure.
    pub fn unknown(cause: Option<BoxedCause>) -> Self {
        let mut err = Self::new(ErrorKind::Unknown, "UNKNOWN", "internal error");
        err.cause = cause;
        err
    }

    /// Attaches an internal diagnostic message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches structured details. Only validation details are client-safe.
    pub fn with_details(mut self, details: Vec<FieldIssue>) -> Self {
        self.details = Some(details);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Internal message; never rendered to clients.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn safe_message(&self) -> Option<&str> {
        self.safe_message.as_deref()
    }

    pub fn details(&self) -> Option<&[FieldIssue]> {
        self.details.as_deref()
    }

    /// Returns the underlying low-level failure, if one was wrapped.
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error ({})", self.kind, self.code)?;
        if let Some(message) = self.message.as_deref() {
            write!(f, ": {message}")?;
        }
        if let Some(cause) = self.cause.as_deref() {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(value: rusqlite::Error) -> Self {
        Self::infra_db("DB_ERROR", Some(Box::new(value)))
    }
}
