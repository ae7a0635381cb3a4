//! Transport error classification.
//!
//! # Invariants
//! - The transport code is derived from the error kind alone.
//! - Only the code, the safe message and validation issues ever leave the
//!   process; internal messages and causes stay in logs.

use jotter_core::{AppError, ErrorKind};

/// Caller-facing error class, mirroring HTTP status families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCode {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Internal,
}

impl TransportCode {
    pub fn from_kind(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Validation => Self::BadRequest,
            ErrorKind::Auth => Self::Unauthorized,
            ErrorKind::Permission => Self::Forbidden,
            ErrorKind::NotFound => Self::NotFound,
            ErrorKind::Conflict => Self::Conflict,
            ErrorKind::Domain
            | ErrorKind::InfraDb
            | ErrorKind::InfraExternal
            | ErrorKind::Unknown => Self::Internal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Internal => "INTERNAL",
        }
    }

    pub fn http_status(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }
}

impl From<&AppError> for TransportCode {
    fn from(err: &AppError) -> Self {
        Self::from_kind(err.kind())
    }
}
