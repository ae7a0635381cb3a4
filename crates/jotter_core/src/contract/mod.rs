//! Per-operation validation contracts.
//!
//! # Responsibility
//! - Define the loosely typed wire requests accepted from transports.
//! - Define strict internal inputs that merge the injected caller identity and
//!   re-validate every constraint.
//! - Define the public `NoteDto` output shape.
//!
//! # Invariants
//! - Caller identity never comes from a wire request; it is injected by the
//!   service from `Deps`.
//! - Every constraint violation is reported as a `FieldIssue`; parsing never
//!   stops at the first problem.
//! - Text lengths count Unicode scalar values and text is kept verbatim.

pub mod create;
pub mod delete;
pub mod dto;
pub mod list;
pub mod update;

use crate::model::ids::{NoteId, UserId};
use serde::{Deserialize, Serialize};

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 100;
/// Maximum content length in characters.
pub const CONTENT_MAX_CHARS: usize = 10_000;

/// Machine-readable category of one validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    Required,
    TooSmall,
    TooBig,
    Custom,
}

impl IssueCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::TooSmall => "too_small",
            Self::TooBig => "too_big",
            Self::Custom => "custom",
        }
    }
}

/// One field-level validation problem. Safe to expose to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Field name in wire casing; empty for cross-field issues.
    pub path: String,
    pub code: IssueCode,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code,
            message: message.into(),
        }
    }

    pub fn required(path: impl Into<String>) -> Self {
        Self::new(path, IssueCode::Required, "value is required")
    }
}

/// Accumulates issues while a contract parses its input.
#[derive(Debug, Default)]
pub(crate) struct IssueSink {
    issues: Vec<FieldIssue>,
}

impl IssueSink {
    pub(crate) fn push(&mut self, issue: FieldIssue) {
        self.issues.push(issue);
    }

    /// Checks `value` holds between `min` and `max` characters inclusive.
    pub(crate) fn text(&mut self, path: &str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min {
            self.push(FieldIssue::new(
                path,
                IssueCode::TooSmall,
                format!("must contain at least {min} character(s)"),
            ));
        } else if len > max {
            self.push(FieldIssue::new(
                path,
                IssueCode::TooBig,
                format!("must contain at most {max} character(s)"),
            ));
        }
    }

    /// Checks an optional integer lies in `min..=max`, applying `default`.
    pub(crate) fn int_in_range(
        &mut self,
        path: &str,
        value: Option<i64>,
        default: i64,
        min: i64,
        max: i64,
    ) -> i64 {
        let value = value.unwrap_or(default);
        if value < min {
            self.push(FieldIssue::new(
                path,
                IssueCode::TooSmall,
                format!("must be greater than or equal to {min}"),
            ));
        } else if value > max {
            self.push(FieldIssue::new(
                path,
                IssueCode::TooBig,
                format!("must be less than or equal to {max}"),
            ));
        }
        value
    }

    /// Parses the injected caller identity.
    pub(crate) fn user_id(&mut self, raw: Option<&str>) -> Option<UserId> {
        let Some(raw) = raw else {
            self.push(FieldIssue::required("userId"));
            return None;
        };
        self.user_id_at("userId", raw)
    }

    pub(crate) fn user_id_at(&mut self, path: &str, raw: &str) -> Option<UserId> {
        self.parsed(path, UserId::parse(raw))
    }

    pub(crate) fn note_id(&mut self, path: &str, raw: String) -> Option<NoteId> {
        self.parsed(path, NoteId::parse(raw))
    }

    fn parsed<T, E: std::fmt::Display>(&mut self, path: &str, parsed: Result<T, E>) -> Option<T> {
        match parsed {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(FieldIssue::new(path, IssueCode::TooSmall, err.to_string()));
                None
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub(crate) fn into_issues(self) -> Vec<FieldIssue> {
        self.issues
    }
}
