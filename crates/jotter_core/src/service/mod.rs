//! Note use cases.
//!
//! # Responsibility
//! - Run one fixed protocol per operation: validate the request merged with
//!   the caller identity, execute the repository call inside a transaction,
//!   and map rows to `NoteDto`s.
//!
//! # Invariants
//! - Validation failures return before any storage access.
//! - Repository errors are forwarded unchanged; the transaction rolls back.
//! - Logs carry metadata only (operation, status, error kind/code, timing).

pub mod create_note;
pub mod delete_note;
pub mod list_notes;
pub mod update_note;

use crate::contract::FieldIssue;
use crate::error::{AppError, AppResult, ErrorKind};
use log::{debug, error, info};
use std::time::Instant;

const INVALID_INPUT: &str = "INVALID_INPUT";

fn invalid_input(issues: Vec<FieldIssue>) -> AppError {
    AppError::validation(INVALID_INPUT, issues)
}

/// Logs the outcome of one use case and passes the result through.
fn finish<T>(event: &'static str, started_at: Instant, result: AppResult<T>) -> AppResult<T> {
    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => debug!("event={event} module=service status=ok duration_ms={duration_ms}"),
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::InfraDb | ErrorKind::InfraExternal | ErrorKind::Unknown
            ) =>
        {
            error!(
                "event={event} module=service status=error error_kind={} error_code={} duration_ms={duration_ms} error={err}",
                err.kind(),
                err.code()
            );
        }
        Err(err) => info!(
            "event={event} module=service status=rejected error_kind={} error_code={} duration_ms={duration_ms}",
            err.kind(),
            err.code()
        ),
    }
    result
}
