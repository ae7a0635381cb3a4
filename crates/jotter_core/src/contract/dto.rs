//! Public note data-transfer shape.
//!
//! # Responsibility
//! - Convert persisted `NoteRow`s into the validated `NoteDto` wire shape.
//!
//! # Invariants
//! - Every DTO passes the same constraints as create input; rows that drifted
//!   (empty ids, empty or oversized text) fail conversion instead of leaking.
//! - `updated_at` falls back to `created_at` for rows never stamped.

use super::{IssueSink, CONTENT_MAX_CHARS, TITLE_MAX_CHARS};
use crate::error::{AppError, AppResult};
use crate::model::ids::{NoteId, UserId};
use crate::model::note::NoteRow;
use serde::{Deserialize, Serialize};

/// Note as returned across the system boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDto {
    pub id: NoteId,
    pub owner_id: UserId,
    pub title: String,
    pub content: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

impl NoteDto {
    /// Validates a storage row against the output contract.
    ///
    /// # Errors
    /// - `unknown` (`UNKNOWN`) when the row violates the contract; the field
    ///   issues are attached as internal details.
    pub fn from_row(row: NoteRow) -> AppResult<Self> {
        let updated_at = row.effective_updated_at();
        let mut sink = IssueSink::default();
        let id = sink.note_id("id", row.id.clone());
        let owner_id = sink.user_id_at("ownerId", &row.owner_id);
        sink.text("title", &row.title, 1, TITLE_MAX_CHARS);
        sink.text("content", &row.content, 1, CONTENT_MAX_CHARS);

        match (id, owner_id) {
            (Some(id), Some(owner_id)) if sink.is_empty() => Ok(Self {
                id,
                owner_id,
                title: row.title,
                content: row.content,
                created_at: row.created_at,
                updated_at,
            }),
            _ => Err(AppError::unknown(None)
                .with_message(format!(
                    "persisted note `{}` violates the note output contract",
                    row.id
                ))
                .with_details(sink.into_issues())),
        }
    }
}
