//! Update-note contract.
//!
//! Each of `title`/`content` has three states: absent (leave unchanged),
//! present and non-empty (apply), present and empty (rejected). At least one
//! field must be present.

use super::dto::NoteDto;
use super::{FieldIssue, IssueCode, IssueSink, CONTENT_MAX_CHARS, TITLE_MAX_CHARS};
use crate::model::ids::{NoteId, UserId};
use crate::model::note::NotePatch;
use serde::{Deserialize, Serialize};

/// Wire request for updating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    pub note_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Validated update input with the caller identity injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateNoteInput {
    pub user_id: UserId,
    pub note_id: NoteId,
    /// Never empty.
    pub patch: NotePatch,
}

pub type UpdateNoteOutput = NoteDto;

impl UpdateNoteInput {
    pub fn parse(
        request: UpdateNoteRequest,
        auth_user_id: Option<&str>,
    ) -> Result<Self, Vec<FieldIssue>> {
        let mut sink = IssueSink::default();
        let note_id = sink.note_id("noteId", request.note_id);
        let user_id = sink.user_id(auth_user_id);
        if let Some(title) = request.title.as_deref() {
            sink.text("title", title, 1, TITLE_MAX_CHARS);
        }
        if let Some(content) = request.content.as_deref() {
            sink.text("content", content, 1, CONTENT_MAX_CHARS);
        }

        let patch = NotePatch {
            title: request.title,
            content: request.content,
        };
        if patch.is_empty() {
            sink.push(FieldIssue::new(
                "",
                IssueCode::Custom,
                "at least one of title or content is required",
            ));
        }

        match (user_id, note_id) {
            (Some(user_id), Some(note_id)) if sink.is_empty() => Ok(Self {
                user_id,
                note_id,
                patch,
            }),
            _ => Err(sink.into_issues()),
        }
    }
}
