//! Delete-note contract.

use super::dto::NoteDto;
use super::{FieldIssue, IssueSink};
use crate::model::ids::{NoteId, UserId};
use serde::{Deserialize, Serialize};

/// Wire request for deleting a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNoteRequest {
    pub note_id: String,
}

/// Validated delete input with the caller identity injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteNoteInput {
    pub user_id: UserId,
    pub note_id: NoteId,
}

/// The deleted record.
pub type DeleteNoteOutput = NoteDto;

impl DeleteNoteInput {
    pub fn parse(
        request: DeleteNoteRequest,
        auth_user_id: Option<&str>,
    ) -> Result<Self, Vec<FieldIssue>> {
        let mut sink = IssueSink::default();
        let user_id = sink.user_id(auth_user_id);
        let note_id = sink.note_id("noteId", request.note_id);

        match (user_id, note_id) {
            (Some(user_id), Some(note_id)) if sink.is_empty() => Ok(Self { user_id, note_id }),
            _ => Err(sink.into_issues()),
        }
    }
}
