//! Delete-note use case.

use super::{finish, invalid_input};
use crate::contract::delete::{DeleteNoteInput, DeleteNoteOutput, DeleteNoteRequest};
use crate::contract::dto::NoteDto;
use crate::deps::Deps;
use crate::error::AppResult;
use crate::repo::note_repo::{NoteKey, NoteRepository, SqliteNoteRepository};
use std::time::Instant;

/// Deletes the caller's note and returns the removed record.
///
/// Deleting an already-deleted note returns `not_found`.
pub fn execute(deps: &Deps<'_>, request: DeleteNoteRequest) -> AppResult<DeleteNoteOutput> {
    let started_at = Instant::now();
    finish("note_delete", started_at, run(deps, request))
}

fn run(deps: &Deps<'_>, request: DeleteNoteRequest) -> AppResult<DeleteNoteOutput> {
    let input = DeleteNoteInput::parse(request, deps.auth_user_id()).map_err(invalid_input)?;
    let key = NoteKey {
        id: &input.note_id,
        owner_id: &input.user_id,
    };

    deps.db().with_transaction(|tx| {
        let row = SqliteNoteRepository::new(tx).delete_by_id(key)?;
        NoteDto::from_row(row)
    })
}
