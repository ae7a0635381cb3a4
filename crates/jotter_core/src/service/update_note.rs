//! Update-note use case.

use super::{finish, invalid_input};
use crate::contract::dto::NoteDto;
use crate::contract::update::{UpdateNoteInput, UpdateNoteOutput, UpdateNoteRequest};
use crate::deps::Deps;
use crate::error::AppResult;
use crate::repo::note_repo::{NoteKey, NoteRepository, SqliteNoteRepository};
use std::time::Instant;

/// Patches the caller's note; fields absent from the request stay unchanged.
///
/// Returns `not_found` when the note is missing or owned by another user.
pub fn execute(deps: &Deps<'_>, request: UpdateNoteRequest) -> AppResult<UpdateNoteOutput> {
    let started_at = Instant::now();
    finish("note_update", started_at, run(deps, request))
}

fn run(deps: &Deps<'_>, request: UpdateNoteRequest) -> AppResult<UpdateNoteOutput> {
    let input = UpdateNoteInput::parse(request, deps.auth_user_id()).map_err(invalid_input)?;
    let key = NoteKey {
        id: &input.note_id,
        owner_id: &input.user_id,
    };

    deps.db().with_transaction(|tx| {
        let row = SqliteNoteRepository::new(tx).update_by_id(key, &input.patch)?;
        NoteDto::from_row(row)
    })
}
