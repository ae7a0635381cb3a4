//! Create-note use case.

use super::{finish, invalid_input};
use crate::contract::create::{CreateNoteInput, CreateNoteOutput, CreateNoteRequest};
use crate::contract::dto::NoteDto;
use crate::deps::Deps;
use crate::error::AppResult;
use crate::repo::note_repo::{NewNote, NoteRepository, SqliteNoteRepository};
use std::time::Instant;

/// Creates a note owned by the authenticated caller.
pub fn execute(deps: &Deps<'_>, request: CreateNoteRequest) -> AppResult<CreateNoteOutput> {
    let started_at = Instant::now();
    finish("note_create", started_at, run(deps, request))
}

fn run(deps: &Deps<'_>, request: CreateNoteRequest) -> AppResult<CreateNoteOutput> {
    let input = CreateNoteInput::parse(request, deps.auth_user_id()).map_err(invalid_input)?;
    let values = NewNote {
        owner_id: input.user_id,
        title: input.title,
        content: input.content,
    };

    deps.db().with_transaction(|tx| {
        let row = SqliteNoteRepository::new(tx).insert(&values)?;
        NoteDto::from_row(row)
    })
}
