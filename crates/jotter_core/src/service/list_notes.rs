//! List-notes use case.

use super::{finish, invalid_input};
use crate::contract::dto::NoteDto;
use crate::contract::list::{ListNotesInput, ListNotesOutput, ListNotesRequest};
use crate::deps::Deps;
use crate::error::AppResult;
use crate::repo::note_repo::{NotePage, NoteRepository, SqliteNoteRepository};
use std::time::Instant;

/// Lists the caller's notes newest first, windowed by limit/offset.
pub fn execute(deps: &Deps<'_>, request: ListNotesRequest) -> AppResult<ListNotesOutput> {
    let started_at = Instant::now();
    finish("note_list", started_at, run(deps, request))
}

fn run(deps: &Deps<'_>, request: ListNotesRequest) -> AppResult<ListNotesOutput> {
    let input = ListNotesInput::parse(request, deps.auth_user_id()).map_err(invalid_input)?;
    let page = NotePage {
        limit: input.limit,
        offset: input.offset,
    };

    deps.db().with_read_transaction(|tx| {
        let rows = SqliteNoteRepository::new(tx).find_by_owner(&input.user_id, page)?;
        let notes = rows
            .into_iter()
            .map(NoteDto::from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ListNotesOutput { notes })
    })
}
