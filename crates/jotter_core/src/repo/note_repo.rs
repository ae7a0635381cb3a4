//! Ownership-scoped note repository and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/update/delete/list persistence APIs for notes.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Update and delete filter by `(id, owner_id)` jointly; list filters by
//!   `owner_id`. A row owned by someone else behaves exactly like a missing one.
//! - Timestamps are assigned by SQL, never by callers. `updated_at` strictly
//!   increases on every successful update.
//! - Every SQLite failure is returned as `infra_db` with the raw error kept as
//!   the internal cause.

use crate::error::{AppError, AppResult};
use crate::model::ids::{NoteId, UserId};
use crate::model::note::{NotePatch, NoteRow};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

/// Current time in Unix epoch milliseconds. SQLite keeps `'now'` fixed for
/// the duration of one statement step.
const NOW_MS_SQL: &str = "CAST(ROUND((julianday('now') - 2440587.5) * 86400000.0) AS INTEGER)";

const NOTE_COLUMNS: &str = "id, owner_id, title, content, created_at, updated_at";

const NOTES_DEFAULT_LIMIT: u32 = 50;

/// Fields for a new note row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub owner_id: UserId,
    pub title: String,
    pub content: String,
}

/// Compound key addressing one note on behalf of its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteKey<'a> {
    pub id: &'a NoteId,
    pub owner_id: &'a UserId,
}

/// Offset/limit window for owner listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotePage {
    pub limit: u32,
    pub offset: u64,
}

impl Default for NotePage {
    fn default() -> Self {
        Self {
            limit: NOTES_DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Repository interface for note persistence.
pub trait NoteRepository {
    /// Inserts a row with a server-generated id and timestamps.
    fn insert(&self, values: &NewNote) -> AppResult<NoteRow>;
    /// Applies only the fields present in `patch` and stamps `updated_at`.
    fn update_by_id(&self, key: NoteKey<'_>, patch: &NotePatch) -> AppResult<NoteRow>;
    /// Deletes the row and returns it as it was.
    fn delete_by_id(&self, key: NoteKey<'_>) -> AppResult<NoteRow>;
    /// Lists the owner's notes newest first.
    fn find_by_owner(&self, owner_id: &UserId, page: NotePage) -> AppResult<Vec<NoteRow>>;
}

/// SQLite-backed note repository.
///
/// Accepts a plain connection or an open transaction (through deref), so
/// several calls can share one atomic unit of work.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert(&self, values: &NewNote) -> AppResult<NoteRow> {
        let id = NoteId::generate();
        let inserted = self
            .conn
            .query_row(
                &format!(
                    "INSERT INTO notes (id, owner_id, title, content, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, {NOW_MS_SQL}, {NOW_MS_SQL})
                     RETURNING {NOTE_COLUMNS};"
                ),
                params![
                    id.as_str(),
                    values.owner_id.as_str(),
                    values.title.as_str(),
                    values.content.as_str(),
                ],
                parse_note_row,
            )
            .optional()?;

        inserted.ok_or_else(|| {
            AppError::infra_db("DB_ERROR", None).with_message("note insert returned no row")
        })
    }

    fn update_by_id(&self, key: NoteKey<'_>, patch: &NotePatch) -> AppResult<NoteRow> {
        let stamp = format!("updated_at = MAX({NOW_MS_SQL}, COALESCE(updated_at, created_at) + 1)");
        let mut assignments = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = patch.title.as_ref() {
            assignments.push("title = ?");
            bind_values.push(Value::Text(title.clone()));
        }
        if let Some(content) = patch.content.as_ref() {
            assignments.push("content = ?");
            bind_values.push(Value::Text(content.clone()));
        }

        assignments.push(stamp.as_str());
        bind_values.push(Value::Text(key.id.as_str().to_string()));
        bind_values.push(Value::Text(key.owner_id.as_str().to_string()));

        let sql = format!(
            "UPDATE notes
             SET {}
             WHERE id = ? AND owner_id = ?
             RETURNING {NOTE_COLUMNS};",
            assignments.join(", ")
        );

        let updated = self
            .conn
            .query_row(&sql, params_from_iter(bind_values), parse_note_row)
            .optional()?;
        updated.ok_or_else(AppError::not_found)
    }

    fn delete_by_id(&self, key: NoteKey<'_>) -> AppResult<NoteRow> {
        let deleted = self
            .conn
            .query_row(
                &format!(
                    "DELETE FROM notes
                     WHERE id = ?1 AND owner_id = ?2
                     RETURNING {NOTE_COLUMNS};"
                ),
                params![key.id.as_str(), key.owner_id.as_str()],
                parse_note_row,
            )
            .optional()?;
        deleted.ok_or_else(AppError::not_found)
    }

    fn find_by_owner(&self, owner_id: &UserId, page: NotePage) -> AppResult<Vec<NoteRow>> {
        let offset = i64::try_from(page.offset).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS}
             FROM notes
             WHERE owner_id = ?1
             ORDER BY created_at DESC, id ASC
             LIMIT ?2 OFFSET ?3;"
        ))?;

        let rows = stmt.query_map(
            params![owner_id.as_str(), i64::from(page.limit), offset],
            parse_note_row,
        )?;
        let mut notes = Vec::new();
        for row in rows {
            notes.push(row?);
        }
        Ok(notes)
    }
}

fn parse_note_row(row: &Row<'_>) -> rusqlite::Result<NoteRow> {
    Ok(NoteRow {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
