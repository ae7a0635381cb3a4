//! Note storage row and partial-update shape.
//!
//! # Responsibility
//! - Mirror one `notes` table row exactly as persisted.
//! - Describe a defined-fields-only patch for note updates.
//!
//! # Invariants
//! - Rows are owned by exactly one user (`owner_id`); ownership never changes.
//! - This shape is internal. Callers outside core receive `NoteDto`, which
//!   re-validates every field.

/// One persisted note row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub content: String,
    /// Unix epoch milliseconds, assigned once at insert.
    pub created_at: i64,
    /// Unix epoch milliseconds; `None` for rows never stamped.
    pub updated_at: Option<i64>,
}

impl NoteRow {
    /// Effective update timestamp, falling back to creation time.
    pub fn effective_updated_at(&self) -> i64 {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// Partial update for a note.
///
/// `None` leaves the stored column untouched; `Some` replaces it. Contracts
/// reject `Some("")` before a patch reaches storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    /// Returns true when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}
