//! Core domain logic for jotter.
//! This crate is the single source of truth for note ownership, validation
//! and error semantics; transports only adapt its results.

pub mod config;
pub mod contract;
pub mod db;
pub mod deps;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig, LoggingConfig};
pub use contract::create::{CreateNoteInput, CreateNoteOutput, CreateNoteRequest};
pub use contract::delete::{DeleteNoteInput, DeleteNoteOutput, DeleteNoteRequest};
pub use contract::dto::NoteDto;
pub use contract::list::{ListNotesInput, ListNotesOutput, ListNotesRequest};
pub use contract::update::{UpdateNoteInput, UpdateNoteOutput, UpdateNoteRequest};
pub use contract::{FieldIssue, IssueCode};
pub use db::{DbError, DbPool};
pub use deps::Deps;
pub use error::{AppError, AppResult, ErrorKind};
pub use logging::{default_log_level, init_logging};
pub use model::ids::{IdError, NoteId, UserId};
pub use model::note::{NotePatch, NoteRow};
pub use repo::note_repo::{NewNote, NoteKey, NotePage, NoteRepository, SqliteNoteRepository};
pub use service::{create_note, delete_note, list_notes, update_note};

