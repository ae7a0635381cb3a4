//! FFI note API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the note use cases to Dart via FRB.
//! - Resolve the caller from the session id and reject anonymous calls.
//! - Convert core errors into caller-safe envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One `DbPool` per process, created by `init_store` or lazily from the
//!   environment, and never replaced afterwards.
//! - Envelopes never carry internal error messages or causes.

use crate::transport::TransportCode;
use jotter_core::{
    create_note, delete_note, init_logging as init_logging_inner, list_notes, update_note,
    AppError, AppResult, CoreConfig, CreateNoteRequest, DbPool, DeleteNoteRequest, Deps,
    FieldIssue, ListNotesRequest, LoggingConfig, NoteDto, UpdateNoteRequest,
};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

static NOTE_STORE: OnceLock<NoteStore> = OnceLock::new();
static NOTE_STORE_INIT: Mutex<()> = Mutex::new(());

struct NoteStore {
    path: PathBuf,
    pool: DbPool,
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(&LoggingConfig::new(level, log_dir)) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Opens the note database once per process.
///
/// # FFI contract
/// - Sync call; opens `pool_size` connections and runs migrations.
/// - Repeating the call with the same path is a no-op.
/// - A different path after the store is open returns an error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_store(db_path: String, pool_size: u32) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path must not be empty".to_string();
    }
    match install_store(PathBuf::from(trimmed), pool_size as usize) {
        Ok(_) => String::new(),
        Err(err) => err,
    }
}

/// Note as delivered to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub content: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

/// Field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueItem {
    /// Field name in wire casing; empty for cross-field issues.
    pub path: String,
    pub code: String,
    pub message: String,
}

/// Caller-safe error description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    /// Transport code (`BAD_REQUEST`, `NOT_FOUND`, ...).
    pub code: String,
    pub http_status: u16,
    pub safe_message: String,
    /// Non-empty only for `BAD_REQUEST`.
    pub issues: Vec<IssueItem>,
}

/// Response envelope for single-note operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteResponse {
    pub ok: bool,
    pub note: Option<NoteItem>,
    pub error: Option<ErrorBody>,
}

/// Response envelope for note listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListResponse {
    pub ok: bool,
    pub notes: Vec<NoteItem>,
    pub error: Option<ErrorBody>,
}

/// Creates a note owned by the session user.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the created note, or an error envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create(session_user_id: Option<String>, title: String, content: String) -> NoteResponse {
    note_response(
        "note_create",
        with_session(session_user_id, |deps| {
            create_note::execute(deps, CreateNoteRequest { title, content })
        }),
    )
}

/// Lists the session user's notes, newest first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - `limit` defaults to 50 (1..=100); `offset` defaults to 0.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_list(
    session_user_id: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
) -> NoteListResponse {
    let result = with_session(session_user_id, |deps| {
        list_notes::execute(deps, ListNotesRequest { limit, offset })
    });
    match result {
        Ok(output) => NoteListResponse {
            ok: true,
            notes: output.notes.into_iter().map(to_note_item).collect(),
            error: None,
        },
        Err(err) => NoteListResponse {
            ok: false,
            notes: Vec::new(),
            error: Some(to_error_body("note_list", &err)),
        },
    }
}

/// Patches the session user's note. Absent fields stay unchanged.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Notes of other users answer `NOT_FOUND`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_update(
    session_user_id: Option<String>,
    note_id: String,
    title: Option<String>,
    content: Option<String>,
) -> NoteResponse {
    note_response(
        "note_update",
        with_session(session_user_id, |deps| {
            update_note::execute(
                deps,
                UpdateNoteRequest {
                    note_id,
                    title,
                    content,
                },
            )
        }),
    )
}

/// Deletes the session user's note and returns it.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Notes of other users answer `NOT_FOUND`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(session_user_id: Option<String>, note_id: String) -> NoteResponse {
    note_response(
        "note_delete",
        with_session(session_user_id, |deps| {
            delete_note::execute(deps, DeleteNoteRequest { note_id })
        }),
    )
}

fn with_session<T>(
    session_user_id: Option<String>,
    f: impl FnOnce(&Deps<'_>) -> AppResult<T>,
) -> AppResult<T> {
    let user_id = session_user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(AppError::auth)?;
    let store = resolve_store()?;
    f(&Deps::authenticated(&store.pool, user_id))
}

fn resolve_store() -> AppResult<&'static NoteStore> {
    if let Some(store) = NOTE_STORE.get() {
        return Ok(store);
    }

    let config = CoreConfig::from_env().map_err(|err| AppError::unknown(Some(Box::new(err))))?;
    if let Some(logging) = config.logging() {
        if let Err(err) = init_logging_inner(&logging) {
            warn!("event=ffi_store_init module=ffi status=error stage=logging error={err}");
        }
    }
    install_store(config.db_path, config.pool_size)
        .map_err(|err| AppError::infra_db("DB_ERROR", None).with_message(err))
}

fn install_store(path: PathBuf, pool_size: usize) -> Result<&'static NoteStore, String> {
    let _guard = NOTE_STORE_INIT
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(store) = NOTE_STORE.get() {
        return ensure_same_store(store, &path);
    }

    let pool = DbPool::open(&path, pool_size)
        .map_err(|err| format!("failed to open note store: {err}"))?;
    info!(
        "event=ffi_store_init module=ffi status=ok pool_size={}",
        pool.size()
    );
    let store = NOTE_STORE.get_or_init(|| NoteStore { path, pool });
    Ok(store)
}

fn ensure_same_store(store: &'static NoteStore, path: &Path) -> Result<&'static NoteStore, String> {
    if store.path == path {
        return Ok(store);
    }
    Err(format!(
        "note store already open at `{}`; refusing to switch to `{}`",
        store.path.display(),
        path.display()
    ))
}

fn note_response(operation: &'static str, result: AppResult<NoteDto>) -> NoteResponse {
    match result {
        Ok(note) => NoteResponse {
            ok: true,
            note: Some(to_note_item(note)),
            error: None,
        },
        Err(err) => NoteResponse {
            ok: false,
            note: None,
            error: Some(to_error_body(operation, &err)),
        },
    }
}

fn to_note_item(note: NoteDto) -> NoteItem {
    NoteItem {
        id: note.id.into_inner(),
        owner_id: note.owner_id.into_inner(),
        title: note.title,
        content: note.content,
        created_at: note.created_at,
        updated_at: note.updated_at,
    }
}

fn to_error_body(operation: &'static str, err: &AppError) -> ErrorBody {
    let code = TransportCode::from(err);
    if code == TransportCode::Internal {
        warn!(
            "event={operation} module=ffi status=error code={} error_kind={}",
            code.as_str(),
            err.kind()
        );
    }

    let issues = match code {
        TransportCode::BadRequest => err
            .details()
            .unwrap_or_default()
            .iter()
            .map(to_issue_item)
            .collect(),
        _ => Vec::new(),
    };

    ErrorBody {
        code: code.as_str().to_string(),
        http_status: code.http_status(),
        safe_message: err.safe_message().unwrap_or("internal error").to_string(),
        issues,
    }
}

fn to_issue_item(issue: &FieldIssue) -> IssueItem {
    IssueItem {
        path: issue.path.clone(),
        code: issue.code.as_str().to_string(),
        message: issue.message.clone(),
    }
}
