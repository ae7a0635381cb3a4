//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define ownership-scoped data access contracts for notes.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return `AppError` values; raw SQLite errors never escape.
//! - Semantic misses are reported as `not_found`, storage faults as `infra_db`.

pub mod note_repo;
