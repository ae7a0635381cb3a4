//! Domain model for notes and the identities that scope them.
//!
//! # Responsibility
//! - Define validated identifier types and the persisted note row shape.
//!
//! # Invariants
//! - Identifiers are only produced by parsing.
//! - Every note row is scoped by its owner id.

pub mod ids;
pub mod note;
