//! Flutter-facing transport adapter for jotter.

pub mod api;
pub mod transport;
