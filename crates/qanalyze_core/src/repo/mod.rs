//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the history-store contract consumed by the service layer.
//! - Isolate SQLite and JSON-document details from orchestration code.
//!
//! # Invariants
//! - The history list never exceeds its cap after `append`.
//! - Repository APIs return semantic errors as data, never panic.

pub mod history_repo;
