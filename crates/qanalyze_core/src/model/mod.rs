//! Domain model for analysis input validation and history.
//!
//! # Responsibility
//! - Define canonical data structures shared by validation, highlighting
//!   and history persistence.
//!
//! # Invariants
//! - All text offsets are Unicode-scalar (char) offsets into the original
//!   input string.
//! - `ValidationOutcome` never carries ranges without a message.

pub mod mode;
pub mod outcome;
pub mod record;
pub mod report;
