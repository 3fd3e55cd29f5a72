//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, the external analysis call and history
//!   persistence into one submission flow.
//! - Keep UI/FFI layers decoupled from storage and analyzer details.

pub mod analysis_service;
