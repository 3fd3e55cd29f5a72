//! FFI crate exposing qanalyze core use-cases to a host UI.

pub mod api;
