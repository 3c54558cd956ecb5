//! Shared test utilities.

pub mod backend;
pub mod runtime;
