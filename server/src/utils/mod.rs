//! Shared utilities

pub mod file;
pub mod sql;
