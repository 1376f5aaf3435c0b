//! Boolean job posting search over PostgreSQL
//!
//! Accepts nested AND/OR/NOT filters over technology, organization and job
//! function, compiles them to one parameterized statement, and serves the
//! results over HTTP.

pub mod api;
mod app;
pub mod core;
pub mod data;
pub mod utils;
