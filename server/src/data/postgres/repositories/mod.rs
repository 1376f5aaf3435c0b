//! PostgreSQL repositories

pub mod jobs;
