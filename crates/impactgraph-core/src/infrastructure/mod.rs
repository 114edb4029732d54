//! Infrastructure layer
//!
//! Contains the SQLite-backed implementations of domain repositories.

pub mod graph;
