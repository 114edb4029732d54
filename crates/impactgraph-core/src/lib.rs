//! Impactgraph Core Library
//!
//! This crate provides a persistent knowledge graph of a codebase, including:
//! - Storage (SQLite with an FTS5 lexical index, versioned migrations)
//! - Graph model (typed nodes and edges with opaque metadata)
//! - Impact analysis (bounded breadth-first reachability over files)
//! - Lexical search with a substring fallback for unparseable queries
//! - Configuration (TOML file with dotted-key access)

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod storage;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::domain::graph::{
        Edge, GraphRepository, GraphStats, ImpactAnalyzer, ImpactReport, NewEdge, Node,
        ProjectGraphService, QueryEngine,
    };
    pub use crate::error::{Error, Result};
    pub use crate::infrastructure::graph::SqliteGraphRepository;
    pub use crate::storage::Database;
}
