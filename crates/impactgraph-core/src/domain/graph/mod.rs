//! Project graph domain module
//!
//! Models a codebase as typed nodes (files, functions, classes) joined by
//! typed edges, and answers two questions about it:
//!
//! - **Impact**: which tracked files are within N relationship hops of a
//!   changed file, walking edges in both directions
//! - **Search**: which nodes mention some text, via the lexical index kept
//!   in step with every node upsert
//!
//! ## Usage
//!
//! ```rust,ignore
//! use impactgraph_core::domain::graph::{ImpactAnalyzer, NewEdge, Node};
//!
//! repository.upsert_node(&Node::file("/src/a.js", "import './b.js'")).await?;
//! repository.upsert_node(&Node::file("/src/b.js", "export const b = 1")).await?;
//! repository
//!     .add_edge(&NewEdge::new("file:/src/a.js", "file:/src/b.js", "imports"))
//!     .await?;
//!
//! let report = ImpactAnalyzer::new(repository).analyze("/src/b.js", 2).await?;
//! assert!(report.contains("/src/a.js"));
//! ```

mod edge;
mod event;
mod impact;
mod node;
mod query;
mod repository;
mod service;

#[cfg(test)]
mod testing;

pub use edge::{Edge, NewEdge};
pub use event::GraphEvent;
pub use impact::{ImpactAnalyzer, ImpactReport};
pub use node::{FILE_NODE_TYPE, Node, file_node_id};
pub use query::QueryEngine;
pub use repository::{GraphRepository, GraphStats};
pub use service::ProjectGraphService;
