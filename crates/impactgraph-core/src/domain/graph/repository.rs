//! Repository trait for graph persistence
//!
//! This module defines the trait for graph storage operations.
//! The trait abstracts over different storage backends (SQLite, etc.).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::edge::{Edge, NewEdge};
use super::node::Node;

/// Repository trait for graph persistence
///
/// Covers the entity store (node upsert, edge append, point lookups) and
/// the lexical index kept in step with it. Absence is `Ok(None)` or an
/// empty list, never an error.
#[async_trait]
pub trait GraphRepository: Send + Sync {
    // ========== Node Operations ==========

    /// Insert or fully replace a node, refreshing its `updated_at`
    ///
    /// The node row and its text index entry are written atomically.
    async fn upsert_node(&self, node: &Node) -> Result<()>;

    /// Get a node by ID
    async fn get_node(&self, id: &str) -> Result<Option<Node>>;

    /// Every node whose `file_path` equals the argument
    async fn find_nodes_by_file_path(&self, file_path: &str) -> Result<Vec<Node>>;

    // ========== Edge Operations ==========

    /// Append an edge and return its surrogate id
    async fn add_edge(&self, edge: &NewEdge) -> Result<i64>;

    /// Every edge with `node_id` as either endpoint
    async fn get_edges_for_node(&self, node_id: &str) -> Result<Vec<Edge>>;

    // ========== Search Operations ==========

    /// Lexical search over node name and content, capped at `limit`
    ///
    /// Malformed query text never fails the call.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Node>>;

    // ========== Statistics ==========

    /// Get graph statistics
    async fn get_stats(&self) -> Result<GraphStats>;
}

/// Statistics about the project graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Total number of nodes
    pub total_nodes: u64,
    /// Total number of edges
    pub total_edges: u64,
    /// Node counts by kind, most frequent first
    pub nodes_by_type: Vec<(String, u64)>,
    /// Edge counts by relationship, most frequent first
    pub edges_by_relationship: Vec<(String, u64)>,
}
