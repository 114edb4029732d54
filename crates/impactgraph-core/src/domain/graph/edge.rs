//! Graph edges
//!
//! Edges are directed and typed, but impact traversal walks them in both
//! directions. The relationship label is opaque to the engine.

use serde::{Deserialize, Serialize};

/// A stored relationship between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Surrogate key assigned by the store
    pub id: i64,
    pub source_id: String,
    pub target_id: String,
    /// Relationship kind (`imports`, `calls`, `defines`, ...)
    pub relationship: String,
    pub metadata: Option<serde_json::Value>,
}

impl Edge {
    /// The endpoint of this edge that is not `node_id`
    ///
    /// For a self-loop both endpoints are `node_id` and it is returned.
    pub fn neighbor_of(&self, node_id: &str) -> &str {
        if self.source_id == node_id {
            &self.target_id
        } else {
            &self.source_id
        }
    }
}

/// A relationship to be appended to the graph
///
/// Endpoints are not checked against existing nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEdge {
    pub source_id: String,
    pub target_id: String,
    pub relationship: String,
    pub metadata: Option<serde_json::Value>,
}

impl NewEdge {
    /// Create a new relationship between two node ids
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        relationship: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            relationship: relationship.into(),
            metadata: None,
        }
    }

    /// Attach an opaque metadata payload
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The stored form of this edge once the store assigned its id
    pub fn into_edge(self, id: i64) -> Edge {
        Edge {
            id,
            source_id: self.source_id,
            target_id: self.target_id,
            relationship: self.relationship,
            metadata: self.metadata,
        }
    }
}
