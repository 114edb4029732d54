//! Project graph service
//!
//! The handle callers hold: it wires the store, the impact analyzer and the
//! query engine together with configured defaults.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;

use super::edge::NewEdge;
use super::event::GraphEvent;
use super::impact::{ImpactAnalyzer, ImpactReport};
use super::node::Node;
use super::query::QueryEngine;
use super::repository::{GraphRepository, GraphStats};

/// Project graph service
///
/// Provides high-level operations for:
/// - Recording observed files
/// - Impact analysis with a configured default depth
/// - Lexical search with a configured default limit
pub struct ProjectGraphService<R: GraphRepository> {
    /// Repository for persistence
    repository: Arc<R>,
    analyzer: ImpactAnalyzer<R>,
    query_engine: QueryEngine<R>,
    default_depth: u32,
    /// Event store for audit trail
    events: Vec<GraphEvent>,
}

impl<R: GraphRepository> ProjectGraphService<R> {
    /// Create a new service using the defaults in `config`
    pub fn new(repository: Arc<R>, config: &Config) -> Self {
        Self {
            analyzer: ImpactAnalyzer::new(Arc::clone(&repository)),
            query_engine: QueryEngine::new(Arc::clone(&repository))
                .with_default_limit(config.search.default_limit),
            default_depth: config.impact.max_depth,
            repository,
            events: Vec::new(),
        }
    }

    /// Access the underlying repository
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    // ========== File Observations ==========

    /// Record the current content of a file and return its impact set
    ///
    /// Upserts the `file:{file_path}` node, then analyzes impact at the
    /// configured default depth.
    pub async fn record_file(&mut self, file_path: &str, content: &str) -> Result<ImpactReport> {
        let node = Node::file(file_path, content);
        self.repository.upsert_node(&node).await?;

        info!(node_id = %node.id, file_path = %file_path, "Recorded file");
        self.events.push(GraphEvent::file_recorded(&node.id, file_path));

        self.analyze_impact(file_path, None).await
    }

    // ========== Graph Writes ==========

    /// Insert or replace a node
    pub async fn upsert_node(&self, node: &Node) -> Result<()> {
        self.repository.upsert_node(node).await
    }

    /// Append an edge
    pub async fn add_edge(&self, edge: &NewEdge) -> Result<i64> {
        self.repository.add_edge(edge).await
    }

    /// Get a node by ID
    pub async fn get_node(&self, id: &str) -> Result<Option<Node>> {
        self.repository.get_node(id).await
    }

    // ========== Queries ==========

    /// Files reachable from `file_path`, within `depth` hops or the configured default
    pub async fn analyze_impact(
        &mut self,
        file_path: &str,
        depth: Option<u32>,
    ) -> Result<ImpactReport> {
        let depth = depth.unwrap_or(self.default_depth);
        let report = self.analyzer.analyze(file_path, depth).await?;

        self.events.push(GraphEvent::impact_analyzed(
            file_path,
            depth,
            report.impacted_files.len(),
        ));

        Ok(report)
    }

    /// Search nodes, capped at `limit` or the configured default
    pub async fn search(&mut self, query: &str, limit: Option<usize>) -> Result<Vec<Node>> {
        let limit = limit.unwrap_or(self.query_engine.default_limit());
        let results = self.query_engine.search(query, limit).await?;

        self.events
            .push(GraphEvent::search_performed(query, limit, results.len()));

        Ok(results)
    }

    /// Current size of the graph
    pub async fn snapshot(&self) -> Result<GraphStats> {
        let stats = self.repository.get_stats().await?;
        debug!(
            nodes = stats.total_nodes,
            edges = stats.total_edges,
            "Graph snapshot"
        );
        Ok(stats)
    }

    // ========== Events ==========

    /// Get collected events
    pub fn events(&self) -> &[GraphEvent] {
        &self.events
    }

    /// Clear collected events
    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}
