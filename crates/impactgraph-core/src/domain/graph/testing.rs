//! In-memory repository doubles for domain tests

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use crate::error::{Error, Result};

use super::edge::{Edge, NewEdge};
use super::node::Node;
use super::repository::{GraphRepository, GraphStats};

/// Vec-backed repository with the same observable contract as the SQLite one
#[derive(Default)]
pub(crate) struct MemoryRepository {
    nodes: Mutex<Vec<Node>>,
    edges: Mutex<Vec<Edge>>,
    node_fetches: AtomicUsize,
}

impl MemoryRepository {
    pub(crate) fn node_fetches(&self) -> usize {
        self.node_fetches.load(Ordering::SeqCst)
    }

    pub(crate) async fn file(&self, id: &str, file_path: &str) {
        let node = Node::new(id, "file", file_path).with_file_path(file_path);
        self.upsert_node(&node).await.unwrap();
    }

    pub(crate) async fn link(&self, source_id: &str, target_id: &str) {
        self.add_edge(&NewEdge::new(source_id, target_id, "imports"))
            .await
            .unwrap();
    }
}

#[async_trait]
impl GraphRepository for MemoryRepository {
    async fn upsert_node(&self, node: &Node) -> Result<()> {
        let mut stored = node.clone();
        stored.updated_at = Utc::now();

        let mut nodes = self.nodes.lock().unwrap();
        match nodes.iter_mut().find(|n| n.id == node.id) {
            Some(existing) => *existing = stored,
            None => nodes.push(stored),
        }
        Ok(())
    }

    async fn get_node(&self, id: &str) -> Result<Option<Node>> {
        self.node_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.nodes.lock().unwrap().iter().find(|n| n.id == id).cloned())
    }

    async fn find_nodes_by_file_path(&self, file_path: &str) -> Result<Vec<Node>> {
        Ok(self
            .nodes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.file_path.as_deref() == Some(file_path))
            .cloned()
            .collect())
    }

    async fn add_edge(&self, edge: &NewEdge) -> Result<i64> {
        let mut edges = self.edges.lock().unwrap();
        let id = edges.len() as i64 + 1;
        edges.push(edge.clone().into_edge(id));
        Ok(id)
    }

    async fn get_edges_for_node(&self, node_id: &str) -> Result<Vec<Edge>> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.source_id == node_id || e.target_id == node_id)
            .cloned()
            .collect())
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Node>> {
        let needle = query.to_lowercase();
        Ok(self
            .nodes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| {
                n.name.to_lowercase().contains(&needle)
                    || n.indexed_content().to_lowercase().contains(&needle)
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_stats(&self) -> Result<GraphStats> {
        Ok(GraphStats {
            total_nodes: self.nodes.lock().unwrap().len() as u64,
            total_edges: self.edges.lock().unwrap().len() as u64,
            ..Default::default()
        })
    }
}

/// Repository whose edge reads fail, as if the database went away mid-query
pub(crate) struct BrokenEdgesRepository {
    pub(crate) inner: MemoryRepository,
}

#[async_trait]
impl GraphRepository for BrokenEdgesRepository {
    async fn upsert_node(&self, node: &Node) -> Result<()> {
        self.inner.upsert_node(node).await
    }

    async fn get_node(&self, id: &str) -> Result<Option<Node>> {
        self.inner.get_node(id).await
    }

    async fn find_nodes_by_file_path(&self, file_path: &str) -> Result<Vec<Node>> {
        self.inner.find_nodes_by_file_path(file_path).await
    }

    async fn add_edge(&self, edge: &NewEdge) -> Result<i64> {
        self.inner.add_edge(edge).await
    }

    async fn get_edges_for_node(&self, _node_id: &str) -> Result<Vec<Edge>> {
        Err(Error::StorageFailure(sqlx::Error::PoolClosed))
    }

    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<Node>> {
        Err(Error::StorageFailure(sqlx::Error::PoolClosed))
    }

    async fn get_stats(&self) -> Result<GraphStats> {
        self.inner.get_stats().await
    }
}
