//! SQLite implementation of the GraphRepository
//!
//! Node upserts and their text index rows are written in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::domain::graph::{Edge, GraphRepository, GraphStats, NewEdge, Node};
use crate::error::Result;
use crate::storage::Database;

use super::lexical::{self, SearchPath};

/// SQLite implementation of the graph repository
#[derive(Clone)]
pub struct SqliteGraphRepository {
    pool: SqlitePool,
}

impl SqliteGraphRepository {
    /// Create a new SQLite graph repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a repository sharing the pool of an open database
    pub fn from_database(db: &Database) -> Self {
        Self::new(db.pool().clone())
    }

    /// Search and report which statement answered
    pub async fn search_with_path(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<(Vec<Node>, SearchPath)> {
        let (rows, path) = lexical::search(&self.pool, query, limit).await?;
        let nodes = rows
            .into_iter()
            .map(NodeRow::into_node)
            .collect::<Result<Vec<_>>>()?;
        Ok((nodes, path))
    }
}

#[async_trait]
impl GraphRepository for SqliteGraphRepository {
    // ========== Node Operations ==========

    async fn upsert_node(&self, node: &Node) -> Result<()> {
        let metadata = node
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO nodes (id, type, name, file_path, content, metadata, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                type = excluded.type,
                name = excluded.name,
                file_path = excluded.file_path,
                content = excluded.content,
                metadata = excluded.metadata,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&node.id)
        .bind(&node.node_type)
        .bind(&node.name)
        .bind(&node.file_path)
        .bind(&node.content)
        .bind(&metadata)
        .bind(Utc::now().to_rfc3339())
        .execute(&mut *tx)
        .await?;

        lexical::reindex(&mut *tx, node).await?;

        tx.commit().await?;

        debug!(node_id = %node.id, node_type = %node.node_type, "Node upserted");
        Ok(())
    }

    async fn get_node(&self, id: &str) -> Result<Option<Node>> {
        let row: Option<NodeRow> = sqlx::query_as(
            "SELECT id, type, name, file_path, content, metadata, updated_at FROM nodes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(NodeRow::into_node).transpose()
    }

    async fn find_nodes_by_file_path(&self, file_path: &str) -> Result<Vec<Node>> {
        let rows: Vec<NodeRow> = sqlx::query_as(
            r#"
            SELECT id, type, name, file_path, content, metadata, updated_at
            FROM nodes
            WHERE file_path = ?
            ORDER BY rowid
            "#,
        )
        .bind(file_path)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(NodeRow::into_node).collect()
    }

    // ========== Edge Operations ==========

    async fn add_edge(&self, edge: &NewEdge) -> Result<i64> {
        let metadata = edge
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let result = sqlx::query(
            "INSERT INTO edges (source_id, target_id, relationship, metadata) VALUES (?, ?, ?, ?)",
        )
        .bind(&edge.source_id)
        .bind(&edge.target_id)
        .bind(&edge.relationship)
        .bind(&metadata)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(
            edge_id = id,
            source_id = %edge.source_id,
            target_id = %edge.target_id,
            relationship = %edge.relationship,
            "Edge added"
        );
        Ok(id)
    }

    async fn get_edges_for_node(&self, node_id: &str) -> Result<Vec<Edge>> {
        let rows: Vec<EdgeRow> = sqlx::query_as(
            r#"
            SELECT id, source_id, target_id, relationship, metadata
            FROM edges
            WHERE source_id = ?1 OR target_id = ?1
            ORDER BY id
            "#,
        )
        .bind(node_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EdgeRow::into_edge).collect()
    }

    // ========== Search Operations ==========

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Node>> {
        let (nodes, _) = self.search_with_path(query, limit).await?;
        Ok(nodes)
    }

    // ========== Statistics ==========

    async fn get_stats(&self) -> Result<GraphStats> {
        let (total_nodes,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM nodes")
            .fetch_one(&self.pool)
            .await?;

        let (total_edges,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM edges")
            .fetch_one(&self.pool)
            .await?;

        let nodes_by_type: Vec<(String, i64)> = sqlx::query_as(
            "SELECT type, COUNT(*) FROM nodes GROUP BY type ORDER BY COUNT(*) DESC, type",
        )
        .fetch_all(&self.pool)
        .await?;

        let edges_by_relationship: Vec<(String, i64)> = sqlx::query_as(
            "SELECT relationship, COUNT(*) FROM edges GROUP BY relationship ORDER BY COUNT(*) DESC, relationship",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(GraphStats {
            total_nodes: total_nodes as u64,
            total_edges: total_edges as u64,
            nodes_by_type: nodes_by_type
                .into_iter()
                .map(|(t, c)| (t, c as u64))
                .collect(),
            edges_by_relationship: edges_by_relationship
                .into_iter()
                .map(|(r, c)| (r, c as u64))
                .collect(),
        })
    }
}

// ========== Database Row Types ==========

#[derive(Debug, FromRow)]
pub(super) struct NodeRow {
    id: String,
    #[sqlx(rename = "type")]
    node_type: String,
    name: String,
    file_path: Option<String>,
    content: Option<String>,
    metadata: Option<String>,
    updated_at: String,
}

impl NodeRow {
    pub(super) fn into_node(self) -> Result<Node> {
        let metadata: Option<serde_json::Value> = self
            .metadata
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        let updated_at = DateTime::parse_from_rfc3339(&self.updated_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Node {
            id: self.id,
            node_type: self.node_type,
            name: self.name,
            file_path: self.file_path,
            content: self.content,
            metadata,
            updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct EdgeRow {
    id: i64,
    source_id: String,
    target_id: String,
    relationship: String,
    metadata: Option<String>,
}

impl EdgeRow {
    fn into_edge(self) -> Result<Edge> {
        let metadata: Option<serde_json::Value> = self
            .metadata
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(Edge {
            id: self.id,
            source_id: self.source_id,
            target_id: self.target_id,
            relationship: self.relationship,
            metadata,
        })
    }
}
