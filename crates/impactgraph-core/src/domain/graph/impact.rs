//! Impact analysis for file changes.
//!
//! Answers "which other tracked files could this change affect?" by a
//! breadth-first walk over the graph, treating every edge as undirected and
//! stopping after a fixed number of hops.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

use super::repository::GraphRepository;

/// Files reachable from a changed file within a hop bound
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactReport {
    /// The file whose change was analyzed
    pub file_path: String,
    /// Maximum number of relationship hops followed
    pub depth: u32,
    /// Distinct file paths reached, in discovery order; includes the file itself when tracked
    pub impacted_files: Vec<String>,
}

impl ImpactReport {
    /// Whether `file_path` is in the impact set
    pub fn contains(&self, file_path: &str) -> bool {
        self.impacted_files.iter().any(|f| f == file_path)
    }

    /// Whether nothing was reached (the file is not tracked)
    pub fn is_empty(&self) -> bool {
        self.impacted_files.is_empty()
    }
}

/// Read-only breadth-first traversal over a graph repository
pub struct ImpactAnalyzer<R: GraphRepository> {
    repository: Arc<R>,
}

impl<R: GraphRepository> Clone for ImpactAnalyzer<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: GraphRepository> ImpactAnalyzer<R> {
    /// Create an analyzer reading from `repository`
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Compute the impact set of `file_path` within `depth` hops
    ///
    /// Every node carrying `file_path` seeds the walk at level 0. A node id
    /// is expanded at most once; the visited check happens when it is
    /// dequeued, and ids already visited are also not enqueued again. Nodes
    /// at `level == depth` are recorded but not expanded since their
    /// neighbors would exceed the bound. An edge endpoint with no stored node
    /// is marked visited and not expanded.
    ///
    /// An untracked file yields an empty report. A storage failure aborts the
    /// walk and is returned instead of a partial report.
    pub async fn analyze(&self, file_path: &str, depth: u32) -> Result<ImpactReport> {
        let start = Instant::now();

        let start_nodes = self.repository.find_nodes_by_file_path(file_path).await?;
        let mut queue: VecDeque<(String, u32)> =
            start_nodes.into_iter().map(|node| (node.id, 0)).collect();

        let mut visited: HashSet<String> = HashSet::new();
        let mut seen_files: HashSet<String> = HashSet::new();
        let mut impacted_files = Vec::new();

        while let Some((id, level)) = queue.pop_front() {
            if level > depth || visited.contains(&id) {
                continue;
            }
            visited.insert(id.clone());

            let Some(node) = self.repository.get_node(&id).await? else {
                debug!(node_id = %id, level, "Dangling edge endpoint, not expanding");
                continue;
            };

            if let Some(path) = node.file_path {
                if seen_files.insert(path.clone()) {
                    impacted_files.push(path);
                }
            }

            if level == depth {
                continue;
            }

            for edge in self.repository.get_edges_for_node(&id).await? {
                let neighbor = edge.neighbor_of(&id);
                if !visited.contains(neighbor) {
                    queue.push_back((neighbor.to_string(), level + 1));
                }
            }
        }

        debug!(
            file_path = %file_path,
            depth,
            visited = visited.len(),
            impacted = impacted_files.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Impact analysis complete"
        );

        Ok(ImpactReport {
            file_path: file_path.to_string(),
            depth,
            impacted_files,
        })
    }
}
