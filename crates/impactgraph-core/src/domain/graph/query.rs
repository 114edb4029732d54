//! Free-text query façade over the lexical index

use std::sync::Arc;

use tracing::debug;

use crate::config::DEFAULT_SEARCH_LIMIT;
use crate::error::Result;

use super::node::Node;
use super::repository::GraphRepository;

/// Validates search requests and hands them to the repository
pub struct QueryEngine<R: GraphRepository> {
    repository: Arc<R>,
    default_limit: usize,
}

impl<R: GraphRepository> Clone for QueryEngine<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            default_limit: self.default_limit,
        }
    }
}

impl<R: GraphRepository> QueryEngine<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            default_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Override the limit used by [`QueryEngine::search_default`]
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Search node names and content
    ///
    /// An empty query or a zero limit returns no results without touching
    /// the store. Any other text, whitespace included, is searched; query
    /// syntax the index cannot parse is not an error.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Node>> {
        if query.is_empty() || limit == 0 {
            debug!(limit, "Skipping empty search request");
            return Ok(Vec::new());
        }

        let results = self.repository.search(query, limit).await?;
        debug!(query = %query, limit, results = results.len(), "Search complete");
        Ok(results)
    }

    /// Search with the default limit
    pub async fn search_default(&self, query: &str) -> Result<Vec<Node>> {
        self.search(query, self.default_limit).await
    }
}
