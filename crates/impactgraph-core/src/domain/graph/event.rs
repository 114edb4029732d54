//! Domain events for the project graph
//!
//! Collected by [`super::ProjectGraphService`] as an audit trail of what
//! callers asked of the graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events that can occur in the project graph
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum GraphEvent {
    /// A file observation was written to the store
    FileRecorded {
        node_id: String,
        file_path: String,
        timestamp: DateTime<Utc>,
    },
    /// An impact set was computed
    ImpactAnalyzed {
        file_path: String,
        depth: u32,
        impacted_count: usize,
        timestamp: DateTime<Utc>,
    },
    /// A lexical search was performed
    SearchPerformed {
        query: String,
        limit: usize,
        result_count: usize,
        timestamp: DateTime<Utc>,
    },
}

impl GraphEvent {
    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::FileRecorded { timestamp, .. }
            | Self::ImpactAnalyzed { timestamp, .. }
            | Self::SearchPerformed { timestamp, .. } => *timestamp,
        }
    }

    /// Get the event type name
    pub fn event_type_name(&self) -> &'static str {
        match self {
            Self::FileRecorded { .. } => "file_recorded",
            Self::ImpactAnalyzed { .. } => "impact_analyzed",
            Self::SearchPerformed { .. } => "search_performed",
        }
    }

    /// The file this event concerns, if any
    pub fn file_path(&self) -> Option<&str> {
        match self {
            Self::FileRecorded { file_path, .. } | Self::ImpactAnalyzed { file_path, .. } => {
                Some(file_path)
            }
            Self::SearchPerformed { .. } => None,
        }
    }

    pub fn file_recorded(node_id: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self::FileRecorded {
            node_id: node_id.into(),
            file_path: file_path.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn impact_analyzed(file_path: impl Into<String>, depth: u32, impacted_count: usize) -> Self {
        Self::ImpactAnalyzed {
            file_path: file_path.into(),
            depth,
            impacted_count,
            timestamp: Utc::now(),
        }
    }

    pub fn search_performed(query: impl Into<String>, limit: usize, result_count: usize) -> Self {
        Self::SearchPerformed {
            query: query.into(),
            limit,
            result_count,
            timestamp: Utc::now(),
        }
    }
}
