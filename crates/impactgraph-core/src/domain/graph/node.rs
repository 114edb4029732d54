//! Graph nodes
//!
//! A node is one tracked unit of source knowledge: a file, a function,
//! a class. Its kind is an opaque label chosen by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind label used for nodes created from observed files
pub const FILE_NODE_TYPE: &str = "file";

/// A tracked entity in the project graph
///
/// `id` is assigned by the caller and must stay stable across updates.
/// Upserting an existing `id` replaces every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Globally unique identifier, e.g. `file:/src/app.js`
    pub id: String,
    /// Entity kind (`file`, `function`, `class`, ...), stored verbatim
    #[serde(rename = "type")]
    pub node_type: String,
    /// Short human label, also a lexical search field
    pub name: String,
    /// Source location this node represents, if any
    pub file_path: Option<String>,
    /// Full text used for indexing
    pub content: Option<String>,
    /// Opaque payload, never interpreted by the engine
    pub metadata: Option<serde_json::Value>,
    /// Set by the store on every upsert
    pub updated_at: DateTime<Utc>,
}

impl Node {
    /// Create a new node with no location, content or metadata
    pub fn new(id: impl Into<String>, node_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            name: name.into(),
            file_path: None,
            content: None,
            metadata: None,
            updated_at: Utc::now(),
        }
    }

    /// Create the node representing a whole source file
    ///
    /// The id is `file:{file_path}` and the name is the last path segment.
    pub fn file(file_path: impl Into<String>, content: impl Into<String>) -> Self {
        let file_path = file_path.into();
        Self::new(file_node_id(&file_path), FILE_NODE_TYPE, file_name(&file_path))
            .with_file_path(file_path)
            .with_content(content)
    }

    /// Set the source location
    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    /// Set the indexed content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Attach an opaque metadata payload
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Text stored in the lexical index for this node's content column
    pub fn indexed_content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// Identifier of the node representing a whole file
pub fn file_node_id(file_path: &str) -> String {
    format!("{}:{}", FILE_NODE_TYPE, file_path)
}

fn file_name(file_path: &str) -> String {
    file_path
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(file_path)
        .to_string()
}
