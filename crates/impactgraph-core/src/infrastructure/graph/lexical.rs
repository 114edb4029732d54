//! Lexical index maintenance and search
//!
//! The `text_index` FTS5 table holds one row per node. Rows are rewritten
//! whole on every upsert since FTS5 re-tokenizes complete documents.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::domain::graph::Node;
use crate::error::Result;

use super::repository::NodeRow;

/// Which statement produced a search result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPath {
    /// FTS5 `MATCH`, ordered by rank
    Tokenized,
    /// Case-insensitive substring match over name and content
    Substring,
}

/// Replace the index row for `node`
pub(super) async fn reindex(conn: &mut SqliteConnection, node: &Node) -> Result<()> {
    sqlx::query("DELETE FROM text_index WHERE node_id = ?")
        .bind(&node.id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("INSERT INTO text_index (node_id, name, content) VALUES (?, ?, ?)")
        .bind(&node.id)
        .bind(&node.name)
        .bind(node.indexed_content())
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Run a search, degrading to substring matching when the query does not parse
pub(super) async fn search(
    pool: &SqlitePool,
    query: &str,
    limit: usize,
) -> Result<(Vec<NodeRow>, SearchPath)> {
    match tokenized(pool, query, limit).await {
        Ok(rows) => Ok((rows, SearchPath::Tokenized)),
        Err(e) => {
            debug!(query = %query, error = %e, "Tokenized search failed, using substring match");
            let rows = substring(pool, query, limit).await?;
            Ok((rows, SearchPath::Substring))
        }
    }
}

async fn tokenized(
    pool: &SqlitePool,
    query: &str,
    limit: usize,
) -> std::result::Result<Vec<NodeRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT n.id, n.type, n.name, n.file_path, n.content, n.metadata, n.updated_at
        FROM text_index
        JOIN nodes n ON n.id = text_index.node_id
        WHERE text_index MATCH ?
        ORDER BY text_index.rank
        LIMIT ?
        "#,
    )
    .bind(query)
    .bind(sql_limit(limit))
    .fetch_all(pool)
    .await
}

/// Substring match over name and content, in insertion order
///
/// Case folding is ASCII only, matching SQLite's `LOWER`: `RATE` finds
/// `rate`, but `ÉCOLE` does not find `école`. Non-ASCII letters match only
/// in the case they were stored.
pub(super) async fn substring(pool: &SqlitePool, query: &str, limit: usize) -> Result<Vec<NodeRow>> {
    let pattern = format!("%{}%", escape_like(&query.to_ascii_lowercase()));

    let rows = sqlx::query_as(
        r#"
        SELECT id, type, name, file_path, content, metadata, updated_at
        FROM nodes
        WHERE LOWER(name) LIKE ?1 ESCAPE '\'
           OR LOWER(COALESCE(content, '')) LIKE ?1 ESCAPE '\'
        ORDER BY rowid
        LIMIT ?2
        "#,
    )
    .bind(&pattern)
    .bind(sql_limit(limit))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Escape `LIKE` wildcards so the text matches literally
pub(super) fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
        assert_eq!(escape_like("C:\\dir"), "C:\\\\dir");
    }

    #[test]
    fn test_sql_limit_saturates() {
        assert_eq!(sql_limit(10), 10);
        assert_eq!(sql_limit(usize::MAX), i64::MAX);
    }
}
