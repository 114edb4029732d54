//! Impactgraph Core Integration Tests

use std::sync::Arc;

use impactgraph_core::{
    config::Config,
    domain::graph::{GraphRepository, ImpactAnalyzer, NewEdge, Node, ProjectGraphService, QueryEngine},
    infrastructure::graph::{SearchPath, SqliteGraphRepository},
    storage::Database,
};
use tempfile::tempdir;

async fn open() -> (Database, Arc<SqliteGraphRepository>) {
    let db = Database::in_memory().await.expect("Failed to open database");
    let repo = Arc::new(SqliteGraphRepository::from_database(&db));
    (db, repo)
}

async fn chain(repo: &SqliteGraphRepository) {
    for path in ["/a.js", "/b.js", "/c.js"] {
        repo.upsert_node(&Node::file(path, "")).await.unwrap();
    }
    repo.add_edge(&NewEdge::new("file:/a.js", "file:/b.js", "imports"))
        .await
        .unwrap();
    repo.add_edge(&NewEdge::new("file:/b.js", "file:/c.js", "imports"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_bounded_traversal() {
    let (_db, repo) = open().await;
    chain(&repo).await;
    let analyzer = ImpactAnalyzer::new(repo);

    let expected: [&[&str]; 3] = [&["/a.js"], &["/a.js", "/b.js"], &["/a.js", "/b.js", "/c.js"]];
    for (depth, files) in expected.iter().enumerate() {
        let report = analyzer.analyze("/a.js", depth as u32).await.unwrap();
        assert_eq!(report.impacted_files, *files, "depth {depth}");
    }
}

#[tokio::test]
async fn test_cycle_safety() {
    let (_db, repo) = open().await;
    repo.upsert_node(&Node::file("/a.js", "")).await.unwrap();
    repo.upsert_node(&Node::file("/b.js", "")).await.unwrap();
    repo.add_edge(&NewEdge::new("file:/a.js", "file:/b.js", "imports"))
        .await
        .unwrap();
    repo.add_edge(&NewEdge::new("file:/b.js", "file:/a.js", "imports"))
        .await
        .unwrap();

    let report = ImpactAnalyzer::new(repo).analyze("/a.js", 5).await.unwrap();
    assert_eq!(report.impacted_files, vec!["/a.js", "/b.js"]);
}

#[tokio::test]
async fn test_dangling_edges_are_tolerated() {
    let (_db, repo) = open().await;
    repo.upsert_node(&Node::file("/a.js", "")).await.unwrap();
    repo.add_edge(&NewEdge::new("file:/a.js", "file:/gone.js", "imports"))
        .await
        .unwrap();
    repo.add_edge(&NewEdge::new("fn:nowhere", "file:/a.js", "calls"))
        .await
        .unwrap();

    let report = ImpactAnalyzer::new(repo).analyze("/a.js", 3).await.unwrap();
    assert_eq!(report.impacted_files, vec!["/a.js"]);
}

#[tokio::test]
async fn test_unknown_file_impact() {
    let (_db, repo) = open().await;
    chain(&repo).await;

    let report = ImpactAnalyzer::new(repo)
        .analyze("/never/seen.js", 3)
        .await
        .unwrap();
    assert_eq!(report.file_path, "/never/seen.js");
    assert_eq!(report.depth, 3);
    assert!(report.impacted_files.is_empty());
}

#[tokio::test]
async fn test_multi_node_file_seeds_traversal() {
    let (_db, repo) = open().await;
    repo.upsert_node(&Node::file("/lib.js", "")).await.unwrap();
    repo.upsert_node(&Node::new("fn:util", "function", "util").with_file_path("/lib.js"))
        .await
        .unwrap();
    repo.upsert_node(&Node::file("/x.js", "")).await.unwrap();
    repo.upsert_node(&Node::file("/y.js", "")).await.unwrap();
    repo.add_edge(&NewEdge::new("file:/x.js", "file:/lib.js", "imports"))
        .await
        .unwrap();
    repo.add_edge(&NewEdge::new("file:/y.js", "fn:util", "calls"))
        .await
        .unwrap();

    let report = ImpactAnalyzer::new(repo).analyze("/lib.js", 1).await.unwrap();
    assert_eq!(report.impacted_files.len(), 3);
    assert!(report.contains("/x.js"));
    assert!(report.contains("/y.js"));
}

#[tokio::test]
async fn test_storage_failure_during_analyze() {
    let (db, repo) = open().await;
    chain(&repo).await;
    db.close().await;

    let err = ImpactAnalyzer::new(repo).analyze("/a.js", 2).await.unwrap_err();
    assert!(err.is_storage_failure());
    assert_eq!(err.code(), "E400");
}

#[tokio::test]
async fn test_search_fallback_on_lone_quote() {
    let (_db, repo) = open().await;
    repo.upsert_node(&Node::file("/greet.js", r#"say("Hi")"#))
        .await
        .unwrap();
    repo.upsert_node(&Node::file("/noop.js", "noop()"))
        .await
        .unwrap();

    let engine = QueryEngine::new(Arc::clone(&repo));
    let results = engine.search("\"", 10).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "file:/greet.js");

    let (_, path) = repo.search_with_path("\"", 10).await.unwrap();
    assert_eq!(path, SearchPath::Substring);
}

#[tokio::test]
async fn test_query_engine_blank_input() {
    let (_db, repo) = open().await;
    chain(&repo).await;
    let engine = QueryEngine::new(repo);

    assert!(engine.search("", 10).await.unwrap().is_empty());
    assert!(engine.search("js", 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_whitespace_query_is_searched() {
    let (_db, repo) = open().await;
    repo.upsert_node(&Node::file("/spaced.js", "a   b")).await.unwrap();
    repo.upsert_node(&Node::file("/tight.js", "ab")).await.unwrap();

    let (direct, path) = repo.search_with_path("   ", 10).await.unwrap();
    assert_eq!(path, SearchPath::Substring);

    let results = QueryEngine::new(Arc::clone(&repo)).search("   ", 10).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "file:/spaced.js");
    assert_eq!(results, direct);
}

#[tokio::test]
async fn test_service_workflow() {
    let (_db, repo) = open().await;
    let mut service = ProjectGraphService::new(repo, &Config::default());

    service
        .record_file("/src/app.js", "import { render } from './view.js'")
        .await
        .unwrap();
    service
        .record_file("/src/view.js", "export function render() {}")
        .await
        .unwrap();
    service
        .add_edge(&NewEdge::new("file:/src/app.js", "file:/src/view.js", "imports"))
        .await
        .unwrap();

    let report = service.analyze_impact("/src/view.js", None).await.unwrap();
    assert_eq!(report.depth, 3);
    assert_eq!(report.impacted_files, vec!["/src/view.js", "/src/app.js"]);

    let hits = service.search("render", None).await.unwrap();
    assert_eq!(hits.len(), 2);

    let snapshot = service.snapshot().await.unwrap();
    assert_eq!(snapshot.total_nodes, 2);
    assert_eq!(snapshot.total_edges, 1);
    assert_eq!(service.events().len(), 6);
}

#[tokio::test]
async fn test_graph_persists_on_disk() {
    let dir = tempdir().unwrap();
    let mut config = Config::default();
    config
        .set(
            "storage.database_path",
            &dir.path().join("graph.db").display().to_string(),
        )
        .unwrap();

    {
        let db = Database::from_config(&config.storage).await.unwrap();
        let repo = SqliteGraphRepository::from_database(&db);
        chain(&repo).await;
        db.close().await;
    }

    let db = Database::from_config(&config.storage).await.unwrap();
    assert_eq!(db.path(), dir.path().join("graph.db"));
    let status = db.migration_status().await.unwrap();
    assert!(!status.needs_migration);

    let repo = Arc::new(SqliteGraphRepository::from_database(&db));
    let report = ImpactAnalyzer::new(repo).analyze("/c.js", 2).await.unwrap();
    assert_eq!(report.impacted_files, vec!["/c.js", "/b.js", "/a.js"]);
}
