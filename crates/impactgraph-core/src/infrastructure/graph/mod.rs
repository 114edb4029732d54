//! Project graph infrastructure implementations
//!
//! SQLite storage for nodes and edges, plus the FTS5 lexical index.

mod lexical;
mod repository;

pub use lexical::SearchPath;
pub use repository::SqliteGraphRepository;
