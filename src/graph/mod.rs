//! The commit-graph data model shared by the expected (spec-built) and
//! actual (repository-read) sides, plus the builder that executes commit
//! descriptors -- either simulated, to produce the expected graph, or
//! against a writable repository, to construct a learner's starting
//! history.

mod build;
mod graph;

pub use self::build::{build, execute};
pub(crate) use self::build::result_tree;
pub use self::graph::{change_fingerprint, tree_fingerprint, CommitId, CommitNode, Graph, TreeState};
