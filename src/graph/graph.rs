use crate::hash::{hash_content, Hash};
use std::collections::BTreeMap;

/// A CommitId identifies one commit: a real repository hash on the actual
/// side, a synthetic name-derived hash on the expected side.
pub type CommitId = String;

/// A flattened image of a commit's file tree: path to content.
pub type TreeState = BTreeMap<String, String>;

/// One commit in a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitNode {
    pub id: CommitId,
    pub parents: Vec<CommitId>,

    /// Fingerprint of the full tree state at this commit.
    pub tree: Hash,

    /// Fingerprint of the net change against the first parent's tree,
    /// comparable across different parent histories.
    pub change: Hash,

    pub is_merge: bool,
}

/// A commit graph with a head reference.  Nodes are unique by id and kept
/// in parents-before-children order.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub nodes: Vec<CommitNode>,
    pub head: CommitId,
}

impl Graph {
    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&CommitNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Commits with fewer than two parents, in graph order.
    pub fn non_merges(&self) -> impl Iterator<Item = &CommitNode> {
        self.nodes.iter().filter(|n| !n.is_merge)
    }

    /// Merge commits, in graph order.
    pub fn merges(&self) -> impl Iterator<Item = &CommitNode> {
        self.nodes.iter().filter(|n| n.is_merge)
    }
}

/// Fingerprint a full tree state.
pub fn tree_fingerprint(tree: &TreeState) -> Hash {
    hash_content(tree)
}

/// Fingerprint the net change from `parent` to `tree`: every added, changed,
/// or removed path with its old and new content.
pub fn change_fingerprint(parent: &TreeState, tree: &TreeState) -> Hash {
    let mut delta: BTreeMap<&String, (Option<&String>, Option<&String>)> = BTreeMap::new();
    for (path, data) in tree {
        if parent.get(path) != Some(data) {
            delta.insert(path, (parent.get(path), Some(data)));
        }
    }
    for (path, data) in parent {
        if !tree.contains_key(path) {
            delta.insert(path, (Some(data), None));
        }
    }
    hash_content(&delta)
}
