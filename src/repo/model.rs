use super::error::Error;
use super::traits::{Repo, Target};
use crate::graph::{result_tree, CommitId, TreeState};
use crate::hash::hash_content;
use crate::spec::CommitDescriptor;
use failure::Fallible;

/// An in-memory repository: the simulation backend for constructing
/// histories without touching disk, and the stand-in for a learner's
/// repository in tests.  Ids mimic real hashes -- derived from the full
/// commit content plus a sequence number, so re-creating the "same" commit
/// yields a fresh id, as re-committing does in git.
#[derive(Debug, Default)]
pub struct ModelRepo {
    commits: Vec<ModelCommit>,
    head: Option<CommitId>,
    remotes: Vec<String>,
}

#[derive(Debug, Clone)]
struct ModelCommit {
    id: CommitId,
    parents: Vec<CommitId>,
    tree: TreeState,
}

impl ModelRepo {
    pub fn new() -> ModelRepo {
        ModelRepo::default()
    }

    /// Record a commit with the given parents and tree, returning its id.
    pub fn commit(&mut self, parents: &[CommitId], tree: TreeState) -> CommitId {
        let id = hash_content(&("model", parents, &tree, self.commits.len())).to_hex();
        self.commits.push(ModelCommit {
            id: id.clone(),
            parents: parents.to_vec(),
            tree,
        });
        id
    }

    /// Commit a single-file write on top of the first parent's tree.
    pub fn commit_file(&mut self, parents: &[CommitId], path: &str, data: &str) -> CommitId {
        let mut tree = parents
            .first()
            .and_then(|p| self.tree_of(p))
            .unwrap_or_default();
        tree.insert(path.to_string(), data.to_string());
        self.commit(parents, tree)
    }

    /// Commit the union of the parents' trees, a later parent winning any
    /// path collision.
    pub fn merge(&mut self, parents: &[CommitId]) -> CommitId {
        let mut tree = TreeState::new();
        for parent in parents {
            if let Some(parent_tree) = self.tree_of(parent) {
                tree.extend(parent_tree);
            }
        }
        self.commit(parents, tree)
    }

    pub fn set_head_id(&mut self, id: &str) {
        self.head = Some(id.to_string());
    }

    pub fn add_remote(&mut self, name: &str) {
        self.remotes.push(name.to_string());
    }

    /// Rewrite one path in an existing commit's tree, in place, perturbing
    /// its fingerprints.  Models a learner editing history between
    /// attempts.
    pub fn amend(&mut self, id: &str, path: &str, data: &str) {
        if let Some(commit) = self.commits.iter_mut().find(|c| c.id == id) {
            commit.tree.insert(path.to_string(), data.to_string());
        }
    }

    fn tree_of(&self, id: &str) -> Option<TreeState> {
        self.commits.iter().find(|c| c.id == id).map(|c| c.tree.clone())
    }
}

impl Repo for ModelRepo {
    fn commits(&self) -> Fallible<Vec<(CommitId, Vec<CommitId>)>> {
        Ok(self
            .commits
            .iter()
            .map(|c| (c.id.clone(), c.parents.clone()))
            .collect())
    }

    fn head(&self) -> Fallible<CommitId> {
        self.head
            .clone()
            .ok_or_else(|| Error::RepositoryRead("no head set".to_string()).into())
    }

    fn tree(&self, id: &str) -> Fallible<TreeState> {
        self.tree_of(id)
            .ok_or_else(|| Error::RepositoryRead(format!("no commit {}", id)).into())
    }

    fn remotes(&self) -> Fallible<Vec<String>> {
        Ok(self.remotes.clone())
    }
}

impl Target for ModelRepo {
    fn apply(&mut self, commit: &CommitDescriptor, parents: &[CommitId]) -> Fallible<CommitId> {
        let mut parent_trees = Vec::with_capacity(parents.len());
        for parent in parents {
            parent_trees.push(self.tree(parent)?);
        }
        let refs: Vec<&TreeState> = parent_trees.iter().collect();
        let tree = result_tree(commit, &refs);
        Ok(self.commit(parents, tree))
    }

    fn set_head(&mut self, id: &str) -> Fallible<()> {
        self.head = Some(id.to_string());
        Ok(())
    }

    fn clear_remotes(&mut self) -> Fallible<()> {
        self.remotes.clear();
        Ok(())
    }
}
