use super::traits::Repo;
use crate::graph::{change_fingerprint, tree_fingerprint, CommitNode, Graph, TreeState};
use failure::Fallible;
use log::debug;
use std::collections::HashSet;

/// Read the current state of a repository into a graph of commit nodes.  A
/// parent outside the enumerated history is treated as a root boundary (an
/// empty parent tree).  Nothing is cached; the repository mutates between
/// verification attempts.
pub fn introspect<R: Repo>(repo: &R) -> Fallible<Graph> {
    let commits = repo.commits()?;
    let head = repo.head()?;

    let known_ids: HashSet<&str> = commits.iter().map(|(id, _)| &id[..]).collect();
    let mut nodes = Vec::with_capacity(commits.len());
    for (id, parents) in &commits {
        let tree = repo.tree(id)?;
        let base = match parents.first() {
            Some(parent) if known_ids.contains(&parent[..]) => repo.tree(parent)?,
            _ => TreeState::new(),
        };
        nodes.push(CommitNode {
            id: id.clone(),
            parents: parents.clone(),
            tree: tree_fingerprint(&tree),
            change: change_fingerprint(&base, &tree),
            is_merge: parents.len() >= 2,
        });
    }

    debug!("introspected {} commits, head {}", nodes.len(), head);
    Ok(Graph { nodes, head })
}
