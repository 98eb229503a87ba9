use super::graph::{change_fingerprint, tree_fingerprint, CommitId, CommitNode, Graph, TreeState};
use crate::hash::hash_content;
use crate::names::NameMap;
use crate::repo::Target;
use crate::spec::CommitDescriptor;
use failure::Fallible;
use log::debug;
use std::collections::BTreeMap;

/// The tree state a descriptor produces over its parents' trees.  Merges
/// union their parents' trees, a later-listed parent winning any path
/// collision; this is a modeling step, not a real merge.
pub(crate) fn result_tree(commit: &CommitDescriptor, parents: &[&TreeState]) -> TreeState {
    let mut tree = TreeState::new();
    for parent in parents {
        for (path, data) in parent.iter() {
            tree.insert(path.clone(), data.clone());
        }
    }
    if let Some(ref op) = commit.op {
        tree.insert(op.path.clone(), op.data.clone());
    }
    tree
}

/// The synthetic id of a named expected commit, derived deterministically
/// from the name alone.
fn synthetic_id(name: &str) -> CommitId {
    hash_content(&("commit", name)).to_hex()
}

/// Build the expected graph by simulating each descriptor in declaration
/// order.  Node ids are synthetic, so the graph can be rebuilt identically
/// on every verification call.  Returns the id-to-name map alongside.
pub fn build(commits: &[CommitDescriptor], head: &str) -> (Graph, NameMap) {
    let mut trees: BTreeMap<String, TreeState> = BTreeMap::new();
    let mut nodes = Vec::with_capacity(commits.len());
    let mut names = NameMap::new();

    for commit in commits {
        // parents are declared earlier, so their trees are present
        let parent_trees: Vec<&TreeState> = commit.parents.iter().map(|p| &trees[p]).collect();
        let tree = result_tree(commit, &parent_trees);
        let empty = TreeState::new();
        let base = parent_trees.first().cloned().unwrap_or(&empty);

        let id = synthetic_id(&commit.name);
        nodes.push(CommitNode {
            id: id.clone(),
            parents: commit.parents.iter().map(|p| synthetic_id(p)).collect(),
            tree: tree_fingerprint(&tree),
            change: change_fingerprint(base, &tree),
            is_merge: commit.is_merge,
        });
        names.record(id, commit.name.clone());
        trees.insert(commit.name.clone(), tree);
    }

    let head = synthetic_id(head);
    (Graph { nodes, head }, names)
}

/// Replay descriptors against a writable repository, physically
/// constructing the described history.  Returns the map from real commit id
/// to name, which seeds the known-commits record.
pub fn execute<T: Target>(
    commits: &[CommitDescriptor],
    head: &str,
    target: &mut T,
) -> Fallible<NameMap> {
    let mut ids: BTreeMap<String, CommitId> = BTreeMap::new();
    let mut names = NameMap::new();

    for commit in commits {
        let parents: Vec<CommitId> = commit.parents.iter().map(|p| ids[p].clone()).collect();
        let id = target.apply(commit, &parents)?;
        debug!("built {} as {}", commit.name, id);
        names.record(id.clone(), commit.name.clone());
        ids.insert(commit.name.clone(), id);
    }

    target.set_head(&ids[head])?;
    Ok(names)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::repo::ModelRepo;
    use crate::spec::parse;

    #[test]
    fn build_is_deterministic() {
        let (commits, head) = parse("1\n2\nhead : 2\n").unwrap();
        assert_eq!(build(&commits, &head), build(&commits, &head));
    }

    #[test]
    fn build_names_every_node() {
        let (commits, head) = parse("1\n2\n3 : 1\nM1 : 2 3\nhead : M1\n").unwrap();
        let (graph, names) = build(&commits, &head);
        assert_eq!(graph.nodes.len(), 4);
        for node in &graph.nodes {
            assert!(names.get(&node.id).is_some());
        }
        assert_eq!(names.get(&graph.head), Some("M1"));
    }

    #[test]
    fn build_links_parents() {
        let (commits, head) = parse("1\n2\nhead : 2\n").unwrap();
        let (graph, names) = build(&commits, &head);
        let child = &graph.nodes[1];
        assert_eq!(child.parents.len(), 1);
        assert_eq!(names.get(&child.parents[0]), Some("1"));
    }

    #[test]
    fn merge_unions_parent_trees() {
        // the merge's tree contains both sides' files, so it differs from
        // either parent's tree
        let (commits, head) = parse("1\n2\n3 : 1\nM1 : 2 3\nhead : M1\n").unwrap();
        let (graph, names) = build(&commits, &head);
        let by_name = |name: &str| {
            graph
                .nodes
                .iter()
                .find(|n| names.get(&n.id) == Some(name))
                .unwrap()
        };
        assert_ne!(by_name("M1").tree, by_name("2").tree);
        assert_ne!(by_name("M1").tree, by_name("3").tree);
    }

    #[test]
    fn execute_mirrors_build() {
        let (commits, head) = parse("1\n2\n3 : 1\nM1 : 2 3\nhead : M1\n").unwrap();
        let mut repo = ModelRepo::new();
        let names = execute(&commits, &head, &mut repo).unwrap();
        assert_eq!(names.len(), 4);

        // the physically constructed graph carries the same fingerprints as
        // the simulated one
        let actual = crate::repo::introspect(&repo).unwrap();
        let (expected, expected_names) = build(&commits, &head);
        for node in &actual.nodes {
            let name = names.get(&node.id).unwrap();
            let counterpart = expected
                .nodes
                .iter()
                .find(|e| expected_names.get(&e.id) == Some(name))
                .unwrap();
            assert_eq!(node.tree, counterpart.tree, "tree of {}", name);
            assert_eq!(node.change, counterpart.change, "change of {}", name);
        }
    }
}
