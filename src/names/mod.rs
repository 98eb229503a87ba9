//! The naming engine: gives each commit of the actual graph a symbolic name
//! consistent with the spec, in three passes -- names already known from
//! prior attempts, content-fingerprint matching for non-merges (which is
//! what recognizes rebases and cherry-picks), then merge resolution by
//! named parent sets.  Commits matching nothing stay unnamed; the verifier
//! decides what that means.

mod error;
pub use self::error::*;

use crate::graph::{CommitId, CommitNode, Graph};
use crate::Config;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A NameMap assigns symbolic names to commit ids.  Keys are unique, and an
/// assignment, once made, is never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameMap(BTreeMap<CommitId, String>);

impl NameMap {
    pub fn new() -> NameMap {
        NameMap(BTreeMap::new())
    }

    /// Record a name for an id.  Returns false, changing nothing, if the id
    /// is already named.
    pub fn record(&mut self, id: CommitId, name: String) -> bool {
        if self.0.contains_key(&id) {
            return false;
        }
        self.0.insert(id, name);
        true
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(|name| &name[..])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CommitId, &str)> {
        self.0.iter().map(|(id, name)| (id, &name[..]))
    }

    /// The names of every listed id, if all of them are named.
    pub fn names_of(&self, ids: &[CommitId]) -> Option<BTreeSet<String>> {
        ids.iter().map(|id| self.get(id).map(str::to_string)).collect()
    }

    /// Take on `other`'s assignments, never overwriting existing ones.
    pub fn absorb(&mut self, other: &NameMap) {
        for (id, name) in other.iter() {
            self.record(id.clone(), name.to_string());
        }
    }
}

/// Assign names to the actual graph's commits: copy names already known,
/// match non-merges against the expected graph by fingerprint, then resolve
/// merges whose parents are fully named.  Deterministic: identical inputs
/// produce identical maps.
pub fn assign_names(
    actual: &Graph,
    known: &NameMap,
    expected: &Graph,
    expected_names: &NameMap,
    config: &Config,
) -> NameMap {
    let mut names = NameMap::new();

    // pass 1: names fixed by prior verification attempts
    for node in &actual.nodes {
        if let Some(name) = known.get(&node.id) {
            debug!("known: {} is {}", node.id, name);
            names.record(node.id.clone(), name.to_string());
        }
    }

    // names may serve at most one actual commit each
    let mut claimed: BTreeSet<String> = names.iter().map(|(_, name)| name.to_string()).collect();

    // pass 2: fingerprint matching for non-merges
    for node in actual.non_merges() {
        if names.contains(&node.id) {
            continue;
        }
        let candidates: Vec<&str> = expected
            .non_merges()
            .filter_map(|e| expected_names.get(&e.id).map(|name| (name, e)))
            .filter(|(name, _)| !claimed.contains(*name))
            .filter(|(_, e)| fingerprints_match(node, e, config))
            .map(|(name, _)| name)
            .collect();
        if candidates.is_empty() {
            debug!("no fingerprint match for {}", node.id);
            continue;
        }
        if candidates.len() > 1 && config.strict_fingerprint {
            warn!("{}", Error::AmbiguousName(node.id.clone(), candidates.len()));
            continue;
        }
        // expected iteration is declaration order, so the first candidate
        // is the tie-break winner
        let name = candidates[0];
        debug!("fingerprint: {} is {}", node.id, name);
        claimed.insert(name.to_string());
        names.record(node.id.clone(), name.to_string());
    }

    // pass 3: merges by named parent set; one sweep suffices because nodes
    // are ordered parents-first
    for node in &actual.nodes {
        if !node.is_merge || names.contains(&node.id) {
            continue;
        }
        let parent_names = match names.names_of(&node.parents) {
            Some(set) => set,
            None => {
                debug!("merge {} has unnamed parents", node.id);
                continue;
            }
        };
        let found = expected
            .merges()
            .filter_map(|e| expected_names.get(&e.id).map(|name| (name, e)))
            .filter(|(name, _)| !claimed.contains(*name))
            .find(|(_, e)| expected_names.names_of(&e.parents).as_ref() == Some(&parent_names));
        if let Some((name, _)) = found {
            debug!("merge: {} is {}", node.id, name);
            claimed.insert(name.to_string());
            names.record(node.id.clone(), name.to_string());
        }
    }

    names
}

fn fingerprints_match(actual: &CommitNode, expected: &CommitNode, config: &Config) -> bool {
    let tree = actual.tree == expected.tree;
    let change = actual.change == expected.change;
    if config.strict_fingerprint {
        tree && change
    } else {
        tree || change
    }
}
