//! The ancestry verifier: decides whether the actual graph, labeled with
//! symbolic names, has the same shape as the expected graph.  The check is
//! structural equivalence over the name-labeled DAG -- never equality of
//! raw ids, timestamps, or messages -- which is what lets a learner reach
//! the goal by rebase, cherry-pick, or any other history rewriting.

use crate::graph::{self, Graph};
use crate::names::{assign_names, NameMap};
use crate::repo::{introspect, Repo};
use crate::spec;
use crate::Config;
use failure::Fallible;
use log::{debug, info};
use std::collections::BTreeSet;

/// Compare the named actual graph against the expected graph: every
/// expected commit matched by exactly one actual commit of the same name,
/// named parent sets equal, heads agreeing through the name map, and no
/// unexplained actual commits unless configured otherwise.  Returning false
/// is an outcome, not an error.
pub fn verify(
    actual: &Graph,
    names: &NameMap,
    expected: &Graph,
    expected_names: &NameMap,
    config: &Config,
) -> bool {
    for enode in &expected.nodes {
        let name = match expected_names.get(&enode.id) {
            Some(name) => name,
            None => return false,
        };
        let matched: Vec<_> = actual
            .nodes
            .iter()
            .filter(|a| names.get(&a.id) == Some(name))
            .collect();
        if matched.len() != 1 {
            debug!("{} matched by {} actual commits", name, matched.len());
            return false;
        }
        let actual_parents = names.names_of(&matched[0].parents);
        let expected_parents = expected_names.names_of(&enode.parents);
        if actual_parents.is_none() || actual_parents != expected_parents {
            debug!("parent sets for {} differ", name);
            return false;
        }
    }

    if !config.allow_extra_commits {
        let valid: BTreeSet<&str> = expected_names.iter().map(|(_, name)| name).collect();
        for anode in &actual.nodes {
            match names.get(&anode.id) {
                Some(name) if valid.contains(name) => (),
                _ => {
                    debug!("unexplained commit {}", anode.id);
                    return false;
                }
            }
        }
    }

    match (names.get(&actual.head), expected_names.get(&expected.head)) {
        (Some(a), Some(e)) if a == e => true,
        _ => {
            debug!("heads differ");
            false
        }
    }
}

/// Check one level: parse the setup and goal specs, read the live
/// repository, name its commits, and verify ancestry equivalence against
/// the goal.  Names of untouched starting commits are recovered against the
/// setup graph first, so an empty seed still recognizes them.
pub fn check_level<R: Repo>(
    repo: &R,
    known: &NameMap,
    setup_spec: &str,
    goal_spec: &str,
    config: &Config,
) -> Fallible<bool> {
    let (setup_commits, setup_head) = spec::parse(setup_spec)?;
    let (goal_commits, goal_head) = spec::parse(goal_spec)?;

    let actual = introspect(repo)?;

    let (setup_graph, setup_names) = graph::build(&setup_commits, &setup_head);
    let mut seed = known.clone();
    seed.absorb(&assign_names(&actual, known, &setup_graph, &setup_names, config));

    let (goal_graph, goal_names) = graph::build(&goal_commits, &goal_head);
    let names = assign_names(&actual, &seed, &goal_graph, &goal_names, config);
    let ok = verify(&actual, &names, &goal_graph, &goal_names, config);
    info!("level check: {}", if ok { "pass" } else { "fail" });
    Ok(ok)
}
