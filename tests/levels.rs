//! End-to-end verification scenarios, driven through the in-memory model
//! repository.

use gitcoach::names::NameMap;
use gitcoach::repo::ModelRepo;
use gitcoach::spec;
use gitcoach::verify::check_level;
use gitcoach::{graph, Config};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const LINEAR: &str = "1\n2\nhead : 2\n";
const MERGED: &str = "1\n2\n3 : 1\nM1 : 2 3\nhead : M1\n";

/// Replay a spec into a fresh model repository, returning the repo and the
/// id-to-name map of what was built.
fn replay(text: &str) -> (ModelRepo, NameMap) {
    let (commits, head) = spec::parse(text).unwrap();
    let mut repo = ModelRepo::new();
    let known = graph::execute(&commits, &head, &mut repo).unwrap();
    (repo, known)
}

#[test]
fn replaying_the_spec_verifies() {
    init_logging();
    let (repo, known) = replay(MERGED);
    assert!(check_level(&repo, &known, MERGED, MERGED, &Config::default()).unwrap());
}

#[test]
fn replaying_the_spec_verifies_without_a_seed() {
    init_logging();
    let (repo, _) = replay(MERGED);
    let empty = NameMap::new();
    assert!(check_level(&repo, &empty, MERGED, MERGED, &Config::default()).unwrap());
}

#[test]
fn rebase_invariance() {
    init_logging();
    // the learner reproduced commit "2" as a fresh commit object on top of
    // the known "1"; its id matches nothing, but its fingerprints do
    let mut repo = ModelRepo::new();
    let one = repo.commit_file(&[], "1.txt", "1");
    let copy = repo.commit_file(&[one.clone()], "2.txt", "2");
    repo.set_head_id(&copy);

    let mut known = NameMap::new();
    known.record(one, "1".to_string());
    assert!(check_level(&repo, &known, "1\nhead : 1\n", LINEAR, &Config::default()).unwrap());
}

#[test]
fn same_diff_counts_across_divergent_bases() {
    init_logging();
    // commit "1" was amended (and its name pinned by a prior attempt), so
    // the learner's "2" sits on a tree the spec never saw; its net change
    // still matches
    let mut repo = ModelRepo::new();
    let one = repo.commit_file(&[], "1.txt", "one, edited");
    let two = repo.commit_file(&[one.clone()], "2.txt", "2");
    repo.set_head_id(&two);

    let mut known = NameMap::new();
    known.record(one, "1".to_string());
    assert!(check_level(&repo, &known, "1\nhead : 1\n", LINEAR, &Config::default()).unwrap());
}

#[test]
fn merge_declaration_order_does_not_matter() {
    init_logging();
    let (repo, known) = replay(MERGED);
    let swapped = "1\n2\n3 : 1\nM1 : 3 2\nhead : M1\n";
    assert!(check_level(&repo, &known, MERGED, swapped, &Config::default()).unwrap());
}

#[test]
fn extraneous_commit_is_rejected() {
    init_logging();
    let (mut repo, known) = replay(MERGED);
    let one = known
        .iter()
        .find(|&(_, name)| name == "1")
        .map(|(id, _)| id.clone())
        .unwrap();
    repo.commit_file(&[one], "stray.txt", "oops");

    assert!(!check_level(&repo, &known, MERGED, MERGED, &Config::default()).unwrap());

    // tolerated only when configured
    let config = Config {
        allow_extra_commits: true,
        ..Config::default()
    };
    assert!(check_level(&repo, &known, MERGED, MERGED, &config).unwrap());
}

#[test]
fn wrong_parentage_is_rejected() {
    init_logging();
    // goal wants "3" branching from "1", but the learner committed it on
    // top of "2"
    let (mut repo, known) = replay(LINEAR);
    let two = known
        .iter()
        .find(|&(_, name)| name == "2")
        .map(|(id, _)| id.clone())
        .unwrap();
    let three = repo.commit_file(&[two], "3.txt", "3");
    repo.set_head_id(&three);

    let goal = "1\n2\n3 : 1\nhead : 3\n";
    assert!(!check_level(&repo, &known, LINEAR, goal, &Config::default()).unwrap());
}

#[test]
fn repeated_checks_are_deterministic() {
    init_logging();
    let (repo, known) = replay(MERGED);
    let first = check_level(&repo, &known, MERGED, MERGED, &Config::default()).unwrap();
    for _ in 0..5 {
        assert_eq!(
            first,
            check_level(&repo, &known, MERGED, MERGED, &Config::default()).unwrap()
        );
    }
}

#[test]
fn malformed_goal_spec_is_an_error() {
    init_logging();
    let (repo, known) = replay(LINEAR);
    assert!(check_level(&repo, &known, LINEAR, "1\n2 : 9\nhead : 2\n", &Config::default()).is_err());
}

// the concrete scenario: two matching commits verify; perturbing the second
// commit's content makes verification fail
#[test]
fn content_mutation_flips_the_verdict() {
    init_logging();
    let mut repo = ModelRepo::new();
    let one = repo.commit_file(&[], "1.txt", "1");
    let two = repo.commit_file(&[one], "2.txt", "2");
    repo.set_head_id(&two);

    let empty = NameMap::new();
    let setup = "1\nhead : 1\n";
    assert!(check_level(&repo, &empty, setup, LINEAR, &Config::default()).unwrap());

    repo.amend(&two, "2.txt", "tampered");
    assert!(!check_level(&repo, &empty, setup, LINEAR, &Config::default()).unwrap());
}
