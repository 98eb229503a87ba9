//! `gitcoach` checks a learner's live git repository against a compact
//! textual description of a target commit history, without requiring
//! hash-for-hash identity.  Rebase, cherry-pick, and merge all count, as
//! long as the resulting name-labeled graph shape matches.
//!
//! The pipeline: `spec` parses the DSL into commit descriptors; `graph`
//! builds the expected graph from them (or replays them into a writable
//! repository to construct a starting history); `repo` reads the learner's
//! actual history; `names` gives each real commit a symbolic name; and
//! `verify` decides ancestry equivalence.
//!
//! # Examples
//!
//! ```
//! use gitcoach::repo::ModelRepo;
//! use gitcoach::{graph, spec, verify, Config};
//!
//! let text = "1\n2\nhead : 2\n";
//! let (commits, head) = spec::parse(text).unwrap();
//!
//! // construct the starting repository, then verify it against itself
//! let mut repo = ModelRepo::new();
//! let known = graph::execute(&commits, &head, &mut repo).unwrap();
//! assert!(verify::check_level(&repo, &known, text, text, &Config::default()).unwrap());
//! ```

pub mod graph;
pub mod hash;
pub mod level;
pub mod names;
pub mod repo;
pub mod spec;
pub mod store;
pub mod verify;

/// Knobs for naming and verification.  The defaults match the interactive
/// teaching workflow: lenient fingerprint matching, no stray commits.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Require tree and change fingerprints to both agree in the fingerprint
    /// naming pass, rather than either one.
    pub strict_fingerprint: bool,

    /// Tolerate commits in the repository that match nothing in the goal.
    pub allow_extra_commits: bool,
}
