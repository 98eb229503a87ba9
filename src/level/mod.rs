//! Level glue: the closed set of level kinds, wiring repository setup and
//! checking to the store and the verifier.  Instruction printing and level
//! sequencing live outside this crate.

use crate::graph;
use crate::repo::{Repo, Target};
use crate::spec;
use crate::store::LevelStore;
use crate::verify::check_level;
use crate::Config;
use failure::Fallible;
use log::info;

/// The level kinds.  The set is small and fixed, so dispatch is a match.
#[derive(Debug)]
pub enum Level {
    Basic(BasicLevel),
}

impl Level {
    pub fn name(&self) -> &str {
        match self {
            Level::Basic(level) => &level.name,
        }
    }

    /// Construct the starting history for this level.
    pub fn setup<R: Repo + Target>(&self, repo: &mut R, store: &LevelStore) -> Fallible<()> {
        match self {
            Level::Basic(level) => level.setup(repo, store),
        }
    }

    /// Check the learner's repository against this level's goal.
    pub fn check<R: Repo>(&self, repo: &R, store: &LevelStore, config: &Config) -> Fallible<bool> {
        match self {
            Level::Basic(level) => level.check(repo, store, config),
        }
    }
}

/// A level defined entirely by a setup spec and a goal spec.
#[derive(Debug)]
pub struct BasicLevel {
    pub name: String,
    pub setup_spec: String,
    pub goal_spec: String,
}

impl BasicLevel {
    pub fn new(name: &str, setup_spec: &str, goal_spec: &str) -> BasicLevel {
        BasicLevel {
            name: name.to_string(),
            setup_spec: setup_spec.to_string(),
            goal_spec: goal_spec.to_string(),
        }
    }

    fn setup<R: Repo + Target>(&self, repo: &mut R, store: &LevelStore) -> Fallible<()> {
        repo.clear_remotes()?;
        store.clear_known_commits(&self.name)?;

        let (commits, head) = spec::parse(&self.setup_spec)?;
        let known = graph::execute(&commits, &head, repo)?;
        store.write_known_commits(&self.name, &known)?;

        // the highest numbered commit; merges carry no number
        let last = commits
            .iter()
            .filter_map(|c| c.name.parse::<u32>().ok())
            .max();
        if let Some(last) = last {
            store.write_last_commit(&last.to_string())?;
        }
        info!("level {} set up", self.name);
        Ok(())
    }

    fn check<R: Repo>(&self, repo: &R, store: &LevelStore, config: &Config) -> Fallible<bool> {
        let known = store.known_commits(&self.name)?;
        check_level(repo, &known, &self.setup_spec, &self.goal_spec, config)
    }
}
