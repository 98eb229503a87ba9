use super::error::Error;
use super::traits::{Repo, Target};
use crate::graph::{CommitId, TreeState};
use crate::spec::CommitDescriptor;
use failure::Fallible;
use log::{debug, trace};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A repository backend driving the `git` command-line tool against a real
/// working directory.  Commits are made with a fixed identity so that
/// replaying a spec is reproducible.
#[derive(Debug)]
pub struct GitRepo {
    dir: PathBuf,
}

impl GitRepo {
    /// Open an existing repository; fails if the directory holds none.
    pub fn open(dir: &Path) -> Fallible<GitRepo> {
        let repo = GitRepo {
            dir: dir.to_path_buf(),
        };
        repo.git(&["rev-parse", "--git-dir"])?;
        Ok(repo)
    }

    /// Initialize a fresh repository in the given directory.
    pub fn init(dir: &Path) -> Fallible<GitRepo> {
        let repo = GitRepo {
            dir: dir.to_path_buf(),
        };
        repo.git(&["init", "-q"])?;
        Ok(repo)
    }

    /// Run git with the given arguments, returning trimmed stdout.  Any
    /// failure surfaces as RepositoryRead; the underlying cause will not
    /// change without external intervention, so nothing is retried.
    fn git(&self, args: &[&str]) -> Fallible<String> {
        trace!("git {:?} in {:?}", args, self.dir);
        let output = Command::new("git")
            .arg("-c")
            .arg("user.name=gitcoach")
            .arg("-c")
            .arg("user.email=gitcoach@localhost")
            .args(args)
            .current_dir(&self.dir)
            .output()
            .map_err(Error::IOError)?;
        if !output.status.success() {
            return Err(Error::RepositoryRead(format!(
                "git {:?}: {}",
                args,
                String::from_utf8_lossy(&output.stderr).trim()
            ))
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Repo for GitRepo {
    fn commits(&self) -> Fallible<Vec<(CommitId, Vec<CommitId>)>> {
        // reversed topological order puts parents before children
        let out = self.git(&[
            "rev-list",
            "--parents",
            "--topo-order",
            "--reverse",
            "--all",
            "HEAD",
        ])?;
        let mut commits = vec![];
        for line in out.lines() {
            let mut ids = line.split_whitespace().map(str::to_string);
            if let Some(id) = ids.next() {
                commits.push((id, ids.collect()));
            }
        }
        Ok(commits)
    }

    fn head(&self) -> Fallible<CommitId> {
        self.git(&["rev-parse", "HEAD"])
    }

    fn tree(&self, id: &str) -> Fallible<TreeState> {
        let mut tree = TreeState::new();
        let listing = self.git(&["ls-tree", "-r", "--name-only", id])?;
        for path in listing.lines() {
            let object = format!("{}:{}", id, path);
            let data = self.git(&["show", object.as_str()])?;
            tree.insert(path.to_string(), data);
        }
        Ok(tree)
    }

    fn remotes(&self) -> Fallible<Vec<String>> {
        let out = self.git(&["remote"])?;
        Ok(out
            .lines()
            .map(str::to_string)
            .filter(|name| !name.is_empty())
            .collect())
    }
}

impl Target for GitRepo {
    fn apply(&mut self, commit: &CommitDescriptor, parents: &[CommitId]) -> Fallible<CommitId> {
        if commit.is_merge {
            let (first, rest) = parents
                .split_first()
                .ok_or_else(|| Error::RepositoryRead("merge without parents".to_string()))?;
            self.git(&["checkout", "-q", first.as_str()])?;
            let mut args = vec!["merge", "-q", "-m", &commit.name[..]];
            for parent in rest {
                args.push(parent.as_str());
            }
            self.git(&args)?;
        } else {
            match parents.first() {
                Some(parent) => {
                    self.git(&["checkout", "-q", parent.as_str()])?;
                }
                None => {
                    // a root commit; if history already exists, start an
                    // orphan branch with a clean slate
                    if self.git(&["rev-parse", "-q", "--verify", "HEAD"]).is_ok() {
                        let branch = format!("root-{}", commit.name);
                        self.git(&["checkout", "-q", "--orphan", branch.as_str()])?;
                        self.git(&["rm", "-r", "-f", "-q", "--ignore-unmatch", "."])?;
                    }
                }
            }
            if let Some(ref op) = commit.op {
                let path = self.dir.join(&op.path);
                if let Some(parent_dir) = path.parent() {
                    fs::create_dir_all(parent_dir).map_err(Error::IOError)?;
                }
                fs::write(&path, &op.data).map_err(Error::IOError)?;
                self.git(&["add", "-A"])?;
            }
            self.git(&["commit", "-q", "--allow-empty", "-m", &commit.name])?;
        }
        self.git(&["rev-parse", "HEAD"])
    }

    fn set_head(&mut self, id: &str) -> Fallible<()> {
        // leave the learner on a branch rather than a detached head
        self.git(&["checkout", "-q", "-B", "main", id])?;
        Ok(())
    }

    fn clear_remotes(&mut self) -> Fallible<()> {
        for remote in self.remotes()? {
            debug!("removing remote {}", remote);
            self.git(&["remote", "remove", remote.as_str()])?;
        }
        Ok(())
    }
}
