use crate::graph::{CommitId, TreeState};
use crate::spec::CommitDescriptor;
use failure::Fallible;

/// Read-only view of a repository's commit history.  Implementations must
/// not mutate the repository; a verification run only reads.
pub trait Repo {
    /// Enumerate every commit as (id, parent ids), parents before children.
    fn commits(&self) -> Fallible<Vec<(CommitId, Vec<CommitId>)>>;

    /// The id of the current head commit.
    fn head(&self) -> Fallible<CommitId>;

    /// The full tree state at a commit: path to content.
    fn tree(&self, id: &str) -> Fallible<TreeState>;

    /// Names of configured remotes.
    fn remotes(&self) -> Fallible<Vec<String>>;
}

/// Writable face of a repository, used to physically construct a starting
/// history from commit descriptors.
pub trait Target {
    /// Create the commit described by `commit` on the given already-created
    /// parents, returning its id.
    fn apply(&mut self, commit: &CommitDescriptor, parents: &[CommitId]) -> Fallible<CommitId>;

    /// Move the head reference to the given commit.
    fn set_head(&mut self, id: &str) -> Fallible<()>;

    /// Delete all configured remotes.
    fn clear_remotes(&mut self) -> Fallible<()>;
}
