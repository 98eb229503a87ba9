//! Repository access: the read-only `Repo` seam the verifier introspects
//! through, the writable `Target` seam the builder constructs through, and
//! the two backends -- an in-memory model and a subprocess-driven real git
//! working directory.

mod git;
mod introspect;
mod model;
mod traits;

pub use self::git::GitRepo;
pub use self::introspect::introspect;
pub use self::model::ModelRepo;
pub use self::traits::{Repo, Target};

mod error;
pub use self::error::*;
