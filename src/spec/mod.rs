//! Parsing of the commit-history DSL.  A spec describes a sequence of
//! commits, their parents, and the file-tree change each one makes, plus a
//! head reference:
//!
//! ```text
//! # a three-commit history with a merge
//! 1
//! 2
//! 3 : 1
//! M1 : 2 3
//! head : M1
//! ```
//!
//! A commit line with no `:` clause continues from the previously declared
//! commit.  Two or more parents mark a merge, and merge names carry the
//! reserved `M` prefix.  An optional `= <path> <data>` clause overrides the
//! default tree operation (writing the commit's own name at `<name>.txt`).

mod parse;
pub use self::parse::{parse, CommitDescriptor, TreeOp, MERGE_MARKER};

mod error;
pub use self::error::*;
