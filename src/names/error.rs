use failure::Fail;

/// Non-fatal naming conditions.  Ambiguity is logged and the commit left
/// unnamed; it is never raised out of the naming engine.
#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "ambiguous name: {} candidates for commit {}", _1, _0)]
    AmbiguousName(String, usize),
}
