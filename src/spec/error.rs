use failure::Fail;

#[derive(Debug, Fail, PartialEq)]
pub enum Error {
    #[fail(display = "malformed spec: {}", _0)]
    MalformedSpec(String),
}

pub type Result<T> = std::result::Result<T, Error>;
