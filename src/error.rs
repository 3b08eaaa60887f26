use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("handle does not manage a resource")]
    NullResource,

    #[error("resource is shared by {count} handles, mutable access needs a unique owner")]
    Shared { count: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
