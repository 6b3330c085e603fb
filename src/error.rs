use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Building from an empty primitive set; no partial tree is returned.
    #[error("cannot build a tree out of zero primitives")]
    EmptyScene,
}
