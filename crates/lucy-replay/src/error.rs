//! Error type for `lucy-replay`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  /// An event was malformed or broke a model precondition.
  #[error("line {line}: {source}")]
  Event {
    line:   usize,
    #[source]
    source: lucy_core::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
