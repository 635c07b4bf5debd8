//! Error types for `lucy-core`.
//!
//! Every variant describes a precondition broken by the event producer. None
//! of them are retried; the host decides whether to crash, log or drop.

use thiserror::Error;

use crate::id::Entity;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0} already exists")]
  DuplicateEntity(Entity),

  #[error("{0} not found")]
  UnknownEntity(Entity),

  #[error("{from} references unknown {to}")]
  DanglingReference { from: Entity, to: Entity },

  #[error("variables must be declared in order: expected {expected}, got {got}")]
  SequenceViolation { expected: u64, got: u64 },

  #[error("the cost of {0} is derived and cannot be set directly")]
  DerivedCost(Entity),

  #[error("segment ends before it starts: [{start}, {end}]")]
  InvalidSegment { start: i64, end: i64 },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use crate::id::{FlawId, ResolverId};

  #[test]
  fn messages_name_the_entity() {
    let err = Error::DanglingReference {
      from: Entity::Resolver(ResolverId(4)),
      to:   Entity::Flaw(FlawId(9)),
    };
    assert_eq!(err.to_string(), "resolver 4 references unknown flaw 9");

    let err = Error::DuplicateEntity(Entity::Flaw(FlawId(1)));
    assert_eq!(err.to_string(), "flaw 1 already exists");
  }
}
