//! Identifiers for every entity the views track.
//!
//! The solver hands out opaque integers; each kind gets its own newtype so a
//! flaw id can never be passed where a resolver id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
  ($(#[$meta:meta])* $name:ident, $kind:literal) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
      Serialize, Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(pub u64);

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", $kind, self.0)
      }
    }

    impl From<u64> for $name {
      fn from(raw: u64) -> Self { Self(raw) }
    }
  };
}

id_type!(
  /// A flaw in the causal graph.
  FlawId, "flaw"
);
id_type!(
  /// A resolver in the causal graph.
  ResolverId, "resolver"
);
id_type!(
  /// A boolean variable of the SAT core. Assigned densely from zero.
  VarId, "variable"
);
id_type!(
  /// A clause of the SAT core.
  ClauseId, "clause"
);
id_type!(
  /// A row of the timeline view, in display order.
  RowId, "row"
);

/// Any identifiable entity; used to make error messages self-describing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
  Flaw(FlawId),
  Resolver(ResolverId),
  Variable(VarId),
  Clause(ClauseId),
  Row(RowId),
}

impl fmt::Display for Entity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Flaw(id) => write!(f, "{id}"),
      Self::Resolver(id) => write!(f, "{id}"),
      Self::Variable(id) => write!(f, "{id}"),
      Self::Clause(id) => write!(f, "{id}"),
      Self::Row(id) => write!(f, "{id}"),
    }
  }
}

impl From<FlawId> for Entity {
  fn from(id: FlawId) -> Self { Self::Flaw(id) }
}

impl From<ResolverId> for Entity {
  fn from(id: ResolverId) -> Self { Self::Resolver(id) }
}

impl From<VarId> for Entity {
  fn from(id: VarId) -> Self { Self::Variable(id) }
}

impl From<ClauseId> for Entity {
  fn from(id: ClauseId) -> Self { Self::Clause(id) }
}

impl From<RowId> for Entity {
  fn from(id: RowId) -> Self { Self::Row(id) }
}
