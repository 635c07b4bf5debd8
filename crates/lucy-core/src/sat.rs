//! SAT core entities: literals, clauses and the inspector snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
  id::{ClauseId, VarId},
  status::LBool,
};

/// A variable together with a polarity. Displays as `3` or `-3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lit {
  pub var:  VarId,
  pub sign: bool,
}

impl Lit {
  pub fn pos(var: VarId) -> Self { Self { var, sign: true } }

  pub fn neg(var: VarId) -> Self { Self { var, sign: false } }
}

impl fmt::Display for Lit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if !self.sign {
      f.write_str("-")?;
    }
    write!(f, "{}", self.var.0)
  }
}

/// A disjunction of literals. Clauses are never modified once declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clause {
  pub id:       ClauseId,
  pub literals: Vec<Lit>,
}

impl fmt::Display for Clause {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("(")?;
    for (i, lit) in self.literals.iter().enumerate() {
      if i > 0 {
        f.write_str(" ∨ ")?;
      }
      write!(f, "{lit}")?;
    }
    f.write_str(")")
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct SatSnapshot {
  /// Values indexed by variable id.
  pub variables: Vec<LBool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub current:   Option<VarId>,
  pub clauses:   Vec<Clause>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn literals_display_with_sign() {
    assert_eq!(Lit::pos(VarId(3)).to_string(), "3");
    assert_eq!(Lit::neg(VarId(12)).to_string(), "-12");
  }

  #[test]
  fn clause_display() {
    let c = Clause {
      id:       ClauseId(0),
      literals: vec![Lit::neg(VarId(0)), Lit::pos(VarId(2))],
    };
    assert_eq!(c.to_string(), "(-0 ∨ 2)");
  }
}
