//! Tri-state truth values.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The current assignment of a solver variable: `False`, `True` or not yet
/// decided.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum LBool {
  False,
  True,
  #[default]
  Undefined,
}

impl LBool {
  pub fn is_defined(self) -> bool { !matches!(self, Self::Undefined) }

  /// The value of a literal with the given `sign` over a variable holding
  /// `self`.
  pub fn with_sign(self, sign: bool) -> Self {
    match (self, sign) {
      (Self::Undefined, _) => Self::Undefined,
      (v, true) => v,
      (Self::True, false) => Self::False,
      (Self::False, false) => Self::True,
    }
  }
}

impl From<bool> for LBool {
  fn from(b: bool) -> Self { if b { Self::True } else { Self::False } }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  #[test]
  fn parses_case_insensitively() {
    assert_eq!(LBool::from_str("true").unwrap(), LBool::True);
    assert_eq!(LBool::from_str("UNDEFINED").unwrap(), LBool::Undefined);
    assert!(LBool::from_str("maybe").is_err());
  }

  #[test]
  fn negation_keeps_undefined() {
    assert_eq!(LBool::True.with_sign(false), LBool::False);
    assert_eq!(LBool::False.with_sign(false), LBool::True);
    assert_eq!(LBool::Undefined.with_sign(false), LBool::Undefined);
    assert_eq!(LBool::False.with_sign(true), LBool::False);
  }
}
