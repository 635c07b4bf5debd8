//! Cost-propagation policy for the causal graph.
//!
//! One side of the flaw/resolver bipartite graph is authoritative: its costs
//! are reported by the solver. The other side is derived: each derived cost
//! is an aggregate over the authoritative costs it depends on. The policy
//! fixes which side is which and how the aggregate folds.

use serde::{Deserialize, Serialize};

/// How a derived cost folds the costs it depends on.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
  #[default]
  Min,
  Max,
}

impl Aggregate {
  /// The value of the aggregate over an empty set: `+∞` for `Min`, `−∞` for
  /// `Max`. It is also the stored cost of an entity with no reported cost.
  pub fn sentinel(self) -> f64 {
    match self {
      Self::Min => f64::INFINITY,
      Self::Max => f64::NEG_INFINITY,
    }
  }

  pub fn fold<I>(self, costs: I) -> f64
  where
    I: IntoIterator<Item = f64>,
  {
    costs.into_iter().fold(self.sentinel(), |acc, c| match self {
      Self::Min => acc.min(c),
      Self::Max => acc.max(c),
    })
  }
}

/// Which side of the graph derives its cost from the other.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
  /// Resolver costs are reported; a flaw's cost aggregates the costs of the
  /// resolvers that resolve it.
  #[default]
  FlawsFromResolvers,
  /// Flaw costs are reported; a resolver's cost aggregates the costs of its
  /// precondition flaws.
  ResolversFromPreconditions,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub struct CostPolicy {
  #[serde(default)]
  pub direction: Direction,
  #[serde(default)]
  pub aggregate: Aggregate,
}

impl CostPolicy {
  pub fn new(direction: Direction, aggregate: Aggregate) -> Self {
    Self { direction, aggregate }
  }

  pub fn flaws_derived(&self) -> bool {
    self.direction == Direction::FlawsFromResolvers
  }

  pub fn resolvers_derived(&self) -> bool {
    self.direction == Direction::ResolversFromPreconditions
  }

  /// The cost stored for an entity when the solver reports none.
  pub fn unset(&self) -> f64 { self.aggregate.sentinel() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_fold_is_the_sentinel() {
    assert_eq!(Aggregate::Min.fold([]), f64::INFINITY);
    assert_eq!(Aggregate::Max.fold([]), f64::NEG_INFINITY);
  }

  #[test]
  fn fold_picks_the_extreme() {
    let costs = [3.0, -1.5, 7.25];
    assert_eq!(Aggregate::Min.fold(costs), -1.5);
    assert_eq!(Aggregate::Max.fold(costs), 7.25);
  }

  #[test]
  fn policy_deserialises_with_defaults() {
    let p: CostPolicy = serde_json::from_str(r#"{"aggregate":"max"}"#).unwrap();
    assert_eq!(p.direction, Direction::FlawsFromResolvers);
    assert_eq!(p.aggregate, Aggregate::Max);

    let p: CostPolicy =
      serde_json::from_str(r#"{"direction":"resolvers_from_preconditions"}"#)
        .unwrap();
    assert!(p.resolvers_derived());
    assert_eq!(p.unset(), f64::INFINITY);
  }
}
