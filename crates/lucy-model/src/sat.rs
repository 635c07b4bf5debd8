//! [`SatInspector`]: variable assignments and clauses of the SAT core.

use std::collections::BTreeMap;

use lucy_core::{
  ClauseId, Error, LBool, Result, VarId,
  sat::{Clause, Lit, SatSnapshot},
};

use crate::{Highlight, Model};

#[derive(Debug, Clone, PartialEq)]
pub enum SatChange {
  VarDeclared(VarId),
  ValueAssigned { id: VarId, value: LBool },
  CurrentVar(Option<VarId>),
  ClauseDeclared(ClauseId),
}

/// Variables are dense: the `n`-th declared variable has id `n`.
#[derive(Debug, Default)]
pub struct SatInspector {
  values:  Vec<LBool>,
  clauses: BTreeMap<ClauseId, Clause>,
  current: Highlight<VarId>,
  pending: Vec<SatChange>,
}

impl Model for SatInspector {
  type Change = SatChange;

  fn take_changes(&mut self) -> Vec<SatChange> {
    std::mem::take(&mut self.pending)
  }
}

impl SatInspector {
  pub fn new() -> Self { Self::default() }

  /// Declare the next variable. `id` must equal the number of variables
  /// declared so far.
  pub fn declare_variable(&mut self, id: VarId) -> Result<()> {
    let expected = self.values.len() as u64;
    if id.0 < expected {
      return Err(Error::DuplicateEntity(id.into()));
    }
    if id.0 > expected {
      return Err(Error::SequenceViolation { expected, got: id.0 });
    }
    self.values.push(LBool::Undefined);
    self.pending.push(SatChange::VarDeclared(id));
    tracing::trace!(var = id.0, "variable declared");
    Ok(())
  }

  /// Overwrite a variable's value and make it the current variable.
  pub fn assign_value(&mut self, id: VarId, value: LBool) -> Result<()> {
    let slot = self
      .slot_mut(id)
      .ok_or(Error::UnknownEntity(id.into()))?;
    *slot = value;
    self.pending.push(SatChange::ValueAssigned { id, value });
    if self.current.mark(id) {
      self.pending.push(SatChange::CurrentVar(Some(id)));
    }
    Ok(())
  }

  pub fn declare_clause(&mut self, id: ClauseId, literals: Vec<Lit>) -> Result<()> {
    if self.clauses.contains_key(&id) {
      return Err(Error::DuplicateEntity(id.into()));
    }
    if let Some(lit) = literals.iter().find(|l| self.value(l.var).is_none()) {
      return Err(Error::DanglingReference {
        from: id.into(),
        to:   lit.var.into(),
      });
    }
    tracing::trace!(clause = id.0, len = literals.len(), "clause declared");
    self.clauses.insert(id, Clause { id, literals });
    self.pending.push(SatChange::ClauseDeclared(id));
    Ok(())
  }

  fn slot_mut(&mut self, id: VarId) -> Option<&mut LBool> {
    usize::try_from(id.0).ok().and_then(|i| self.values.get_mut(i))
  }

  // ── Reads ────────────────────────────────────────────────────────────────

  pub fn variable_count(&self) -> usize { self.values.len() }

  pub fn value(&self, id: VarId) -> Option<LBool> {
    usize::try_from(id.0)
      .ok()
      .and_then(|i| self.values.get(i))
      .copied()
  }

  pub fn current(&self) -> Option<VarId> { self.current.current() }

  pub fn clause(&self, id: ClauseId) -> Option<&Clause> { self.clauses.get(&id) }

  pub fn clauses(&self) -> impl Iterator<Item = &Clause> { self.clauses.values() }

  /// Evaluate a clause under the current assignment: `True` once any literal
  /// holds, `False` once every literal fails, `Undefined` otherwise.
  pub fn clause_value(&self, id: ClauseId) -> Option<LBool> {
    let clause = self.clauses.get(&id)?;
    let mut value = LBool::False;
    for lit in &clause.literals {
      match self.value(lit.var).unwrap_or_default().with_sign(lit.sign) {
        LBool::True => return Some(LBool::True),
        LBool::Undefined => value = LBool::Undefined,
        LBool::False => {}
      }
    }
    Some(value)
  }

  pub fn snapshot(&self) -> SatSnapshot {
    SatSnapshot {
      variables: self.values.clone(),
      current:   self.current(),
      clauses:   self.clauses.values().cloned().collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn inspector_with(n: u64) -> SatInspector {
    let mut sat = SatInspector::new();
    for i in 0..n {
      sat.declare_variable(VarId(i)).unwrap();
    }
    sat
  }

  #[test]
  fn assigning_marks_only_that_variable_current() {
    let mut sat = inspector_with(3);
    sat.assign_value(VarId(1), LBool::True).unwrap();

    assert_eq!(sat.current(), Some(VarId(1)));
    assert_eq!(sat.value(VarId(0)), Some(LBool::Undefined));
    assert_eq!(sat.value(VarId(1)), Some(LBool::True));
    assert_eq!(sat.value(VarId(2)), Some(LBool::Undefined));

    sat.assign_value(VarId(2), LBool::False).unwrap();
    assert_eq!(sat.current(), Some(VarId(2)));
  }

  #[test]
  fn variables_must_arrive_in_order() {
    let mut sat = inspector_with(2);
    assert!(matches!(
      sat.declare_variable(VarId(1)),
      Err(Error::DuplicateEntity(_))
    ));
    assert!(matches!(
      sat.declare_variable(VarId(5)),
      Err(Error::SequenceViolation { expected: 2, got: 5 })
    ));
    assert_eq!(sat.variable_count(), 2);
  }

  #[test]
  fn unknown_variable_cannot_be_assigned() {
    let mut sat = inspector_with(1);
    let err = sat.assign_value(VarId(3), LBool::True).unwrap_err();
    assert!(matches!(err, Error::UnknownEntity(_)));
    assert_eq!(sat.current(), None);
  }

  #[test]
  fn clauses_are_unique_and_reference_declared_variables() {
    let mut sat = inspector_with(2);
    sat
      .declare_clause(ClauseId(0), vec![Lit::pos(VarId(0)), Lit::neg(VarId(1))])
      .unwrap();
    assert!(matches!(
      sat.declare_clause(ClauseId(0), vec![Lit::pos(VarId(1))]),
      Err(Error::DuplicateEntity(_))
    ));
    assert!(matches!(
      sat.declare_clause(ClauseId(1), vec![Lit::pos(VarId(9))]),
      Err(Error::DanglingReference { .. })
    ));
    assert_eq!(sat.clause(ClauseId(0)).unwrap().literals.len(), 2);
    assert!(sat.clause(ClauseId(1)).is_none());
  }

  #[test]
  fn clause_value_follows_assignment() {
    let mut sat = inspector_with(2);
    sat
      .declare_clause(ClauseId(0), vec![Lit::pos(VarId(0)), Lit::neg(VarId(1))])
      .unwrap();
    assert_eq!(sat.clause_value(ClauseId(0)), Some(LBool::Undefined));

    sat.assign_value(VarId(0), LBool::False).unwrap();
    assert_eq!(sat.clause_value(ClauseId(0)), Some(LBool::Undefined));

    sat.assign_value(VarId(1), LBool::True).unwrap();
    assert_eq!(sat.clause_value(ClauseId(0)), Some(LBool::False));

    sat.assign_value(VarId(1), LBool::False).unwrap();
    assert_eq!(sat.clause_value(ClauseId(0)), Some(LBool::True));
  }

  #[test]
  fn changes_are_recorded_in_order() {
    let mut sat = inspector_with(1);
    sat.assign_value(VarId(0), LBool::True).unwrap();
    assert_eq!(sat.take_changes(), vec![
      SatChange::VarDeclared(VarId(0)),
      SatChange::ValueAssigned { id: VarId(0), value: LBool::True },
      SatChange::CurrentVar(Some(VarId(0))),
    ]);
    assert!(sat.take_changes().is_empty());
  }
}
