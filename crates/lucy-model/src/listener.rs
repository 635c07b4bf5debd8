//! Listener implementations: solver events applied to shared models.

use lucy_core::{
  ClauseId, Error, FlawId, LBool, ResolverId, Result, VarId,
  graph::{NewFlaw, NewResolver},
  listener::{CausalGraphListener, SatListener},
  sat::Lit,
};

use crate::{CausalGraph, SatInspector, Shared};

impl CausalGraphListener for Shared<CausalGraph> {
  fn flaw_created(&self, flaw: NewFlaw) -> Result<()> {
    self.update(|g| g.create_flaw(flaw))
  }

  fn flaw_state_changed(&self, id: FlawId, status: LBool) -> Result<()> {
    self.update(|g| g.set_flaw_status(id, status))
  }

  fn flaw_cost_changed(&self, id: FlawId, cost: f64) -> Result<()> {
    self.update(|g| ignore_derived(g.set_flaw_cost(id, cost)))
  }

  fn current_flaw(&self, id: FlawId) -> Result<()> {
    self.update(|g| g.mark_current_flaw(id)).map(drop)
  }

  fn resolver_created(&self, resolver: NewResolver) -> Result<()> {
    self.update(|g| g.create_resolver(resolver))
  }

  fn resolver_state_changed(&self, id: ResolverId, status: LBool) -> Result<()> {
    self.update(|g| g.set_resolver_status(id, status))
  }

  fn resolver_cost_changed(&self, id: ResolverId, cost: f64) -> Result<()> {
    self.update(|g| ignore_derived(g.set_resolver_cost(id, cost)))
  }

  fn current_resolver(&self, id: ResolverId) -> Result<()> {
    self.update(|g| g.mark_current_resolver(id)).map(drop)
  }

  fn causal_link_added(&self, flaw: FlawId, resolver: ResolverId) -> Result<()> {
    self.update(|g| g.add_causal_link(flaw, resolver))
  }
}

// The solver reports costs on both sides of the graph; the derived side
// keeps its own aggregate.
fn ignore_derived(outcome: Result<()>) -> Result<()> {
  match outcome {
    Err(Error::DerivedCost(entity)) => {
      tracing::debug!(%entity, "ignoring reported cost of a derived entity");
      Ok(())
    }
    other => other,
  }
}

impl SatListener for Shared<SatInspector> {
  fn new_var(&self, id: VarId) -> Result<()> {
    self.update(|s| s.declare_variable(id))
  }

  fn new_value(&self, id: VarId, value: LBool) -> Result<()> {
    self.update(|s| s.assign_value(id, value))
  }

  fn new_clause(&self, id: ClauseId, literals: Vec<Lit>) -> Result<()> {
    self.update(|s| s.declare_clause(id, literals))
  }
}
