//! The call surface a solver drives.
//!
//! Each method corresponds to one solver event. Implementations apply the
//! event atomically and report broken preconditions as typed errors rather
//! than panicking.

use crate::{
  Result,
  graph::{NewFlaw, NewResolver},
  id::{ClauseId, FlawId, ResolverId, VarId},
  sat::Lit,
  status::LBool,
};

/// Receives causal-graph events from the solver.
pub trait CausalGraphListener: Send + Sync {
  fn flaw_created(&self, flaw: NewFlaw) -> Result<()>;
  fn flaw_state_changed(&self, id: FlawId, status: LBool) -> Result<()>;
  fn flaw_cost_changed(&self, id: FlawId, cost: f64) -> Result<()>;
  fn current_flaw(&self, id: FlawId) -> Result<()>;

  fn resolver_created(&self, resolver: NewResolver) -> Result<()>;
  fn resolver_state_changed(&self, id: ResolverId, status: LBool) -> Result<()>;
  fn resolver_cost_changed(&self, id: ResolverId, cost: f64) -> Result<()>;
  fn current_resolver(&self, id: ResolverId) -> Result<()>;

  fn causal_link_added(&self, flaw: FlawId, resolver: ResolverId) -> Result<()>;
}

/// Receives SAT-core events from the solver.
pub trait SatListener: Send + Sync {
  fn new_var(&self, id: VarId) -> Result<()>;
  fn new_value(&self, id: VarId, value: LBool) -> Result<()>;
  fn new_clause(&self, id: ClauseId, literals: Vec<Lit>) -> Result<()>;
}
