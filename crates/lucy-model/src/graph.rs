//! [`CausalGraph`]: flaws, resolvers, causal links and cost propagation.
//!
//! Derived costs are recomputed eagerly inside the mutating call that
//! invalidated them. Under either [`Direction`] the derived side never feeds
//! another aggregate, so a single level of recomputation keeps every derived
//! cost exact.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use lucy_core::{
  Entity, Error, FlawId, LBool, ResolverId, Result,
  graph::{CausalLink, Flaw, GraphSnapshot, NewFlaw, NewResolver, Resolver},
  policy::{CostPolicy, Direction},
};

use crate::{Highlight, Model};

// ─── Changes ─────────────────────────────────────────────────────────────────

/// What a mutating call changed, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphChange {
  FlawCreated(FlawId),
  ResolverCreated(ResolverId),
  LinkAdded { flaw: FlawId, resolver: ResolverId, status: LBool },
  FlawStatus { id: FlawId, status: LBool },
  ResolverStatus { id: ResolverId, status: LBool },
  LinkStatus { flaw: FlawId, resolver: ResolverId, status: LBool },
  FlawCost { id: FlawId, cost: f64 },
  ResolverCost { id: ResolverId, cost: f64 },
  CurrentFlaw(Option<FlawId>),
  CurrentResolver(Option<ResolverId>),
}

// ─── Graph ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct CausalGraph {
  policy:             CostPolicy,
  flaws:              BTreeMap<FlawId, Flaw>,
  resolvers:          BTreeMap<ResolverId, Resolver>,
  /// Link status keyed by `(precondition, resolver)`.
  links:              BTreeMap<(FlawId, ResolverId), LBool>,
  /// Resolvers indexed by the flaw they resolve.
  resolved_by:        BTreeMap<FlawId, BTreeSet<ResolverId>>,
  flaw_highlight:     Highlight<FlawId>,
  resolver_highlight: Highlight<ResolverId>,
  pending:            Vec<GraphChange>,
}

impl Model for CausalGraph {
  type Change = GraphChange;

  fn take_changes(&mut self) -> Vec<GraphChange> {
    std::mem::take(&mut self.pending)
  }
}

impl CausalGraph {
  pub fn new(policy: CostPolicy) -> Self {
    Self { policy, ..Self::default() }
  }

  pub fn policy(&self) -> CostPolicy { self.policy }

  // ── Creation ─────────────────────────────────────────────────────────────

  /// Register a flaw and link it as a precondition of each of its causes.
  ///
  /// Nothing is modified unless every precondition holds.
  pub fn create_flaw(&mut self, input: NewFlaw) -> Result<()> {
    let id = input.id;
    if self.flaws.contains_key(&id) {
      return Err(Error::DuplicateEntity(id.into()));
    }
    if let Some(&missing) =
      input.causes.iter().find(|r| !self.resolvers.contains_key(*r))
    {
      return Err(Error::DanglingReference {
        from: id.into(),
        to:   missing.into(),
      });
    }

    let cost = if self.policy.flaws_derived() {
      if input.cost.is_some() {
        tracing::debug!(flaw = id.0, "ignoring reported cost of a derived flaw");
      }
      self.aggregate_flaw(id)
    } else {
      input.cost.unwrap_or_else(|| self.policy.unset())
    };

    self.flaws.insert(id, Flaw {
      id,
      label: input.label,
      cost,
      status: input.status,
      causes: BTreeSet::new(),
    });
    self.pending.push(GraphChange::FlawCreated(id));
    tracing::debug!(flaw = id.0, causes = input.causes.len(), "flaw created");

    for resolver in input.causes {
      self.insert_link(id, resolver);
    }
    Ok(())
  }

  /// Register a resolver for an existing flaw.
  pub fn create_resolver(&mut self, input: NewResolver) -> Result<()> {
    let id = input.id;
    if self.resolvers.contains_key(&id) {
      return Err(Error::DuplicateEntity(id.into()));
    }
    if !self.flaws.contains_key(&input.effect) {
      return Err(Error::DanglingReference {
        from: id.into(),
        to:   input.effect.into(),
      });
    }

    let cost = if self.policy.resolvers_derived() {
      if input.cost.is_some() {
        tracing::debug!(resolver = id.0, "ignoring reported cost of a derived resolver");
      }
      // No preconditions yet.
      self.policy.unset()
    } else {
      input.cost.unwrap_or_else(|| self.policy.unset())
    };

    self.resolvers.insert(id, Resolver {
      id,
      label: input.label,
      cost,
      status: input.status,
      effect: input.effect,
      preconditions: BTreeSet::new(),
    });
    self.resolved_by.entry(input.effect).or_default().insert(id);
    self.pending.push(GraphChange::ResolverCreated(id));
    tracing::debug!(resolver = id.0, effect = input.effect.0, "resolver created");

    if self.policy.flaws_derived() {
      self.recompute_flaw(input.effect);
    }
    Ok(())
  }

  /// Make `flaw` a precondition of `resolver`. Adding an existing link again
  /// only refreshes its status.
  pub fn add_causal_link(
    &mut self,
    flaw: FlawId,
    resolver: ResolverId,
  ) -> Result<()> {
    if !self.flaws.contains_key(&flaw) {
      return Err(Error::DanglingReference {
        from: resolver.into(),
        to:   flaw.into(),
      });
    }
    if !self.resolvers.contains_key(&resolver) {
      return Err(Error::DanglingReference {
        from: flaw.into(),
        to:   resolver.into(),
      });
    }
    self.insert_link(flaw, resolver);
    Ok(())
  }

  // Both endpoints must exist.
  fn insert_link(&mut self, flaw: FlawId, resolver: ResolverId) {
    let Some(r) = self.resolvers.get_mut(&resolver) else { return };
    r.preconditions.insert(flaw);
    let status = r.status;
    if let Some(f) = self.flaws.get_mut(&flaw) {
      f.causes.insert(resolver);
    }
    match self.links.insert((flaw, resolver), status) {
      None => {
        self.pending.push(GraphChange::LinkAdded { flaw, resolver, status });
        tracing::debug!(flaw = flaw.0, resolver = resolver.0, "causal link added");
      }
      Some(previous) if previous != status => {
        self.pending.push(GraphChange::LinkStatus { flaw, resolver, status });
      }
      Some(_) => {}
    }

    if self.policy.resolvers_derived() {
      self.recompute_resolver(resolver);
    }
  }

  // ── Status ───────────────────────────────────────────────────────────────

  pub fn set_flaw_status(&mut self, id: FlawId, status: LBool) -> Result<()> {
    let flaw = self
      .flaws
      .get_mut(&id)
      .ok_or(Error::UnknownEntity(id.into()))?;
    if flaw.status != status {
      flaw.status = status;
      self.pending.push(GraphChange::FlawStatus { id, status });
    }
    Ok(())
  }

  /// Overwrite a resolver's status and mirror it onto every incident link.
  pub fn set_resolver_status(
    &mut self,
    id: ResolverId,
    status: LBool,
  ) -> Result<()> {
    let resolver = self
      .resolvers
      .get_mut(&id)
      .ok_or(Error::UnknownEntity(id.into()))?;
    if resolver.status != status {
      resolver.status = status;
      self.pending.push(GraphChange::ResolverStatus { id, status });
    }
    for &flaw in &resolver.preconditions {
      if let Some(link) = self.links.get_mut(&(flaw, id))
        && *link != status
      {
        *link = status;
        self.pending.push(GraphChange::LinkStatus { flaw, resolver: id, status });
      }
    }
    Ok(())
  }

  // ── Costs ────────────────────────────────────────────────────────────────

  /// Overwrite a reported flaw cost and recompute the resolvers it is a
  /// precondition of.
  pub fn set_flaw_cost(&mut self, id: FlawId, cost: f64) -> Result<()> {
    let flaw = self
      .flaws
      .get_mut(&id)
      .ok_or(Error::UnknownEntity(id.into()))?;
    if self.policy.flaws_derived() {
      return Err(Error::DerivedCost(id.into()));
    }
    if same_cost(flaw.cost, cost) {
      return Ok(());
    }
    flaw.cost = cost;
    let dependents: Vec<ResolverId> = flaw.causes.iter().copied().collect();
    self.pending.push(GraphChange::FlawCost { id, cost });

    for resolver in dependents {
      self.recompute_resolver(resolver);
    }
    Ok(())
  }

  /// Overwrite a reported resolver cost and recompute the flaw it resolves.
  pub fn set_resolver_cost(&mut self, id: ResolverId, cost: f64) -> Result<()> {
    let resolver = self
      .resolvers
      .get_mut(&id)
      .ok_or(Error::UnknownEntity(id.into()))?;
    if self.policy.resolvers_derived() {
      return Err(Error::DerivedCost(id.into()));
    }
    if same_cost(resolver.cost, cost) {
      return Ok(());
    }
    resolver.cost = cost;
    let effect = resolver.effect;
    self.pending.push(GraphChange::ResolverCost { id, cost });

    self.recompute_flaw(effect);
    Ok(())
  }

  fn aggregate_flaw(&self, id: FlawId) -> f64 {
    let costs = self
      .resolved_by
      .get(&id)
      .into_iter()
      .flatten()
      .filter_map(|r| self.resolvers.get(r))
      .map(|r| r.cost);
    self.policy.aggregate.fold(costs)
  }

  fn aggregate_resolver(&self, id: ResolverId) -> f64 {
    let costs = self
      .resolvers
      .get(&id)
      .map(|r| &r.preconditions)
      .into_iter()
      .flatten()
      .filter_map(|f| self.flaws.get(f))
      .map(|f| f.cost);
    self.policy.aggregate.fold(costs)
  }

  fn recompute_flaw(&mut self, id: FlawId) {
    let cost = self.aggregate_flaw(id);
    if let Some(flaw) = self.flaws.get_mut(&id)
      && !same_cost(flaw.cost, cost)
    {
      tracing::trace!(
        flaw = id.0,
        from = flaw.cost,
        to = cost,
        "flaw cost recomputed"
      );
      flaw.cost = cost;
      self.pending.push(GraphChange::FlawCost { id, cost });
    }
  }

  fn recompute_resolver(&mut self, id: ResolverId) {
    let cost = self.aggregate_resolver(id);
    if let Some(resolver) = self.resolvers.get_mut(&id)
      && !same_cost(resolver.cost, cost)
    {
      tracing::trace!(
        resolver = id.0,
        from = resolver.cost,
        to = cost,
        "resolver cost recomputed"
      );
      resolver.cost = cost;
      self.pending.push(GraphChange::ResolverCost { id, cost });
    }
  }

  // ── Highlights ───────────────────────────────────────────────────────────

  /// Make `id` the current flaw. Returns `false` if it already was.
  pub fn mark_current_flaw(&mut self, id: FlawId) -> Result<bool> {
    if !self.flaws.contains_key(&id) {
      return Err(Error::UnknownEntity(id.into()));
    }
    let moved = self.flaw_highlight.mark(id);
    if moved {
      self.pending.push(GraphChange::CurrentFlaw(Some(id)));
    }
    Ok(moved)
  }

  /// Make `id` the current resolver. Returns `false` if it already was.
  pub fn mark_current_resolver(&mut self, id: ResolverId) -> Result<bool> {
    if !self.resolvers.contains_key(&id) {
      return Err(Error::UnknownEntity(id.into()));
    }
    let moved = self.resolver_highlight.mark(id);
    if moved {
      self.pending.push(GraphChange::CurrentResolver(Some(id)));
    }
    Ok(moved)
  }

  pub fn clear_current_flaw(&mut self) -> Option<FlawId> {
    let cleared = self.flaw_highlight.clear();
    if cleared.is_some() {
      self.pending.push(GraphChange::CurrentFlaw(None));
    }
    cleared
  }

  pub fn clear_current_resolver(&mut self) -> Option<ResolverId> {
    let cleared = self.resolver_highlight.clear();
    if cleared.is_some() {
      self.pending.push(GraphChange::CurrentResolver(None));
    }
    cleared
  }

  /// Clear the current flaw if it has not been re-marked since `generation`.
  pub fn expire_current_flaw(&mut self, generation: u64) -> Option<FlawId> {
    let expired = self.flaw_highlight.expire(generation);
    if let Some(id) = expired {
      tracing::debug!(flaw = id.0, "flaw highlight expired");
      self.pending.push(GraphChange::CurrentFlaw(None));
    }
    expired
  }

  pub fn expire_current_resolver(
    &mut self,
    generation: u64,
  ) -> Option<ResolverId> {
    let expired = self.resolver_highlight.expire(generation);
    if let Some(id) = expired {
      tracing::debug!(resolver = id.0, "resolver highlight expired");
      self.pending.push(GraphChange::CurrentResolver(None));
    }
    expired
  }

  pub fn flaw_highlight(&self) -> &Highlight<FlawId> { &self.flaw_highlight }

  pub fn resolver_highlight(&self) -> &Highlight<ResolverId> {
    &self.resolver_highlight
  }

  pub fn current_flaw(&self) -> Option<FlawId> { self.flaw_highlight.current() }

  pub fn current_resolver(&self) -> Option<ResolverId> {
    self.resolver_highlight.current()
  }

  // ── Reads ────────────────────────────────────────────────────────────────

  pub fn flaw(&self, id: FlawId) -> Option<&Flaw> { self.flaws.get(&id) }

  pub fn resolver(&self, id: ResolverId) -> Option<&Resolver> {
    self.resolvers.get(&id)
  }

  pub fn link(&self, flaw: FlawId, resolver: ResolverId) -> Option<CausalLink> {
    self
      .links
      .get(&(flaw, resolver))
      .map(|&status| CausalLink { flaw, resolver, status })
  }

  pub fn flaws(&self) -> impl Iterator<Item = &Flaw> { self.flaws.values() }

  pub fn resolvers(&self) -> impl Iterator<Item = &Resolver> {
    self.resolvers.values()
  }

  pub fn links(&self) -> impl Iterator<Item = CausalLink> + '_ {
    self
      .links
      .iter()
      .map(|(&(flaw, resolver), &status)| CausalLink { flaw, resolver, status })
  }

  /// The resolvers whose effect is `flaw`, in id order.
  pub fn resolvers_of(&self, flaw: FlawId) -> impl Iterator<Item = &Resolver> {
    self
      .resolved_by
      .get(&flaw)
      .into_iter()
      .flatten()
      .filter_map(|r| self.resolvers.get(r))
  }

  pub fn snapshot(&self) -> GraphSnapshot {
    GraphSnapshot {
      taken_at:         Utc::now(),
      policy:           self.policy,
      flaws:            self.flaws.values().cloned().collect(),
      resolvers:        self.resolvers.values().cloned().collect(),
      links:            self.links().collect(),
      current_flaw:     self.current_flaw(),
      current_resolver: self.current_resolver(),
    }
  }

  /// Whether this entity's cost is computed rather than reported.
  pub fn is_derived(&self, entity: Entity) -> bool {
    match (entity, self.policy.direction) {
      (Entity::Flaw(_), Direction::FlawsFromResolvers) => true,
      (Entity::Resolver(_), Direction::ResolversFromPreconditions) => true,
      _ => false,
    }
  }
}

fn same_cost(a: f64, b: f64) -> bool { a == b || (a.is_nan() && b.is_nan()) }
