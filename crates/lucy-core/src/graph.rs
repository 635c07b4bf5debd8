//! Causal graph entities: flaws, resolvers and the links between them.
//!
//! A causal link `(flaw, resolver)` says the flaw is a precondition of the
//! resolver; read the other way, the resolver is one of the flaw's causes.
//! Every resolver additionally names the single flaw it resolves, its
//! effect.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
  id::{FlawId, ResolverId},
  policy::CostPolicy,
  status::LBool,
};

// ─── Costs ───────────────────────────────────────────────────────────────────

/// `false` for the infinite sentinels and NaN; such costs are left out of
/// serialised output.
pub fn is_known_cost(cost: &f64) -> bool { cost.is_finite() }

fn is_unknown_cost(cost: &f64) -> bool { !is_known_cost(cost) }

// ─── Entities ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flaw {
  pub id:     FlawId,
  pub label:  String,
  #[serde(skip_serializing_if = "is_unknown_cost")]
  pub cost:   f64,
  pub status: LBool,
  /// Resolvers that introduced this flaw as one of their preconditions.
  pub causes: BTreeSet<ResolverId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolver {
  pub id:            ResolverId,
  pub label:         String,
  #[serde(skip_serializing_if = "is_unknown_cost")]
  pub cost:          f64,
  pub status:        LBool,
  /// The flaw this resolver resolves.
  pub effect:        FlawId,
  pub preconditions: BTreeSet<FlawId>,
}

/// A precondition edge. `status` mirrors the resolver's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CausalLink {
  pub flaw:     FlawId,
  pub resolver: ResolverId,
  pub status:   LBool,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input to `create_flaw`.
#[derive(Debug, Clone, Default)]
pub struct NewFlaw {
  pub id:     FlawId,
  pub causes: Vec<ResolverId>,
  pub label:  String,
  pub cost:   Option<f64>,
  pub status: LBool,
}

impl NewFlaw {
  /// A flaw with no causes, no cost and an undecided status.
  pub fn new(id: FlawId, label: impl Into<String>) -> Self {
    Self { id, label: label.into(), ..Self::default() }
  }

  pub fn caused_by(mut self, causes: impl IntoIterator<Item = ResolverId>) -> Self {
    self.causes.extend(causes);
    self
  }

  pub fn with_cost(mut self, cost: f64) -> Self {
    self.cost = Some(cost);
    self
  }

  pub fn with_status(mut self, status: LBool) -> Self {
    self.status = status;
    self
  }
}

/// Input to `create_resolver`.
#[derive(Debug, Clone)]
pub struct NewResolver {
  pub id:     ResolverId,
  pub effect: FlawId,
  pub label:  String,
  pub cost:   Option<f64>,
  pub status: LBool,
}

impl NewResolver {
  pub fn new(id: ResolverId, effect: FlawId, label: impl Into<String>) -> Self {
    Self {
      id,
      effect,
      label:  label.into(),
      cost:   None,
      status: LBool::default(),
    }
  }

  pub fn with_cost(mut self, cost: f64) -> Self {
    self.cost = Some(cost);
    self
  }

  pub fn with_status(mut self, status: LBool) -> Self {
    self.status = status;
    self
  }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// A consistent copy of the whole graph, taken under the model lock. Entities
/// are sorted by id.
#[derive(Debug, Clone, Serialize)]
pub struct GraphSnapshot {
  pub taken_at:         DateTime<Utc>,
  pub policy:           CostPolicy,
  pub flaws:            Vec<Flaw>,
  pub resolvers:        Vec<Resolver>,
  pub links:            Vec<CausalLink>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub current_flaw:     Option<FlawId>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub current_resolver: Option<ResolverId>,
}

impl GraphSnapshot {
  pub fn flaw(&self, id: FlawId) -> Option<&Flaw> {
    self.flaws.iter().find(|f| f.id == id)
  }

  pub fn resolver(&self, id: ResolverId) -> Option<&Resolver> {
    self.resolvers.iter().find(|r| r.id == id)
  }
}
