//! Wire form of solver events.
//!
//! One JSON object per event, tagged by `"event"`:
//!
//! ```json
//! {"event":"flaw_created","id":1,"causes":[],"label":"goal","status":"Undefined"}
//! {"event":"resolver_created","id":7,"effect":1,"label":"r7","cost":2.5}
//! {"event":"causal_link_added","flaw":3,"resolver":7}
//! ```
//!
//! Costs are carried exactly as the solver computes them. A missing `cost`
//! means "not reported".

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{
  Result,
  graph::{NewFlaw, NewResolver},
  id::{ClauseId, FlawId, ResolverId, RowId, VarId},
  sat::Lit,
  status::LBool,
  timeline::Color,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "event", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Event {
  // ── Causal graph ─────────────────────────────────────────────────────────
  FlawCreated {
    id:     FlawId,
    #[serde(default)]
    causes: Vec<ResolverId>,
    #[serde(default)]
    label:  String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cost:   Option<f64>,
    #[serde(default)]
    status: LBool,
  },
  FlawStateChanged {
    id:     FlawId,
    status: LBool,
  },
  FlawCostChanged {
    id:   FlawId,
    cost: f64,
  },
  CurrentFlaw {
    id: FlawId,
  },
  ResolverCreated {
    id:     ResolverId,
    effect: FlawId,
    #[serde(default)]
    label:  String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cost:   Option<f64>,
    #[serde(default)]
    status: LBool,
  },
  ResolverStateChanged {
    id:     ResolverId,
    status: LBool,
  },
  ResolverCostChanged {
    id:   ResolverId,
    cost: f64,
  },
  CurrentResolver {
    id: ResolverId,
  },
  CausalLinkAdded {
    flaw:     FlawId,
    resolver: ResolverId,
  },

  // ── SAT core ─────────────────────────────────────────────────────────────
  NewVar {
    id: VarId,
  },
  NewValue {
    id:    VarId,
    value: LBool,
  },
  NewClause {
    id:       ClauseId,
    literals: Vec<Lit>,
  },

  // ── Timelines ────────────────────────────────────────────────────────────
  /// A new row, appended below the existing ones. Rows are numbered in
  /// arrival order from zero.
  TimelineAdded {
    name: String,
  },
  ValueAdded {
    row:   RowId,
    start: i64,
    end:   i64,
    #[serde(default)]
    label: String,
    color: Color,
  },
}

impl Event {
  /// Parse a single JSON-lines record.
  pub fn parse_line(line: &str) -> Result<Self> {
    Ok(serde_json::from_str(line.trim())?)
  }

  /// The `snake_case` tag of this event, for logging.
  pub fn name(&self) -> &'static str { self.into() }
}

impl From<NewFlaw> for Event {
  fn from(f: NewFlaw) -> Self {
    Self::FlawCreated {
      id:     f.id,
      causes: f.causes,
      label:  f.label,
      cost:   f.cost,
      status: f.status,
    }
  }
}

impl From<NewResolver> for Event {
  fn from(r: NewResolver) -> Self {
    Self::ResolverCreated {
      id:     r.id,
      effect: r.effect,
      label:  r.label,
      cost:   r.cost,
      status: r.status,
    }
  }
}
