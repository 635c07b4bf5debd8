//! Replay a recorded solver event log into the Lucy view models.
//!
//! The log is JSON lines, one [`Event`] per line. Every event is applied to
//! the model it belongs to through the listener traits, exactly as a live
//! solver would deliver it; the result is a [`Snapshot`] of all three views.

pub mod config;
pub mod error;

pub use config::{ErrorPolicy, ReplayConfig};
pub use error::{Error, Result};

use std::io::BufRead;

use lucy_core::{
  event::Event,
  graph::{GraphSnapshot, NewFlaw, NewResolver},
  listener::{CausalGraphListener, SatListener},
  sat::SatSnapshot,
  timeline::TimelineSnapshot,
};
use lucy_model::{CausalGraph, SatInspector, Shared, Timelines};
use serde::Serialize;

// ─── Views ───────────────────────────────────────────────────────────────────

/// The three view models, each behind its own lock.
#[derive(Clone)]
pub struct Views {
  pub graph:     Shared<CausalGraph>,
  pub sat:       Shared<SatInspector>,
  pub timelines: Shared<Timelines>,
  config:        ReplayConfig,
}

/// Everything the views hold, serialisable as one JSON document.
#[derive(Debug, Serialize)]
pub struct Snapshot {
  pub graph:     GraphSnapshot,
  pub sat:       SatSnapshot,
  pub timelines: TimelineSnapshot,
}

impl Views {
  pub fn new(config: ReplayConfig) -> Self {
    let capacity = config.channel_capacity;
    Self {
      graph: Shared::with_capacity(CausalGraph::new(config.policy), capacity),
      sat: Shared::with_capacity(SatInspector::new(), capacity),
      timelines: Shared::with_capacity(Timelines::new(), capacity),
      config,
    }
  }

  /// Deliver one event to the model it concerns.
  ///
  /// With a highlight hold configured, current-entity events start a timed
  /// highlight and must be applied from within a Tokio runtime.
  pub fn apply(&self, event: Event) -> lucy_core::Result<()> {
    match event {
      Event::FlawCreated { id, causes, label, cost, status } => {
        self.graph.flaw_created(NewFlaw { id, causes, label, cost, status })
      }
      Event::FlawStateChanged { id, status } => {
        self.graph.flaw_state_changed(id, status)
      }
      Event::FlawCostChanged { id, cost } => self.graph.flaw_cost_changed(id, cost),
      Event::CurrentFlaw { id } => match self.config.highlight_hold() {
        Some(hold) => self.graph.flash_flaw(id, hold).map(drop),
        None => self.graph.current_flaw(id),
      },
      Event::ResolverCreated { id, effect, label, cost, status } => self
        .graph
        .resolver_created(NewResolver { id, effect, label, cost, status }),
      Event::ResolverStateChanged { id, status } => {
        self.graph.resolver_state_changed(id, status)
      }
      Event::ResolverCostChanged { id, cost } => {
        self.graph.resolver_cost_changed(id, cost)
      }
      Event::CurrentResolver { id } => match self.config.highlight_hold() {
        Some(hold) => self.graph.flash_resolver(id, hold).map(drop),
        None => self.graph.current_resolver(id),
      },
      Event::CausalLinkAdded { flaw, resolver } => {
        self.graph.causal_link_added(flaw, resolver)
      }
      Event::NewVar { id } => self.sat.new_var(id),
      Event::NewValue { id, value } => self.sat.new_value(id, value),
      Event::NewClause { id, literals } => self.sat.new_clause(id, literals),
      Event::TimelineAdded { name } => {
        self.timelines.update(|t| Ok(t.add_row(name))).map(drop)
      }
      Event::ValueAdded { row, start, end, label, color } => self
        .timelines
        .update(|t| t.append_segment(row, start, end, label, color)),
    }
  }

  pub fn snapshot(&self) -> Snapshot {
    Snapshot {
      graph:     self.graph.read(CausalGraph::snapshot),
      sat:       self.sat.read(SatInspector::snapshot),
      timelines: self.timelines.read(Timelines::snapshot),
    }
  }
}

// ─── Replay ──────────────────────────────────────────────────────────────────

/// Counts reported at the end of a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
  pub applied:  usize,
  pub rejected: usize,
}

/// Apply every line of `input` to `views`.
///
/// Blank lines are ignored. Rejected events are logged and counted under
/// [`ErrorPolicy::Skip`], and abort the replay under [`ErrorPolicy::Fail`].
pub fn replay(views: &Views, input: impl BufRead) -> Result<Summary> {
  let mut summary = Summary::default();
  for (index, line) in input.lines().enumerate() {
    let line = line?;
    if line.trim().is_empty() {
      continue;
    }
    let number = index + 1;
    let outcome = Event::parse_line(&line).and_then(|event| {
      tracing::trace!(line = number, event = event.name(), "applying event");
      views.apply(event)
    });
    match outcome {
      Ok(()) => summary.applied += 1,
      Err(source) => match views.config.on_error {
        ErrorPolicy::Skip => {
          tracing::warn!(line = number, error = %source, "event rejected");
          summary.rejected += 1;
        }
        ErrorPolicy::Fail => return Err(Error::Event { line: number, source }),
      },
    }
  }
  tracing::info!(
    applied = summary.applied,
    rejected = summary.rejected,
    "replay finished"
  );
  Ok(summary)
}
