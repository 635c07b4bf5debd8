//! "Current entity" highlights, including timed ones that clear themselves.
//!
//! Every mark or clear starts a new generation. A timer remembers the
//! generation it was started in and only clears the highlight if nothing has
//! touched it since, so a superseded timer does nothing.

use std::time::Duration;

use lucy_core::{FlawId, ResolverId, Result};
use tokio::task::JoinHandle;

use crate::{CausalGraph, Shared};

/// At most one highlighted id of a given kind.
#[derive(Debug, Clone, Default)]
pub struct Highlight<T> {
  current:    Option<T>,
  generation: u64,
}

impl<T: Copy + PartialEq> Highlight<T> {
  pub fn current(&self) -> Option<T> { self.current }

  pub fn generation(&self) -> u64 { self.generation }

  /// Highlight `id`. Returns `false` when `id` was already highlighted.
  pub fn mark(&mut self, id: T) -> bool {
    self.generation += 1;
    self.current.replace(id) != Some(id)
  }

  pub fn clear(&mut self) -> Option<T> {
    self.generation += 1;
    self.current.take()
  }

  /// Clear only if no mark or clear happened after `generation`.
  pub fn expire(&mut self, generation: u64) -> Option<T> {
    if self.generation == generation { self.current.take() } else { None }
  }
}

impl Shared<CausalGraph> {
  /// Highlight a flaw for `hold`, then clear it unless it was re-marked (or
  /// another flaw was marked) in the meantime.
  ///
  /// Must be called from within a Tokio runtime.
  pub fn flash_flaw(&self, id: FlawId, hold: Duration) -> Result<JoinHandle<()>> {
    let generation = self.update(|g| {
      g.mark_current_flaw(id)?;
      Ok(g.flaw_highlight().generation())
    })?;
    let graph = self.clone();
    Ok(tokio::spawn(async move {
      tokio::time::sleep(hold).await;
      let _ = graph.update(|g| Ok(g.expire_current_flaw(generation)));
    }))
  }

  /// Resolver counterpart of [`Shared::flash_flaw`].
  pub fn flash_resolver(
    &self,
    id: ResolverId,
    hold: Duration,
  ) -> Result<JoinHandle<()>> {
    let generation = self.update(|g| {
      g.mark_current_resolver(id)?;
      Ok(g.resolver_highlight().generation())
    })?;
    let graph = self.clone();
    Ok(tokio::spawn(async move {
      tokio::time::sleep(hold).await;
      let _ = graph.update(|g| Ok(g.expire_current_resolver(generation)));
    }))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mark_reports_whether_it_moved() {
    let mut h = Highlight::default();
    assert!(h.mark(1));
    assert!(!h.mark(1));
    assert!(h.mark(2));
    assert_eq!(h.current(), Some(2));
  }

  #[test]
  fn stale_generation_does_not_expire() {
    let mut h = Highlight::default();
    h.mark(1);
    let first = h.generation();
    h.mark(1);
    assert_eq!(h.expire(first), None);
    assert_eq!(h.current(), Some(1));

    let second = h.generation();
    assert_eq!(h.expire(second), Some(1));
    assert_eq!(h.current(), None);
  }
}
