//! [`Shared`]: a model behind one mutex, with change notifications.

use std::{
  fmt,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use lucy_core::Result;
use tokio::sync::broadcast;

/// Default number of buffered notifications per subscriber before it starts
/// lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// A view model that records what changed during each mutating call.
pub trait Model: Send + 'static {
  type Change: Clone + fmt::Debug + Send + 'static;

  /// Drain the changes recorded since the last call.
  fn take_changes(&mut self) -> Vec<Self::Change>;
}

/// A model guarded by a single lock.
///
/// Writers and readers both go through the lock, so a reader never observes a
/// half-applied event. Changes are broadcast while the lock is still held,
/// which keeps notifications in the same order as the mutations.
///
/// Cloning is cheap; clones share the same model and channel.
pub struct Shared<M: Model> {
  model:   Arc<Mutex<M>>,
  changes: broadcast::Sender<M::Change>,
}

impl<M: Model> Clone for Shared<M> {
  fn clone(&self) -> Self {
    Self {
      model:   Arc::clone(&self.model),
      changes: self.changes.clone(),
    }
  }
}

impl<M: Model> Shared<M> {
  pub fn new(model: M) -> Self {
    Self::with_capacity(model, DEFAULT_CHANNEL_CAPACITY)
  }

  pub fn with_capacity(model: M, capacity: usize) -> Self {
    let (changes, _) = broadcast::channel(capacity.max(1));
    Self { model: Arc::new(Mutex::new(model)), changes }
  }

  /// Subscribe to changes applied after this call.
  pub fn subscribe(&self) -> broadcast::Receiver<M::Change> {
    self.changes.subscribe()
  }

  /// Run `f` against the model under the lock.
  pub fn read<R>(&self, f: impl FnOnce(&M) -> R) -> R {
    let model = self.lock();
    f(&*model)
  }

  /// Apply one mutation atomically and broadcast whatever it changed.
  pub fn update<R>(&self, f: impl FnOnce(&mut M) -> Result<R>) -> Result<R> {
    let mut model = self.lock();
    let out = f(&mut *model);
    for change in model.take_changes() {
      // No subscribers is not an error for the producer.
      let _ = self.changes.send(change);
    }
    out
  }

  // A panic inside `update` skips the drain, so changes left behind by the
  // panicking call are dropped here rather than sent on the next one.
  fn lock(&self) -> MutexGuard<'_, M> {
    self.model.lock().unwrap_or_else(|poisoned| {
      let mut model = PoisonError::into_inner(poisoned);
      let dropped = model.take_changes().len();
      tracing::warn!(dropped, "recovered model lock after a panic");
      self.model.clear_poison();
      model
    })
  }
}
