//! Mutable view models fed by solver events.
//!
//! [`CausalGraph`], [`SatInspector`] and [`Timelines`] are plain
//! single-threaded structures. Wrap one in [`Shared`] to get the
//! one-lock-per-model discipline and a broadcast of every change for the
//! rendering side.

mod graph;
mod highlight;
mod listener;
mod sat;
mod shared;
mod timeline;

pub use graph::{CausalGraph, GraphChange};
pub use highlight::Highlight;
pub use sat::{SatChange, SatInspector};
pub use shared::{DEFAULT_CHANNEL_CAPACITY, Model, Shared};
pub use timeline::{TimelineChange, Timelines};
