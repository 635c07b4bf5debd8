//! Core types and trait definitions for the Lucy solver views.
//!
//! This crate holds plain data only: identifiers, the error taxonomy, the
//! cost-propagation policy, the wire events a solver emits and the listener
//! traits those events are delivered through. It does no locking and no I/O;
//! the mutable models live in `lucy-model`.

pub mod error;
pub mod event;
pub mod graph;
pub mod id;
pub mod listener;
pub mod policy;
pub mod sat;
pub mod status;
pub mod timeline;

pub use error::{Error, Result};
pub use id::{ClauseId, Entity, FlawId, ResolverId, RowId, VarId};
pub use status::LBool;
