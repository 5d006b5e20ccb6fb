//! Client-side session state: the isochrone working set, the command-driven
//! orchestrator that feeds it, and the reconciliation logic that keeps a map
//! surface's layers in step with it.
//!
//! Everything here runs on one event-processing thread; the orchestrator
//! takes `&mut self` for every mutation, so two in-flight add actions
//! resolve in completion order and never interleave a partial commit.

mod command;
mod orchestrator;
mod store;
mod sync;

pub use command::{SessionCommand, SessionEvent};
pub use orchestrator::{Orchestrator, SessionError};
pub use store::IsochroneStore;
pub use sync::{LayerSync, MapSurface};
