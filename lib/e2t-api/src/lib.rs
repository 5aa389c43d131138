//! E2 Termination registry API types
//!
//! This library defines the records persisted for every E2T instance:
//! - E2TInstance: one termination endpoint and the RAN nodes routed through it
//! - E2TInstanceState: lifecycle flag deciding whether an instance accepts new RAN nodes

pub mod entities;

pub use entities::{E2TInstance, E2TInstanceState};
