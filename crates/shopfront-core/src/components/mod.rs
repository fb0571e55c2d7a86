//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to entities.
//! They have no behavior beyond local state transitions - ticking lives in
//! systems.

mod common;
mod customer;

pub use common::*;
pub use customer::*;
