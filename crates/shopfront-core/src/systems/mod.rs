//! Systems - logic that operates on components and resource structs.

mod agents;
mod director;
mod queue;
mod service;
mod spawner;

pub use agents::*;
pub use director::*;
pub use queue::*;
pub use service::*;
pub use spawner::*;
