//! Shopfront Core - arcade shop simulation engine
//!
//! A tick-driven simulation of a one-counter shop: customers spawn, walk to
//! the counter, queue with finite patience, get served for money, or storm
//! off angry. A map runs over a bounded number of days against a passive-
//! income opponent; first to 100% of the money goal wins, or the day limit
//! decides by percentage.
//!
//! # Architecture
//!
//! Customers live in a `hecs` entity arena:
//! - **Entities**: customers (the `hecs::Entity` is the stable handle the
//!   queue and scheduler hold; dead-handle checks are `world.contains`)
//! - **Components**: pure data (Position, Customer tunables, FSM state)
//! - **Systems**: the spawner, agent FSM tick, service queue, single-server
//!   scheduler, and map director
//!
//! The whole simulation is single-threaded and cooperative: the host calls
//! [`engine::SimulationEngine::update`] once per frame and reads the HUD
//! snapshot, customer views, and drained events afterwards. Rendering,
//! input, audio, and persistence stay on the host side.
//!
//! # Example
//!
//! ```rust,no_run
//! use shopfront_core::prelude::*;
//!
//! let mut engine = SimulationEngine::new(SimConfig::default());
//!
//! loop {
//!     engine.update(1.0 / 60.0); // 60 FPS
//!     let hud = engine.hud();
//!     for event in engine.take_events() {
//!         // wire spawn/despawn/angry hooks into the scene graph
//!         let _ = event;
//!     }
//!     let _ = hud;
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod hud;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::SimConfig;
    pub use crate::engine::{SimEvent, SimulationEngine};
    pub use crate::hud::{CustomerView, HudFrame, PatienceMood};
    pub use crate::systems::MapOutcome;
}
