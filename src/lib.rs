//! layerlens: an interactive walk-through of the layers that sit between a
//! prompt and a polished LLM answer.
//!
//! The core is front-end agnostic: [`session::SessionStore`] holds the
//! presentation state and notifies observers, [`simulator`] produces the
//! illustrative per-layer data, and [`export`], [`compare`] and [`analytics`]
//! build on top of them. The `cli` feature adds the terminal front end.

pub mod analytics;
pub mod compare;
pub mod error;
pub mod events;
pub mod export;
pub mod layers;
pub mod session;
pub mod settings;
pub mod simulator;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{LayerlensError, Result};
pub use layers::{EnabledLayers, LayerId};
pub use session::{Screen, SessionSnapshot, SessionStore, StateObserver};
pub use simulator::{simulate, LayerRecord, Simulation};
