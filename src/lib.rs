//! Pointing experiment crate root: re-exports and module wiring.
//!
//! The crate runs a Fitts'-law style pointing study that compares raw pointing
//! with the Bubble Cursor (Grossman & Balakrishnan, 2005):
//! - `data`: toolkit-independent core (geometry, the bubble selector,
//!   techniques, setup files, layout generation, Latin square, trial
//!   sessions and the CSV trial log)
//! - `config`: experiment window configuration and palette
//! - `settings`: operator preferences persisted as YAML
//! - `app`: the egui/eframe experiment window

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod settings;

// Public re-exports for a compact external API
pub use app::{run_experiment, ExperimentApp};
pub use config::{ExperimentConfig, NamedSetup, Palette};
pub use data::bubble::{BubbleSelector, RenderParameters, SelectionState};
pub use data::geometry::{Circle, Point};
pub use data::target::Target;
pub use data::technique::{BubbleCursor, PointingTechnique, RawPointer, TechniqueKind};
pub use error::{ExperimentError, Result};
pub use settings::Settings;
