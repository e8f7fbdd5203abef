//! The experiment GUI.
//!
//! | Sub-module           | Responsibility |
//! | -------------------- | -------------- |
//! | [`experiment_app`]   | [`ExperimentApp`] state, condition lifecycle and the canvas event loop |
//! | [`canvas`]           | Painting targets and technique overlays, canvas coordinate mapping |
//! | [`screens`]          | Welcome, between-conditions and results screens |
//! | [`run`]              | Top-level [`run_experiment()`] entry point and icon loading |

mod canvas;
mod experiment_app;
mod run;
mod screens;

pub use experiment_app::ExperimentApp;
pub use run::run_experiment;

/// Which page the window currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Running,
    BetweenConditions,
    Finished,
}
