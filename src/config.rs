//! Configuration for the experiment window.

use std::path::PathBuf;

use egui::Color32;

use crate::data::bubble::DEFAULT_HIGHLIGHT_BORDER;
use crate::data::setup::SetupFile;
use crate::data::technique::TechniqueKind;
use crate::settings::Settings;

// ─────────────────────────────────────────────────────────────────────────────
// Palette
// ─────────────────────────────────────────────────────────────────────────────

/// Colours used on the experiment canvas.
#[derive(Clone, Debug)]
pub struct Palette {
    pub background: Color32,
    /// Targets that are neither active nor acquired.
    pub idle_target: Color32,
    /// The target the participant has to click next.
    pub active_target: Color32,
    /// The active target while the technique currently selects it.
    pub armed_target: Color32,
    /// Already acquired targets.
    pub hit_target: Color32,
    pub target_border: Color32,
    /// Fill for the bubble and highlight circles.
    pub overlay: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(245, 245, 245),
            idle_target: Color32::from_rgb(230, 210, 60),
            active_target: Color32::from_rgb(53, 132, 228),
            armed_target: Color32::from_rgb(139, 0, 0),
            hit_target: Color32::from_rgb(60, 170, 80),
            target_border: Color32::from_rgb(66, 69, 183),
            overlay: Color32::from_rgba_unmultiplied(170, 170, 170, 50),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Loaded setups
// ─────────────────────────────────────────────────────────────────────────────

/// A setup file together with the label used for it in logs.
#[derive(Clone, Debug)]
pub struct NamedSetup {
    pub label: String,
    pub setup: SetupFile,
}

impl NamedSetup {
    /// Label a setup by its file stem.
    pub fn from_path(path: &std::path::Path, setup: SetupFile) -> Self {
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "setup".to_string());
        Self { label, setup }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ExperimentConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration for an experiment run.
///
/// | Field          | Purpose |
/// |----------------|---------|
/// | `setups`       | Target layouts, one condition per technique and setup |
/// | `techniques`   | Techniques compared in this run |
/// | `participant`  | Participant id, also selects the Latin-square row |
/// | `palette`      | Canvas colours |
pub struct ExperimentConfig {
    // ── Window ───────────────────────────────────────────────────────────────
    /// Native window title.
    pub title: String,
    /// Size of the target canvas in points; setup coordinates live here.
    pub canvas_size: [f32; 2],
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,

    // ── Study design ─────────────────────────────────────────────────────────
    pub participant_id: u32,
    pub techniques: Vec<TechniqueKind>,
    pub setups: Vec<NamedSetup>,
    /// Ring width drawn around the nearest target by the bubble cursor.
    pub highlight_border: f64,

    // ── Output ───────────────────────────────────────────────────────────────
    pub log_path: PathBuf,
    /// Show the trial-time chart on the final screen.
    pub show_results: bool,

    // ── Appearance ───────────────────────────────────────────────────────────
    pub palette: Palette,
}

impl ExperimentConfig {
    /// Seed participant id, log path and border from stored settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            participant_id: settings.last_participant_id.saturating_add(1),
            log_path: settings.log_path.clone(),
            highlight_border: settings.highlight_border,
            ..Default::default()
        }
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            title: "Pointing Experiment".to_string(),
            canvas_size: [800.0, 600.0],
            native_options: None,

            participant_id: 1,
            techniques: TechniqueKind::all(),
            setups: Vec::new(),
            highlight_border: DEFAULT_HIGHLIGHT_BORDER,

            log_path: PathBuf::from("pointingExperimentLog.csv"),
            show_results: true,

            palette: Palette::default(),
        }
    }
}
