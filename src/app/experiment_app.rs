//! Standalone experiment application that implements [`eframe::App`].
//!
//! [`ExperimentApp`] walks a participant through the counterbalanced list of
//! conditions. Each condition shows one setup's targets and routes every
//! pointer event on the canvas through the condition's pointing technique.
//! Hits are appended to the CSV trial log as they happen.

use std::path::PathBuf;
use std::time::Instant;

use eframe::egui;

use crate::config::{ExperimentConfig, NamedSetup};
use crate::data::bubble::RenderParameters;
use crate::data::geometry::Point;
use crate::data::session::{plan_conditions, ClickOutcome, Condition, TrialRecord, TrialSession};
use crate::data::setup::SetupFile;
use crate::data::target::Target;
use crate::data::technique::PointingTechnique;
use crate::data::trial_log::TrialLogger;
use crate::error::Result;
use crate::settings::Settings;

use super::canvas::{self, CanvasFrame, CanvasTransform};
use super::Screen;

/// State of the condition currently on screen.
pub(super) struct RunningCondition {
    pub targets: Vec<Target>,
    pub base_radius: f64,
    pub technique: Box<dyn PointingTechnique>,
    pub session: TrialSession,
}

pub struct ExperimentApp {
    pub(super) config: ExperimentConfig,
    pub(super) settings: Settings,
    pub(super) screen: Screen,
    pub(super) plan: Vec<Condition>,
    pub(super) condition_idx: usize,
    pub(super) running: Option<RunningCondition>,
    /// Records of every finished trial in this run, in order.
    pub(super) completed: Vec<TrialRecord>,
    pub(super) status: Option<String>,
    last_pointer: Option<Point>,
    clock: Instant,
}

impl ExperimentApp {
    pub fn new(config: ExperimentConfig, settings: Settings) -> Self {
        Self {
            config,
            settings,
            screen: Screen::Welcome,
            plan: Vec::new(),
            condition_idx: 0,
            running: None,
            completed: Vec::new(),
            status: None,
            last_pointer: None,
            clock: Instant::now(),
        }
    }

    fn now_ms(&self) -> f64 {
        self.clock.elapsed().as_secs_f64() * 1000.0
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Setup management
    // ─────────────────────────────────────────────────────────────────────────

    pub(super) fn load_setups(&mut self, paths: Vec<PathBuf>) {
        for path in paths {
            match SetupFile::load(&path) {
                Ok(setup) => self.config.setups.push(NamedSetup::from_path(&path, setup)),
                Err(e) => {
                    log::error!("Failed to load setup {:?}: {e}", path);
                    self.status = Some(format!("Failed to load {}: {e}", path.display()));
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Condition lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    pub(super) fn start_experiment(&mut self) {
        let labels: Vec<String> = self.config.setups.iter().map(|s| s.label.clone()).collect();
        self.plan = plan_conditions(&self.config.techniques, &labels, self.config.participant_id);
        self.completed.clear();
        self.status = None;
        log::info!(
            "Participant {}: {}",
            self.config.participant_id,
            self.plan.iter().map(Condition::label).collect::<Vec<_>>().join(", ")
        );
        self.start_condition(0);
    }

    fn build_condition(&self, condition: &Condition) -> Result<RunningCondition> {
        let setup = &self.config.setups[condition.setup_index].setup;
        let base_radius = setup.base_radius()?;
        let targets = setup.to_targets()?;
        let technique =
            condition
                .technique
                .build(targets.clone(), base_radius, self.config.highlight_border)?;
        let session = TrialSession::new(self.config.participant_id, condition.clone(), targets.len());
        Ok(RunningCondition {
            targets,
            base_radius,
            technique,
            session,
        })
    }

    pub(super) fn start_condition(&mut self, idx: usize) {
        let Some(condition) = self.plan.get(idx).cloned() else {
            self.finish();
            return;
        };
        match self.build_condition(&condition) {
            Ok(running) if running.session.is_finished() => {
                log::warn!("Condition {} has no targets, skipping it", condition.label());
                self.condition_idx = idx;
                self.start_condition(idx + 1);
            }
            Ok(mut running) => {
                let start = self.last_pointer.unwrap_or_default();
                running.technique.on_pointer_moved(start.x, start.y);
                running.session.begin(start, self.now_ms());
                self.condition_idx = idx;
                self.running = Some(running);
                self.screen = Screen::Running;
            }
            Err(e) => {
                log::error!("Cannot start condition {}: {e}", condition.label());
                self.status = Some(format!("Cannot start {}: {e}", condition.label()));
                self.running = None;
                self.screen = Screen::Welcome;
            }
        }
    }

    fn condition_finished(&mut self) {
        self.running = None;
        if self.condition_idx + 1 < self.plan.len() {
            self.screen = Screen::BetweenConditions;
        } else {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.running = None;
        self.screen = Screen::Finished;
        self.settings.last_participant_id = self.config.participant_id;
        self.settings.log_path = self.config.log_path.clone();
        self.settings.highlight_border = self.config.highlight_border;
        if let Err(e) = self.settings.save_to_default_path() {
            log::warn!("Could not save settings: {e}");
        }
    }

    pub(super) fn abort(&mut self) {
        log::warn!("Run for participant {} aborted", self.config.participant_id);
        self.running = None;
        self.screen = Screen::Welcome;
    }

    pub(super) fn reset_for_next_participant(&mut self) {
        self.config.participant_id = self.config.participant_id.saturating_add(1);
        self.completed.clear();
        self.plan.clear();
        self.screen = Screen::Welcome;
    }

    fn record_trial(&mut self, record: TrialRecord) {
        let logger = TrialLogger::new(self.config.log_path.clone());
        if let Err(e) = logger.append(std::slice::from_ref(&record)) {
            log::error!("Failed to write trial log {:?}: {e}", logger.path());
            self.status = Some(format!("Failed to write trial log: {e}"));
        }
        self.completed.push(record);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Running screen
    // ─────────────────────────────────────────────────────────────────────────

    pub(super) fn show_canvas(&mut self, ui: &mut egui::Ui) {
        let size = egui::vec2(self.config.canvas_size[0], self.config.canvas_size[1]);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
        painter.rect_filled(response.rect, 0.0, self.config.palette.background);
        let tf = CanvasTransform {
            origin: response.rect.min,
        };
        let now = self.now_ms();

        let mut outcome = None;
        if let Some(running) = self.running.as_mut() {
            if let Some(pos) = response.hover_pos() {
                let p = tf.to_canvas(pos);
                if self.last_pointer != Some(p) {
                    running.technique.on_pointer_moved(p.x, p.y);
                    self.last_pointer = Some(p);
                }
            }
            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let p = tf.to_canvas(pos);
                    running.technique.on_pointer_moved(p.x, p.y);
                    let selected = running.technique.selected_index();
                    outcome = Some(running.session.register_click(p, selected, now));
                }
            }

            let frame = CanvasFrame {
                targets: &running.targets,
                base_radius: running.base_radius,
                active: running.session.current_target(),
                selected: running.technique.selected_index(),
                overlays: if response.hovered() {
                    running.technique.render_parameters()
                } else {
                    RenderParameters::default()
                },
            };
            canvas::paint(&painter, &tf, &self.config.palette, &frame);
        }

        match outcome {
            Some(ClickOutcome::Hit(record)) => self.record_trial(record),
            Some(ClickOutcome::Finished(record)) => {
                self.record_trial(record);
                self.condition_finished();
            }
            Some(ClickOutcome::Miss) | Some(ClickOutcome::Ignored) | None => {}
        }
    }
}

impl eframe::App for ExperimentApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.screen == Screen::Running && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.abort();
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.screen {
            Screen::Welcome => self.show_welcome(ui),
            Screen::Running => self.show_running(ui),
            Screen::BetweenConditions => self.show_between(ui),
            Screen::Finished => self.show_finished(ui),
        });
    }
}
