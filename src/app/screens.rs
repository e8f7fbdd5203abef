//! Non-canvas screens: welcome form, pause between conditions, results.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, Points};

use crate::data::session::TrialRecord;
use crate::data::technique::TechniqueKind;

use super::experiment_app::ExperimentApp;

/// Mean duration and miss count per condition label, in first-seen order.
pub(super) fn summarize(records: &[TrialRecord]) -> Vec<(String, f64, u32)> {
    let mut out: Vec<(String, f64, u32, usize)> = Vec::new();
    for r in records {
        match out.iter_mut().find(|(label, ..)| *label == r.condition) {
            Some(entry) => {
                entry.1 += r.duration_s();
                entry.2 += r.missed_clicks;
                entry.3 += 1;
            }
            None => out.push((r.condition.clone(), r.duration_s(), r.missed_clicks, 1)),
        }
    }
    out.into_iter()
        .map(|(label, total, missed, n)| (label, total / n as f64, missed))
        .collect()
}

impl ExperimentApp {
    fn show_status(&self, ui: &mut egui::Ui) {
        if let Some(msg) = &self.status {
            ui.colored_label(egui::Color32::from_rgb(200, 40, 40), msg);
        }
    }

    pub(super) fn show_welcome(&mut self, ui: &mut egui::Ui) {
        ui.heading("Pointing Experiment");
        ui.label("Click the highlighted target as quickly and accurately as possible. Press Esc to abort.");
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Participant ID");
            ui.add(egui::DragValue::new(&mut self.config.participant_id).range(1..=9999));
        });

        ui.horizontal(|ui| {
            ui.label("Techniques");
            for kind in [TechniqueKind::Raw, TechniqueKind::Bubble] {
                let mut on = self.config.techniques.contains(&kind);
                if ui.checkbox(&mut on, kind.to_string()).changed() {
                    if on {
                        self.config.techniques.push(kind);
                    } else {
                        self.config.techniques.retain(|k| *k != kind);
                    }
                }
            }
        });

        ui.label("Setups");
        let mut remove = None;
        for (i, named) in self.config.setups.iter().enumerate() {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "{} ({} targets)",
                    named.label, named.setup.number_of_circles
                ));
                if ui.small_button(egui_phosphor::regular::TRASH).clicked() {
                    remove = Some(i);
                }
            });
        }
        if let Some(i) = remove {
            self.config.setups.remove(i);
        }

        let load_label = format!("{} Load setup…", egui_phosphor::regular::FOLDER_OPEN);
        if ui.button(load_label).clicked() {
            if let Some(paths) = rfd::FileDialog::new()
                .add_filter("Setup", &["json"])
                .pick_files()
            {
                self.load_setups(paths);
            }
        }

        ui.separator();
        let ready = !self.config.setups.is_empty() && !self.config.techniques.is_empty();
        let start_label = format!("{} Start", egui_phosphor::regular::PLAY);
        if ui.add_enabled(ready, egui::Button::new(start_label)).clicked() {
            self.start_experiment();
        }
        self.show_status(ui);
    }

    pub(super) fn show_running(&mut self, ui: &mut egui::Ui) {
        if let Some(running) = &self.running {
            ui.label(format!(
                "Condition {} of {} · target {} of {}",
                self.condition_idx + 1,
                self.plan.len(),
                (running.session.records().len() + 1).min(running.session.target_count()),
                running.session.target_count()
            ));
        }
        self.show_canvas(ui);
        self.show_status(ui);
    }

    pub(super) fn show_between(&mut self, ui: &mut egui::Ui) {
        ui.heading("Short break");
        if let Some(next) = self.plan.get(self.condition_idx + 1) {
            ui.label(format!(
                "Next: condition {} of {} ({})",
                self.condition_idx + 2,
                self.plan.len(),
                next.technique
            ));
        }
        let label = format!("{} Continue", egui_phosphor::regular::ARROW_RIGHT);
        if ui.button(label).clicked() {
            self.start_condition(self.condition_idx + 1);
        }
        self.show_status(ui);
    }

    pub(super) fn show_finished(&mut self, ui: &mut egui::Ui) {
        ui.heading(format!("{} Done, thank you!", egui_phosphor::regular::CHECK_CIRCLE));
        ui.label(format!("Trials were written to {}", self.config.log_path.display()));

        egui::Grid::new("summary").striped(true).show(ui, |ui| {
            ui.strong("Condition");
            ui.strong("Mean time [s]");
            ui.strong("Missed clicks");
            ui.end_row();
            for (label, mean, missed) in summarize(&self.completed) {
                ui.label(label);
                ui.label(format!("{mean:.3}"));
                ui.label(missed.to_string());
                ui.end_row();
            }
        });

        if self.config.show_results && !self.completed.is_empty() {
            Plot::new("trial_times")
                .legend(Legend::default())
                .x_axis_label("Trial")
                .y_axis_label("Time [s]")
                .height(260.0)
                .show(ui, |plot_ui| {
                    for (label, _, _) in summarize(&self.completed) {
                        let pts: Vec<[f64; 2]> = self
                            .completed
                            .iter()
                            .filter(|r| r.condition == label)
                            .map(|r| [r.trial as f64, r.duration_s()])
                            .collect();
                        plot_ui.line(Line::new(label.clone(), pts.clone()));
                        plot_ui.points(Points::new(label, pts).radius(3.0));
                    }
                });
        }

        if ui.button("Next participant").clicked() {
            self.reset_for_next_participant();
        }
        self.show_status(ui);
    }
}
