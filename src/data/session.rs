//! Trial sequencing for one condition of the experiment.
//!
//! Targets are acquired in index order. A trial runs from the previous hit (or
//! from [`TrialSession::begin`]) to the next click that the active technique
//! resolves to the active target. Clicks that select anything else count as
//! misses for the running trial.

use chrono::{DateTime, Local};

use super::geometry::Point;
use super::latin_square::balanced_order;
use super::technique::TechniqueKind;

/// One cell of the technique × layout design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub technique: TechniqueKind,
    /// Index into the list of loaded setups.
    pub setup_index: usize,
    pub setup_label: String,
}

impl Condition {
    pub fn label(&self) -> String {
        format!("{}/{}", self.technique, self.setup_label)
    }
}

/// All technique × setup combinations, counterbalanced for `participant`.
pub fn plan_conditions(
    techniques: &[TechniqueKind],
    setup_labels: &[String],
    participant: u32,
) -> Vec<Condition> {
    let cells: Vec<Condition> = techniques
        .iter()
        .flat_map(|&technique| {
            setup_labels
                .iter()
                .enumerate()
                .map(move |(setup_index, label)| Condition {
                    technique,
                    setup_index,
                    setup_label: label.clone(),
                })
        })
        .collect();
    balanced_order(&cells, participant as usize)
}

/// A completed trial, ready to be written to the trial log.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialRecord {
    pub timestamp: DateTime<Local>,
    pub participant_id: u32,
    pub condition: String,
    pub technique: TechniqueKind,
    pub trial: usize,
    pub target_index: usize,
    pub pointer_start: Point,
    pub pointer_end: Point,
    pub start_ms: f64,
    pub end_ms: f64,
    pub missed_clicks: u32,
}

impl TrialRecord {
    pub fn duration_s(&self) -> f64 {
        (self.end_ms - self.start_ms) / 1000.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Session not started or already finished.
    Ignored,
    Miss,
    Hit(TrialRecord),
    /// The last target was hit.
    Finished(TrialRecord),
}

#[derive(Debug, Clone)]
pub struct TrialSession {
    participant_id: u32,
    condition: Condition,
    target_count: usize,
    current: usize,
    trial_start: Option<(Point, f64)>,
    missed: u32,
    records: Vec<TrialRecord>,
}

impl TrialSession {
    pub fn new(participant_id: u32, condition: Condition, target_count: usize) -> Self {
        Self {
            participant_id,
            condition,
            target_count,
            current: 0,
            trial_start: None,
            missed: 0,
            records: Vec::new(),
        }
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Start timing the first trial.
    pub fn begin(&mut self, pointer: Point, now_ms: f64) {
        if self.trial_start.is_none() && !self.is_finished() {
            log::info!(
                "Participant {} starts condition {}",
                self.participant_id,
                self.condition.label()
            );
            self.trial_start = Some((pointer, now_ms));
        }
    }

    pub fn is_started(&self) -> bool {
        self.trial_start.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.target_count
    }

    /// Index of the target the participant has to acquire next.
    pub fn current_target(&self) -> Option<usize> {
        (!self.is_finished()).then_some(self.current)
    }

    pub fn missed_clicks(&self) -> u32 {
        self.missed
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Evaluate a click at `pointer` where the technique selected `selected`.
    pub fn register_click(&mut self, pointer: Point, selected: Option<usize>, now_ms: f64) -> ClickOutcome {
        let Some((start_pointer, start_ms)) = self.trial_start else {
            return ClickOutcome::Ignored;
        };
        if self.is_finished() {
            return ClickOutcome::Ignored;
        }
        if selected != Some(self.current) {
            self.missed += 1;
            log::debug!(
                "Missed target {} (selected {:?}), {} misses",
                self.current,
                selected,
                self.missed
            );
            return ClickOutcome::Miss;
        }

        let record = TrialRecord {
            timestamp: Local::now(),
            participant_id: self.participant_id,
            condition: self.condition.label(),
            technique: self.condition.technique,
            trial: self.records.len() + 1,
            target_index: self.current,
            pointer_start: start_pointer,
            pointer_end: pointer,
            start_ms,
            end_ms: now_ms,
            missed_clicks: self.missed,
        };
        self.records.push(record.clone());
        self.current += 1;
        self.missed = 0;
        self.trial_start = Some((pointer, now_ms));

        if self.is_finished() {
            log::info!("Condition {} finished", self.condition.label());
            ClickOutcome::Finished(record)
        } else {
            ClickOutcome::Hit(record)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition() -> Condition {
        Condition {
            technique: TechniqueKind::Bubble,
            setup_index: 0,
            setup_label: "grid".to_string(),
        }
    }

    #[test]
    fn clicks_before_begin_are_ignored() {
        let mut s = TrialSession::new(1, condition(), 2);
        assert_eq!(s.register_click(Point::new(0.0, 0.0), Some(0), 5.0), ClickOutcome::Ignored);
        assert_eq!(s.current_target(), Some(0));
    }

    #[test]
    fn misses_are_counted_per_trial() {
        let mut s = TrialSession::new(7, condition(), 2);
        s.begin(Point::new(1.0, 1.0), 1000.0);
        assert_eq!(s.register_click(Point::new(5.0, 5.0), None, 1100.0), ClickOutcome::Miss);
        assert_eq!(s.register_click(Point::new(5.0, 5.0), Some(1), 1200.0), ClickOutcome::Miss);
        assert_eq!(s.missed_clicks(), 2);

        let ClickOutcome::Hit(rec) = s.register_click(Point::new(9.0, 9.0), Some(0), 1500.0) else {
            panic!("expected hit");
        };
        assert_eq!(rec.trial, 1);
        assert_eq!(rec.missed_clicks, 2);
        assert_eq!(rec.pointer_start, Point::new(1.0, 1.0));
        assert_eq!(rec.pointer_end, Point::new(9.0, 9.0));
        assert_eq!(rec.duration_s(), 0.5);
        assert_eq!(rec.condition, "bubble/grid");
        assert_eq!(s.missed_clicks(), 0);
        assert_eq!(s.current_target(), Some(1));
    }

    #[test]
    fn session_without_targets_is_finished_up_front() {
        let mut s = TrialSession::new(1, condition(), 0);
        s.begin(Point::default(), 0.0);
        assert!(s.is_finished());
        assert!(!s.is_started());
        assert_eq!(s.current_target(), None);
    }

    #[test]
    fn last_hit_finishes() {
        let mut s = TrialSession::new(1, condition(), 1);
        s.begin(Point::default(), 0.0);
        assert!(matches!(
            s.register_click(Point::default(), Some(0), 10.0),
            ClickOutcome::Finished(_)
        ));
        assert!(s.is_finished());
        assert_eq!(s.current_target(), None);
        assert_eq!(s.register_click(Point::default(), Some(0), 20.0), ClickOutcome::Ignored);
        assert_eq!(s.records().len(), 1);
    }

    #[test]
    fn empty_layout_is_finished_immediately() {
        let s = TrialSession::new(1, condition(), 0);
        assert!(s.is_finished());
    }

    #[test]
    fn plan_covers_all_cells() {
        let labels = vec!["a".to_string(), "b".to_string()];
        let plan = plan_conditions(&TechniqueKind::all(), &labels, 0);
        assert_eq!(plan.len(), 4);
        let first = plan_conditions(&TechniqueKind::all(), &labels, 1);
        assert_ne!(plan[0], first[0]);
        for c in &first {
            assert!(plan.contains(c));
        }
    }
}
