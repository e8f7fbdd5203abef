//! Bubble Cursor target selection (Grossman & Balakrishnan, 2005).
//!
//! On every pointer move the selector scans all targets, keeps the nearest and
//! second-nearest by Euclidean distance to the target centre, and sizes the
//! activation area ("bubble") around the pointer so that it always captures
//! exactly one target:
//!
//! - containment distance: `dist(best) + radius(best)`, the radius needed to
//!   fully enclose the nearest target;
//! - intersection distance: `dist(second) - radius(second)`, the largest radius
//!   that does not reach into the second-nearest target.
//!
//! The bubble radius is the smaller of the two. When containment exceeds
//! intersection the bubble cannot wrap the nearest target, so the renderer
//! draws a highlight ring around it instead.
//!
//! The selector never draws anything itself. Hosts query
//! [`BubbleSelector::render_parameters`] and paint the returned circles.

use super::geometry::{Circle, Point};
use super::target::Target;
use crate::error::{ExperimentError, Result};

/// Border added around the nearest target when it needs a highlight ring.
pub const DEFAULT_HIGHLIGHT_BORDER: f64 = 10.0;

/// The drawn bubble is shrunk by this amount so it does not visually graze
/// the second-nearest target.
pub const BUBBLE_VISUAL_INSET: f64 = 2.0;

/// Result of one full recomputation. Target references are indices into the
/// selector's target collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionState {
    pub best: Option<usize>,
    pub second_best: Option<usize>,
    pub dist_best: f64,
    pub dist_second_best: f64,
    /// Activation radius. Infinite when there are no targets; only meaningful
    /// when `best` is set.
    pub bubble_radius: f64,
    pub highlight_active: bool,
}

/// Geometry the host needs to draw the overlays for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderParameters {
    pub bubble: Option<Circle>,
    pub highlight: Option<Circle>,
}

impl RenderParameters {
    pub fn is_empty(&self) -> bool {
        self.bubble.is_none() && self.highlight.is_none()
    }
}

/// Owns a read-only target set and the selection derived from the latest
/// pointer sample.
#[derive(Debug, Clone)]
pub struct BubbleSelector {
    targets: Vec<Target>,
    base_radius: f64,
    highlight_border: f64,
    pointer: Option<Point>,
    state: Option<SelectionState>,
}

impl BubbleSelector {
    /// Create a selector with the default highlight border.
    pub fn new(targets: Vec<Target>, base_radius: f64) -> Result<Self> {
        Self::with_border(targets, base_radius, DEFAULT_HIGHLIGHT_BORDER)
    }

    pub fn with_border(targets: Vec<Target>, base_radius: f64, highlight_border: f64) -> Result<Self> {
        if !(base_radius.is_finite() && base_radius > 0.0) {
            return Err(ExperimentError::InvalidConfiguration(format!(
                "base target radius must be positive, got {base_radius}"
            )));
        }
        if !(highlight_border.is_finite() && highlight_border >= 0.0) {
            return Err(ExperimentError::InvalidConfiguration(format!(
                "highlight border must be non-negative, got {highlight_border}"
            )));
        }
        if let Some((i, r)) = targets
            .iter()
            .enumerate()
            .find_map(|(i, t)| t.radius.filter(|r| !(r.is_finite() && *r > 0.0)).map(|r| (i, r)))
        {
            return Err(ExperimentError::InvalidConfiguration(format!(
                "target {i} has non-positive radius {r}"
            )));
        }
        Ok(Self {
            targets,
            base_radius,
            highlight_border,
            pointer: None,
            state: None,
        })
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn base_radius(&self) -> f64 {
        self.base_radius
    }

    pub fn highlight_border(&self) -> f64 {
        self.highlight_border
    }

    /// Latest pointer sample, `None` until the pointer has moved once.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Store the pointer sample and recompute the selection from scratch.
    pub fn on_pointer_moved(&mut self, x: f64, y: f64) {
        let pointer = Point::new(x, y);
        self.pointer = Some(pointer);
        let state = self.compute(pointer);
        log::trace!(
            "bubble at {pointer}: best={:?} second={:?} radius={:.2} highlight={}",
            state.best,
            state.second_best,
            state.bubble_radius,
            state.highlight_active
        );
        self.state = Some(state);
    }

    fn radius_of(&self, idx: Option<usize>) -> f64 {
        idx.and_then(|i| self.targets.get(i))
            .map(|t| t.effective_radius(self.base_radius))
            .unwrap_or(self.base_radius)
    }

    fn compute(&self, pointer: Point) -> SelectionState {
        let mut best: Option<usize> = None;
        let mut second_best: Option<usize> = None;
        let mut dist_best = f64::INFINITY;
        let mut dist_second_best = f64::INFINITY;

        // Strict comparisons: on equal distance the earlier target wins.
        for (i, t) in self.targets.iter().enumerate() {
            let d = pointer.distance(t.center);
            if d < dist_best {
                if best.is_some() {
                    second_best = best;
                    dist_second_best = dist_best;
                }
                best = Some(i);
                dist_best = d;
            } else if d < dist_second_best {
                second_best = Some(i);
                dist_second_best = d;
            }
        }

        let containment = dist_best + self.radius_of(best);
        let intersection = dist_second_best - self.radius_of(second_best);

        SelectionState {
            best,
            second_best,
            dist_best,
            dist_second_best,
            bubble_radius: containment.min(intersection),
            highlight_active: containment > intersection,
        }
    }

    /// Selection from the last update, `None` before the first pointer move.
    pub fn state(&self) -> Option<&SelectionState> {
        self.state.as_ref()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.and_then(|s| s.best)
    }

    /// The nearest target, if any.
    pub fn selected_target(&self) -> Option<&Target> {
        self.selected_index().and_then(|i| self.targets.get(i))
    }

    pub fn bubble_radius(&self) -> Option<f64> {
        self.state.map(|s| s.bubble_radius)
    }

    pub fn highlight_active(&self) -> bool {
        self.state.is_some_and(|s| s.highlight_active)
    }

    /// Circles to draw for the current state. Empty before the first pointer
    /// move and whenever there is no selected target.
    pub fn render_parameters(&self) -> RenderParameters {
        let (Some(pointer), Some(state)) = (self.pointer, self.state) else {
            return RenderParameters::default();
        };
        let Some(best) = state.best.and_then(|i| self.targets.get(i)) else {
            return RenderParameters::default();
        };

        let bubble = Circle::new(pointer, (state.bubble_radius - BUBBLE_VISUAL_INSET).max(0.0));
        let highlight = state.highlight_active.then(|| {
            Circle::new(
                best.center,
                best.effective_radius(self.base_radius) + self.highlight_border,
            )
        });
        RenderParameters {
            bubble: Some(bubble),
            highlight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> BubbleSelector {
        BubbleSelector::new(vec![Target::new(100.0, 100.0), Target::new(300.0, 100.0)], 20.0).unwrap()
    }

    #[test]
    fn rejects_non_positive_base_radius() {
        assert!(matches!(
            BubbleSelector::new(vec![], 0.0),
            Err(ExperimentError::InvalidConfiguration(_))
        ));
        assert!(BubbleSelector::new(vec![], -3.0).is_err());
        assert!(BubbleSelector::new(vec![], f64::NAN).is_err());
    }

    #[test]
    fn rejects_bad_per_target_radius() {
        let targets = vec![Target::new(0.0, 0.0), Target::with_radius(10.0, 0.0, 0.0)];
        assert!(BubbleSelector::new(targets, 5.0).is_err());
    }

    #[test]
    fn nothing_to_render_before_first_move() {
        let sel = pair();
        assert!(sel.state().is_none());
        assert!(sel.selected_target().is_none());
        assert!(sel.render_parameters().is_empty());
        assert!(!sel.highlight_active());
    }

    #[test]
    fn near_first_target() {
        let mut sel = pair();
        sel.on_pointer_moved(110.0, 100.0);
        let s = *sel.state().unwrap();
        assert_eq!(s.best, Some(0));
        assert_eq!(s.second_best, Some(1));
        assert_eq!(s.dist_best, 10.0);
        assert_eq!(s.dist_second_best, 190.0);
        assert_eq!(s.bubble_radius, 30.0);
        assert!(!s.highlight_active);

        let rp = sel.render_parameters();
        assert_eq!(rp.bubble, Some(Circle::new(Point::new(110.0, 100.0), 28.0)));
        assert_eq!(rp.highlight, None);
    }

    #[test]
    fn midpoint_prefers_first_and_highlights() {
        let mut sel = pair();
        sel.on_pointer_moved(200.0, 100.0);
        let s = *sel.state().unwrap();
        assert_eq!(s.best, Some(0));
        assert_eq!(s.second_best, Some(1));
        assert_eq!(s.bubble_radius, 80.0);
        assert!(s.highlight_active);

        let rp = sel.render_parameters();
        assert_eq!(rp.highlight, Some(Circle::new(Point::new(100.0, 100.0), 30.0)));
    }

    #[test]
    fn highlight_clears_when_target_is_containable_again() {
        let mut sel = pair();
        sel.on_pointer_moved(200.0, 100.0);
        assert!(sel.highlight_active());
        sel.on_pointer_moved(105.0, 100.0);
        assert!(!sel.highlight_active());
    }

    #[test]
    fn single_target_uses_containment() {
        let mut sel = BubbleSelector::new(vec![Target::new(0.0, 0.0)], 15.0).unwrap();
        sel.on_pointer_moved(5.0, 0.0);
        let s = *sel.state().unwrap();
        assert_eq!(s.best, Some(0));
        assert_eq!(s.second_best, None);
        assert_eq!(s.dist_best, 5.0);
        assert!(s.dist_second_best.is_infinite());
        assert_eq!(s.bubble_radius, 20.0);
        assert!(!s.highlight_active);
    }

    #[test]
    fn empty_set_selects_nothing() {
        let mut sel = BubbleSelector::new(vec![], 10.0).unwrap();
        sel.on_pointer_moved(42.0, 7.0);
        assert!(sel.selected_target().is_none());
        assert!(sel.render_parameters().is_empty());
        assert_eq!(sel.pointer(), Some(Point::new(42.0, 7.0)));
    }

    #[test]
    fn per_target_radius_feeds_formula() {
        let targets = vec![Target::with_radius(0.0, 0.0, 5.0), Target::with_radius(100.0, 0.0, 30.0)];
        let mut sel = BubbleSelector::new(targets, 20.0).unwrap();
        sel.on_pointer_moved(10.0, 0.0);
        let s = *sel.state().unwrap();
        // containment 10 + 5, intersection 90 - 30
        assert_eq!(s.bubble_radius, 15.0);
        assert!(!s.highlight_active);
    }

    #[test]
    fn highlight_ring_wraps_the_nearest_targets_own_radius() {
        let targets = vec![Target::with_radius(0.0, 0.0, 5.0), Target::with_radius(60.0, 0.0, 30.0)];
        let mut sel = BubbleSelector::with_border(targets, 20.0, 4.0).unwrap();
        sel.on_pointer_moved(25.0, 0.0);
        // containment 25 + 5, intersection 35 - 30
        assert!(sel.highlight_active());
        let rp = sel.render_parameters();
        assert_eq!(rp.highlight, Some(Circle::new(Point::new(0.0, 0.0), 9.0)));
        assert_eq!(rp.bubble, Some(Circle::new(Point::new(25.0, 0.0), 3.0)));
    }

    #[test]
    fn border_must_be_non_negative_and_finite() {
        for border in [-1.0, f64::NAN, f64::INFINITY] {
            let err = BubbleSelector::with_border(vec![Target::new(0.0, 0.0)], 20.0, border).unwrap_err();
            assert!(matches!(err, ExperimentError::InvalidConfiguration(_)), "{border}");
        }
        assert!(BubbleSelector::with_border(vec![Target::new(0.0, 0.0)], 20.0, 0.0).is_ok());
    }

    #[test]
    fn coincident_centres_give_negative_radius_but_clamped_drawing() {
        let targets = vec![Target::new(50.0, 50.0), Target::new(50.0, 50.0)];
        let mut sel = BubbleSelector::new(targets, 10.0).unwrap();
        sel.on_pointer_moved(50.0, 50.0);
        let s = *sel.state().unwrap();
        assert_eq!(s.best, Some(0));
        assert_eq!(s.second_best, Some(1));
        assert_eq!(s.bubble_radius, -10.0);
        assert!(s.highlight_active);
        assert_eq!(sel.render_parameters().bubble.map(|c| c.radius), Some(0.0));
    }
}
