//! Painting the target canvas and mapping pointer positions into it.
//!
//! Setup coordinates are canvas coordinates: the top-left corner of the
//! allocated canvas rect is `(0, 0)`.

use eframe::egui;
use egui::{Color32, Pos2, Stroke};

use crate::config::Palette;
use crate::data::bubble::RenderParameters;
use crate::data::geometry::{Circle, Point};
use crate::data::target::Target;

#[derive(Debug, Clone, Copy)]
pub(super) struct CanvasTransform {
    pub origin: Pos2,
}

impl CanvasTransform {
    pub fn to_canvas(&self, pos: Pos2) -> Point {
        Point::new((pos.x - self.origin.x) as f64, (pos.y - self.origin.y) as f64)
    }

    pub fn to_screen(&self, p: Point) -> Pos2 {
        Pos2::new(self.origin.x + p.x as f32, self.origin.y + p.y as f32)
    }
}

/// What the canvas should show for one frame.
pub(super) struct CanvasFrame<'a> {
    pub targets: &'a [Target],
    pub base_radius: f64,
    /// Next target to acquire; lower indices are already acquired.
    pub active: Option<usize>,
    /// Target the technique currently resolves a click to.
    pub selected: Option<usize>,
    pub overlays: RenderParameters,
}

fn target_fill(palette: &Palette, idx: usize, frame: &CanvasFrame<'_>) -> Color32 {
    match frame.active {
        Some(active) if idx == active && frame.selected == Some(idx) => palette.armed_target,
        Some(active) if idx == active => palette.active_target,
        Some(active) if idx < active => palette.hit_target,
        None => palette.hit_target,
        _ => palette.idle_target,
    }
}

fn paint_overlay(painter: &egui::Painter, tf: &CanvasTransform, circle: Circle, fill: Color32) {
    if circle.radius > 0.0 {
        painter.circle_filled(tf.to_screen(circle.center), circle.radius as f32, fill);
    }
}

pub(super) fn paint(painter: &egui::Painter, tf: &CanvasTransform, palette: &Palette, frame: &CanvasFrame<'_>) {
    for (idx, target) in frame.targets.iter().enumerate() {
        let center = tf.to_screen(target.center);
        let radius = target.effective_radius(frame.base_radius) as f32;
        painter.circle_filled(center, radius, target_fill(palette, idx, frame));
        painter.circle_stroke(center, radius, Stroke::new(1.5, palette.target_border));
    }

    // Translucent overlays go on top of the targets.
    if let Some(bubble) = frame.overlays.bubble {
        paint_overlay(painter, tf, bubble, palette.overlay);
    }
    if let Some(highlight) = frame.overlays.highlight {
        paint_overlay(painter, tf, highlight, palette.overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_round_trips_through_origin() {
        let tf = CanvasTransform {
            origin: Pos2::new(20.0, 40.0),
        };
        let p = tf.to_canvas(Pos2::new(120.0, 90.0));
        assert_eq!(p, Point::new(100.0, 50.0));
        assert_eq!(tf.to_screen(p), Pos2::new(120.0, 90.0));
    }

    #[test]
    fn active_target_turns_armed_when_selected() {
        let palette = Palette::default();
        let targets = [Target::new(0.0, 0.0), Target::new(50.0, 0.0), Target::new(100.0, 0.0)];
        let frame = CanvasFrame {
            targets: &targets,
            base_radius: 10.0,
            active: Some(1),
            selected: Some(1),
            overlays: RenderParameters::default(),
        };
        assert_eq!(target_fill(&palette, 0, &frame), palette.hit_target);
        assert_eq!(target_fill(&palette, 1, &frame), palette.armed_target);
        assert_eq!(target_fill(&palette, 2, &frame), palette.idle_target);
    }
}
