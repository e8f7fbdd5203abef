//! Pointing techniques compared in the study.
//!
//! A technique receives every pointer sample in canvas coordinates and reports
//! which target (by index) a click at the current position would acquire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bubble::{BubbleSelector, RenderParameters};
use super::geometry::Point;
use super::target::Target;
use crate::error::{ExperimentError, Result};

pub trait PointingTechnique {
    fn name(&self) -> &'static str;
    fn on_pointer_moved(&mut self, x: f64, y: f64);
    fn selected_index(&self) -> Option<usize>;

    // Techniques without overlays draw nothing.
    fn render_parameters(&self) -> RenderParameters {
        RenderParameters::default()
    }
}

/// Plain pointing: a target is selected only while the pointer is inside it.
#[derive(Debug, Clone)]
pub struct RawPointer {
    targets: Vec<Target>,
    base_radius: f64,
    pointer: Option<Point>,
}

impl RawPointer {
    pub fn new(targets: Vec<Target>, base_radius: f64) -> Result<Self> {
        if !(base_radius.is_finite() && base_radius > 0.0) {
            return Err(ExperimentError::InvalidConfiguration(format!(
                "base target radius must be positive, got {base_radius}"
            )));
        }
        Ok(Self {
            targets,
            base_radius,
            pointer: None,
        })
    }
}

impl PointingTechnique for RawPointer {
    fn name(&self) -> &'static str {
        "raw"
    }

    fn on_pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer = Some(Point::new(x, y));
    }

    fn selected_index(&self) -> Option<usize> {
        let p = self.pointer?;
        self.targets
            .iter()
            .position(|t| t.footprint(self.base_radius).contains(p))
    }
}

/// The Bubble Cursor; see [`BubbleSelector`].
#[derive(Debug, Clone)]
pub struct BubbleCursor {
    selector: BubbleSelector,
}

impl BubbleCursor {
    pub fn new(targets: Vec<Target>, base_radius: f64, highlight_border: f64) -> Result<Self> {
        Ok(Self {
            selector: BubbleSelector::with_border(targets, base_radius, highlight_border)?,
        })
    }

    pub fn selector(&self) -> &BubbleSelector {
        &self.selector
    }
}

impl PointingTechnique for BubbleCursor {
    fn name(&self) -> &'static str {
        "bubble"
    }

    fn on_pointer_moved(&mut self, x: f64, y: f64) {
        self.selector.on_pointer_moved(x, y);
    }

    fn selected_index(&self) -> Option<usize> {
        self.selector.selected_index()
    }

    fn render_parameters(&self) -> RenderParameters {
        self.selector.render_parameters()
    }
}

/// Identifies a technique in configuration, CLI arguments and logs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechniqueKind {
    Raw,
    Bubble,
}

impl TechniqueKind {
    pub fn all() -> Vec<TechniqueKind> {
        vec![TechniqueKind::Raw, TechniqueKind::Bubble]
    }

    pub fn build(
        self,
        targets: Vec<Target>,
        base_radius: f64,
        highlight_border: f64,
    ) -> Result<Box<dyn PointingTechnique>> {
        let technique: Box<dyn PointingTechnique> = match self {
            TechniqueKind::Raw => Box::new(RawPointer::new(targets, base_radius)?),
            TechniqueKind::Bubble => Box::new(BubbleCursor::new(targets, base_radius, highlight_border)?),
        };
        Ok(technique)
    }
}

impl fmt::Display for TechniqueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TechniqueKind::Raw => "raw",
            TechniqueKind::Bubble => "bubble",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TechniqueKind {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" | "pointer" | "normal" => Ok(TechniqueKind::Raw),
            "bubble" | "bubblecursor" | "bubble-cursor" => Ok(TechniqueKind::Bubble),
            other => Err(format!("unknown technique '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> Vec<Target> {
        vec![Target::new(100.0, 100.0), Target::new(300.0, 100.0)]
    }

    #[test]
    fn raw_pointer_needs_to_be_inside() {
        let mut t = RawPointer::new(targets(), 20.0).unwrap();
        assert_eq!(t.selected_index(), None);
        t.on_pointer_moved(150.0, 100.0);
        assert_eq!(t.selected_index(), None);
        t.on_pointer_moved(310.0, 110.0);
        assert_eq!(t.selected_index(), Some(1));
        assert!(t.render_parameters().is_empty());
    }

    #[test]
    fn bubble_selects_from_afar() {
        let mut t = TechniqueKind::Bubble.build(targets(), 20.0, 10.0).unwrap();
        t.on_pointer_moved(150.0, 100.0);
        assert_eq!(t.selected_index(), Some(0));
        assert!(t.render_parameters().bubble.is_some());
        assert_eq!(t.name(), "bubble");
    }

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("Bubble".parse::<TechniqueKind>().unwrap(), TechniqueKind::Bubble);
        assert_eq!(" raw ".parse::<TechniqueKind>().unwrap(), TechniqueKind::Raw);
        assert!("lasso".parse::<TechniqueKind>().is_err());
        assert_eq!(TechniqueKind::Bubble.to_string(), "bubble");
    }
}
