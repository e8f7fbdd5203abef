use serde::{Deserialize, Serialize};

use super::geometry::{Circle, Point};

/// A circular target as placed by the host.
///
/// `radius == None` means the target uses the selector-wide base radius.
/// Targets have no identity of their own; they are referred to by their index
/// in the collection they were supplied in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub center: Point,
    pub radius: Option<f64>,
}

impl Target {
    /// A target that follows the base radius.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            center: Point::new(x, y),
            radius: None,
        }
    }

    /// A target with its own radius.
    pub fn with_radius(x: f64, y: f64, radius: f64) -> Self {
        Self {
            center: Point::new(x, y),
            radius: Some(radius),
        }
    }

    pub fn effective_radius(&self, base: f64) -> f64 {
        self.radius.unwrap_or(base)
    }

    pub fn footprint(&self, base: f64) -> Circle {
        Circle::new(self.center, self.effective_radius(base))
    }
}
