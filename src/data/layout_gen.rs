//! Random target layouts for new setup files.

use rand::Rng;

use super::geometry::{Circle, Point};
use super::setup::SetupFile;
use crate::error::{ExperimentError, Result};

/// Draws per target before giving up.
pub const MAX_ATTEMPTS_PER_TARGET: usize = 10_000;

/// Canvas the targets are placed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBounds {
    pub width: u32,
    pub height: u32,
}

impl Default for LayoutBounds {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl LayoutBounds {
    fn random_center<R: Rng>(&self, rng: &mut R, margin: u32) -> Result<Point> {
        let span = 2 * u64::from(margin);
        if span > u64::from(self.width) || span > u64::from(self.height) {
            return Err(ExperimentError::InvalidConfiguration(format!(
                "radius {margin} does not fit a {}x{} canvas",
                self.width, self.height
            )));
        }
        let x = rng.gen_range(margin..=self.width - margin);
        let y = rng.gen_range(margin..=self.height - margin);
        Ok(Point::new(f64::from(x), f64::from(y)))
    }
}

fn whole_radius(radius: f64) -> Result<u32> {
    if !(radius.is_finite() && radius >= 1.0) {
        return Err(ExperimentError::InvalidConfiguration(format!(
            "layout radius must be at least 1, got {radius}"
        )));
    }
    // `as` saturates, so oversized radii end up rejected by `random_center`.
    Ok(radius.ceil() as u32)
}

/// Place `count` circles of equal radius so that no two overlap.
pub fn generate_uniform<R: Rng>(
    rng: &mut R,
    bounds: LayoutBounds,
    count: usize,
    radius: f64,
) -> Result<SetupFile> {
    let margin = whole_radius(radius)?;
    let mut placed: Vec<Circle> = Vec::with_capacity(count);
    for _ in 0..count {
        let mut attempts = 0;
        let circle = loop {
            if attempts == MAX_ATTEMPTS_PER_TARGET {
                return Err(ExperimentError::LayoutExhausted {
                    placed: placed.len(),
                    requested: count,
                });
            }
            attempts += 1;
            let candidate = Circle::new(bounds.random_center(rng, margin)?, radius);
            if !placed.iter().any(|c| c.touches(&candidate)) {
                break candidate;
            }
        };
        placed.push(circle);
    }
    let centers: Vec<Point> = placed.iter().map(|c| c.center).collect();
    log::debug!("Generated uniform layout with {} targets", centers.len());
    Ok(SetupFile::uniform(&centers, radius))
}

/// Place `count` distinct centres, kept clear of the edges by the largest
/// radius in `radii`. The radius list is stored in the setup as-is.
pub fn generate_with_radius_list<R: Rng>(
    rng: &mut R,
    bounds: LayoutBounds,
    count: usize,
    radii: Vec<f64>,
) -> Result<SetupFile> {
    let largest = radii.iter().copied().fold(f64::NAN, f64::max);
    let margin = whole_radius(largest)?;
    let mut centers: Vec<Point> = Vec::with_capacity(count);
    for _ in 0..count {
        let mut attempts = 0;
        let center = loop {
            if attempts == MAX_ATTEMPTS_PER_TARGET {
                return Err(ExperimentError::LayoutExhausted {
                    placed: centers.len(),
                    requested: count,
                });
            }
            attempts += 1;
            let candidate = bounds.random_center(rng, margin)?;
            if !centers.contains(&candidate) {
                break candidate;
            }
        };
        centers.push(center);
    }
    Ok(SetupFile::with_radius_list(&centers, radii))
}
