//! Target layout description files.
//!
//! A setup file is a small JSON object:
//!
//! ```json
//! {"numberOfCircles": 3, "circleRadius": 20, "coordinates": "(120,80);(400,300);(640,500)"}
//! ```
//!
//! Instead of `circleRadius` a file may carry `circleRadiusList`; the radii are
//! then handed out to the targets round-robin in coordinate order.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::geometry::Point;
use super::target::Target;
use crate::error::{ExperimentError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupFile {
    pub number_of_circles: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circle_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circle_radius_list: Option<Vec<f64>>,
    pub coordinates: String,
}

impl SetupFile {
    /// Build a uniform-radius setup from target centres.
    pub fn uniform(centers: &[Point], radius: f64) -> Self {
        Self {
            number_of_circles: centers.len(),
            circle_radius: Some(radius),
            circle_radius_list: None,
            coordinates: format_coordinates(centers),
        }
    }

    pub fn with_radius_list(centers: &[Point], radii: Vec<f64>) -> Self {
        Self {
            number_of_circles: centers.len(),
            circle_radius: None,
            circle_radius_list: Some(radii),
            coordinates: format_coordinates(centers),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path)?;
        let setup = Self::from_json(&txt)?;
        log::info!(
            "Loaded setup {:?} ({} circles)",
            path,
            setup.number_of_circles
        );
        Ok(setup)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Radius used for targets that do not get one from the radius list.
    pub fn base_radius(&self) -> Result<f64> {
        let radius = match (&self.circle_radius, &self.circle_radius_list) {
            (Some(r), _) => *r,
            (None, Some(list)) => list.iter().copied().fold(f64::NAN, f64::max),
            (None, None) => {
                return Err(ExperimentError::InvalidConfiguration(
                    "setup needs circleRadius or circleRadiusList".to_string(),
                ))
            }
        };
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ExperimentError::InvalidConfiguration(format!(
                "setup radius must be positive, got {radius}"
            )));
        }
        Ok(radius)
    }

    pub fn centers(&self) -> Result<Vec<Point>> {
        parse_coordinates(&self.coordinates)
    }

    /// Parse the coordinates and attach radii.
    pub fn to_targets(&self) -> Result<Vec<Target>> {
        self.base_radius()?;
        let centers = self.centers()?;
        if centers.len() != self.number_of_circles {
            log::warn!(
                "numberOfCircles is {} but {} coordinates were given; using the coordinates",
                self.number_of_circles,
                centers.len()
            );
        }
        let list = self.circle_radius_list.as_deref().unwrap_or(&[]);
        if let Some(bad) = list.iter().find(|r| !(r.is_finite() && **r > 0.0)) {
            return Err(ExperimentError::InvalidConfiguration(format!(
                "circleRadiusList contains non-positive radius {bad}"
            )));
        }
        Ok(centers
            .into_iter()
            .enumerate()
            .map(|(i, c)| Target {
                center: c,
                radius: if list.is_empty() {
                    None
                } else {
                    Some(list[i % list.len()])
                },
            })
            .collect())
    }
}

/// Parse `"(x,y);(x,y)"`. Whitespace is ignored; an empty string is an empty layout.
pub fn parse_coordinates(s: &str) -> Result<Vec<Point>> {
    s.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let inner = entry.trim_start_matches('(').trim_end_matches(')');
            let mut parts = inner.split(',').map(str::trim);
            let malformed = || ExperimentError::MalformedCoordinate(entry.to_string());
            let x = parts.next().and_then(|p| p.parse::<f64>().ok()).ok_or_else(malformed)?;
            let y = parts.next().and_then(|p| p.parse::<f64>().ok()).ok_or_else(malformed)?;
            if parts.next().is_some() || !x.is_finite() || !y.is_finite() {
                return Err(malformed());
            }
            Ok(Point::new(x, y))
        })
        .collect()
}

pub fn format_coordinates(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinates_with_spaces() {
        let pts = parse_coordinates(" (10, 20);(30,40) ; (5.5,6)").unwrap();
        assert_eq!(pts, vec![Point::new(10.0, 20.0), Point::new(30.0, 40.0), Point::new(5.5, 6.0)]);
    }

    #[test]
    fn empty_coordinates_is_empty_layout() {
        assert!(parse_coordinates("").unwrap().is_empty());
    }

    #[test]
    fn malformed_coordinate_is_reported() {
        match parse_coordinates("(1,2);(3)") {
            Err(ExperimentError::MalformedCoordinate(e)) => assert_eq!(e, "(3)"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse_coordinates("(1,2,3)").is_err());
        assert!(parse_coordinates("(a,b)").is_err());
    }

    #[test]
    fn reads_original_layout_format() {
        let setup = SetupFile::from_json(
            r#"{"numberOfCircles": 2, "circleRadius": 20, "coordinates": "(100,100);(300,100)"}"#,
        )
        .unwrap();
        assert_eq!(setup.base_radius().unwrap(), 20.0);
        let targets = setup.to_targets().unwrap();
        assert_eq!(targets, vec![Target::new(100.0, 100.0), Target::new(300.0, 100.0)]);
    }

    #[test]
    fn radius_list_is_round_robin() {
        let setup = SetupFile::from_json(
            r#"{"numberOfCircles": 3, "circleRadiusList": [10, 25], "coordinates": "(0,0);(100,0);(200,0)"}"#,
        )
        .unwrap();
        assert_eq!(setup.base_radius().unwrap(), 25.0);
        let radii: Vec<f64> = setup
            .to_targets()
            .unwrap()
            .iter()
            .map(|t| t.effective_radius(25.0))
            .collect();
        assert_eq!(radii, vec![10.0, 25.0, 10.0]);
    }

    #[test]
    fn missing_radius_is_invalid() {
        let setup = SetupFile::from_json(r#"{"numberOfCircles": 0, "coordinates": ""}"#).unwrap();
        assert!(matches!(
            setup.base_radius(),
            Err(ExperimentError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn coordinates_format_like_the_files() {
        let s = format_coordinates(&[Point::new(12.0, 34.0), Point::new(56.0, 78.0)]);
        assert_eq!(s, "(12,34);(56,78)");
    }
}
