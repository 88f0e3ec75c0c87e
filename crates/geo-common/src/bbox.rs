//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in degrees (EPSG:4326).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Compute the tight extent of a set of points.
    ///
    /// `xs` and `ys` are index aligned. Returns `None` when there are no
    /// points. NaN coordinates are ignored.
    pub fn from_points(xs: &[f32], ys: &[f32]) -> Option<Self> {
        let mut points = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| (x as f64, y as f64))
            .filter(|(x, y)| !x.is_nan() && !y.is_nan());

        let (x0, y0) = points.next()?;
        let mut bbox = Self::new(x0, y0, x0, y0);
        for (x, y) in points {
            bbox.min_x = bbox.min_x.min(x);
            bbox.max_x = bbox.max_x.max(x);
            bbox.min_y = bbox.min_y.min(y);
            bbox.max_y = bbox.max_y.max(y);
        }
        Some(bbox)
    }

    /// Width of the bounding box in degrees.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in degrees.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}
