use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use imageproc::point::Point as PxPoint;

use crate::models::Point;

/// Closed outline traced around a foreground region
#[derive(Debug, Clone)]
pub struct Contour {
    pub points: Vec<Point>,
}

/// Axis-aligned bounding rectangle, inclusive of both edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Width over height, `None` for a degenerate box
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.height == 0 {
            return None;
        }
        Some(self.width as f64 / self.height as f64)
    }
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed polygon area (shoelace formula)
    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }

    pub fn perimeter(&self) -> f64 {
        arc_length(&self.to_px(), true)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(BoundingBox {
            x: min_x,
            y: min_y,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }

    /// Point with the smallest `y`; ties keep the first one traced
    pub fn topmost(&self) -> Option<Point> {
        let mut best: Option<Point> = None;
        for p in &self.points {
            if best.is_none_or(|b| p.y < b.y) {
                best = Some(*p);
            }
        }
        best
    }

    /// Douglas-Peucker approximation of the closed outline.
    /// `epsilon_factor` is relative to the perimeter.
    pub fn approximate_polygon(&self, epsilon_factor: f64) -> Contour {
        if self.points.len() < 3 {
            return self.clone();
        }
        let epsilon = epsilon_factor * self.perimeter();
        if epsilon <= 0.0 {
            return self.clone();
        }
        let approx = approximate_polygon_dp(&self.to_px(), epsilon, true);
        Contour::new(approx.into_iter().map(Point::from).collect())
    }

    /// True if every turn along the polygon has the same orientation
    pub fn is_convex(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut sign = 0i64;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let c = self.points[(i + 2) % n];
            let cross = (b.x - a.x) as i64 * (c.y - b.y) as i64 - (b.y - a.y) as i64 * (c.x - b.x) as i64;
            if cross == 0 {
                continue;
            }
            let s = cross.signum();
            if sign == 0 {
                sign = s;
            } else if s != sign {
                return false;
            }
        }
        sign != 0
    }

    fn to_px(&self) -> Vec<PxPoint<i32>> {
        self.points.iter().map(|p| PxPoint::new(p.x, p.y)).collect()
    }
}

/// Absolute shoelace area of a closed polygon
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0i64;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        twice += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
    }
    (twice as f64 / 2.0).abs()
}

/// Outer borders of top-level regions in a binary image (non-zero is foreground)
pub fn find_external_contours(mask: &GrayImage) -> Vec<Contour> {
    if mask.width() == 0 || mask.height() == 0 {
        return Vec::new();
    }
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| c.parent.is_none() && matches!(c.border_type, BorderType::Outer))
        .map(|c| Contour::new(c.points.into_iter().map(Point::from).collect()))
        .collect()
}

/// Contour with the largest enclosed area; earlier contours win ties
pub fn largest_contour(contours: &[Contour]) -> Option<&Contour> {
    let mut best: Option<(&Contour, f64)> = None;
    for c in contours {
        let area = c.area();
        if best.is_none_or(|(_, a)| area > a) {
            best = Some((c, area));
        }
    }
    best.map(|(c, _)| c)
}
