use std::collections::VecDeque;

use image::Rgb;

use crate::annotate::draw_thick_line;
use crate::models::{Frame, Point};

/// Recent positions, newest first. `None` entries are gaps in the trail.
#[derive(Debug, Clone)]
pub struct TrajectoryBuffer {
    points: VecDeque<Option<Point>>,
    capacity: usize,
}

impl TrajectoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert at the front, evicting the oldest entry when full
    pub fn push(&mut self, point: Option<Point>) {
        self.points.push_front(point);
        while self.points.len() > self.capacity {
            self.points.pop_back();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<Point> {
        self.points.front().copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Option<Point>> {
        self.points.iter()
    }

    /// Adjacent pairs that form a visible line; pairs touching a gap are skipped
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
    }

    pub fn render(&self, frame: &mut Frame, color: Rgb<u8>, thickness: u32) {
        for (newer, older) in self.segments() {
            draw_thick_line(frame, older, newer, color, thickness);
        }
    }
}

impl Default for TrajectoryBuffer {
    fn default() -> Self {
        Self::new(200)
    }
}
