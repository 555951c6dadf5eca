//! Constant-velocity Kalman filter
//!
//! State vector: [x, y, vx, vy]ᵀ, observation: [x, y]ᵀ, one step per frame.

use nalgebra::{SMatrix, SVector};
use tracing::debug;

use crate::config::PredictorConfig;
use crate::models::Point;

type State = SVector<f32, 4>;
type Matrix4 = SMatrix<f32, 4, 4>;
type Matrix2x4 = SMatrix<f32, 2, 4>;
type Matrix4x2 = SMatrix<f32, 4, 2>;
type Matrix2 = SMatrix<f32, 2, 2>;
type Vector2 = SVector<f32, 2>;

/// Current estimate and its covariance
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub state: State,
    pub covariance: Matrix4,
}

impl Estimate {
    pub fn position(&self) -> (f32, f32) {
        (self.state[0], self.state[1])
    }

    pub fn velocity(&self) -> (f32, f32) {
        (self.state[2], self.state[3])
    }
}

/// Smooths the hand position across frames, coasting through missing measurements.
///
/// Nothing is estimated until the first measurement arrives; that measurement
/// seeds the state with zero velocity.
#[derive(Debug, Clone)]
pub struct MotionPredictor {
    estimate: Option<Estimate>,
    process_noise: Matrix4,
    measurement_noise: Matrix2,
    initial_uncertainty: f32,
}

impl MotionPredictor {
    pub fn new(config: &PredictorConfig) -> Self {
        Self {
            estimate: None,
            process_noise: Matrix4::identity() * config.process_noise,
            measurement_noise: Matrix2::identity() * config.measurement_noise,
            initial_uncertainty: config.initial_uncertainty,
        }
    }

    /// ```text
    /// | 1  0  1  0 |
    /// | 0  1  0  1 |
    /// | 0  0  1  0 |
    /// | 0  0  0  1 |
    /// ```
    fn transition_matrix() -> Matrix4 {
        Matrix4::new(
            1.0, 0.0, 1.0, 0.0,
            0.0, 1.0, 0.0, 1.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    fn observation_matrix() -> Matrix2x4 {
        Matrix2x4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
        )
    }

    pub fn is_initialized(&self) -> bool {
        self.estimate.is_some()
    }

    pub fn estimate(&self) -> Option<&Estimate> {
        self.estimate.as_ref()
    }

    /// Start tracking at `(x, y)` at rest with unit uncertainty
    pub fn seed(&mut self, x: f32, y: f32) {
        debug!(x, y, "motion predictor seeded");
        self.estimate = Some(Estimate {
            state: State::new(x, y, 0.0, 0.0),
            covariance: Matrix4::identity() * self.initial_uncertainty,
        });
    }

    /// Advance one frame. `None` until seeded.
    pub fn predict(&mut self) -> Option<(f32, f32)> {
        let estimate = self.estimate.as_mut()?;
        let f = Self::transition_matrix();

        estimate.state = f * estimate.state;
        estimate.covariance = f * estimate.covariance * f.transpose() + self.process_noise;

        Some(estimate.position())
    }

    /// Fold a measured position into the current estimate. Returns false if not seeded.
    pub fn correct(&mut self, x: f32, y: f32) -> bool {
        let Some(estimate) = self.estimate.as_mut() else {
            return false;
        };
        let h = Self::observation_matrix();
        let z = Vector2::new(x, y);

        // Innovation: y = z - H * x
        let innovation = z - h * estimate.state;

        // S = H * P * Hᵀ + R
        let s = h * estimate.covariance * h.transpose() + self.measurement_noise;

        // S is positive definite while R is; skip the update otherwise.
        let Some(s_inv) = s.try_inverse() else {
            return false;
        };
        let k: Matrix4x2 = estimate.covariance * h.transpose() * s_inv;

        estimate.state += k * innovation;
        let p = (Matrix4::identity() - k * h) * estimate.covariance;
        estimate.covariance = (p + p.transpose()) * 0.5;
        true
    }

    /// Full per-frame cycle: seed if needed, predict, then correct when measured.
    ///
    /// Returns the prediction in display coordinates, or `None` while no
    /// measurement has ever been seen.
    pub fn step(&mut self, measurement: Option<Point>) -> Option<Point> {
        if !self.is_initialized() {
            let m = measurement?;
            self.seed(m.x as f32, m.y as f32);
        }

        let (px, py) = self.predict()?;
        if let Some(m) = measurement {
            self.correct(m.x as f32, m.y as f32);
        }
        Some(Point::new(px.round() as i32, py.round() as i32))
    }
}

impl Default for MotionPredictor {
    fn default() -> Self {
        Self::new(&PredictorConfig::default())
    }
}
