use std::time::Duration;

/// Skin segmentation parameters (YCrCb space)
#[derive(Debug, Clone)]
pub struct SkinConfig {
    pub cr_range: (u8, u8),
    pub cb_range: (u8, u8),
    /// Equivalent of a 7x7 Gaussian kernel
    pub blur_sigma: f32,
    pub median_radius: u32,
    pub erode_iterations: u8,
    pub dilate_iterations: u8,
}

impl Default for SkinConfig {
    fn default() -> Self {
        Self {
            cr_range: (135, 180),
            cb_range: (85, 135),
            blur_sigma: 1.4,
            median_radius: 3,
            erode_iterations: 1,
            dilate_iterations: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HandConfig {
    /// Contours below this area (px²) are noise
    pub min_area: f64,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self { min_area: 1000.0 }
    }
}

/// Timing of the finger-count gesture entry
#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// How long a count must be held before it is accepted
    pub stability: Duration,
    /// Dead time after an accepted observation
    pub cooldown: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            stability: Duration::from_secs_f64(1.0),
            cooldown: Duration::from_secs_f64(1.5),
        }
    }
}

/// Square confirmation parameters
#[derive(Debug, Clone)]
pub struct ShapeConfig {
    /// Equivalent of a 5x5 Gaussian kernel
    pub blur_sigma: f32,
    pub canny_low: f32,
    pub canny_high: f32,
    /// Polygon approximation tolerance as a fraction of the perimeter
    pub epsilon_factor: f64,
    /// Exclusive bounds
    pub aspect_range: (f64, f64),
    /// Inclusive bounds, px²
    pub area_range: (f64, f64),
    pub confirmation_frames: u32,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            blur_sigma: 1.1,
            canny_low: 60.0,
            canny_high: 160.0,
            epsilon_factor: 0.02,
            aspect_range: (0.9, 1.1),
            area_range: (3000.0, 80000.0),
            confirmation_frames: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub process_noise: f32,
    pub measurement_noise: f32,
    pub initial_uncertainty: f32,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            process_noise: 1e-2,
            measurement_noise: 1e-1,
            initial_uncertainty: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrajectoryConfig {
    pub capacity: usize,
    pub thickness: u32,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            capacity: 200,
            thickness: 3,
        }
    }
}

/// Session-wide configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Flip authentication frames horizontally (selfie view)
    pub mirror: bool,
    pub skin: SkinConfig,
    pub hand: HandConfig,
    pub gesture: GestureConfig,
    pub shape: ShapeConfig,
    pub predictor: PredictorConfig,
    pub trajectory: TrajectoryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mirror: true,
            skin: SkinConfig::default(),
            hand: HandConfig::default(),
            gesture: GestureConfig::default(),
            shape: ShapeConfig::default(),
            predictor: PredictorConfig::default(),
            trajectory: TrajectoryConfig::default(),
        }
    }
}

impl Config {
    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }
}
