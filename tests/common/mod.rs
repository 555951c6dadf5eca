mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from airdraw for tests
pub use airdraw::auth::{Landmark, LandmarkDetector, LandmarkSet, count_fingers};
pub use airdraw::{AuthState, Config, Frame, ManualClock, Point, Session};
