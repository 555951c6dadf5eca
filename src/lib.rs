pub mod annotate;
pub mod auth;
pub mod clock;
pub mod config;
pub mod detection;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod tracking;

pub use auth::{AuthState, AuthenticationStateMachine, LandmarkDetector, LandmarkSet};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::Config;
pub use models::{AnnotatedFrame, Caption, Frame, Point};
pub use pipeline::{DebugConfig, Session, SessionStatus};
