pub mod preprocessing;
pub mod contours;
pub mod skin;
pub mod hand;
pub mod shape;

pub use contours::{BoundingBox, Contour};
pub use hand::{HandLocation, HandLocator};
pub use shape::{ShapeConfirmation, ShapeValidator};
pub use skin::SkinSegmenter;
