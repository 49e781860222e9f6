pub mod model;
pub mod view;

pub use model::{Point, Tick, WheelGeometry, WheelView, ease_out_cubic};
pub use view::draw;

pub const WHEEL_SIZE: i32 = 400;
pub const POINTER_SIZE: f64 = 18.0;
pub const OUTLINE_WIDTH_FACTOR: f64 = 1.0 / 50.0; // of the radius
pub const HUB_RADIUS_FACTOR: f64 = 0.07;
pub const LABEL_FONT_FACTOR: f64 = 0.075;
pub const LABEL_MIN_FONT_SIZE: f64 = 6.0;
pub const LABEL_RIM_GAP_FACTOR: f64 = 0.08; // space between label end and rim
