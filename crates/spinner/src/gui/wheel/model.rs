use super::POINTER_SIZE;
use spindle::SpinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub center: Point,
    pub radius: f64,
}

impl WheelGeometry {
    /// Largest wheel that fits the area with room left for the pointer.
    pub fn fit(width: f64, height: f64) -> Self {
        let radius = (width.min(height) / 2.0 - POINTER_SIZE).max(0.0);
        Self {
            center: Point::new(width / 2.0, height / 2.0),
            radius,
        }
    }
}

/// Fast start, long slow-down.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// Nothing is animating.
    Idle,
    Running,
    /// The animation drew its final frame.
    Finished(SpinHandle),
}

#[derive(Debug, Clone)]
struct Animation {
    handle: SpinHandle,
    started_at: Option<i64>,
}

/// The rotation currently on screen, which trails the session's rotation
/// while a spin animates.
#[derive(Debug, Default)]
pub struct WheelView {
    rotation: f64,
    animation: Option<Animation>,
}

impl WheelView {
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn start(&mut self, handle: SpinHandle) {
        self.rotation = handle.from;
        self.animation = Some(Animation {
            handle,
            started_at: None,
        });
    }

    /// Advances to `frame_time` (frame clock microseconds). The first tick
    /// after `start` anchors the animation.
    pub fn tick(&mut self, frame_time: i64) -> Tick {
        let Some(animation) = self.animation.as_mut() else {
            return Tick::Idle;
        };
        let started_at = *animation.started_at.get_or_insert(frame_time);

        let total = animation.handle.duration.as_micros() as f64;
        let progress = if total > 0.0 {
            (frame_time - started_at) as f64 / total
        } else {
            1.0
        };

        let handle = &animation.handle;
        if progress >= 1.0 {
            self.rotation = handle.to;
            return match self.animation.take() {
                Some(finished) => Tick::Finished(finished.handle),
                None => Tick::Idle,
            };
        }

        self.rotation = handle.from + (handle.to - handle.from) * ease_out_cubic(progress);
        Tick::Running
    }

    /// Shows the settled rotation and drops any animation still running.
    pub fn rest_at(&mut self, rotation: f64) {
        self.rotation = rotation;
        self.animation = None;
    }
}
