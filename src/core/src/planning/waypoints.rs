use nalgebra::Vector2;

pub const WAYPOINT_REACHED_THRESHOLD: f32 = 1.0;

/// A planned route plus a cursor to the waypoint currently being followed.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointPath {
    waypoints: Vec<Vector2<f32>>,
    current_index: usize,
}

impl WaypointPath {
    pub fn new(waypoints: Vec<Vector2<f32>>) -> Self {
        WaypointPath {
            waypoints,
            current_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<Vector2<f32>> {
        self.waypoints.get(self.current_index).copied()
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.waypoints.len()
    }

    /// Skips every waypoint already within `threshold` of `position` and
    /// returns the one to head for, or `None` once the path is exhausted.
    pub fn update(&mut self, position: &Vector2<f32>, threshold: f32) -> Option<Vector2<f32>> {
        while let Some(waypoint) = self.current() {
            if (waypoint - position).norm() < threshold {
                self.current_index += 1;
            } else {
                return Some(waypoint);
            }
        }

        None
    }

    pub fn waypoints(&self) -> &[Vector2<f32>] {
        &self.waypoints
    }
}
