use nalgebra::Vector2;

/// Wraps an angle in degrees into (-180, 180].
pub fn normalize_angle(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }

    let mut angle = degrees % 360.0;
    if angle > 180.0 {
        angle -= 360.0;
    } else if angle <= -180.0 {
        angle += 360.0;
    }

    angle
}

/// Smallest absolute difference between two directions, in degrees.
pub fn angle_difference(a: f32, b: f32) -> f32 {
    normalize_angle(a - b).abs()
}

/// Converts a (distance, direction) sighting into self-relative cartesian coordinates.
pub fn polar_to_cartesian(dist: f32, dir_degrees: f32) -> Vector2<f32> {
    let radians = dir_degrees.to_radians();
    Vector2::new(dist * radians.cos(), dist * radians.sin())
}

/// Direction of a vector in degrees, 0 meaning straight ahead (+x).
pub fn direction_of(vector: &Vector2<f32>) -> f32 {
    vector.y.atan2(vector.x).to_degrees()
}
