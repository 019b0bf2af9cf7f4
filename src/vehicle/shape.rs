use crate::math::{heading_vector, local_to_world, Point2d, Vector2d};

/// Computes the corners of a rectangle centred on `pos` and aligned with `dir`.
///
/// The corners are returned in the order rear-left, front-left, front-right,
/// rear-right, where "left" is the negative local y side.
pub fn rect_corners(pos: Point2d, dir: Vector2d, half_len: f64, half_wid: f64) -> [Point2d; 4] {
    [
        Point2d::new(-half_len, -half_wid),
        Point2d::new(half_len, -half_wid),
        Point2d::new(half_len, half_wid),
        Point2d::new(-half_len, half_wid),
    ]
    .map(|local| local_to_world(local, pos, dir))
}

/// Computes the field of view triangle.
///
/// The apex sits on the vehicle's nose and the far corners lie `distance`
/// from the vehicle's centre at half the opening angle either side of `dir`.
pub fn fov_corners(
    pos: Point2d,
    dir: Vector2d,
    half_len: f64,
    angle: f64,
    distance: f64,
) -> [Point2d; 3] {
    let left = distance * heading_vector(-0.5 * angle);
    let right = distance * heading_vector(0.5 * angle);
    [
        Point2d::new(half_len, 0.0),
        Point2d::new(left.x, left.y),
        Point2d::new(right.x, right.y),
    ]
    .map(|local| local_to_world(local, pos, dir))
}
