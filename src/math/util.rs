use super::{Point2d, Vector2d};
use cgmath::prelude::*;

/// Wraps an angle in degrees into the range `[0, 360)`.
///
/// Non-finite angles have no meaningful heading and are mapped to zero.
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let mut wrapped = degrees % 360.0;
    if wrapped < 0.0 {
        wrapped += 360.0;
    }
    // A tiny negative remainder rounds up to exactly 360 after the correction.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// A unit vector pointing along the given heading, in degrees.
///
/// A heading of zero points along the positive x-axis; headings increase
/// towards the positive y-axis.
pub fn heading_vector(degrees: f64) -> Vector2d {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vector2d::new(cos, sin)
}

/// Transforms a point from a local coordinate system into world space.
///
/// # Parameters
/// * `local` - The point in local coordinates
/// * `origin` - The world space origin of the local coordinate system
/// * `x_axis` - The world space unit vector of the local positive x-axis
pub fn local_to_world(local: Point2d, origin: Point2d, x_axis: Vector2d) -> Point2d {
    origin + local.x * x_axis + local.y * rot90(x_axis)
}

/// Rotates a vector 90 degrees counter-clockwise in a y-up frame,
/// or clockwise in a y-down (screen) frame.
pub fn rot90(vec: Vector2d) -> Vector2d {
    Vector2d::new(-vec.y, vec.x)
}

/// Finds the smallest non-negative distance along a ray at which it meets a circle.
///
/// # Parameters
/// * `origin` - The start of the ray
/// * `dir` - The unit direction of the ray
/// * `centre` - The centre of the circle
/// * `radius` - The radius of the circle
///
/// # Returns
/// `Some(0.0)` if the origin is inside the circle, the distance to the first
/// crossing if the ray enters the circle, otherwise `None`.
pub fn ray_circle_distance(
    origin: Point2d,
    dir: Vector2d,
    centre: Point2d,
    radius: f64,
) -> Option<f64> {
    let offset = origin - centre;
    let c = offset.magnitude2() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let b = offset.dot(dir);
    if b >= 0.0 {
        // Outside and pointing away.
        return None;
    }
    let discr = b * b - c;
    if discr < 0.0 {
        return None;
    }
    Some(-b - discr.sqrt())
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn normalize_wraps_into_range() {
        assert_approx_eq!(normalize_degrees(0.0), 0.0);
        assert_approx_eq!(normalize_degrees(360.0), 0.0);
        assert_approx_eq!(normalize_degrees(-30.0), 330.0);
        assert_approx_eq!(normalize_degrees(725.0), 5.0);
        assert_approx_eq!(normalize_degrees(-725.0), 355.0);
    }

    #[test]
    fn normalize_handles_degenerate_input() {
        assert_eq!(normalize_degrees(-1e-20), 0.0);
        assert_eq!(normalize_degrees(f64::NAN), 0.0);
        assert_eq!(normalize_degrees(f64::INFINITY), 0.0);
        let huge = normalize_degrees(-1e300);
        assert!((0.0..360.0).contains(&huge));
    }

    #[test]
    fn heading_vector_axes() {
        let east = heading_vector(0.0);
        assert_approx_eq!(east.x, 1.0);
        assert_approx_eq!(east.y, 0.0);
        let south = heading_vector(90.0);
        assert_approx_eq!(south.x, 0.0);
        assert_approx_eq!(south.y, 1.0);
    }

    #[test]
    fn local_to_world_rotates_and_translates() {
        let p = local_to_world(
            Point2d::new(2.0, 1.0),
            Point2d::new(10.0, 10.0),
            heading_vector(90.0),
        );
        assert_approx_eq!(p.x, 9.0);
        assert_approx_eq!(p.y, 12.0);
    }

    #[test]
    fn ray_hits_circle_front_face() {
        let d = ray_circle_distance(
            Point2d::new(0.0, 0.0),
            Vector2d::new(1.0, 0.0),
            Point2d::new(10.0, 0.0),
            2.0,
        );
        assert_approx_eq!(d.unwrap(), 8.0);
    }

    #[test]
    fn ray_misses_circle() {
        let origin = Point2d::new(0.0, 0.0);
        let centre = Point2d::new(10.0, 5.0);
        assert!(ray_circle_distance(origin, Vector2d::new(1.0, 0.0), centre, 2.0).is_none());
        assert!(ray_circle_distance(origin, Vector2d::new(-1.0, 0.0), centre, 20.0).is_some());
        assert!(ray_circle_distance(origin, Vector2d::new(-1.0, 0.0), centre, 2.0).is_none());
    }

    #[test]
    fn ray_from_inside_circle() {
        let d = ray_circle_distance(
            Point2d::new(1.0, 1.0),
            Vector2d::new(0.0, 1.0),
            Point2d::new(0.0, 0.0),
            5.0,
        );
        assert_eq!(d, Some(0.0));
    }
}
