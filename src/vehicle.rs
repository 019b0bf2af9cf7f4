use self::shape::{fov_corners, rect_corners};
use crate::math::{heading_vector, normalize_degrees, Point2d, Vector2d};
use crate::util::Interval;
use crate::Obstacle;
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod shape;

/// The default starting position of a vehicle.
pub const DEFAULT_START: Point2d = Point2d { x: 400.0, y: 300.0 };

/// A simulated vehicle.
///
/// The vehicle is a point mass with a heading; its rectangular footprint is only
/// used for drawing; collisions treat it as a circle of radius `length / 2`.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// Half the vehicle's width.
    half_wid: f64,
    /// Half the vehicle's length.
    half_len: f64,
    /// The range of permitted speeds, symmetric about zero.
    speed_range: Interval<f64>,
    /// The opening angle of the field of view in degrees.
    fov_angle: f64,
    /// The reach of the field of view.
    fov_distance: f64,
    /// The world space coordinates of the centre of the vehicle.
    pos: Point2d,
    /// The heading in degrees, always in `[0, 360)`.
    heading: f64,
    /// The signed speed, in distance units per tick.
    speed: f64,
}

/// The attributes of a simulated vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct VehicleAttributes {
    /// The vehicle length.
    pub length: f64,
    /// The vehicle width.
    pub width: f64,
    /// The maximum speed in either direction, in distance units per tick.
    pub max_speed: f64,
    /// The opening angle of the field of view in degrees.
    pub fov_angle: f64,
    /// The reach of the field of view.
    pub fov_distance: f64,
}

impl Default for VehicleAttributes {
    fn default() -> Self {
        Self {
            length: 40.0,
            width: 20.0,
            max_speed: 5.0,
            fov_angle: 60.0,
            fov_distance: 100.0,
        }
    }
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::new(&VehicleAttributes::default(), DEFAULT_START)
    }
}

impl Vehicle {
    /// Creates a new, stationary vehicle facing along the positive x-axis.
    pub fn new(attributes: &VehicleAttributes, pos: Point2d) -> Self {
        let max_speed = attributes.max_speed.abs();
        Self {
            half_wid: 0.5 * attributes.width,
            half_len: 0.5 * attributes.length,
            speed_range: Interval::disc(0.0, max_speed),
            fov_angle: attributes.fov_angle,
            fov_distance: attributes.fov_distance,
            pos,
            heading: 0.0,
            speed: 0.0,
        }
    }

    /// The vehicle's width.
    pub fn width(&self) -> f64 {
        2.0 * self.half_wid
    }

    /// The vehicle's length.
    pub fn length(&self) -> f64 {
        2.0 * self.half_len
    }

    /// The maximum speed of the vehicle in either direction.
    pub fn max_speed(&self) -> f64 {
        self.speed_range.max
    }

    /// The opening angle of the field of view in degrees.
    pub fn fov_angle(&self) -> f64 {
        self.fov_angle
    }

    /// The reach of the field of view.
    pub fn fov_distance(&self) -> f64 {
        self.fov_distance
    }

    /// The coordinates in world space of the centre of the vehicle.
    pub fn position(&self) -> Point2d {
        self.pos
    }

    /// The vehicle's heading in degrees, in the range `[0, 360)`.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// A unit vector in world space aligned with the vehicle's heading.
    pub fn direction(&self) -> Vector2d {
        heading_vector(self.heading)
    }

    /// The vehicle's signed speed. Negative values mean reversing.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The radius of the circle used for collision tests.
    pub fn bounding_radius(&self) -> f64 {
        self.half_len
    }

    /// Changes the speed by `amount`, staying within `±max_speed`.
    /// A negative amount may take the vehicle into reverse.
    ///
    /// This and the other motion commands ignore NaN arguments.
    pub fn accelerate(&mut self, amount: f64) {
        if amount.is_nan() {
            return;
        }
        self.speed = self.speed_range.clamp(self.speed + amount);
    }

    /// Reduces the speed by `amount`, but never below zero.
    pub fn decelerate(&mut self, amount: f64) {
        if amount.is_nan() {
            return;
        }
        let forward = Interval::new(0.0, self.speed_range.max);
        self.speed = forward.clamp(self.speed - amount);
    }

    /// Sets the speed directly, clamped to `±max_speed`.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_nan() {
            return;
        }
        self.speed = self.speed_range.clamp(speed);
    }

    /// Rotates the vehicle by `degrees`. Positive values turn towards the positive y-axis.
    pub fn turn(&mut self, degrees: f64) {
        if degrees.is_nan() {
            return;
        }
        self.heading = normalize_degrees(self.heading + degrees);
    }

    /// Sets the heading directly; any angle is accepted and wrapped into `[0, 360)`.
    pub fn set_heading(&mut self, degrees: f64) {
        if degrees.is_nan() {
            return;
        }
        self.heading = normalize_degrees(degrees);
    }

    /// Moves the vehicle one tick along its heading at its current speed.
    pub fn advance(&mut self) {
        self.pos += self.speed * self.direction();
    }

    /// Places the vehicle at the given position without changing heading or speed.
    pub fn set_position(&mut self, pos: Point2d) {
        self.pos = pos;
    }

    /// Determines whether the vehicle's bounding circle overlaps the obstacle.
    /// Touching exactly is not a collision.
    pub fn collides_with(&self, obstacle: &Obstacle) -> bool {
        let distance = self.pos.distance(obstacle.pos());
        distance < self.half_len + obstacle.radius()
    }

    /// The four corners of the vehicle's footprint in world space.
    pub fn outline(&self) -> [Point2d; 4] {
        rect_corners(self.pos, self.direction(), self.half_len, self.half_wid)
    }

    /// The three corners of the field of view triangle in world space.
    pub fn fov_cone(&self) -> [Point2d; 3] {
        fov_corners(
            self.pos,
            self.direction(),
            self.half_len,
            self.fov_angle,
            self.fov_distance,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn vehicle() -> Vehicle {
        Vehicle::default()
    }

    #[test]
    fn defaults() {
        let veh = vehicle();
        assert_eq!(veh.position(), Point2d::new(400.0, 300.0));
        assert_eq!(veh.heading(), 0.0);
        assert_eq!(veh.speed(), 0.0);
        assert_eq!(veh.max_speed(), 5.0);
        assert_eq!(veh.length(), 40.0);
        assert_eq!(veh.width(), 20.0);
        assert_eq!(veh.fov_angle(), 60.0);
        assert_eq!(veh.fov_distance(), 100.0);
    }

    #[test]
    fn accelerate_clamps_both_ways() {
        let mut veh = vehicle();
        veh.accelerate(3.0);
        assert_approx_eq!(veh.speed(), 3.0);
        veh.accelerate(3.0);
        assert_approx_eq!(veh.speed(), 5.0);
        veh.accelerate(-20.0);
        assert_approx_eq!(veh.speed(), -5.0);
    }

    #[test]
    fn decelerate_never_reverses() {
        let mut veh = vehicle();
        veh.accelerate(2.0);
        veh.decelerate(0.5);
        assert_approx_eq!(veh.speed(), 1.5);
        veh.decelerate(10.0);
        assert_eq!(veh.speed(), 0.0);

        // Decelerating while reversing snaps the speed up to zero.
        veh.accelerate(-3.0);
        veh.decelerate(0.1);
        assert_eq!(veh.speed(), 0.0);

        // A negative deceleration speeds up, but only to the limit.
        veh.decelerate(-9.0);
        assert_approx_eq!(veh.speed(), 5.0);
    }

    #[test]
    fn speed_bounds_hold_for_any_amount() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut veh = vehicle();
        for _ in 0..1000 {
            let amount = rng.gen_range(-50.0..50.0);
            veh.accelerate(amount);
            assert!(veh.speed() >= -5.0 && veh.speed() <= 5.0);
            let amount = rng.gen_range(-50.0..50.0);
            veh.decelerate(amount);
            assert!(veh.speed() >= 0.0 && veh.speed() <= 5.0);
        }
    }

    #[test]
    fn nan_is_ignored() {
        let mut veh = vehicle();
        veh.accelerate(2.0);
        veh.turn(45.0);
        veh.accelerate(f64::NAN);
        veh.decelerate(f64::NAN);
        veh.set_speed(f64::NAN);
        veh.turn(f64::NAN);
        veh.set_heading(f64::NAN);
        assert_approx_eq!(veh.speed(), 2.0);
        assert_approx_eq!(veh.heading(), 45.0);
    }

    #[test]
    fn infinite_input_is_clamped() {
        let mut veh = vehicle();
        veh.accelerate(f64::INFINITY);
        assert_eq!(veh.speed(), 5.0);
        veh.set_speed(f64::NEG_INFINITY);
        assert_eq!(veh.speed(), -5.0);
        veh.turn(f64::INFINITY);
        assert!(veh.heading() >= 0.0 && veh.heading() < 360.0);
    }

    #[test]
    fn turn_wraps_heading() {
        let mut veh = vehicle();
        veh.turn(-30.0);
        assert_approx_eq!(veh.heading(), 330.0);
        veh.turn(40.0);
        assert_approx_eq!(veh.heading(), 10.0);
        veh.turn(720.0);
        assert_approx_eq!(veh.heading(), 10.0);
    }

    #[test]
    fn heading_bounds_hold_for_any_turn() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut veh = vehicle();
        for _ in 0..1000 {
            veh.turn(rng.gen_range(-1e6..1e6));
            assert!(veh.heading() >= 0.0 && veh.heading() < 360.0);
        }
        veh.turn(f64::MAX);
        assert!(veh.heading() >= 0.0 && veh.heading() < 360.0);
    }

    #[test]
    fn advance_follows_heading() {
        let mut veh = vehicle();
        veh.accelerate(2.0);
        veh.advance();
        assert_approx_eq!(veh.position().x, 402.0);
        assert_approx_eq!(veh.position().y, 300.0);

        veh.set_heading(90.0);
        veh.advance();
        assert_approx_eq!(veh.position().x, 402.0);
        assert_approx_eq!(veh.position().y, 302.0);

        veh.set_speed(-1.0);
        veh.advance();
        assert_approx_eq!(veh.position().y, 301.0);
    }

    #[test]
    fn advance_at_rest_stays_put() {
        let mut veh = vehicle();
        for heading in [0.0, 45.0, 123.4, 359.9] {
            veh.set_heading(heading);
            veh.advance();
            assert_eq!(veh.position(), DEFAULT_START);
        }
    }

    #[test]
    fn collision_uses_half_length() {
        let veh = vehicle();
        assert!(veh.collides_with(&Obstacle::new(Point2d::new(400.0, 300.0), 20.0)));
        // Within the width-ignoring circle, sideways of the car body.
        assert!(veh.collides_with(&Obstacle::new(Point2d::new(400.0, 335.0), 20.0)));
        // Exactly touching is not a hit.
        assert!(!veh.collides_with(&Obstacle::new(Point2d::new(440.0, 300.0), 20.0)));
        assert!(veh.collides_with(&Obstacle::new(Point2d::new(439.9, 300.0), 20.0)));
    }

    #[test]
    fn outline_is_rotated_rectangle() {
        let mut veh = vehicle();
        let corners = veh.outline();
        assert_approx_eq!(corners[1].x, 420.0);
        assert_approx_eq!(corners[1].y, 290.0);
        assert_approx_eq!(corners[3].x, 380.0);
        assert_approx_eq!(corners[3].y, 310.0);

        veh.set_heading(90.0);
        let corners = veh.outline();
        assert_approx_eq!(corners[1].x, 410.0);
        assert_approx_eq!(corners[1].y, 320.0);
    }

    #[test]
    fn fov_cone_opens_ahead() {
        let veh = vehicle();
        let [apex, left, right] = veh.fov_cone();
        assert_approx_eq!(apex.x, 420.0);
        assert_approx_eq!(apex.y, 300.0);
        assert_approx_eq!(left.x, 400.0 + 100.0 * 30f64.to_radians().cos());
        assert_approx_eq!(left.y, 300.0 - 50.0);
        assert_approx_eq!(right.y, 300.0 + 50.0);
    }
}
