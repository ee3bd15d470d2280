use glam::Vec2;

use super::body::KinematicBody;
use crate::core::math::clamp;

/// What a single integration step ran into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contact {
    /// The body was airborne before the step and is grounded after it
    pub landed: bool,
    /// The body was stopped by the left or right edge
    pub hit_wall: bool,
    /// The body was stopped by the top edge
    pub hit_ceiling: bool,
}

/// Gravity, the ground line and the world's edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsWorld {
    /// Downward acceleration (pixels/second²)
    gravity: f32,
    /// Y coordinate a grounded sprite's top-left corner rests at
    ground_level: f32,
    /// World size in pixels
    size: Vec2,
}

impl PhysicsWorld {
    /// Create a world; `ground_level` is where a standing sprite's top edge sits
    pub fn new(gravity: f32, ground_level: f32, width: f32, height: f32) -> Self {
        Self {
            gravity,
            ground_level,
            size: Vec2::new(width, height),
        }
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn ground_level(&self) -> f32 {
        self.ground_level
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Create a body at rest, grounded if it starts on or below the ground line
    pub fn spawn_body(&self, x: f32, y: f32) -> KinematicBody {
        if y >= self.ground_level {
            KinematicBody::grounded_at(x, self.ground_level)
        } else {
            KinematicBody::airborne_at(x, y)
        }
    }

    /// Advance a body by `dt` seconds
    ///
    /// Horizontal motion is unconditional. Airborne bodies gain `gravity * dt`
    /// of downward velocity before moving. Reaching the ground line clamps the
    /// body onto it, zeroes vertical velocity and grounds it; afterwards a
    /// grounded body always has `velocity.y == 0`.
    pub fn integrate(&self, body: &mut KinematicBody, sprite_size: Vec2, dt: f32) -> Contact {
        let was_grounded = body.grounded;
        let mut contact = Contact::default();

        // Upward velocity on a grounded body is a takeoff
        if body.grounded && body.velocity.y < 0.0 {
            body.grounded = false;
        }

        body.position.x += body.velocity.x * dt;

        if !body.grounded {
            body.velocity.y += self.gravity * dt;
        }
        body.position.y += body.velocity.y * dt;

        if body.position.y < 0.0 {
            body.position.y = 0.0;
            body.velocity.y = body.velocity.y.max(0.0);
            contact.hit_ceiling = true;
        }

        if body.position.y >= self.ground_level {
            body.position.y = self.ground_level;
            body.velocity.y = 0.0;
            body.grounded = true;
        }

        let max_x = self.size.x - sprite_size.x;
        let clamped_x = clamp(body.position.x, 0.0, max_x);
        if clamped_x != body.position.x {
            body.position.x = clamped_x;
            contact.hit_wall = true;
        }

        contact.landed = !was_grounded && body.grounded;
        contact
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const DT: f32 = 0.016;
    const SPRITE: Vec2 = Vec2::new(96.0, 84.0);

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(1500.0, 516.0, 800.0, 600.0)
    }

    #[test]
    fn test_horizontal_motion_scales_with_dt() {
        let world = world();
        let mut body = world.spawn_body(100.0, 516.0);
        body.set_horizontal_velocity(150.0);

        world.integrate(&mut body, SPRITE, DT);
        assert_abs_diff_eq!(body.position.x, 102.4, epsilon = 1e-4);

        world.integrate(&mut body, SPRITE, DT * 2.0);
        assert_abs_diff_eq!(body.position.x, 107.2, epsilon = 1e-4);
    }

    #[test]
    fn test_grounded_body_ignores_gravity() {
        let world = world();
        let mut body = world.spawn_body(100.0, 516.0);

        for _ in 0..10 {
            let contact = world.integrate(&mut body, SPRITE, DT);
            assert!(!contact.landed);
        }
        assert!(body.grounded);
        assert_eq!(body.velocity.y, 0.0);
        assert_eq!(body.position.y, 516.0);
    }

    #[test]
    fn test_gravity_applied_before_position() {
        let world = world();
        let mut body = world.spawn_body(100.0, 0.0);

        world.integrate(&mut body, SPRITE, DT);
        assert_abs_diff_eq!(body.velocity.y, 24.0, epsilon = 1e-4);
        assert_abs_diff_eq!(body.position.y, 24.0 * DT, epsilon = 1e-4);
    }

    #[test]
    fn test_fall_lands_exactly_once_on_ground() {
        let world = world();
        let mut body = world.spawn_body(100.0, 0.0);
        assert!(!body.grounded);

        let mut landings = 0;
        for _ in 0..200 {
            let before = body.position.y;
            let contact = world.integrate(&mut body, SPRITE, DT);
            if contact.landed {
                landings += 1;
                assert!(before < 516.0);
                assert_eq!(body.position.y, 516.0);
            }
            // Grounded exactly when sitting on the ground line
            assert_eq!(body.grounded, body.position.y == 516.0);
            if body.grounded {
                assert_eq!(body.velocity.y, 0.0);
            }
        }

        assert_eq!(landings, 1);
        assert_eq!(body.position.y, 516.0);
    }

    #[test]
    fn test_takeoff_from_negative_velocity() {
        let world = world();
        let mut body = world.spawn_body(100.0, 516.0);
        body.velocity.y = -500.0;

        world.integrate(&mut body, SPRITE, DT);
        assert!(!body.grounded);
        assert_abs_diff_eq!(body.velocity.y, -476.0, epsilon = 1e-3);
        assert!(body.position.y < 516.0);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let world = world();
        let mut body = world.spawn_body(100.0, 516.0);
        body.launch(-500.0);

        let mut ticks = 0;
        loop {
            ticks += 1;
            if world.integrate(&mut body, SPRITE, DT).landed {
                break;
            }
            assert!(ticks < 100, "never landed");
        }

        // v0 = 500, g = 1500 gives ~0.67s of air time
        assert!((40..=44).contains(&ticks), "landed after {} ticks", ticks);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_wall_clamps() {
        let world = world();
        let mut body = world.spawn_body(1.0, 516.0);
        body.set_horizontal_velocity(-300.0);

        let contact = world.integrate(&mut body, SPRITE, DT);
        assert!(contact.hit_wall);
        assert_eq!(body.position.x, 0.0);

        body.position.x = 700.0;
        body.set_horizontal_velocity(300.0);
        let contact = world.integrate(&mut body, SPRITE, DT);
        assert!(contact.hit_wall);
        assert_eq!(body.position.x, 800.0 - 96.0);
    }

    #[test]
    fn test_ceiling_stops_upward_motion() {
        let world = world();
        let mut body = world.spawn_body(100.0, 2.0);
        body.velocity.y = -900.0;

        let contact = world.integrate(&mut body, SPRITE, DT);
        assert!(contact.hit_ceiling);
        assert_eq!(body.position.y, 0.0);
        assert_eq!(body.velocity.y, 0.0);
        assert!(!body.grounded);
    }

    #[test]
    fn test_spawn_below_ground_snaps_up() {
        let world = world();
        let body = world.spawn_body(100.0, 550.0);
        assert!(body.grounded);
        assert_eq!(body.position.y, 516.0);
    }
}
