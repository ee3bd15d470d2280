use glam::Vec2;

/// Position, velocity and ground contact of one character
///
/// Each character owns its body outright; bodies are never shared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicBody {
    /// Top-left corner of the sprite in world pixels
    pub position: Vec2,
    /// Pixels per second
    pub velocity: Vec2,
    /// Standing on the ground line
    pub grounded: bool,
}

impl KinematicBody {
    /// A body at rest on the ground
    pub fn grounded_at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            grounded: true,
        }
    }

    /// A body at rest in the air; gravity takes over on the next step
    pub fn airborne_at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            grounded: false,
        }
    }

    /// Set horizontal velocity, leaving vertical motion alone
    pub fn set_horizontal_velocity(&mut self, vx: f32) {
        self.velocity.x = vx;
    }

    /// Leave the ground with an upward (negative) vertical velocity
    pub fn launch(&mut self, impulse: f32) {
        self.velocity.y = impulse;
        self.grounded = false;
    }
}
