// Character stats - every knight moves the same way
// Tuning lives here so the state machine and physics never hard-code speeds

/// Movement and sprite metrics for a character
///
/// Speeds are in pixels per second; `jump_impulse` is negative because the
/// screen y axis points down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterStats {
    // Movement
    /// Horizontal speed while walking
    pub walk_speed: f32,
    /// Horizontal speed while the run modifier is held
    pub run_speed: f32,
    /// Vertical velocity applied when leaving the ground
    pub jump_impulse: f32,

    // Sprite
    /// Width of one animation frame (and of the character's box)
    pub frame_width: u32,
    /// Height of one animation frame
    pub frame_height: u32,
    /// Milliseconds each animation frame stays on screen
    pub frame_interval_ms: u64,

    // Spawn
    /// Top-left corner at spawn
    pub spawn_x: f32,
    pub spawn_y: f32,
}

/// The knight's stats
pub const BASE_STATS: CharacterStats = CharacterStats {
    walk_speed: 150.0,
    run_speed: 300.0,
    jump_impulse: -500.0,

    frame_width: 96,
    frame_height: 84,
    frame_interval_ms: 100,

    spawn_x: 100.0,
    spawn_y: 516.0,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl CharacterStats {
    /// Get the standard knight stats
    pub fn standard() -> Self {
        BASE_STATS
    }

    /// Frame size as floats, for physics bounds
    pub fn sprite_size(&self) -> glam::Vec2 {
        glam::Vec2::new(self.frame_width as f32, self.frame_height as f32)
    }
}
