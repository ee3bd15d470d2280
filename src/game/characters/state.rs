// Character state machine

use crate::engine::input::InputSnapshot;

use super::stats::CharacterStats;

/// Represents the current state of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharacterState {
    /// Standing still on ground
    #[default]
    Idle,
    /// Moving horizontally on ground at walk speed
    Walking,
    /// Moving horizontally on ground at run speed
    Running,
    /// In the air after a jump (or an airborne attack)
    Jumping,
    /// Playing the attack animation; ignores input until it finishes
    Attacking,
}

impl CharacterState {
    /// Every state, in sprite-sheet row order
    pub const ALL: [CharacterState; 5] = [
        Self::Idle,
        Self::Walking,
        Self::Running,
        Self::Jumping,
        Self::Attacking,
    ];

    /// Stable index into per-state tables
    pub fn index(&self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Walking => 1,
            Self::Running => 2,
            Self::Jumping => 3,
            Self::Attacking => 4,
        }
    }

    /// Walking or running on the ground
    pub fn is_moving(&self) -> bool {
        matches!(self, Self::Walking | Self::Running)
    }

    /// Whether input can change this state right now
    pub fn accepts_input(&self, attack_just_completed: bool) -> bool {
        *self != Self::Attacking || attack_just_completed
    }

    /// Get the animation name for this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walk",
            Self::Running => "run",
            Self::Jumping => "jump",
            Self::Attacking => "attack",
        }
    }
}

/// Horizontal direction the sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Sheets are drawn facing right; left-facing sprites are mirrored
    pub fn flip_horizontal(&self) -> bool {
        *self == Self::Left
    }

    /// +1.0 for right, -1.0 for left
    pub fn sign(&self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// What one state machine step asks the rest of the character to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateDelta {
    /// State before the step
    pub previous_state: CharacterState,
    /// State after the step
    pub new_state: CharacterState,
    /// Replace horizontal velocity
    pub velocity_x: Option<f32>,
    /// Turn the sprite
    pub facing: Option<Facing>,
    /// Leave the ground with this vertical velocity
    pub jump_impulse: Option<f32>,
    /// Restart the animation cycle from frame 0
    pub reset_animation: bool,
}

impl StateDelta {
    /// A step that changes nothing
    pub fn unchanged(state: CharacterState) -> Self {
        Self {
            previous_state: state,
            new_state: state,
            velocity_x: None,
            facing: None,
            jump_impulse: None,
            reset_animation: false,
        }
    }

    /// Whether the step moved to a different state
    pub fn is_transition(&self) -> bool {
        self.previous_state != self.new_state
    }
}

/// State machine that handles character state transitions
///
/// Transitions are evaluated in a fixed priority order, so every combination
/// of buttons maps to exactly one outcome:
///
/// 1. an unfinished attack absorbs all input;
/// 2. attack starts a new attack and stops the character;
/// 3. jump on the ground launches the character (horizontal input still
///    applies in the same step);
/// 4. a direction on the ground walks, or runs with the run modifier;
/// 5. in the air, directions steer but the state stays `Jumping`;
/// 6. otherwise the character idles.
#[derive(Debug, Clone)]
pub struct CharacterStateMachine {
    current_state: CharacterState,
    previous_state: CharacterState,
    facing: Facing,
    walk_speed: f32,
    run_speed: f32,
    jump_impulse: f32,
}

impl CharacterStateMachine {
    pub fn new(stats: &CharacterStats) -> Self {
        Self {
            current_state: CharacterState::Idle,
            previous_state: CharacterState::Idle,
            facing: Facing::Right,
            walk_speed: stats.walk_speed,
            run_speed: stats.run_speed,
            jump_impulse: stats.jump_impulse,
        }
    }

    /// Get the current state
    pub fn state(&self) -> CharacterState {
        self.current_state
    }

    /// Get the state before the last transition
    pub fn previous_state(&self) -> CharacterState {
        self.previous_state
    }

    /// Get the facing direction
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Evaluate one tick of input
    ///
    /// `attack_just_completed` must be passed as true exactly once, on the
    /// first step after the attack animation finished.
    pub fn step(
        &mut self,
        input: &InputSnapshot,
        grounded: bool,
        attack_just_completed: bool,
    ) -> StateDelta {
        let current = self.current_state;

        if !current.accepts_input(attack_just_completed) {
            return StateDelta::unchanged(current);
        }

        if input.attack {
            let mut delta = StateDelta::unchanged(current);
            delta.new_state = CharacterState::Attacking;
            delta.velocity_x = Some(0.0);
            delta.reset_animation = true;
            return self.commit(delta);
        }

        let (velocity_x, facing) = self.horizontal(input);
        let mut delta = StateDelta::unchanged(current);
        delta.velocity_x = Some(velocity_x);
        delta.facing = facing;

        if input.jump && grounded {
            delta.new_state = CharacterState::Jumping;
            delta.jump_impulse = Some(self.jump_impulse);
            delta.reset_animation = true;
        } else if input.has_direction() && grounded {
            delta.new_state = if input.run {
                CharacterState::Running
            } else {
                CharacterState::Walking
            };
            // Walk <-> run and direction changes keep the cycle going
            delta.reset_animation = !current.is_moving();
        } else if !grounded {
            delta.new_state = CharacterState::Jumping;
            delta.reset_animation = current != CharacterState::Jumping;
        } else {
            delta.new_state = CharacterState::Idle;
            delta.reset_animation = current != CharacterState::Idle;
        }

        self.commit(delta)
    }

    /// Re-derive the state when a jump touches down
    ///
    /// Only a `Jumping` character reacts; anything else (e.g. an attack that
    /// started in the air) keeps its state until its own rules move it.
    pub fn land(&mut self, velocity_x: f32) -> Option<StateDelta> {
        if self.current_state != CharacterState::Jumping {
            return None;
        }

        let speed = velocity_x.abs();
        let mut delta = StateDelta::unchanged(self.current_state);
        delta.new_state = if speed > self.walk_speed {
            CharacterState::Running
        } else if speed > 0.0 {
            CharacterState::Walking
        } else {
            CharacterState::Idle
        };
        delta.reset_animation = true;

        Some(self.commit(delta))
    }

    /// Resolve left/right into a velocity and facing; right wins when both are held
    fn horizontal(&self, input: &InputSnapshot) -> (f32, Option<Facing>) {
        let facing = if input.right {
            Facing::Right
        } else if input.left {
            Facing::Left
        } else {
            return (0.0, None);
        };

        let speed = if input.run {
            self.run_speed
        } else {
            self.walk_speed
        };

        (speed * facing.sign(), Some(facing))
    }

    fn commit(&mut self, delta: StateDelta) -> StateDelta {
        if let Some(facing) = delta.facing {
            self.facing = facing;
        }

        if delta.is_transition() {
            log::debug!("{:?} -> {:?}", delta.previous_state, delta.new_state);
            self.previous_state = self.current_state;
            self.current_state = delta.new_state;
        }

        delta
    }
}
