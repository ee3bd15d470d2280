// Character entity and management

use glam::Vec2;

use crate::engine::game_loop::TickStep;
use crate::engine::input::{InputManager, InputSnapshot};
use crate::engine::physics::{Contact, KinematicBody, PhysicsWorld};
use crate::engine::renderer::RenderDescriptor;

use super::animation::{AnimationSet, AnimationTick, AnimationTimer};
use super::sprites::CharacterSprites;
use super::state::{CharacterState, CharacterStateMachine, Facing, StateDelta};
use super::stats::CharacterStats;

/// Unique identifier for a character
pub type CharacterId = u32;

/// Represents a player-controlled character in the game
#[derive(Debug)]
pub struct Character {
    /// Unique identifier
    pub id: CharacterId,
    /// Character name (for display)
    pub name: String,
    /// Player index controlling this character, or None for a puppet
    pub player_index: Option<usize>,

    // Physics
    /// Position, velocity and ground contact
    pub body: KinematicBody,

    // Stats and state
    /// Character properties
    pub stats: CharacterStats,
    /// State machine for character behavior
    pub state_machine: CharacterStateMachine,
    /// Frame selection for the current state
    pub animation: AnimationTimer,

    /// The attack animation finished; consumed by the next state machine step
    attack_complete: bool,
}

impl Character {
    /// Create a new character at its spawn point
    pub fn new(
        id: CharacterId,
        name: &str,
        player_index: Option<usize>,
        stats: CharacterStats,
        physics: &PhysicsWorld,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            player_index,
            body: physics.spawn_body(stats.spawn_x, stats.spawn_y),
            state_machine: CharacterStateMachine::new(&stats),
            animation: AnimationTimer::new(AnimationSet::standard(stats.frame_interval_ms)),
            stats,
            attack_complete: false,
        }
    }

    /// Run one full tick: input, physics, landing, animation
    pub fn tick(&mut self, input: &InputSnapshot, physics: &PhysicsWorld, step: TickStep) {
        self.handle_input(input, step.now_ms);
        self.update_physics(physics, step.dt, step.now_ms);
        self.update_animation(step.now_ms);
    }

    /// Feed this tick's buttons through the state machine
    pub fn handle_input(&mut self, input: &InputSnapshot, now_ms: u64) -> StateDelta {
        let attack_complete = std::mem::take(&mut self.attack_complete);
        let delta = self
            .state_machine
            .step(input, self.body.grounded, attack_complete);
        self.apply(&delta, now_ms);
        delta
    }

    /// Integrate the body and re-derive the state on touchdown
    pub fn update_physics(&mut self, physics: &PhysicsWorld, dt: f32, now_ms: u64) -> Contact {
        let contact = physics.integrate(&mut self.body, self.stats.sprite_size(), dt);

        if contact.landed {
            if let Some(delta) = self.state_machine.land(self.body.velocity.x) {
                log::debug!("{} landed at x={:.1}", self.name, self.body.position.x);
                self.apply(&delta, now_ms);
            }
        }

        contact
    }

    /// Pick this tick's frame; a finished attack is reported to the next step
    pub fn update_animation(&mut self, now_ms: u64) -> AnimationTick {
        let state = self.state();
        let tick = self.animation.advance(state, now_ms);

        if tick.just_completed_cycle && state == CharacterState::Attacking {
            self.attack_complete = true;
        }

        tick
    }

    fn apply(&mut self, delta: &StateDelta, now_ms: u64) {
        if let Some(vx) = delta.velocity_x {
            self.body.set_horizontal_velocity(vx);
        }
        if let Some(impulse) = delta.jump_impulse {
            self.body.launch(impulse);
        }
        if delta.reset_animation {
            self.animation.reset(now_ms);
        }
    }

    /// Draw call for the current frame
    pub fn render_descriptor(&self, sprites: &CharacterSprites) -> RenderDescriptor {
        sprites.descriptor(
            self.state(),
            self.animation.frame(),
            self.body.position,
            self.facing(),
        )
    }

    /// Get the current state
    pub fn state(&self) -> CharacterState {
        self.state_machine.state()
    }

    pub fn facing(&self) -> Facing {
        self.state_machine.facing()
    }

    /// Get character's current position (top-left corner)
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Get character's current velocity
    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    /// Check if character is on ground
    pub fn is_grounded(&self) -> bool {
        self.body.grounded
    }

    /// Whether a finished attack is waiting for the next step
    pub fn attack_pending(&self) -> bool {
        self.attack_complete
    }
}

/// Manages all characters in the game
#[derive(Debug, Default)]
pub struct CharacterManager {
    characters: Vec<Character>,
    next_id: CharacterId,
}

impl CharacterManager {
    pub fn new() -> Self {
        Self {
            characters: Vec::new(),
            next_id: 0,
        }
    }

    /// Spawn a new character
    pub fn spawn_character(
        &mut self,
        name: &str,
        player_index: Option<usize>,
        stats: CharacterStats,
        physics: &PhysicsWorld,
    ) -> CharacterId {
        let id = self.next_id;
        self.next_id += 1;

        let character = Character::new(id, name, player_index, stats, physics);
        log::info!(
            "Spawned {} (id {}) at ({}, {})",
            name,
            id,
            character.position().x,
            character.position().y
        );
        self.characters.push(character);

        id
    }

    /// Get a character by ID
    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Get a character by player index
    pub fn get_by_player(&self, player_index: usize) -> Option<&Character> {
        self.characters
            .iter()
            .find(|c| c.player_index == Some(player_index))
    }

    /// Get all characters
    pub fn all(&self) -> &[Character] {
        &self.characters
    }

    /// Tick every character with its player's buttons
    pub fn update(&mut self, input: &InputManager, physics: &PhysicsWorld, step: TickStep) {
        for character in &mut self.characters {
            let snapshot = character
                .player_index
                .map(|index| input.snapshot(index))
                .unwrap_or_default();
            character.tick(&snapshot, physics, step);
        }
    }
}
