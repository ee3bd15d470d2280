// A running game: characters, world and the injected renderer

use anyhow::{Context, Result};

use crate::engine::assets::AssetManager;
use crate::engine::game_loop::{Simulation, TickStep};
use crate::engine::input::InputManager;
use crate::engine::physics::PhysicsWorld;
use crate::engine::renderer::RenderSink;

use super::characters::{AnimationSet, CharacterManager, CharacterSprites};
use super::config::{GameConfig, SpriteSource};

/// Owns every character and hands draw calls to `R`
pub struct Game<R: RenderSink> {
    config: GameConfig,
    world: PhysicsWorld,
    characters: CharacterManager,
    sprites: CharacterSprites,
    renderer: R,
    /// Simulation time of the last tick
    now_ms: u64,
}

impl<R: RenderSink> Game<R> {
    /// Validate the config and spawn one knight per player
    pub fn new(config: GameConfig, sprites: CharacterSprites, renderer: R) -> Result<Self> {
        config.validate().context("Invalid game configuration")?;

        let world = config.world.physics();
        let mut characters = CharacterManager::new();
        for player in 0..config.players() {
            characters.spawn_character(
                &format!("Knight {}", player + 1),
                Some(player),
                config.stats,
                &world,
            );
        }

        Ok(Self {
            config,
            world,
            characters,
            sprites,
            renderer,
            now_ms: 0,
        })
    }

    /// Load the configured sprite sheets, then build the game
    pub fn load(config: GameConfig, assets: &mut AssetManager, renderer: R) -> Result<Self> {
        let layout = config.sprites.layout(&config.stats);
        let animations = AnimationSet::standard(config.stats.frame_interval_ms);

        let sprites = match &config.sprites {
            SpriteSource::PerState { directory } => {
                CharacterSprites::load_per_state(assets, directory, layout, &animations)
                    .with_context(|| format!("Failed to load sprite sheets from {}", directory))?
            }
            SpriteSource::Combined { file } => {
                CharacterSprites::load_combined(assets, file, layout, &animations)
                    .with_context(|| format!("Failed to load sprite sheet {}", file))?
            }
        };

        Self::new(config, sprites, renderer)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn characters(&self) -> &CharacterManager {
        &self.characters
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

impl<R: RenderSink> Simulation for Game<R> {
    fn fixed_update(&mut self, input: &InputManager, step: TickStep) {
        self.now_ms = step.now_ms;
        self.characters.update(input, &self.world, step);
    }

    fn render(&mut self) -> Result<()> {
        self.renderer.begin_frame()?;
        for character in self.characters.all() {
            let sprite = character.render_descriptor(&self.sprites);
            self.renderer.draw_sprite(&sprite)?;
        }
        self.renderer.present()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::ManualClock;
    use crate::engine::game_loop::{GameLoop, LoopConfig};
    use crate::engine::input::{InputSource, KeyBindings};
    use crate::engine::renderer::{RecordingRenderer, RenderDescriptor};
    use crate::game::characters::{CharacterState, SpriteSheetConfig};
    use approx::assert_abs_diff_eq;
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    struct Harness {
        game: Game<RecordingRenderer>,
        game_loop: GameLoop<ManualClock>,
        input: InputManager,
    }

    impl Harness {
        fn new() -> Self {
            let mut assets = AssetManager::new("unused");
            let handle = assets.create_blank_texture("knight", 768, 420).unwrap();
            let sprites = CharacterSprites::from_handles(
                [handle; 5],
                SpriteSheetConfig::combined(96, 84),
            );
            let config = GameConfig::default();
            let game_loop = GameLoop::with_clock(ManualClock::new(), config.timing);
            let input = InputManager::new(&config.bindings);

            Self {
                game: Game::new(config, sprites, RecordingRenderer::new()).unwrap(),
                game_loop,
                input,
            }
        }

        fn press(&mut self, key: KeyCode) {
            self.input
                .apply(InputSource::key(key), ElementState::Pressed);
        }

        fn release(&mut self, key: KeyCode) {
            self.input
                .apply(InputSource::key(key), ElementState::Released);
        }

        fn run(&mut self, ticks: u32) -> u32 {
            self.game_loop
                .run_ticks(&mut self.game, &self.input, ticks)
                .unwrap()
        }

        fn knight(&self) -> &crate::game::characters::Character {
            self.game.characters().get_by_player(0).unwrap()
        }

        fn last_sprite(&self) -> RenderDescriptor {
            self.game.renderer().last_frame().unwrap()[0]
        }
    }

    #[test]
    fn test_walk_right_for_half_a_second() {
        let mut h = Harness::new();
        h.press(KeyCode::ArrowRight);
        h.run(31);

        let knight = h.knight();
        assert_eq!(knight.state(), CharacterState::Walking);
        assert_abs_diff_eq!(knight.position().x, 174.4, epsilon = 0.01);
        assert_eq!(knight.position().y, 516.0);
        assert!(!h.last_sprite().flip_horizontal);
    }

    #[test]
    fn test_walk_cycles_frames_every_interval() {
        let mut h = Harness::new();
        h.press(KeyCode::ArrowLeft);

        let mut frames = Vec::new();
        for _ in 0..20 {
            h.run(1);
            frames.push(h.last_sprite().frame);
        }

        // Reset at 16 ms, so the first advance is the tick at or past 116 ms
        assert_eq!(frames[0], 0);
        assert_eq!(frames[6], 0);
        assert_eq!(frames[7], 1);
        assert_eq!(frames[13], 2);
        assert!(h.last_sprite().flip_horizontal);
    }

    #[test]
    fn test_run_keeps_walk_frame() {
        let mut h = Harness::new();
        h.press(KeyCode::ArrowRight);
        h.run(10);
        let walk_frame = h.last_sprite().frame;
        assert!(walk_frame > 0);

        h.press(KeyCode::ShiftLeft);
        h.run(1);

        assert_eq!(h.knight().state(), CharacterState::Running);
        assert_eq!(h.last_sprite().frame, walk_frame);
        assert_eq!(h.last_sprite().animation, "run");
        assert_eq!(h.knight().velocity().x, 300.0);
    }

    #[test]
    fn test_jump_arc_lands_idle() {
        let mut h = Harness::new();
        h.press(KeyCode::Space);
        h.run(1);
        h.release(KeyCode::Space);
        assert_eq!(h.knight().state(), CharacterState::Jumping);

        let mut peak = f32::MAX;
        let mut ticks = 1;
        while !h.knight().is_grounded() {
            h.run(1);
            peak = peak.min(h.knight().position().y);
            ticks += 1;
            assert!(ticks < 100, "never landed");
        }

        assert!(peak < 516.0 - 75.0);
        assert_eq!(h.knight().state(), CharacterState::Idle);
        assert_eq!(h.knight().velocity().y, 0.0);
        assert_eq!(h.knight().position().y, 516.0);
    }

    #[test]
    fn test_jump_is_ignored_while_airborne() {
        let mut h = Harness::new();
        h.press(KeyCode::Space);
        h.run(1);
        let vy_after_launch = h.knight().velocity().y;

        // Still holding jump in the air: only gravity changes vy
        h.run(1);
        let vy = h.knight().velocity().y;
        assert_abs_diff_eq!(vy, vy_after_launch + 1500.0 * 0.016, epsilon = 0.001);
    }

    #[test]
    fn test_attack_absorbs_input_until_finished() {
        let mut h = Harness::new();
        h.press(KeyCode::KeyX);
        h.run(1);
        h.release(KeyCode::KeyX);
        assert_eq!(h.knight().state(), CharacterState::Attacking);

        h.press(KeyCode::ArrowRight);
        h.press(KeyCode::Space);
        for _ in 0..49 {
            h.run(1);
            assert_eq!(h.knight().state(), CharacterState::Attacking);
            assert_eq!(h.knight().position().x, 100.0);
            assert!(h.knight().is_grounded());
        }

        // Animation finishes on the 50th tick after the attack started
        h.run(1);
        assert!(h.knight().attack_pending());
        assert_eq!(h.last_sprite().frame, 7);

        h.release(KeyCode::Space);
        h.run(1);
        assert_eq!(h.knight().state(), CharacterState::Walking);
        assert_eq!(h.last_sprite().frame, 0);
    }

    #[test]
    fn test_attack_then_idle() {
        let mut h = Harness::new();
        h.press(KeyCode::KeyX);
        h.run(1);
        h.release(KeyCode::KeyX);

        h.run(51);
        assert_eq!(h.knight().state(), CharacterState::Idle);
        assert!(!h.knight().attack_pending());
    }

    #[test]
    fn test_run_continues_on_the_other_shift() {
        let mut h = Harness::new();
        h.press(KeyCode::ArrowRight);
        h.press(KeyCode::ShiftLeft);
        h.press(KeyCode::ShiftRight);
        h.run(1);

        h.release(KeyCode::ShiftLeft);
        h.run(1);
        assert_eq!(h.knight().state(), CharacterState::Running);
        assert_eq!(h.knight().velocity().x, 300.0);

        h.release(KeyCode::ShiftRight);
        h.run(1);
        assert_eq!(h.knight().state(), CharacterState::Walking);
    }

    #[test]
    fn test_cleared_input_settles_to_idle() {
        let mut h = Harness::new();
        h.press(KeyCode::ArrowRight);
        h.press(KeyCode::ShiftLeft);
        h.run(1);
        assert_eq!(h.knight().state(), CharacterState::Running);

        // Focus lost: the key-ups never arrive
        h.input.reset_all();
        let x = h.knight().position().x;
        h.run(30);

        assert_eq!(h.knight().state(), CharacterState::Idle);
        assert_eq!(h.knight().velocity().x, 0.0);
        assert_eq!(h.knight().position().x, x);
    }

    #[test]
    fn test_world_edges_clamp() {
        let mut h = Harness::new();
        h.press(KeyCode::ArrowLeft);
        h.press(KeyCode::ShiftRight);
        h.run(60);
        assert_eq!(h.knight().position().x, 0.0);

        h.release(KeyCode::ArrowLeft);
        h.press(KeyCode::ArrowRight);
        h.run(200);
        assert_eq!(h.knight().position().x, 800.0 - 96.0);
    }

    #[test]
    fn test_quit_stops_before_next_tick() {
        let mut h = Harness::new();
        h.run(3);
        h.press(KeyCode::Escape);

        assert_eq!(h.run(10), 0);
        assert!(!h.game_loop.is_running());
        assert_eq!(h.game.now_ms(), 48);
    }

    #[test]
    fn test_renders_every_character() {
        let mut assets = AssetManager::new("unused");
        let handle = assets.create_blank_texture("knight", 768, 420).unwrap();
        let sprites =
            CharacterSprites::from_handles([handle; 5], SpriteSheetConfig::combined(96, 84));
        let config = GameConfig {
            bindings: vec![KeyBindings::arrows(); 2],
            ..GameConfig::default()
        };
        let mut game = Game::new(config, sprites, RecordingRenderer::new()).unwrap();

        game.render().unwrap();
        let frame = game.renderer().last_frame().unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame[0].dest.y, 516);
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let mut assets = AssetManager::new("unused");
        let handle = assets.create_blank_texture("knight", 768, 420).unwrap();
        let sprites =
            CharacterSprites::from_handles([handle; 5], SpriteSheetConfig::combined(96, 84));
        let mut config = GameConfig::default();
        config.world.ground_level = 599.0;

        assert!(Game::new(config, sprites, RecordingRenderer::new()).is_err());
    }

    #[test]
    fn test_load_without_assets_is_fatal() {
        let mut assets = AssetManager::new("/nonexistent/knight");
        let result = Game::load(GameConfig::default(), &mut assets, RecordingRenderer::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_fixed_step_loop_drives_game() {
        let mut h = Harness::new();
        h.press(KeyCode::ArrowRight);

        h.game_loop.clock().advance(160);
        let ticks = h
            .game_loop
            .run_frame(&mut h.game, &h.input)
            .unwrap();

        // Capped at five steps per frame, the rest is dropped
        assert_eq!(ticks, LoopConfig::default().max_steps_per_frame);
        assert_eq!(h.game.now_ms(), 80);
        assert_eq!(h.game.renderer().frames().len(), 1);
    }
}
