use anyhow::{Context, Result};
use log::{error, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::AssetManager;
use engine::game_loop::GameLoop;
use engine::input::InputManager;
use engine::renderer::LogRenderer;
use game::{Game, GameConfig};

fn main() -> Result<()> {
    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting knight controller...");

    if let Err(err) = run(GameConfig::default()) {
        error!("{:#}", err);
        return Err(err);
    }

    info!("Shut down cleanly");
    Ok(())
}

fn run(config: GameConfig) -> Result<()> {
    let mut assets = AssetManager::new(&config.asset_root);
    let timing = config.timing;
    let (width, height) = (config.world.width, config.world.height);

    let mut game = Game::load(config, &mut assets, LogRenderer::new())
        .context("Failed to initialize game")?;
    let stats = assets.stats();
    info!(
        "Loaded {} sprite sheets ({} KiB)",
        stats.texture_count,
        stats.texture_bytes / 1024
    );

    let bindings = &game.config().bindings;
    for (player, keys) in bindings.iter().enumerate() {
        info!("Player {} has {} key bindings", player + 1, keys.len());
    }
    let mut input = InputManager::new(bindings);
    let mut game_loop = GameLoop::new(timing);

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Knight")
        .with_inner_size(winit::dpi::LogicalSize::new(width, height))
        .with_resizable(false)
        .build(&event_loop)
        .context("Failed to create window")?;

    info!("Window created successfully");

    // First render error ends the loop and is reported after it exits
    let mut fatal: Option<anyhow::Error> = None;

    event_loop
        .run(|event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                game_loop.stop();
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(focused),
                ..
            } => {
                if focused {
                    game_loop.resume();
                } else {
                    // Key-ups sent while unfocused are lost
                    input.reset_all();
                    game_loop.pause();
                }
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                if let Err(err) = game_loop.run_frame(&mut game, &input) {
                    fatal = Some(err.context("Render failed"));
                    game_loop.stop();
                }
                if !game_loop.is_running() {
                    elwt.exit();
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    info!(
        "Ran {} ticks over {} frames ({:.1} fps)",
        game_loop.update_count(),
        game_loop.frame_count(),
        game_loop.fps()
    );

    match fatal {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
