// Engine modules: clock, game loop, input, physics, assets, rendering boundary

pub mod assets;
pub mod clock;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
