// Rendering boundary
//
// The simulation never draws anything itself. Each frame it describes what
// should be on screen as a list of `RenderDescriptor`s and hands them to a
// `RenderSink` owned by whoever hosts the game (a GPU backend, a logger, a
// test recorder).

mod sink;

pub use sink::{LogRenderer, RecordingRenderer};

use anyhow::Result;

use crate::engine::assets::TextureHandle;

/// Integer pixel rectangle (sprite-sheet sub-frame or screen destination)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// One sprite draw: which sheet, which sub-frame, where, and mirrored or not
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderDescriptor {
    /// Sheet to sample from
    pub texture: TextureHandle,
    /// Name of the animation the frame belongs to (diagnostics)
    pub animation: &'static str,
    /// Frame index within that animation
    pub frame: usize,
    /// Sub-rectangle of the sheet
    pub src: Rect,
    /// Destination on screen
    pub dest: Rect,
    /// Mirror horizontally
    pub flip_horizontal: bool,
}

/// External draw-call sink
///
/// A frame is `begin_frame`, any number of `draw_sprite`, then `present`.
/// Errors are fatal to the game loop.
pub trait RenderSink {
    fn begin_frame(&mut self) -> Result<()> {
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: &RenderDescriptor) -> Result<()>;

    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<R: RenderSink + ?Sized> RenderSink for Box<R> {
    fn begin_frame(&mut self) -> Result<()> {
        (**self).begin_frame()
    }

    fn draw_sprite(&mut self, sprite: &RenderDescriptor) -> Result<()> {
        (**self).draw_sprite(sprite)
    }

    fn present(&mut self) -> Result<()> {
        (**self).present()
    }
}
