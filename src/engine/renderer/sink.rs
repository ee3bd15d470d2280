// Render sinks that need no GPU

use anyhow::Result;

use super::{RenderDescriptor, RenderSink};

/// How often the log sink reports a frame summary
const LOG_EVERY_N_FRAMES: u64 = 60;

/// Writes every draw to the `log` facade
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
    draws_this_frame: usize,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for LogRenderer {
    fn begin_frame(&mut self) -> Result<()> {
        self.draws_this_frame = 0;
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: &RenderDescriptor) -> Result<()> {
        self.draws_this_frame += 1;
        log::trace!(
            "draw {}[{}] src=({}, {}) dest=({}, {}) flip={}",
            sprite.animation,
            sprite.frame,
            sprite.src.x,
            sprite.src.y,
            sprite.dest.x,
            sprite.dest.y,
            sprite.flip_horizontal
        );
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.frames += 1;
        if self.frames % LOG_EVERY_N_FRAMES == 0 {
            log::debug!(
                "Presented frame {} ({} sprites)",
                self.frames,
                self.draws_this_frame
            );
        }
        Ok(())
    }
}

/// Keeps every presented frame's draws in memory
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pending: Vec<RenderDescriptor>,
    frames: Vec<Vec<RenderDescriptor>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All presented frames, oldest first
    pub fn frames(&self) -> &[Vec<RenderDescriptor>] {
        &self.frames
    }

    /// Draws of the most recently presented frame
    pub fn last_frame(&self) -> Option<&[RenderDescriptor]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl RenderSink for RecordingRenderer {
    fn begin_frame(&mut self) -> Result<()> {
        self.pending.clear();
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: &RenderDescriptor) -> Result<()> {
        self.pending.push(*sprite);
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }
}
