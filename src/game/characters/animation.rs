// Character animation system

use crate::engine::renderer::Rect;

use super::state::CharacterState;

/// How a clip behaves once it runs out of frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Never advances; always shows frame 0
    Static,
    /// Wraps back to frame 0
    Loop,
    /// Stops on the last frame and stays there
    Hold,
    /// Stops on the last frame and reports completion once
    OneShot,
}

/// A single animation clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "idle", "walk", "jump")
    pub name: &'static str,
    /// Number of frames in the animation
    pub frame_count: usize,
    pub playback: Playback,
}

impl AnimationClip {
    pub const fn new(name: &'static str, frame_count: usize, playback: Playback) -> Self {
        Self {
            name,
            frame_count,
            playback,
        }
    }

    fn last_frame(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }
}

/// One clip per character state plus the shared frame cadence
#[derive(Debug, Clone)]
pub struct AnimationSet {
    clips: [AnimationClip; 5],
    frame_interval_ms: u64,
}

impl AnimationSet {
    /// The knight's clips
    ///
    /// The idle pose is a single held frame. The jump sheet has eight frames
    /// but the arc only plays the first five and holds on the fifth.
    pub fn standard(frame_interval_ms: u64) -> Self {
        Self::new(
            [
                AnimationClip::new("idle", 8, Playback::Static),
                AnimationClip::new("walk", 8, Playback::Loop),
                AnimationClip::new("run", 8, Playback::Loop),
                AnimationClip::new("jump", 5, Playback::Hold),
                AnimationClip::new("attack", 8, Playback::OneShot),
            ],
            frame_interval_ms,
        )
    }

    /// Build a set from clips in `CharacterState::ALL` order
    pub fn new(clips: [AnimationClip; 5], frame_interval_ms: u64) -> Self {
        Self {
            clips,
            frame_interval_ms: frame_interval_ms.max(1),
        }
    }

    /// Get the clip played in a state
    pub fn clip(&self, state: CharacterState) -> &AnimationClip {
        &self.clips[state.index()]
    }

    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms
    }
}

/// Result of advancing the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTick {
    /// Frame to draw
    pub frame: usize,
    /// A loop wrapped or a one-shot clip finished during this advance
    pub just_completed_cycle: bool,
}

/// Picks the frame to draw from the current state and elapsed time
///
/// Advances are anchored to the last advance time rather than to the time of
/// the call, so a steady stream of ticks never drifts against the cadence.
/// A call moves at most one frame: after a stall the missed intervals are
/// dropped and the clip resumes from the next frame on the same cadence.
#[derive(Debug, Clone)]
pub struct AnimationTimer {
    set: AnimationSet,
    frame: usize,
    last_advance_ms: u64,
    finished: bool,
}

impl AnimationTimer {
    pub fn new(set: AnimationSet) -> Self {
        Self {
            set,
            frame: 0,
            last_advance_ms: 0,
            finished: false,
        }
    }

    /// Restart from frame 0 at `now_ms`
    pub fn reset(&mut self, now_ms: u64) {
        self.frame = 0;
        self.last_advance_ms = now_ms;
        self.finished = false;
    }

    /// Step the animation for `state` up to `now_ms`
    pub fn advance(&mut self, state: CharacterState, now_ms: u64) -> AnimationTick {
        let clip = *self.set.clip(state);
        let interval = self.set.frame_interval_ms;

        // A state change without a reset may land on a shorter clip
        self.frame = self.frame.min(clip.last_frame());

        if clip.playback == Playback::Static {
            self.frame = 0;
            self.last_advance_ms = now_ms;
            return self.tick(false);
        }

        let elapsed = now_ms.saturating_sub(self.last_advance_ms);
        if elapsed < interval {
            return self.tick(false);
        }

        self.last_advance_ms += elapsed / interval * interval;
        let target = self.frame + 1;

        let completed = match clip.playback {
            Playback::Static => false,
            Playback::Loop => {
                self.frame = target % clip.frame_count.max(1);
                target >= clip.frame_count
            }
            Playback::Hold => {
                self.frame = target.min(clip.last_frame());
                false
            }
            Playback::OneShot => {
                if self.finished {
                    false
                } else if target > clip.last_frame() {
                    self.frame = clip.last_frame();
                    self.finished = true;
                    true
                } else {
                    self.frame = target;
                    false
                }
            }
        };

        self.tick(completed)
    }

    /// Current frame index
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Whether a one-shot clip has played out
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn set(&self) -> &AnimationSet {
        &self.set
    }

    fn tick(&self, just_completed_cycle: bool) -> AnimationTick {
        AnimationTick {
            frame: self.frame,
            just_completed_cycle,
        }
    }
}

/// Where each state's frames live on its sheet
///
/// Frames run left to right along a row; `rows` picks the row per state.
/// Per-state sheets use row 0 everywhere, a combined sheet stacks one row
/// per state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheetConfig {
    /// Width of each frame in pixels
    pub frame_width: u32,
    /// Height of each frame in pixels
    pub frame_height: u32,
    rows: [u32; 5],
}

impl SpriteSheetConfig {
    /// One sheet per state, each a single row
    pub fn per_state(frame_width: u32, frame_height: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            rows: [0; 5],
        }
    }

    /// One sheet, one row per state in `CharacterState::ALL` order
    pub fn combined(frame_width: u32, frame_height: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            rows: [0, 1, 2, 3, 4],
        }
    }

    pub fn row(&self, state: CharacterState) -> u32 {
        self.rows[state.index()]
    }

    /// Source rectangle of a frame
    pub fn frame_rect(&self, state: CharacterState, frame: usize) -> Rect {
        Rect::new(
            (frame as u32 * self.frame_width) as i32,
            (self.row(state) * self.frame_height) as i32,
            self.frame_width,
            self.frame_height,
        )
    }
}
