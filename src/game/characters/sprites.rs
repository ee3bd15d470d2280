// Sprite sheets bound to character states

use glam::Vec2;

use crate::engine::assets::{AssetError, AssetManager, TextureHandle};
use crate::engine::renderer::{Rect, RenderDescriptor};

use super::animation::{AnimationSet, SpriteSheetConfig};
use super::state::{CharacterState, Facing};

/// Sheet file for each state when every state has its own sheet
pub fn sheet_file(state: CharacterState) -> &'static str {
    match state {
        CharacterState::Idle => "IDLE.png",
        CharacterState::Walking => "WALK.png",
        CharacterState::Running => "RUN.png",
        CharacterState::Jumping => "JUMP.png",
        CharacterState::Attacking => "ATTACK 1.png",
    }
}

/// Resolved sheet handle per state plus the frame layout
///
/// Built once at startup; after that, drawing a character never touches the
/// asset manager.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterSprites {
    textures: [TextureHandle; 5],
    layout: SpriteSheetConfig,
}

impl CharacterSprites {
    /// Load `<directory>/IDLE.png`, `<directory>/WALK.png`, ... and check
    /// each can hold its clip
    pub fn load_per_state(
        assets: &mut AssetManager,
        directory: &str,
        layout: SpriteSheetConfig,
        animations: &AnimationSet,
    ) -> Result<Self, AssetError> {
        let mut textures = Vec::with_capacity(CharacterState::ALL.len());

        for state in CharacterState::ALL {
            let name = format!("{}/{}", directory, sheet_file(state));
            let handle = assets.load_texture(&name)?;
            textures.push(handle);
        }

        let sprites = Self::from_handles(to_array(textures)?, layout);
        sprites.validate(assets, animations)?;
        Ok(sprites)
    }

    /// Load one sheet holding every state, one row each
    pub fn load_combined(
        assets: &mut AssetManager,
        name: &str,
        layout: SpriteSheetConfig,
        animations: &AnimationSet,
    ) -> Result<Self, AssetError> {
        let handle = assets.load_texture(name)?;
        let sprites = Self::from_handles([handle; 5], layout);
        sprites.validate(assets, animations)?;
        Ok(sprites)
    }

    /// Bind already loaded sheets, in `CharacterState::ALL` order
    pub fn from_handles(textures: [TextureHandle; 5], layout: SpriteSheetConfig) -> Self {
        Self { textures, layout }
    }

    /// Make sure every state's sheet is big enough for its frames
    pub fn validate(
        &self,
        assets: &AssetManager,
        animations: &AnimationSet,
    ) -> Result<(), AssetError> {
        for state in CharacterState::ALL {
            let handle = self.texture(state);
            let sheet = assets
                .get_texture(handle)
                .ok_or(AssetError::MissingStateTexture(state.animation_name()))?;

            let frames = animations.clip(state).frame_count as u32;
            sheet.ensure_frames(
                self.layout.frame_width,
                self.layout.frame_height,
                frames,
                self.layout.row(state) + 1,
            )?;
        }
        Ok(())
    }

    /// Sheet used in a state
    pub fn texture(&self, state: CharacterState) -> TextureHandle {
        self.textures[state.index()]
    }

    pub fn layout(&self) -> &SpriteSheetConfig {
        &self.layout
    }

    /// Draw call for one character at `position` (top-left, world pixels)
    pub fn descriptor(
        &self,
        state: CharacterState,
        frame: usize,
        position: Vec2,
        facing: Facing,
    ) -> RenderDescriptor {
        RenderDescriptor {
            texture: self.texture(state),
            animation: state.animation_name(),
            frame,
            src: self.layout.frame_rect(state, frame),
            dest: Rect::new(
                position.x.round() as i32,
                position.y.round() as i32,
                self.layout.frame_width,
                self.layout.frame_height,
            ),
            flip_horizontal: facing.flip_horizontal(),
        }
    }
}

fn to_array(textures: Vec<TextureHandle>) -> Result<[TextureHandle; 5], AssetError> {
    textures
        .try_into()
        .map_err(|v: Vec<TextureHandle>| {
            let missing = CharacterState::ALL[v.len().min(CharacterState::ALL.len() - 1)];
            AssetError::MissingStateTexture(missing.animation_name())
        })
}
