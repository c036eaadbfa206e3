use anyhow::{bail, Context};
use util::IndexMap;

use crate::{Buffer, Image, Rect, Rgba, Sprite};

/// Image atlas with named sprite frames.
pub struct SpriteSheet {
    buffer: Buffer<Rgba>,
    frames: IndexMap<String, Rect>,
}

impl SpriteSheet {
    pub fn new(
        buffer: Buffer<Rgba>,
        frames: IndexMap<String, Rect>,
    ) -> anyhow::Result<Self> {
        for (name, rect) in &frames {
            if rect.is_empty() {
                bail!("sprite {name:?} has no area");
            }
            if !buffer.area().contains_other(rect) {
                bail!("sprite {name:?} at {rect:?} is outside sheet");
            }
        }

        Ok(SpriteSheet { buffer, frames })
    }

    /// Load a sheet from PNG data and an IDM frame table.
    ///
    /// The frame table maps sprite names to frame rectangles given as
    /// `x0 y0 x1 y1` corner coordinates.
    pub fn load(png: &[u8], frame_table: &str) -> anyhow::Result<Self> {
        let buffer =
            Buffer::from_bytes(png).context("failed to decode sheet image")?;
        let frames: IndexMap<String, Rect> = idm::from_str(frame_table)
            .context("failed to parse sheet frame table")?;
        SpriteSheet::new(buffer, frames)
    }

    pub fn get(&self, name: &str) -> Option<Sprite<'_>> {
        let &bounds = self.frames.get(name)?;
        Some(Image::new(&self.buffer, bounds))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
