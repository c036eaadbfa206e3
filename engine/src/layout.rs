use std::path::Path;

use anyhow::Context;
use gfx::Rgba;
use serde::Deserialize;
use util::Rect;

/// Placement and presentation settings for the room view.
#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Layout {
    /// Position of the room's top left corner on the canvas.
    pub origin: [i32; 2],
    /// Size of the room's drawable area.
    pub dim: [i32; 2],
    /// Name of the sprite sheet the room draws from.
    pub sheet: String,
    /// RGB fill color under the background sprites.
    pub background: [u8; 3],
    /// Outline obstacles when drawing.
    pub show_collision: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            origin: [0, 32],
            dim: [480, 320],
            sheet: "default".into(),
            background: [0, 0, 0],
            show_collision: false,
        }
    }
}

impl Layout {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        idm::from_str(&text)
            .with_context(|| format!("bad layout file {}", path.display()))
    }

    /// Room drawable area in canvas coordinates.
    pub fn draw_rect(&self) -> Rect {
        Rect::at(self.origin, self.dim)
    }

    pub fn background_color(&self) -> Rgba {
        let [r, g, b] = self.background;
        Rgba::new(r, g, b, 0xff)
    }
}
