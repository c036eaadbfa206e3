pub use glam::{ivec2, IVec2};
pub use util::{v2, Rect};

pub use crate::{Buffer, Image, Pixel, Rgba, Sprite, Window};
