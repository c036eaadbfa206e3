//! Software rendering collaborators for room drawing.
//!
//! Everything is drawn into plain memory buffers, a `Buffer` doubles as both
//! the surface that gets composited into and the texture that gets drawn.
//! Dropping a buffer releases it.

mod buffer;
pub use buffer::Buffer;

mod cache;
pub use cache::{SheetCache, SheetHandle};

mod image;
pub use crate::image::{Field, Image, Sprite};

mod pixel;
pub use pixel::Pixel;

pub mod prelude;

mod sheet;
pub use sheet::SpriteSheet;

mod window;
pub use window::Window;

pub use navni::Rgba;
pub use util::Rect;
