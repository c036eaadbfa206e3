use glam::IVec2;
use util::v2;

use crate::{Buffer, Pixel, Rect, Rgba};

/// Something that can be sampled for pixels at integer points.
pub trait Field<P> {
    fn get(&self, pos: [i32; 2]) -> P;
}

impl<P: Pixel> Field<P> for &'_ Buffer<P> {
    fn get(&self, pos: [i32; 2]) -> P {
        Buffer::get(self, pos)
    }
}

impl<P: Pixel, F: Fn([i32; 2]) -> P> Field<P> for F {
    fn get(&self, pos: [i32; 2]) -> P {
        self(pos)
    }
}

/// A rectangular view into a pixel field.
#[derive(Copy, Clone)]
pub struct Image<P, F> {
    field: F,
    bounds: Rect,
    phantom: std::marker::PhantomData<P>,
}

/// Named frame from a sprite sheet.
pub type Sprite<'a> = Image<Rgba, &'a Buffer<Rgba>>;

impl<P: Pixel, F: Field<P>> Image<P, F> {
    pub fn new(field: F, bounds: Rect) -> Image<P, F> {
        Image {
            field,
            bounds,
            phantom: Default::default(),
        }
    }

    /// Sample the image at a point relative to the image origin.
    pub fn get(&self, pos: impl Into<[i32; 2]>) -> P {
        self.field
            .get((v2(pos.into()) + v2(self.bounds.min())).into())
    }

    pub fn dim(&self) -> IVec2 {
        self.bounds.dim().into()
    }

    /// Width of the image when drawn.
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height of the image when drawn.
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Image area anchored to origin.
    pub fn area(&self) -> Rect {
        Rect::sized(self.dim())
    }
}
