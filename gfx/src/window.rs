use glam::IVec2;
use util::v2;

use crate::{Buffer, Field, Image, Pixel, Rect};

/// A clipped view through which things can be drawn on a buffer.
///
/// All positions given to window methods are local to the window, and
/// nothing drawn through the window ends up outside its bounds.
#[derive(Copy, Clone, Default)]
pub struct Window<P: Pixel> {
    /// The window's bounds in the coordinates of the target buffer.
    bounds: Rect,
    pub foreground_col: P,
}

impl<P: Pixel> From<&Buffer<P>> for Window<P> {
    fn from(c: &Buffer<P>) -> Self {
        Window::new(c.area(), Default::default())
    }
}

impl<P: Pixel> Window<P> {
    pub fn new(region: Rect, foreground_col: P) -> Window<P> {
        Window {
            bounds: region,
            foreground_col,
        }
    }

    /// Area rectangle of the window in window-local coordinates, anchored to
    /// origin.
    pub fn area(&self) -> Rect {
        Rect::sized(self.bounds.dim())
    }

    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Window bounds rectangle in buffer coordinates.
    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// Write a single pixel, ignored if outside the window.
    pub fn put(&self, c: &mut Buffer<P>, pos: impl Into<IVec2>, p: P) {
        let pos = pos.into();
        if self.area().contains(pos) {
            c.put(pos + v2(self.bounds.min()), p);
        }
    }

    /// Draw an image in the window.
    pub fn blit<F: Field<P>>(
        &self,
        c: &mut Buffer<P>,
        pos: impl Into<IVec2>,
        img: &Image<P, F>,
    ) {
        let pos = pos.into();
        for p in img.area() {
            let a = img.get(p);
            if !a.is_transparent() {
                self.put(c, pos + v2(p), a);
            }
        }
    }

    /// Draw a texture into a destination rectangle.
    ///
    /// Textures are never scaled, the destination must match the texture's
    /// dimensions.
    pub fn draw(&self, c: &mut Buffer<P>, dest: &Rect, tex: &Buffer<P>) {
        debug_assert_eq!(
            v2(dest.dim()),
            tex.dim(),
            "texture does not fit destination"
        );
        self.blit(c, dest.min(), &tex.image());
    }

    /// Draw the outline of a rectangle with the foreground color.
    pub fn outline(&self, c: &mut Buffer<P>, rect: &Rect) {
        for p in rect.edge() {
            self.put(c, p, self.foreground_col);
        }
    }
}
