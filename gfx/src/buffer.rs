use anyhow::bail;
use glam::{ivec2, IVec2};
use navni::Rgba;
use util::v2;

use crate::{Field, Image, Pixel, Rect};

/// Owned rectangular pixel image.
pub struct Buffer<P> {
    width: u32,
    height: u32,
    pub(crate) data: Vec<P>,
}

impl<P> AsRef<Buffer<P>> for Buffer<P> {
    fn as_ref(&self) -> &Buffer<P> {
        self
    }
}

impl<P> AsMut<Buffer<P>> for Buffer<P> {
    fn as_mut(&mut self) -> &mut Buffer<P> {
        self
    }
}

impl From<image::DynamicImage> for Buffer<Rgba> {
    fn from(image: image::DynamicImage) -> Self {
        let image = image.to_rgba8();
        let (width, height) = (image.width(), image.height());
        let data = image
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                Rgba::new(r, g, b, a)
            })
            .collect();

        Buffer {
            width,
            height,
            data,
        }
    }
}

impl Buffer<Rgba> {
    /// Sprite sheet pixels with this color are made transparent when
    /// loading.
    pub const KEY_COLOR: Rgba = Rgba::CYAN;

    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let mut ret: Buffer<Rgba> = image::load_from_memory(bytes)?.into();
        ret.set_key_to_transparent(Self::KEY_COLOR);
        Ok(ret)
    }

    /// Encode the buffer as a PNG image.
    pub fn to_png(&self) -> anyhow::Result<Vec<u8>> {
        use image::ImageEncoder;

        let bounds = self.area();
        let img = image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let p = self.data[bounds.idx([x as i32, y as i32])];
            image::Rgba([p.r, p.g, p.b, p.a])
        });

        let mut ret = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut ret);
        encoder.write_image(
            &img.into_raw(),
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )?;

        Ok(ret)
    }
}

impl<P: Pixel> Buffer<P> {
    /// Create a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Buffer::filled(width, height, Default::default())
    }

    pub fn filled(width: u32, height: u32, color: P) -> Self {
        Buffer {
            width,
            height,
            data: vec![color; width as usize * height as usize],
        }
    }

    pub fn from_fn(width: u32, height: u32, f: impl Fn(i32, i32) -> P) -> Self {
        let area = Rect::sized([width as i32, height as i32]);
        let data = (0..width as usize * height as usize)
            .map(|i| {
                let [x, y] = area.get(i);
                f(x, y)
            })
            .collect();
        Buffer {
            width,
            height,
            data,
        }
    }

    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut P> {
        self.data.iter_mut()
    }

    pub fn data(&self) -> &[P] {
        &self.data
    }

    pub fn set_key_to_transparent(&mut self, key: P) {
        for p in self.pixels_mut() {
            if *p == key {
                *p = P::default();

                debug_assert!(
                    p.is_transparent(),
                    "default pixel is not transparent"
                );
            }
        }
    }

    pub fn dim(&self) -> IVec2 {
        ivec2(self.width as i32, self.height as i32)
    }

    pub fn width(&self) -> i32 {
        self.width as i32
    }

    pub fn height(&self) -> i32 {
        self.height as i32
    }

    pub fn area(&self) -> Rect {
        Rect::sized(self.dim())
    }

    /// Read a pixel, points outside the buffer read as transparent.
    pub fn get(&self, pos: impl Into<[i32; 2]>) -> P {
        let pos = pos.into();
        let area = self.area();
        if area.contains(pos) {
            self.data[area.idx(pos)]
        } else {
            Default::default()
        }
    }

    /// Write a pixel, points outside the buffer are ignored.
    pub fn put(&mut self, pos: impl Into<[i32; 2]>, p: P) {
        let pos = pos.into();
        let area = self.area();
        if area.contains(pos) {
            self.data[area.idx(pos)] = p;
        }
    }

    /// View the whole buffer as an image.
    pub fn image(&self) -> Image<P, &Self> {
        Image::new(self, self.area())
    }

    /// Copy the opaque pixels of an image into the buffer with the image's
    /// origin at `pos`.
    ///
    /// Parts of the image that fall outside the buffer are clipped. Fails if
    /// no part of the destination lies on the buffer.
    pub fn blit<F: Field<P>>(
        &mut self,
        pos: impl Into<IVec2>,
        img: &Image<P, F>,
    ) -> anyhow::Result<()> {
        let pos = pos.into();
        let dest = img.area() + pos;
        if !self.area().intersects(&dest) {
            bail!(
                "blit to {dest:?} misses {}x{} buffer",
                self.width,
                self.height
            );
        }

        for p in img.area() {
            let a = img.get(p);
            if !a.is_transparent() {
                self.put(pos + v2(p), a);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::new(0xff, 0x00, 0x00, 0xff);

    #[test]
    fn new_buffer_is_transparent() {
        let buf: Buffer<Rgba> = Buffer::new(4, 3);
        assert_eq!(buf.dim(), ivec2(4, 3));
        assert_eq!(buf.data().len(), 12);
        assert!(buf.data().iter().all(|p| p.is_transparent()));
    }

    #[test]
    fn blit_clips_to_buffer() {
        let mut buf: Buffer<Rgba> = Buffer::new(4, 4);
        let src = Buffer::filled(2, 2, RED);

        buf.blit([3, 3], &src.image()).unwrap();
        assert!(buf.get([3, 3]) == RED);
        assert!(buf.get([2, 2]).is_transparent());
        assert_eq!(buf.data().iter().filter(|p| **p == RED).count(), 1);

        // Negative offsets clip too.
        buf.blit([-1, -1], &src.image()).unwrap();
        assert!(buf.get([0, 0]) == RED);
    }

    #[test]
    fn blit_off_buffer_fails() {
        let mut buf: Buffer<Rgba> = Buffer::new(4, 4);
        let src = Buffer::filled(2, 2, RED);
        assert!(buf.blit([4, 0], &src.image()).is_err());
        assert!(buf.blit([-2, 0], &src.image()).is_err());
        assert!(buf.data().iter().all(|p| p.is_transparent()));
    }

    #[test]
    fn blit_skips_transparent_pixels() {
        let mut buf = Buffer::filled(2, 1, RED);
        let src: Buffer<Rgba> = Buffer::new(2, 1);
        buf.blit([0, 0], &src.image()).unwrap();
        assert!(buf.data().iter().all(|p| *p == RED));
    }

    #[test]
    fn png_roundtrip() {
        let buf = Buffer::from_fn(3, 2, |x, y| {
            if (x + y) % 2 == 0 {
                RED
            } else {
                Rgba::BLACK
            }
        });
        let png = buf.to_png().unwrap();
        let back = Buffer::from_bytes(&png).unwrap();
        assert_eq!(back.dim(), buf.dim());
        assert!(back.data() == buf.data());
    }
}
