//! Sprite sheet fixtures for tests.

use gfx::{Buffer, Rgba, SheetCache, SpriteSheet};
use util::Rect;

pub const NORTH_COL: Rgba = Rgba::new(0xff, 0x00, 0x00, 0xff);
pub const SOUTH_COL: Rgba = Rgba::new(0x00, 0xff, 0x00, 0xff);
pub const WEST_COL: Rgba = Rgba::new(0x00, 0x00, 0xff, 0xff);
pub const EAST_COL: Rgba = Rgba::new(0xff, 0xff, 0x00, 0xff);
pub const FLOOR_COL: Rgba = Rgba::new(0x80, 0x80, 0x80, 0xff);

const FRAMES: [(&str, [i32; 4], Rgba); 5] = [
    ("nr_n", [0, 0, 8, 4], NORTH_COL),
    ("nr_s", [0, 4, 8, 8], SOUTH_COL),
    ("nr_w", [8, 0, 12, 8], WEST_COL),
    ("nr_e", [12, 0, 16, 8], EAST_COL),
    ("floor", [16, 0, 24, 8], FLOOR_COL),
];

/// Solid color sprites: 8x4 north and south borders, 4x8 west and east
/// borders and an 8x8 floor tile.
pub fn border_sheet() -> SpriteSheet {
    sheet_without("")
}

pub fn sheet_without(skip: &str) -> SpriteSheet {
    custom_sheet(|name, r| (name != skip).then_some(r))
}

/// Border sheet with frames moved or dropped by `frame`.
pub fn custom_sheet(frame: impl Fn(&str, Rect) -> Option<Rect>) -> SpriteSheet {
    let buf = Buffer::from_fn(32, 16, |x, y| {
        FRAMES
            .iter()
            .find(|(_, r, _)| Rect::from(*r).contains([x, y]))
            .map_or(Default::default(), |&(_, _, col)| col)
    });

    let frames = FRAMES
        .iter()
        .filter_map(|&(name, r, _)| {
            Some((name.to_owned(), frame(name, Rect::from(r))?))
        })
        .collect();

    SpriteSheet::new(buf, frames).unwrap()
}

/// Cache that serves `border_sheet` as the "default" sheet.
pub fn sheet_cache() -> SheetCache {
    SheetCache::new(|name| match name {
        "default" => Ok(border_sheet()),
        "broken" => Ok(sheet_without("nr_w")),
        _ => anyhow::bail!("unknown sheet {name:?}"),
    })
}
