use anyhow::bail;
use gfx::{Buffer, Rgba, SpriteSheet, Window};
use util::Rect;

use crate::{Edge, EdgeMap};

/// Opening in a room edge, spanning positions `start..=end` along the edge.
pub struct Segment {
    pub start: i32,
    pub end: i32,
    strip: Option<Buffer<Rgba>>,
}

impl Segment {
    pub fn new(start: i32, end: i32) -> Self {
        debug_assert!(end >= start, "inverted segment {start}..={end}");
        Segment {
            start,
            end,
            strip: None,
        }
    }

    /// Length of the opening in pixels.
    pub fn len(&self) -> i32 {
        self.end - self.start + 1
    }

    /// The pre-rendered border strip, available once the connections have
    /// been rendered.
    pub fn strip(&self) -> Option<&Buffer<Rgba>> {
        self.strip.as_ref()
    }
}

/// Border sprite dimensions measured from the sprite sheet.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct ConnSprites {
    /// Size of the north border sprite, the south one is as thick.
    pub ns: [i32; 2],
    /// Size of the west border sprite, the east one is as thick.
    pub we: [i32; 2],
}

impl ConnSprites {
    /// Check that the sheet has every border sprite and record their sizes.
    ///
    /// Strips on opposite edges are placed using one shared thickness, so
    /// the paired sprites must be equally thick.
    pub fn measure(sheet: &SpriteSheet) -> anyhow::Result<Self> {
        let mut dims = EdgeMap::default();
        for (edge, dim) in dims.iter_mut() {
            let Some(sprite) = sheet.get(edge.sprite_name()) else {
                bail!("sprite sheet has no {:?} sprite", edge.sprite_name());
            };
            *dim = [sprite.width(), sprite.height()];
        }

        for (a, b) in [(Edge::North, Edge::South), (Edge::West, Edge::East)] {
            // Thickness is measured across the opening.
            let axis = 1 - a.axis();
            if dims[a][axis] != dims[b][axis] {
                bail!(
                    "{:?} and {:?} sprites differ in thickness",
                    a.sprite_name(),
                    b.sprite_name()
                );
            }
        }

        Ok(ConnSprites {
            ns: dims[Edge::North],
            we: dims[Edge::West],
        })
    }
}

#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub enum ConnState {
    #[default]
    Unset,
    Loaded,
    Rendered,
}

/// The openings along the four edges of a room and their border strips.
#[derive(Default)]
pub struct Connections {
    segments: EdgeMap<Vec<Segment>>,
    sprites: ConnSprites,
    state: ConnState,
}

impl Connections {
    pub fn set(
        &mut self,
        segments: EdgeMap<Vec<Segment>>,
        sprites: ConnSprites,
    ) {
        assert_eq!(self.state, ConnState::Unset, "connections already set");
        self.segments = segments;
        self.sprites = sprites;
        self.state = ConnState::Loaded;
    }

    pub fn state(&self) -> ConnState {
        self.state
    }

    pub fn segments(&self, edge: Edge) -> &[Segment] {
        &self.segments[edge]
    }

    /// Bake a border strip texture for every segment.
    ///
    /// Only the first call does any work, later calls leave the existing
    /// strips in place.
    pub fn render(&mut self, sheet: &SpriteSheet) {
        match self.state {
            ConnState::Unset => panic!("rendering unset connections"),
            ConnState::Rendered => {
                log::debug!("Connections::render: already rendered");
                return;
            }
            ConnState::Loaded => {}
        }

        for (edge, segments) in self.segments.iter_mut() {
            let Some(sprite) = sheet.get(edge.sprite_name()) else {
                panic!("border sprite {:?} missing", edge.sprite_name());
            };
            let axis = edge.axis();
            let tile = [sprite.width(), sprite.height()];

            for seg in segments.iter_mut() {
                let mut dim = tile;
                dim[axis] = seg.len();
                let mut strip = Buffer::new(dim[0] as u32, dim[1] as u32);

                for offset in tile_offsets(seg.len(), tile[axis]) {
                    let mut pos = [0, 0];
                    pos[axis] = offset;
                    if let Err(e) = strip.blit(pos, &sprite) {
                        log::warn!("Connections::render {edge:?}: {e}");
                    }
                }

                seg.strip = Some(strip);
            }
        }

        log::debug!("Connections::render: baked {} strips", self.len());
        self.state = ConnState::Rendered;
    }

    /// Draw the border strips along the edges of the window.
    pub fn draw(&self, win: &Window<Rgba>, c: &mut Buffer<Rgba>) {
        assert_eq!(
            self.state,
            ConnState::Rendered,
            "drawing unrendered connections"
        );

        for (edge, segments) in self.segments.iter() {
            // Distance of the strips from the low side of the
            // perpendicular axis.
            let inset = match edge {
                Edge::North | Edge::West => 0,
                Edge::South => win.height() - self.sprites.ns[1],
                Edge::East => win.width() - self.sprites.we[0],
            };
            let axis = edge.axis();

            for seg in segments {
                let Some(strip) = seg.strip() else {
                    panic!("segment {}..={} has no strip", seg.start, seg.end);
                };
                let mut pos = [inset, inset];
                pos[axis] = seg.start;
                win.draw(c, &Rect::at(pos, strip.dim()), strip);
            }
        }
    }

    /// Total number of segments over all edges.
    pub fn len(&self) -> usize {
        self.segments.iter().map(|(_, s)| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Positions for tiles of width `tile` that cover a strip of length `len`.
///
/// Fits as many whole tiles as the strip length allows and spaces them evenly
/// from the start of the strip. The last tile always ends flush with the end
/// of the strip. A strip shorter than a tile still gets one tile.
pub fn tile_offsets(len: i32, tile: i32) -> Vec<i32> {
    assert!(tile > 0, "bad tile size {tile}");

    let count = (len / tile).max(1);
    let delta = len as f32 / count as f32;

    let mut cur = 0.0f32;
    (0..count)
        .map(|j| {
            if j == count - 1 {
                len - tile
            } else {
                let pos = cur as i32;
                cur += delta;
                pos
            }
        })
        .collect()
}
