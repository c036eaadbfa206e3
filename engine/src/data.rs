use std::path::Path;

use anyhow::{bail, Context};
use derive_more::Deref;
use serde::Deserialize;
use util::Rect;

use crate::{Edge, EdgeMap, Segment};

/// Room definition document.
///
/// ```json
/// {
///   "block": [{"x": 40, "y": 40, "w": 16, "h": 16}, [100, 40, 8, 32]],
///   "background": [{"name": "floor", "x": 0, "y": 0}],
///   "conn": {"n": [100, 139], "s": [], "w": [[60, 99]], "e": []}
/// }
/// ```
#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub struct RoomData {
    /// Solid obstacles in room coordinates.
    pub block: Vec<Block>,
    /// Sprites composited into the background image, in drawing order.
    pub background: Vec<BackgroundSprite>,
    /// Openings to neighboring rooms.
    pub conn: ConnData,
}

impl RoomData {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        RoomData::from_json(&text)
            .with_context(|| format!("bad room document {}", path.display()))
    }
}

/// Obstacle rectangle, written either as `{"x", "y", "w", "h"}` or as an
/// `[x, y, w, h]` list.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Deref, Deserialize)]
#[serde(try_from = "BlockRepr")]
pub struct Block(pub Rect);

#[derive(Deserialize)]
#[serde(untagged)]
enum BlockRepr {
    Map { x: i32, y: i32, w: i32, h: i32 },
    List([i32; 4]),
}

impl TryFrom<BlockRepr> for Block {
    type Error = anyhow::Error;

    fn try_from(value: BlockRepr) -> Result<Self, Self::Error> {
        let (x, y, w, h) = match value {
            BlockRepr::Map { x, y, w, h } => (x, y, w, h),
            BlockRepr::List([x, y, w, h]) => (x, y, w, h),
        };
        if w <= 0 || h <= 0 {
            bail!("block at ({x}, {y}) has bad size {w}x{h}");
        }
        Ok(Block(Rect::at([x, y], [w, h])))
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
pub struct BackgroundSprite {
    pub name: String,
    pub x: i32,
    pub y: i32,
}

/// Open segment endpoints for each edge of the room.
#[derive(Clone, Default, Eq, PartialEq, Debug, Deserialize)]
#[serde(default)]
pub struct ConnData {
    pub n: SegmentList,
    pub s: SegmentList,
    pub w: SegmentList,
    pub e: SegmentList,
}

impl ConnData {
    pub fn get(&self, edge: Edge) -> &[[i32; 2]] {
        match edge {
            Edge::North => &self.n,
            Edge::South => &self.s,
            Edge::West => &self.w,
            Edge::East => &self.e,
        }
    }

    pub fn segments(&self) -> EdgeMap<Vec<Segment>> {
        EdgeMap::from_fn(|edge| {
            self.get(edge)
                .iter()
                .map(|&[start, end]| Segment::new(start, end))
                .collect()
        })
    }
}

/// List of inclusive `[start, end]` ranges.
///
/// Accepts either a flat list of endpoint pairs, `[a, b, c, d]`, or a list
/// of pairs, `[[a, b], [c, d]]`.
#[derive(Clone, Default, Eq, PartialEq, Debug, Deref, Deserialize)]
#[serde(try_from = "SegmentRepr")]
pub struct SegmentList(Vec<[i32; 2]>);

#[derive(Deserialize)]
#[serde(untagged)]
enum SegmentRepr {
    Flat(Vec<i32>),
    Pairs(Vec<[i32; 2]>),
}

impl TryFrom<SegmentRepr> for SegmentList {
    type Error = anyhow::Error;

    fn try_from(value: SegmentRepr) -> Result<Self, Self::Error> {
        let pairs: Vec<[i32; 2]> = match value {
            SegmentRepr::Flat(flat) => {
                if flat.len() % 2 != 0 {
                    bail!("odd number of segment endpoints");
                }
                flat.chunks_exact(2).map(|c| [c[0], c[1]]).collect()
            }
            SegmentRepr::Pairs(pairs) => pairs,
        };

        for &[start, end] in &pairs {
            if end < start {
                bail!("inverted segment [{start}, {end}]");
            }
            if end.checked_sub(start).and_then(|d| d.checked_add(1)).is_none() {
                bail!("segment [{start}, {end}] is too long");
            }
        }

        Ok(SegmentList(pairs))
    }
}

impl From<Vec<[i32; 2]>> for SegmentList {
    fn from(value: Vec<[i32; 2]>) -> Self {
        SegmentList(value)
    }
}
