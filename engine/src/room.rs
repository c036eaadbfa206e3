use anyhow::{bail, Context};
use gfx::{Buffer, Rgba, SheetCache, SheetHandle, Window};
use glam::IVec2;
use strum::IntoEnumIterator;
use util::{v2, Rect};

use crate::{ConnSprites, Connections, Edge, Layout, OcclusionStore, RoomData};

/// Color for collision geometry outlines.
const COLLISION_COL: Rgba = Rgba::new(0xff, 0x00, 0xff, 0xff);

/// Something with a bounding box that the room can move around.
pub trait Body {
    fn bounds(&self) -> Rect;

    /// Move the top left corner of the bounding box to `pos`.
    fn set_pos(&mut self, pos: IVec2);
}

impl Body for Rect {
    fn bounds(&self) -> Rect {
        *self
    }

    fn set_pos(&mut self, pos: IVec2) {
        *self = Rect::at(pos, self.dim());
    }
}

/// The active room.
///
/// A room starts out empty, gets its contents once with `set` and becomes
/// cleared with `notify_clear`, after which the connections to neighboring
/// rooms are drawn. Positions are canvas coordinates, room data is given
/// relative to the room's drawable area.
pub struct Room {
    layout: Layout,
    sheet: SheetHandle,
    conn_sprites: ConnSprites,
    store: OcclusionStore,
    connections: Connections,
    background: Option<Buffer<Rgba>>,
    cleared: bool,
}

impl Room {
    /// Create an empty room that draws with sprites from the layout's sheet.
    pub fn new(cache: &SheetCache, layout: Layout) -> anyhow::Result<Self> {
        if layout.draw_rect().is_empty() {
            bail!("bad room size {:?}", layout.dim);
        }

        let sheet = cache.acquire(&layout.sheet)?;
        let conn_sprites = ConnSprites::measure(&sheet)
            .with_context(|| format!("unusable sheet {:?}", layout.sheet))?;

        Ok(Room {
            layout,
            sheet,
            conn_sprites,
            store: Default::default(),
            connections: Default::default(),
            background: None,
            cleared: false,
        })
    }

    /// Load the room's contents. Must be called exactly once.
    ///
    /// Fails without changing the room if a connection does not fit on its
    /// edge.
    pub fn set(&mut self, data: &RoomData) -> anyhow::Result<()> {
        assert!(!self.is_loaded(), "room already loaded");

        let draw_rect = self.draw_rect();

        for edge in Edge::iter() {
            let extent = draw_rect.dim()[edge.axis()];
            for &[start, end] in data.conn.get(edge) {
                if start < 0 || end >= extent {
                    bail!(
                        "{edge:?} connection [{start}, {end}] outside edge of \
                         length {extent}"
                    );
                }
            }
        }

        // Close the drawable area in a one pixel thick frame.
        let bounds = draw_rect.grow([1, 1], [1, 1]);
        self.store.set_bounds(bounds);
        for edge in Edge::iter() {
            self.store.insert(bounds.border(edge.normal()));
        }

        for block in &data.block {
            self.store.insert(**block + draw_rect.min());
        }

        let [w, h] = draw_rect.dim();
        let mut background =
            Buffer::filled(w as u32, h as u32, self.layout.background_color());
        for spr in &data.background {
            let Some(sprite) = self.sheet.get(&spr.name) else {
                log::warn!("Room::set: no background sprite {:?}", spr.name);
                continue;
            };
            if let Err(e) = background.blit([spr.x, spr.y], &sprite) {
                log::warn!("Room::set: sprite {:?}: {e}", spr.name);
            }
        }
        self.background = Some(background);

        self.connections.set(data.conn.segments(), self.conn_sprites);

        log::debug!(
            "Room::set: {} obstacles, {} connections",
            self.obstacle_count(),
            self.connections.len()
        );
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.background.is_some()
    }

    /// Mark the room cleared and bake the connection border strips.
    ///
    /// Clearing an already cleared room does nothing.
    pub fn notify_clear(&mut self) {
        assert!(self.is_loaded(), "clearing unloaded room");
        if self.cleared {
            log::debug!("Room::notify_clear: already cleared");
            return;
        }

        self.connections.render(&self.sheet);
        self.cleared = true;
        log::info!("Room cleared");
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    pub fn draw(&self, c: &mut Buffer<Rgba>) {
        let Some(background) = &self.background else {
            panic!("drawing unloaded room");
        };

        let win = Window::new(
            self.draw_rect(),
            COLLISION_COL,
            self.layout.background_color(),
        );
        win.draw(c, &win.area(), background);

        if self.layout.show_collision {
            self.store.draw(&win, c);
        }

        if self.cleared {
            self.connections.draw(&win, c);
        }
    }

    /// Return whether a body with bounds `rect` fits in the room without
    /// hitting anything.
    pub fn space(&self, rect: &Rect) -> bool {
        let Some(bounds) = self.store.bounds() else {
            return false;
        };
        bounds.contains_other(rect) && !self.store.collides(rect)
    }

    /// Move the body towards `target` one pixel at a time, first along the x
    /// axis and then along the y axis, stopping on each axis at the first
    /// blocked step.
    pub fn update_entity(&self, body: &mut impl Body, target: impl Into<IVec2>) {
        let target = target.into();
        let bounds = body.bounds();
        let dim = bounds.dim();
        let mut pos = v2(bounds.min());

        for axis in 0..2 {
            let step = (target[axis] - pos[axis]).signum();
            while pos[axis] != target[axis] {
                let mut next = pos;
                next[axis] += step;
                if !self.space(&Rect::at(next, dim)) {
                    break;
                }
                pos = next;
            }
        }

        body.set_pos(pos);
    }

    /// Drawable area of the room in canvas coordinates.
    pub fn draw_rect(&self) -> Rect {
        self.layout.draw_rect()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Number of obstacles loaded from room data, not counting the room's
    /// boundary.
    pub fn obstacle_count(&self) -> usize {
        self.store.len().saturating_sub(Edge::iter().count())
    }

    pub fn segment_count(&self, edge: Edge) -> usize {
        self.connections.segments(edge).len()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::{test_util::*, tile_offsets};

    fn layout() -> Layout {
        Layout {
            origin: [0, 0],
            dim: [100, 100],
            ..Default::default()
        }
    }

    fn room(json: &str) -> Room {
        let mut room = Room::new(&sheet_cache(), layout()).unwrap();
        room.set(&RoomData::from_json(json).unwrap()).unwrap();
        room
    }

    #[test]
    fn free_movement() {
        let room = room("{}");
        let mut body = Rect::at([0, 0], [10, 10]);
        room.update_entity(&mut body, [50, 0]);
        assert_eq!(body, Rect::at([50, 0], [10, 10]));
    }

    #[test]
    fn movement_stops_at_obstacle() {
        let room = room(r#"{"block": [[30, 0, 5, 100]]}"#);
        let mut body = Rect::at([0, 0], [10, 10]);
        room.update_entity(&mut body, [50, 0]);
        assert_eq!(body.min(), [20, 0]);

        // Slides along y after getting stopped on x.
        room.update_entity(&mut body, [50, 50]);
        assert_eq!(body.min(), [20, 50]);
    }

    #[test]
    fn x_moves_before_y() {
        // A low wall that only blocks the body while it is still at the top.
        let room = room(r#"{"block": [[20, 0, 5, 15]]}"#);
        let mut body = Rect::at([0, 0], [10, 10]);
        room.update_entity(&mut body, [30, 30]);
        // Moving y first would have cleared the wall and reached the target.
        assert_eq!(body.min(), [10, 30]);
    }

    #[test]
    fn movement_stops_at_room_edge() {
        let room = room("{}");
        let mut body = Rect::at([40, 40], [10, 10]);
        room.update_entity(&mut body, [200, -30]);
        assert_eq!(body.min(), [90, 0]);
        room.update_entity(&mut body, [-5, 95]);
        assert_eq!(body.min(), [0, 90]);
    }

    #[test]
    fn obstacles_are_offset_by_origin() {
        let mut room = Room::new(
            &sheet_cache(),
            Layout {
                origin: [10, 20],
                ..layout()
            },
        )
        .unwrap();
        room.set(&RoomData::from_json(r#"{"block": [[0, 0, 5, 5]]}"#).unwrap())
            .unwrap();

        assert!(!room.space(&Rect::at([10, 20], [1, 1])));
        assert!(room.space(&Rect::at([15, 20], [1, 1])));
        assert!(!room.space(&Rect::at([0, 0], [5, 5])));
    }

    #[quickcheck]
    fn space_matches_geometry(x: i8, y: i8, w: u8, h: u8) -> bool {
        let room = room(r#"{"block": [[20, 20, 10, 10], [60, 0, 5, 40]]}"#);
        let blocks = [Rect::at([20, 20], [10, 10]), Rect::at([60, 0], [5, 40])];

        let rect = Rect::at(
            [i32::from(x), i32::from(y)],
            [i32::from(w % 64) + 1, i32::from(h % 64) + 1],
        );
        let expected = room.draw_rect().contains_other(&rect)
            && !blocks.iter().any(|b| b.intersects(&rect));

        room.space(&rect) == expected
    }

    #[test]
    fn nothing_outside_the_room_is_space() {
        let room = room("{}");
        assert!(room.space(&Rect::at([0, 0], [100, 100])));
        assert!(!room.space(&Rect::at([200, 200], [5, 5])));
        assert!(!room.space(&Rect::at([-50, 0], [10, 10])));
        assert!(!room.space(&Rect::at([-1, 0], [10, 10])));
        assert!(!room.space(&Rect::at([95, 95], [10, 10])));
    }

    #[test]
    fn loaded_counts_match_data() {
        let data = RoomData::from_json(
            r#"{
                "block": [[20, 20, 10, 10], {"x": 60, "y": 0, "w": 5, "h": 40}],
                "conn": {"n": [10, 29, 50, 69], "w": [[40, 59]], "e": []}
            }"#,
        )
        .unwrap();
        let mut room = Room::new(&sheet_cache(), layout()).unwrap();
        assert!(!room.is_loaded());
        room.set(&data).unwrap();
        assert!(room.is_loaded());

        assert_eq!(room.obstacle_count(), data.block.len());
        for edge in Edge::iter() {
            assert_eq!(room.segment_count(edge), data.conn.get(edge).len());
        }
    }

    #[test]
    fn connections_show_after_clear() {
        let mut room = room(
            r#"{"conn": {
                "n": [30, 69], "s": [30, 69], "w": [30, 69], "e": [30, 69]
            }}"#,
        );
        // 40 pixel openings with 8 pixel tiles.
        assert_eq!(tile_offsets(40, 8), vec![0, 8, 16, 24, 32]);

        let probes = [
            ([30, 0], NORTH_COL),
            ([69, 3], NORTH_COL),
            ([30, 99], SOUTH_COL),
            ([69, 96], SOUTH_COL),
            ([0, 30], WEST_COL),
            ([3, 69], WEST_COL),
            ([99, 30], EAST_COL),
            ([96, 69], EAST_COL),
        ];

        let mut canvas = Buffer::new(100, 100);
        room.draw(&mut canvas);
        for (pos, _) in probes {
            assert!(canvas.get(pos) == Rgba::BLACK, "connection at {pos:?}");
        }

        room.notify_clear();
        assert!(room.is_cleared());
        let mut canvas = Buffer::new(100, 100);
        room.draw(&mut canvas);
        for (pos, col) in probes {
            assert!(canvas.get(pos) == col, "no connection at {pos:?}");
        }
        assert!(canvas.get([29, 0]) == Rgba::BLACK);
        assert!(canvas.get([70, 0]) == Rgba::BLACK);
        assert!(canvas.get([50, 50]) == Rgba::BLACK);

        // Clearing again changes nothing.
        room.notify_clear();
        let mut again = Buffer::new(100, 100);
        room.draw(&mut again);
        assert!(again.data() == canvas.data());
    }

    #[test]
    fn background_compositing() {
        let room = room(
            r#"{"background": [
                {"name": "floor", "x": 10, "y": 10},
                {"name": "no-such-sprite", "x": 0, "y": 0},
                {"name": "floor", "x": 500, "y": 500},
                {"name": "floor", "x": 96, "y": 0}
            ]}"#,
        );

        let mut canvas = Buffer::new(120, 120);
        room.draw(&mut canvas);
        assert!(canvas.get([10, 10]) == FLOOR_COL);
        assert!(canvas.get([17, 17]) == FLOOR_COL);
        assert!(canvas.get([18, 18]) == Rgba::BLACK);
        assert!(canvas.get([99, 7]) == FLOOR_COL);
        // Nothing gets drawn outside the room.
        assert!(canvas.get([100, 0]).is_transparent());
        assert!(canvas.get([110, 110]).is_transparent());
    }

    #[test]
    fn collision_outlines() {
        let mut room = Room::new(
            &sheet_cache(),
            Layout {
                show_collision: true,
                ..layout()
            },
        )
        .unwrap();
        room.set(&RoomData::from_json(r#"{"block": [[20, 20, 10, 10]]}"#).unwrap())
            .unwrap();

        let mut canvas = Buffer::new(100, 100);
        room.draw(&mut canvas);
        assert!(canvas.get([20, 20]) == COLLISION_COL);
        assert!(canvas.get([29, 29]) == COLLISION_COL);
        assert!(canvas.get([25, 25]) == Rgba::BLACK);
        assert!(canvas.get([0, 0]) == Rgba::BLACK);
    }

    #[test]
    fn sheet_is_released_with_room() {
        let cache = sheet_cache();
        let room = Room::new(&cache, layout()).unwrap();
        assert_eq!(cache.users("default"), 1);
        drop(room);
        assert!(!cache.is_loaded("default"));
    }

    #[test]
    fn unusable_sheets() {
        let cache = sheet_cache();
        let broken = Layout {
            sheet: "broken".into(),
            ..layout()
        };
        assert!(Room::new(&cache, broken).is_err());
        assert!(!cache.is_loaded("broken"));

        let missing = Layout {
            sheet: "missing".into(),
            ..layout()
        };
        assert!(Room::new(&cache, missing).is_err());

        let empty = Layout {
            dim: [0, 100],
            ..layout()
        };
        assert!(Room::new(&cache, empty).is_err());
    }

    #[test]
    fn connections_must_fit_their_edge() {
        for json in [
            r#"{"conn": {"n": [0, 1100000000]}}"#,
            r#"{"conn": {"w": [90, 100]}}"#,
            r#"{"conn": {"e": [-1, 10]}}"#,
        ] {
            let data = RoomData::from_json(json).unwrap();
            let mut room = Room::new(&sheet_cache(), layout()).unwrap();
            assert!(room.set(&data).is_err(), "accepted {json}");
            assert!(!room.is_loaded());
            assert_eq!(room.obstacle_count(), 0);
        }

        // Openings running the whole length of the edge are fine.
        let mut room = room(r#"{"conn": {"n": [0, 99], "e": [0, 99]}}"#);
        room.notify_clear();
        let mut canvas = Buffer::new(100, 100);
        room.draw(&mut canvas);
        assert!(canvas.get([95, 0]) == NORTH_COL);
        assert!(canvas.get([99, 99]) == EAST_COL);
    }

    #[test]
    #[should_panic]
    fn double_set() {
        let mut room = room("{}");
        let _ = room.set(&RoomData::default());
    }

    #[test]
    #[should_panic]
    fn draw_unloaded() {
        let room = Room::new(&sheet_cache(), layout()).unwrap();
        room.draw(&mut Buffer::new(100, 100));
    }
}
