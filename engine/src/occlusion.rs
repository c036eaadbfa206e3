use gfx::{Buffer, Rgba, Window};
use util::Rect;

/// Set of solid rectangles that answers overlap queries.
///
/// Rooms only have a handful of obstacles, so this is a flat list. Callers
/// must not depend on the order of the stored rectangles.
#[derive(Clone, Default, Debug)]
pub struct OcclusionStore {
    bounds: Option<Rect>,
    rects: Vec<Rect>,
}

impl OcclusionStore {
    /// Set the reference frame of the store. Must be called exactly once,
    /// before any insertions.
    pub fn set_bounds(&mut self, bounds: Rect) {
        assert!(self.bounds.is_none(), "occlusion bounds already set");
        assert!(!bounds.is_empty(), "empty occlusion bounds");
        self.bounds = Some(bounds);
    }

    pub fn bounds(&self) -> Option<&Rect> {
        self.bounds.as_ref()
    }

    /// Add a solid rectangle. Overlapping and duplicate rectangles are fine.
    pub fn insert(&mut self, rect: Rect) {
        assert!(self.bounds.is_some(), "insert before occlusion bounds set");
        debug_assert!(!rect.is_empty(), "inserting empty rectangle {rect:?}");
        self.rects.push(rect);
    }

    /// Return whether `query` shares any area with a stored rectangle.
    pub fn collides(&self, query: &Rect) -> bool {
        self.rects.iter().any(|r| r.intersects(query))
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect> + '_ {
        self.rects.iter()
    }

    /// Outline the stored rectangles, for debugging collision geometry.
    ///
    /// Rectangles are in canvas coordinates, the window only clips.
    pub fn draw(&self, win: &Window<Rgba>, c: &mut Buffer<Rgba>) {
        let offset = win.bounds().min();
        for r in &self.rects {
            win.outline(c, &(*r - offset));
        }
    }
}
