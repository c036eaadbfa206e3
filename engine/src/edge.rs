use std::ops::{Index, IndexMut};

use glam::{ivec2, IVec2};
use strum::{EnumIter, IntoEnumIterator};

/// Side of the room along which connections to neighboring rooms open.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, EnumIter)]
pub enum Edge {
    North,
    South,
    West,
    East,
}

use Edge::*;

impl Edge {
    /// North and south openings run horizontally, west and east ones run
    /// vertically.
    pub fn is_horizontal(self) -> bool {
        matches!(self, North | South)
    }

    /// Axis along which the openings on this edge extend, 0 for x and 1 for
    /// y.
    pub fn axis(self) -> usize {
        if self.is_horizontal() {
            0
        } else {
            1
        }
    }

    /// Outward pointing unit vector.
    pub fn normal(self) -> IVec2 {
        match self {
            North => ivec2(0, -1),
            South => ivec2(0, 1),
            West => ivec2(-1, 0),
            East => ivec2(1, 0),
        }
    }

    /// Name of the border sprite tiled over openings on this edge.
    pub fn sprite_name(self) -> &'static str {
        match self {
            North => "nr_n",
            South => "nr_s",
            West => "nr_w",
            East => "nr_e",
        }
    }

    fn idx(self) -> usize {
        match self {
            North => 0,
            South => 1,
            West => 2,
            East => 3,
        }
    }
}

/// Fixed-size map with a value for every edge.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct EdgeMap<T>([T; 4]);

impl<T> EdgeMap<T> {
    pub fn from_fn(mut f: impl FnMut(Edge) -> T) -> Self {
        EdgeMap([f(North), f(South), f(West), f(East)])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Edge, &T)> + '_ {
        Edge::iter().map(move |e| (e, &self[e]))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Edge, &mut T)> + '_ {
        Edge::iter().zip(self.0.iter_mut())
    }
}

impl<T> Index<Edge> for EdgeMap<T> {
    type Output = T;

    fn index(&self, e: Edge) -> &T {
        &self.0[e.idx()]
    }
}

impl<T> IndexMut<Edge> for EdgeMap<T> {
    fn index_mut(&mut self, e: Edge) -> &mut T {
        &mut self.0[e.idx()]
    }
}
