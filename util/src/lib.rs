//! Unopinionated standalone utilities.

mod axis_box;
pub use axis_box::{LatticeIter, Rect};

mod geom;
pub use geom::v2;

/// Map with an efficient hash function.
pub use rustc_hash::FxHashMap as HashMap;

type DefaultHashBuilder = std::hash::BuildHasherDefault<rustc_hash::FxHasher>;

/// Insertion order preserving map with an efficient hash function.
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, DefaultHashBuilder>;

pub mod hash_map {
    pub type Entry<'a, A, B> = std::collections::hash_map::Entry<'a, A, B>;
}
