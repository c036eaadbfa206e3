//! Room logic: static collision geometry, border connections and entity
//! movement for the single active room.

mod connection;
pub use connection::{tile_offsets, ConnSprites, ConnState, Connections, Segment};

mod data;
pub use data::{BackgroundSprite, Block, ConnData, RoomData};

mod edge;
pub use edge::{Edge, EdgeMap};

mod layout;
pub use layout::Layout;

mod occlusion;
pub use occlusion::OcclusionStore;

pub mod prelude;

mod room;
pub use room::{Body, Room};

#[cfg(test)]
mod test_util;
