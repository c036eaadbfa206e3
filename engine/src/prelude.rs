pub use gfx::prelude::*;
pub use strum::IntoEnumIterator;

pub use crate::{Body, Edge, Layout, Room, RoomData};
