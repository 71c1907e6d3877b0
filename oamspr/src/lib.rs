//! Sprite assets made of 4bpp tiles, RGB555 palettes and OAM style placement lists.
//!
//! An asset starts with a 4 byte header followed by a table of animation pointers. Each pointer
//! leads to a record that points at a tilemap, a palette and a placement list. All of those
//! pointers are relative to the address right after the header.
mod compose;
mod decoder;
pub mod error;
mod parser;
mod types;

pub use compose::{compose, PlacedImage, CANVAS_SIDE};
pub use decoder::{
    decode_asset, decode_palette, decode_placements, decode_sprite_asset, decode_tilemap,
};
pub use types::*;

pub use byte_io::{ByteSource, Reader};
