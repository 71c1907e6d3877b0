//! Pulls OAM sprite assets out of a ROM image.
//!
//! Loading the image and drawing the results are left to the caller. [`Rom`] resolves a sprite
//! index through the ROM's pointer table and decodes the asset it points at, and the returned
//! frames can be composed into RGBA blocks with [`compose`].
pub mod config;
mod rom;

pub use config::{parse_config_from_file, parse_config_from_str, Config};
pub use rom::{resolve_sprite_address, Rom, ROM_ADDRESS_MASK, SPRITE_TABLE_ADDRESS};

pub use oamspr::{
    compose, decode_sprite_asset, error::SpriteError, Frame, PlacedImage, Placement, SpriteAsset,
};
