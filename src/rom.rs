use byte_io::ByteSource;
use log::debug;
use oamspr::{decode_asset, error::SpriteError, SpriteAsset};

use crate::config::Config;

/// Table of sprite asset pointers, one 32-bit entry per sprite index.
pub static SPRITE_TABLE_ADDRESS: u32 = 0x31EA8;
/// Strips the bus region from a ROM pointer so it becomes a file offset.
pub static ROM_ADDRESS_MASK: u32 = 0x00FF_FFFF;

/// Looks up the asset address for `index` in the pointer table at `table`.
pub fn resolve_sprite_address(bytes: &[u8], table: u32, index: usize) -> Result<u32, SpriteError> {
    let entry = (table as usize).saturating_add(index.saturating_mul(4));
    let pointer = ByteSource::new(bytes).read_u32(entry)?;

    Ok(pointer & ROM_ADDRESS_MASK)
}

/// A loaded ROM image plus the settings used to pull sprites out of it.
#[derive(Debug, Clone)]
pub struct Rom<'a> {
    bytes: &'a [u8],
    config: Config,
}

impl<'a> Rom<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_config(bytes, Config::default())
    }

    pub fn with_config(bytes: &'a [u8], config: Config) -> Self {
        Self { bytes, config }
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sprite_address(&self, index: usize) -> Result<u32, SpriteError> {
        resolve_sprite_address(self.bytes, self.config.sprite_table_address, index)
    }

    pub fn decode_asset_at(&self, address: usize) -> Result<SpriteAsset, SpriteError> {
        decode_asset(self.bytes, address, &self.config.decode_options())
    }

    pub fn decode_sprite(&self, index: usize) -> Result<SpriteAsset, SpriteError> {
        let address = self.sprite_address(index)?;
        debug!("sprite {} is at {:#x}", index, address);

        self.decode_asset_at(address as usize)
    }
}
