//! Parses config file
use std::{fs::OpenOptions, io::Read, path::Path};

use eyre::eyre;
use oamspr::{DecodeOptions, DEFAULT_MAX_PLACEMENTS};
use serde::Deserialize;

use crate::rom::SPRITE_TABLE_ADDRESS;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub strict_markers: bool,
    pub max_placements: usize,
    pub sprite_table_address: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_markers: false,
            max_placements: DEFAULT_MAX_PLACEMENTS,
            sprite_table_address: SPRITE_TABLE_ADDRESS,
        }
    }
}

impl Config {
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            strict_markers: self.strict_markers,
            max_placements: self.max_placements,
        }
    }
}

pub static CONFIG_FILE_NAME: &str = "sprite_exporter.toml";

pub fn parse_config_from_str(s: &str) -> eyre::Result<Config> {
    let config: Config = toml::from_str(s)?;

    if config.max_placements == 0 {
        return Err(eyre!("max_placements must be at least 1"));
    }

    Ok(config)
}

pub fn parse_config_from_file(path: &Path) -> eyre::Result<Config> {
    let mut file = OpenOptions::new().read(true).open(path.as_os_str())?;
    let mut buffer = String::new();

    file.read_to_string(&mut buffer)?;

    parse_config_from_str(&buffer)
}
