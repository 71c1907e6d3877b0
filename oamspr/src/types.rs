use image::Rgba;

use crate::error::SpriteError;

pub const PALETTE_COLOR_COUNT: usize = 16;
pub const PALETTE_BYTES: usize = PALETTE_COLOR_COUNT * 2;
pub const TILE_SIDE: usize = 8;
pub const TILE_PIXELS: usize = TILE_SIDE * TILE_SIDE;
/// 4 bits per pixel
pub const TILE_BYTES: usize = TILE_PIXELS / 2;
pub const HEADER_SIZE: usize = 4;
pub const POINTER_SIZE: usize = 4;
pub const ANIMATION_RECORD_SIZE: usize = 20;
pub const PLACEMENT_RECORD_SIZE: usize = 5;
pub const PLACEMENT_SENTINEL: [u8; PLACEMENT_RECORD_SIZE] = [0xFF; PLACEMENT_RECORD_SIZE];
/// Pixels with this index are never painted.
pub const TRANSPARENT_INDEX: u8 = 0;
pub const MARKER_ZERO: u8 = 0x00;
pub const MARKER_ONE: u8 = 0x01;
/// Number of hardware OAM entries.
pub const DEFAULT_MAX_PLACEMENTS: usize = 128;

/// 16 RGB555 colors. Channels are packed red, green, blue from the low bits up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub colors: [u16; PALETTE_COLOR_COUNT],
}

impl Palette {
    /// 5-bit channels. Only the low nibble of `index` selects an entry.
    pub fn rgb555(&self, index: u8) -> [u8; 3] {
        let color = self.colors[(index & 0x0F) as usize];

        [
            (color & 0x1F) as u8,
            ((color >> 5) & 0x1F) as u8,
            ((color >> 10) & 0x1F) as u8,
        ]
    }

    /// 8-bit channels, scaled by 8 so 31 becomes 248.
    pub fn rgb8(&self, index: u8) -> [u8; 3] {
        self.rgb555(index).map(|channel| channel * 8)
    }

    pub fn rgba8(&self, index: u8) -> Rgba<u8> {
        let [r, g, b] = self.rgb8(index);

        Rgba([r, g, b, 0xFF])
    }
}

/// 8x8 palette indices, row major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub pixels: [u8; TILE_PIXELS],
}

impl Tile {
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * TILE_SIDE + x]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tilemap {
    /// Size field as stored. Trailing bytes short of a whole tile are ignored.
    pub byte_size: u32,
    pub tiles: Vec<Tile>,
}

/// Placement dimensions, counted in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementSize {
    pub width: u8,
    pub height: u8,
}

const fn size(width: u8, height: u8) -> PlacementSize {
    PlacementSize { width, height }
}

/// Indexed by `shape << 2 | size`.
pub static PLACEMENT_SIZES: [PlacementSize; 12] = [
    // square
    size(1, 1),
    size(2, 2),
    size(4, 4),
    size(8, 8),
    // wide
    size(2, 1),
    size(4, 1),
    size(4, 2),
    size(8, 2),
    // tall
    size(1, 2),
    size(1, 4),
    size(2, 4),
    size(4, 8),
];

impl PlacementSize {
    pub fn from_key(key: u8) -> Option<Self> {
        PLACEMENT_SIZES.get(key as usize).copied()
    }

    pub fn from_shape_size(shape: u8, size: u8) -> Option<Self> {
        Self::from_key(((shape & 0x3) << 2) | (size & 0x3))
    }

    pub fn pixel_width(&self) -> u32 {
        self.width as u32 * TILE_SIDE as u32
    }

    pub fn pixel_height(&self) -> u32 {
        self.height as u32 * TILE_SIDE as u32
    }

    pub fn tile_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Maps a stored offset byte, biased around 128, to a canvas coordinate.
///
/// `0x00..=0x7F` lands on `128..=255` and `0x80..=0xFF` lands on `0..=127`.
pub fn biased_to_canvas(offset: u8) -> u8 {
    if offset <= 0x7F {
        128 + offset
    } else {
        offset - 128
    }
}

/// One OAM record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub start_tile: u8,
    pub offset_x: u8,
    pub offset_y: u8,
    pub size: PlacementSize,
    pub hflip: bool,
    /// Decoded but not applied when composing.
    pub vflip: bool,
}

impl Placement {
    /// `record` is `[start_tile, offset_x, offset_y, size_byte, shape_byte]`.
    pub fn from_record(record: [u8; PLACEMENT_RECORD_SIZE]) -> Result<Self, SpriteError> {
        let [start_tile, offset_x, offset_y, size_byte, shape_byte] = record;

        let key = ((shape_byte & 0x3) << 2) | (size_byte & 0x3);
        let size = PlacementSize::from_key(key).ok_or(SpriteError::InvalidSizeIndex { key })?;

        Ok(Self {
            start_tile,
            offset_x,
            offset_y,
            size,
            hflip: size_byte & 0x40 != 0,
            vflip: size_byte & 0x20 != 0,
        })
    }

    pub fn canvas_x(&self) -> u8 {
        biased_to_canvas(self.offset_x)
    }

    pub fn canvas_y(&self) -> u8 {
        biased_to_canvas(self.offset_y)
    }
}

/// One entry of the animation pointer table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub tilemap: Tilemap,
    pub palette: Palette,
    pub placements: Vec<Placement>,
    /// Not interpreted while decoding.
    pub delay: u8,
    /// Not interpreted while decoding.
    pub end_flag: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetHeader {
    pub reserved: u8,
    pub marker_zero: u8,
    pub marker_one: u8,
    pub animation_count: u8,
}

impl AssetHeader {
    pub fn has_valid_markers(&self) -> bool {
        self.marker_zero == MARKER_ZERO && self.marker_one == MARKER_ONE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteAsset {
    /// Absolute address of the header.
    pub address: usize,
    pub header: AssetHeader,
    pub frames: Vec<Frame>,
}

impl SpriteAsset {
    /// Every relative pointer in the asset is resolved against this address.
    pub fn anchor(&self) -> usize {
        self.address.saturating_add(HEADER_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Fail on a header marker mismatch instead of logging it.
    pub strict_markers: bool,
    /// Records allowed in one placement list before the sentinel.
    pub max_placements: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict_markers: false,
            max_placements: DEFAULT_MAX_PLACEMENTS,
        }
    }
}
