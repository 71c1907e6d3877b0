use byte_io::OutOfBounds;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpriteError {
    #[error("{source}")]
    OutOfBounds {
        #[from]
        source: OutOfBounds,
    },
    #[error("Unexpected header marker at byte {offset}. Expect ({expected:#04x}). Have ({found:#04x})")]
    UnexpectedMarker { offset: usize, expected: u8, found: u8 },
    #[error("Placement list at {address:#x} has no sentinel within {limit} records")]
    UnterminatedPlacementList { address: usize, limit: usize },
    #[error("Invalid placement shape/size key: {key}")]
    InvalidSizeIndex { key: u8 },
    #[error("Invalid placement list lead-in: {skip}")]
    InvalidLeadIn { skip: u32 },
    #[error("Tile {index} is out of range. Tilemap has {count} tile(s)")]
    TileOutOfRange { index: usize, count: usize },
    #[error("Cannot parse {what} at {address:#x}")]
    Parse { what: &'static str, address: usize },
}
