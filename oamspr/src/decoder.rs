use byte_io::{ByteSource, Reader};
use log::{debug, trace, warn};
use nom::Parser;

use crate::{
    error::SpriteError,
    parser::{
        parse_animation_record, parse_header, parse_palette_colors, parse_placement_record,
        parse_pointer_table, parse_tiles,
    },
    DecodeOptions, Frame, Palette, Placement, SpriteAsset, Tilemap, ANIMATION_RECORD_SIZE,
    HEADER_SIZE, MARKER_ONE, MARKER_ZERO, PALETTE_BYTES, PLACEMENT_RECORD_SIZE,
    PLACEMENT_SENTINEL, POINTER_SIZE, TILE_BYTES,
};

/// Bounds checks `width` bytes at the reader, moves past them and hands them to `parser`.
fn parse_with<'a, T, P>(
    reader: &mut Reader<'a>,
    width: usize,
    what: &'static str,
    mut parser: P,
) -> Result<T, SpriteError>
where
    P: Parser<&'a [u8], Output = T, Error = nom::error::Error<&'a [u8]>>,
{
    let address = reader.address();
    let input = reader.take(width)?;

    parser
        .parse(input)
        .map(|(_, res)| res)
        .map_err(|_| SpriteError::Parse { what, address })
}

/// Reads a size field followed by 16 color words.
pub fn decode_palette(reader: &mut Reader) -> Result<Palette, SpriteError> {
    // always 0x20, never checked
    let _byte_size = reader.read32()?;
    let colors = parse_with(reader, PALETTE_BYTES, "palette", parse_palette_colors)?;

    Ok(Palette { colors })
}

/// Reads a byte size field followed by `byte_size / 32` packed tiles.
pub fn decode_tilemap(reader: &mut Reader) -> Result<Tilemap, SpriteError> {
    let byte_size = reader.read32()?;
    let tile_count = byte_size as usize / TILE_BYTES;

    let tiles = parse_with(reader, tile_count * TILE_BYTES, "tilemap", |i| {
        parse_tiles(i, tile_count)
    })?;

    Ok(Tilemap { byte_size, tiles })
}

/// Reads placement records up to the all `0xFF` sentinel, which is not returned.
///
/// The leading skip field counts itself, so the lead-in region is `skip - 4` bytes long.
pub fn decode_placements(
    reader: &mut Reader,
    max_placements: usize,
) -> Result<Vec<Placement>, SpriteError> {
    let address = reader.address();

    let skip = reader.read32()?;
    let lead_in = (skip as usize)
        .checked_sub(4)
        .ok_or(SpriteError::InvalidLeadIn { skip })?;
    reader.skip(lead_in);

    let mut placements = vec![];

    loop {
        let record = parse_with(
            reader,
            PLACEMENT_RECORD_SIZE,
            "placement record",
            parse_placement_record,
        )?;

        if record == PLACEMENT_SENTINEL {
            break;
        }

        if placements.len() == max_placements {
            return Err(SpriteError::UnterminatedPlacementList {
                address,
                limit: max_placements,
            });
        }

        let placement = Placement::from_record(record)?;
        trace!("placement {}: {:?}", placements.len(), placement);

        placements.push(placement);
    }

    Ok(placements)
}

fn decode_frame(
    reader: &mut Reader,
    pointer: u32,
    options: &DecodeOptions,
) -> Result<Frame, SpriteError> {
    reader.seek(pointer as usize);
    let record = parse_with(
        reader,
        ANIMATION_RECORD_SIZE,
        "animation record",
        parse_animation_record,
    )?;

    reader.seek(record.tilemap_ptr as usize);
    let tilemap = decode_tilemap(reader)?;

    reader.seek(record.palette_ptr as usize);
    let palette = decode_palette(reader)?;

    reader.seek(record.oam_ptr as usize);
    let placements = decode_placements(reader, options.max_placements)?;

    Ok(Frame {
        tilemap,
        palette,
        placements,
        delay: record.delay,
        end_flag: record.end_flag,
    })
}

/// Decodes the sprite asset whose header sits at `address`.
///
/// Every pointer inside the asset is relative to the anchor right after the 4 byte header.
pub fn decode_asset(
    bytes: &[u8],
    address: usize,
    options: &DecodeOptions,
) -> Result<SpriteAsset, SpriteError> {
    let mut reader = Reader::new(ByteSource::new(bytes));

    reader.rebase(address, 0);
    let header = parse_with(&mut reader, HEADER_SIZE, "asset header", parse_header)?;

    for (offset, expected, found) in [
        (1, MARKER_ZERO, header.marker_zero),
        (2, MARKER_ONE, header.marker_one),
    ] {
        if found == expected {
            continue;
        }

        if options.strict_markers {
            return Err(SpriteError::UnexpectedMarker {
                offset,
                expected,
                found,
            });
        }

        warn!(
            "asset at {:#x}: header byte {} is {:#04x}, expected {:#04x}",
            address, offset, found, expected
        );
    }

    let anchor = address.saturating_add(HEADER_SIZE);
    let animation_count = header.animation_count as usize;

    debug!(
        "asset at {:#x}: {} animation(s), anchor {:#x}",
        address, animation_count, anchor
    );

    reader.rebase(anchor, 0);
    let pointers = parse_with(
        &mut reader,
        animation_count * POINTER_SIZE,
        "animation pointer table",
        |i| parse_pointer_table(i, animation_count),
    )?;

    let frames = pointers
        .into_iter()
        .enumerate()
        .map(|(index, pointer)| -> Result<Frame, SpriteError> {
            let frame = decode_frame(&mut reader, pointer, options)?;

            debug!(
                "frame {}: {} tile(s), {} placement(s)",
                index,
                frame.tilemap.tiles.len(),
                frame.placements.len()
            );

            Ok(frame)
        })
        .collect::<Result<Vec<Frame>, SpriteError>>()?;

    Ok(SpriteAsset {
        address,
        header,
        frames,
    })
}

/// Decodes with default options and keeps only the frames.
pub fn decode_sprite_asset(bytes: &[u8], address: usize) -> Result<Vec<Frame>, SpriteError> {
    decode_asset(bytes, address, &DecodeOptions::default()).map(|asset| asset.frames)
}

impl SpriteAsset {
    pub fn open_from_bytes(bytes: &[u8], address: usize) -> Result<SpriteAsset, SpriteError> {
        decode_asset(bytes, address, &DecodeOptions::default())
    }
}
