use nom::{
    bytes::complete::take,
    combinator::map,
    multi::{count, fill},
    number::complete::{le_u16, le_u32, le_u8},
    IResult as _IResult, Parser,
};

use crate::{AssetHeader, Tile, PALETTE_COLOR_COUNT, TILE_BYTES, TILE_PIXELS};

pub type IResult<'a, T> = _IResult<&'a [u8], T>;

/// The 20 byte record an animation pointer leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationRecord {
    pub tilemap_ptr: u32,
    pub palette_ptr: u32,
    pub oam_ptr: u32,
    pub delay: u8,
    pub end_flag: u8,
}

pub fn parse_header(i: &'_ [u8]) -> IResult<'_, AssetHeader> {
    map(
        (le_u8, le_u8, le_u8, le_u8),
        |(reserved, marker_zero, marker_one, animation_count)| AssetHeader {
            reserved,
            marker_zero,
            marker_one,
            animation_count,
        },
    )
    .parse(i)
}

pub fn parse_pointer_table(i: &'_ [u8], pointer_count: usize) -> IResult<'_, Vec<u32>> {
    count(le_u32, pointer_count).parse(i)
}

pub fn parse_animation_record(i: &'_ [u8]) -> IResult<'_, AnimationRecord> {
    map(
        (
            le_u32, le_u32, le_u32, le_u32, le_u8, le_u8, le_u8, le_u8,
        ),
        // the third pointer is never used but still takes up its 4 bytes
        |(tilemap_ptr, palette_ptr, _, oam_ptr, delay, _, end_flag, _)| {
            AnimationRecord {
                tilemap_ptr,
                palette_ptr,
                oam_ptr,
                delay,
                end_flag,
            }
        },
    )
    .parse(i)
}

pub fn parse_palette_colors(i: &'_ [u8]) -> IResult<'_, [u16; PALETTE_COLOR_COUNT]> {
    let mut colors = [0u16; PALETTE_COLOR_COUNT];
    let res = fill(le_u16, &mut colors).parse(i);

    res.map(|(i, _)| (i, colors))
}

/// Low nibble is the even pixel, high nibble the odd one.
pub fn parse_tile(i: &'_ [u8]) -> IResult<'_, Tile> {
    map(take(TILE_BYTES), |bytes: &[u8]| {
        let mut pixels = [0u8; TILE_PIXELS];

        bytes.iter().enumerate().for_each(|(index, byte)| {
            pixels[index * 2] = byte & 0x0F;
            pixels[index * 2 + 1] = byte >> 4;
        });

        Tile { pixels }
    })
    .parse(i)
}

pub fn parse_tiles(i: &'_ [u8], tile_count: usize) -> IResult<'_, Vec<Tile>> {
    count(parse_tile, tile_count).parse(i)
}

pub fn parse_placement_record(i: &'_ [u8]) -> IResult<'_, [u8; 5]> {
    map((le_u8, le_u8, le_u8, le_u8, le_u8), |(a, b, c, d, e)| {
        [a, b, c, d, e]
    })
    .parse(i)
}
