use image::{imageops, RgbaImage};

use crate::{error::SpriteError, Frame, Placement, TILE_SIDE, TRANSPARENT_INDEX};

/// Side of the canvas that placement offsets address.
pub const CANVAS_SIDE: u32 = 256;

/// A composed placement and where its top left corner goes on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    pub x: u32,
    pub y: u32,
    pub image: RgbaImage,
}

/// Builds the pixels of one placement.
///
/// Tiles are taken from `frame.tilemap` starting at `placement.start_tile`, laid out left to
/// right then top to bottom. Index 0 stays transparent. The horizontal flip mirrors the whole
/// block once it is assembled. The vertical flip is not applied.
pub fn compose(frame: &Frame, placement: &Placement) -> Result<PlacedImage, SpriteError> {
    let tiles = &frame.tilemap.tiles;
    let tiles_wide = placement.size.width as usize;
    let mut image = RgbaImage::new(placement.size.pixel_width(), placement.size.pixel_height());

    for step in 0..placement.size.tile_count() {
        let index = placement.start_tile as usize + step;
        let tile = tiles.get(index).ok_or(SpriteError::TileOutOfRange {
            index,
            count: tiles.len(),
        })?;

        let left = (step % tiles_wide) * TILE_SIDE;
        let top = (step / tiles_wide) * TILE_SIDE;

        tile.pixels
            .iter()
            .enumerate()
            .filter(|(_, color_index)| **color_index != TRANSPARENT_INDEX)
            .for_each(|(pixel, color_index)| {
                let x = left + pixel % TILE_SIDE;
                let y = top + pixel / TILE_SIDE;

                image.put_pixel(x as u32, y as u32, frame.palette.rgba8(*color_index));
            });
    }

    if placement.hflip {
        imageops::flip_horizontal_in_place(&mut image);
    }

    Ok(PlacedImage {
        x: placement.canvas_x() as u32,
        y: placement.canvas_y() as u32,
        image,
    })
}

impl Frame {
    pub fn compose_all(&self) -> Result<Vec<PlacedImage>, SpriteError> {
        self.placements
            .iter()
            .map(|placement| compose(self, placement))
            .collect()
    }

    /// Draws every placement onto a transparent 256x256 canvas in list order. Anything past the
    /// edge is clipped.
    pub fn to_rgba8(&self) -> Result<RgbaImage, SpriteError> {
        let mut canvas = RgbaImage::new(CANVAS_SIDE, CANVAS_SIDE);

        self.compose_all()?.iter().for_each(|placed| {
            imageops::overlay(&mut canvas, &placed.image, placed.x as i64, placed.y as i64)
        });

        Ok(canvas)
    }
}
