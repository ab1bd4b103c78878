// photoproc/src/processors/slicer.rs
use crate::core::{
    DecodedImage, ImageToolError, OutputEncoding, Result, SliceDirection, SliceLine, SlicedImage,
};
use crate::processors::Compressor;
use crate::utils::cut_sequence;
use rayon::prelude::*;

/// One rectangle of the grid, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl GridCell {
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Splits one decoded image along horizontal and vertical cut lines.
pub struct Slicer<'a> {
    compressor: &'a Compressor,
}

impl<'a> Slicer<'a> {
    pub fn new(compressor: &'a Compressor) -> Self {
        Self { compressor }
    }

    /// Lay out the grid without touching pixels.
    ///
    /// Cells are ordered column by column: every row of the first column,
    /// then every row of the second. Repeated coordinates give zero-sized
    /// cells; coordinates outside the image are an error.
    pub fn plan(&self, width: u32, height: u32, slices: &[SliceLine]) -> Result<Vec<GridCell>> {
        let columns = cut_sequence(coordinates(slices, SliceDirection::Vertical), width);
        let rows = cut_sequence(coordinates(slices, SliceDirection::Horizontal), height);

        let mut cells = Vec::with_capacity((columns.len() - 1) * (rows.len() - 1));
        for xs in columns.windows(2) {
            for ys in rows.windows(2) {
                cells.push(cell(xs[0], xs[1], ys[0], ys[1], width, height)?);
            }
        }

        Ok(cells)
    }

    pub fn slice(
        &self,
        image: &DecodedImage,
        slices: &[SliceLine],
        encoding: OutputEncoding,
    ) -> Result<Vec<SlicedImage>> {
        let cells = self.plan(image.width(), image.height(), slices)?;

        log::debug!(
            "Slicing {}x{} image into {} cells",
            image.width(),
            image.height(),
            cells.len()
        );

        cells
            .par_iter()
            .map(|cell| self.render(image, cell, encoding))
            .collect()
    }

    fn render(
        &self,
        image: &DecodedImage,
        cell: &GridCell,
        encoding: OutputEncoding,
    ) -> Result<SlicedImage> {
        let data = if cell.is_degenerate() {
            log::warn!(
                "Grid cell at ({}, {}) has zero area ({}x{}); duplicate cut coordinates?",
                cell.x,
                cell.y,
                cell.width,
                cell.height
            );
            Vec::new()
        } else {
            let mut piece = image.crop_unchecked(cell.x, cell.y, cell.width, cell.height);
            piece.repage();
            self.compressor.encode(&piece, encoding)?
        };

        Ok(SlicedImage {
            data,
            width: cell.width,
            height: cell.height,
            origin_x: cell.x,
            origin_y: cell.y,
        })
    }
}

fn coordinates(slices: &[SliceLine], direction: SliceDirection) -> impl Iterator<Item = i64> + '_ {
    slices
        .iter()
        .filter(move |s| s.direction == direction)
        .map(|s| s.coordinate)
}

fn cell(x0: i64, x1: i64, y0: i64, y1: i64, width: u32, height: u32) -> Result<GridCell> {
    let in_range = |lo: i64, hi: i64, extent: u32| lo >= 0 && hi >= lo && hi <= i64::from(extent);

    if !in_range(x0, x1, width) || !in_range(y0, y1, height) {
        return Err(ImageToolError::InvalidCrop(format!(
            "slice cell [{}, {}) x [{}, {}) lies outside {}x{}",
            x0, x1, y0, y1, width, height
        )));
    }

    Ok(GridCell {
        x: x0 as u32,
        y: y0 as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}
