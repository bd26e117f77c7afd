use crate::ExportError;
use punch_grid_core::CellGrid;
use std::io::Write;

/// Write the grid as a `cols × rows` 1-bit grayscale PNG, one pixel per
/// cell. Punched cells are black, unpunched cells white.
pub fn write_png<W: Write>(grid: &CellGrid, out: W) -> Result<(), ExportError> {
    if grid.cols() == 0 || grid.rows() == 0 {
        return Err(ExportError::EmptyGrid);
    }

    let mut encoder = png::Encoder::new(out, grid.cols() as u32, grid.rows() as u32);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::One);
    let mut writer = encoder.write_header()?;

    // Pack rows MSB-first; bit 1 is white, so punched cells clear the bit.
    let row_bytes = grid.cols().div_ceil(8);
    let mut data = Vec::with_capacity(row_bytes * grid.rows());
    for row in grid.iter_rows() {
        let mut byte = 0u8;
        let mut used = 0u32;
        for &cell in row {
            byte = (byte << 1) | u8::from(!cell);
            used += 1;
            if used == 8 {
                data.push(byte);
                byte = 0;
                used = 0;
            }
        }
        if used > 0 {
            data.push(byte << (8 - used));
        }
    }

    writer.write_image_data(&data)?;
    Ok(())
}
