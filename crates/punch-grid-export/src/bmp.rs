use crate::ExportError;
use byteorder::{LittleEndian, WriteBytesExt};
use punch_grid_core::CellGrid;
use std::io::Write;

/// File header (14) plus BITMAPINFOHEADER (40).
const PIXEL_DATA_OFFSET: u32 = 54;
const INFO_HEADER_SIZE: u32 = 40;
/// 2835 pixels per meter ≈ 72 DPI.
const PIXELS_PER_METER: i32 = 2835;

/// Write the grid as a 24-bit uncompressed BMP, one pixel per cell.
///
/// BITMAPINFOHEADER, bottom-up rows, BGR byte order, rows zero-padded to a
/// 4-byte boundary. Punched cells are black, unpunched white.
pub fn write_bmp<W: Write>(grid: &CellGrid, out: &mut W) -> Result<(), ExportError> {
    if grid.cols() == 0 || grid.rows() == 0 {
        return Err(ExportError::EmptyGrid);
    }

    let stride = (grid.cols() * 3 + 3) & !3;
    let image_size = (stride * grid.rows()) as u32;

    // File header.
    out.write_all(b"BM")?;
    out.write_u32::<LittleEndian>(PIXEL_DATA_OFFSET + image_size)?;
    out.write_u16::<LittleEndian>(0)?;
    out.write_u16::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(PIXEL_DATA_OFFSET)?;

    // BITMAPINFOHEADER.
    out.write_u32::<LittleEndian>(INFO_HEADER_SIZE)?;
    out.write_i32::<LittleEndian>(grid.cols() as i32)?;
    out.write_i32::<LittleEndian>(grid.rows() as i32)?;
    out.write_u16::<LittleEndian>(1)?; // planes
    out.write_u16::<LittleEndian>(24)?; // bits per pixel
    out.write_u32::<LittleEndian>(0)?; // BI_RGB, uncompressed
    out.write_u32::<LittleEndian>(image_size)?;
    out.write_i32::<LittleEndian>(PIXELS_PER_METER)?;
    out.write_i32::<LittleEndian>(PIXELS_PER_METER)?;
    out.write_u32::<LittleEndian>(0)?; // palette size
    out.write_u32::<LittleEndian>(0)?; // important colors

    // Pixel rows, bottom-up.
    let padding = stride - grid.cols() * 3;
    let mut row_buf = Vec::with_capacity(stride);
    for row_idx in (0..grid.rows()).rev() {
        row_buf.clear();
        for col in 0..grid.cols() {
            let v = if grid.get(row_idx, col) { 0u8 } else { 255u8 };
            row_buf.extend_from_slice(&[v, v, v]); // B G R
        }
        row_buf.extend(std::iter::repeat(0u8).take(padding));
        out.write_all(&row_buf)?;
    }

    Ok(())
}
