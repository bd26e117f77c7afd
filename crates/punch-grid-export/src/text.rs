use crate::ExportError;
use punch_grid_core::CellGrid;
use std::io::Write;

/// The text form: one line per row, `1` = punched, `\n` terminated.
pub fn grid_to_text(grid: &CellGrid) -> Result<String, ExportError> {
    if grid.cols() == 0 || grid.rows() == 0 {
        return Err(ExportError::EmptyGrid);
    }

    let mut text = String::with_capacity((grid.cols() + 1) * grid.rows());
    for row in grid.iter_rows() {
        for &cell in row {
            text.push(if cell { '1' } else { '0' });
        }
        text.push('\n');
    }
    Ok(text)
}

/// Write the text form to `out`.
pub fn write_text<W: Write>(grid: &CellGrid, out: &mut W) -> Result<(), ExportError> {
    out.write_all(grid_to_text(grid)?.as_bytes())?;
    Ok(())
}
