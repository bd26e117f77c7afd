use punch_grid::digitize::{digitize, full_frame_boundary};
use punch_grid::export::grid_to_text;
use punch_grid::DetectParams;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let (Some(path), Some(cols), Some(rows)) = (args.next(), args.next(), args.next()) else {
        eprintln!("Usage: digitize_card <image_path> <cols> <rows>");
        return Ok(());
    };
    let cols: usize = cols.parse()?;
    let rows: usize = rows.parse()?;

    let img = image::ImageReader::open(path)?.decode()?;
    let boundary = full_frame_boundary(img.width(), img.height());

    let detection = digitize(&img, &boundary, cols, rows, &DetectParams::default())?;
    println!(
        "{} punches from {} accepted blobs",
        detection.grid.punched_count(),
        detection.blobs.len()
    );
    print!("{}", grid_to_text(&detection.grid)?);

    Ok(())
}
