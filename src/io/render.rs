//! PNG export of committed placements with transparent background

use crate::algorithm::catalog::TileCatalog;
use crate::algorithm::engine::Placement;
use crate::io::configuration::{COLOR_PALETTE, PIXELS_PER_UNIT, RENDER_MARGIN_PX};
use crate::io::error::{Result, TilingError, invalid_parameter};
use crate::math::vec2::Vec2;
use image::{ImageBuffer, Rgba};
use ndarray::Array2;

#[derive(Debug)]
struct WorldBounds {
    min: Vec2,
    max: Vec2,
}

// Minimal world rectangle containing every transformed tile vertex
fn calculate_bounds(placements: &[Placement], catalog: &TileCatalog) -> Option<WorldBounds> {
    let mut min = Vec2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Vec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    let mut found = false;

    for placement in placements {
        let Some(entry) = catalog.get(placement.tile_index) else {
            continue;
        };
        for &vertex in entry.shape.vertices() {
            let point = placement.transform.apply(vertex);
            found = true;
            min = Vec2::new(min.x.min(point.x), min.y.min(point.y));
            max = Vec2::new(max.x.max(point.x), max.y.max(point.y));
        }
    }

    found.then_some(WorldBounds { min, max })
}

/// Render every committed placement into a PNG at `output_path`
///
/// Tiles are filled with palette colors cycled over their catalog index;
/// uncovered pixels stay transparent. Placements are drawn in commit
/// order, so later tiles paint over earlier ones along shared edges.
///
/// # Errors
///
/// Returns an error if:
/// - No placements have been committed
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_placements_as_png(
    placements: &[Placement],
    catalog: &TileCatalog,
    output_path: &str,
) -> Result<()> {
    let bounds = calculate_bounds(placements, catalog).ok_or_else(|| {
        invalid_parameter("placements", &0, &"no tiles have been placed")
    })?;

    let margin = f64::from(RENDER_MARGIN_PX);
    let width =
        ((bounds.max.x - bounds.min.x) * PIXELS_PER_UNIT).ceil() as usize + 2 * RENDER_MARGIN_PX as usize;
    let height =
        ((bounds.max.y - bounds.min.y) * PIXELS_PER_UNIT).ceil() as usize + 2 * RENDER_MARGIN_PX as usize;

    // Tile index per pixel, -1 for uncovered
    let mut canvas = Array2::<i32>::from_elem((height, width), -1);

    for placement in placements {
        let Some(entry) = catalog.get(placement.tile_index) else {
            continue;
        };
        let polygon: Vec<Vec2> = entry
            .shape
            .vertices()
            .iter()
            .map(|&vertex| {
                let point = placement.transform.apply(vertex);
                // World to pixel space, with y flipped so +y points up.
                Vec2::new(
                    (point.x - bounds.min.x).mul_add(PIXELS_PER_UNIT, margin),
                    (bounds.max.y - point.y).mul_add(PIXELS_PER_UNIT, margin),
                )
            })
            .collect();
        fill_polygon(&mut canvas, &polygon, placement.tile_index as i32);
    }

    let mut img = ImageBuffer::new(width as u32, height as u32);
    for (y, row) in canvas.outer_iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            let color = if value >= 0 {
                let rgba = COLOR_PALETTE
                    .get(value as usize % COLOR_PALETTE.len())
                    .copied()
                    .unwrap_or([0, 0, 0, 0]);
                Rgba(rgba)
            } else {
                Rgba([0, 0, 0, 0])
            };
            img.put_pixel(x as u32, y as u32, color);
        }
    }

    if let Some(parent) = std::path::Path::new(output_path).parent() {
        std::fs::create_dir_all(parent).map_err(|e| TilingError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path).map_err(|e| TilingError::ImageExport {
        path: output_path.into(),
        source: e,
    })?;

    Ok(())
}

// Even-odd scanline fill over pixel centers
fn fill_polygon(canvas: &mut Array2<i32>, polygon: &[Vec2], value: i32) {
    let (height, width) = canvas.dim();
    if polygon.len() < 3 {
        return;
    }

    let min_y = polygon.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = polygon
        .iter()
        .map(|p| p.y)
        .fold(f64::NEG_INFINITY, f64::max);
    let first_row = min_y.floor().max(0.0) as usize;
    let last_row = (max_y.ceil() as usize).min(height.saturating_sub(1));

    for y in first_row..=last_row {
        let sample_y = y as f64 + 0.5;
        let mut crossings: Vec<f64> = Vec::new();
        for index in 0..polygon.len() {
            let a = polygon.get(index).copied().unwrap_or(Vec2::ZERO);
            let b = polygon
                .get((index + 1) % polygon.len())
                .copied()
                .unwrap_or(Vec2::ZERO);
            if (a.y <= sample_y) == (b.y <= sample_y) {
                continue;
            }
            crossings.push((sample_y - a.y).mul_add((b.x - a.x) / (b.y - a.y), a.x));
        }
        crossings.sort_by(f64::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let [start, end] = pair else { continue };
            let first_col = (start - 0.5).ceil().max(0.0) as usize;
            let last_col = ((end - 0.5).floor() as i64).min(width as i64 - 1);
            if last_col < first_col as i64 {
                continue;
            }
            for x in first_col..=last_col as usize {
                if let Some(cell) = canvas.get_mut((y, x)) {
                    *cell = value;
                }
            }
        }
    }
}
