use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};

use crate::ecosystem::Ecosystem;
use crate::world::WorldResult;

/// Pixels per grid cell in the rendered map.
const CELL_PX: u32 = 12;

/// Write the full world result as pretty-printed JSON.
pub fn export_json(world: &WorldResult, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), world)?;
    Ok(())
}

/// Render the world as a PNG: band rectangles as background, exits as
/// lines, vertices as dots (marsh and bridge vertices keep their own
/// colours so the post-process is visible on the overlay).
pub fn export_map(world: &WorldResult, path: &Path) -> Result<(), image::ImageError> {
    let spacing = world.config.place_spacing_m();
    let margin = world.config.place_margin_m as f64;
    let grid_width = world
        .ecosystem_boundaries
        .iter()
        .map(|boundary| boundary.columns)
        .sum::<i32>() as u32;
    let grid_height = world
        .ecosystem_boundaries
        .first()
        .map(|boundary| ((boundary.end_y - boundary.start_y) / spacing).round() as u32)
        .unwrap_or(0);

    let width_px = grid_width * CELL_PX;
    let height_px = grid_height * CELL_PX;
    let mut img: RgbImage = ImageBuffer::new(width_px.max(1), height_px.max(1));

    // Band background.
    for boundary in &world.ecosystem_boundaries {
        let start = ((boundary.start_x - margin) / spacing) as u32 * CELL_PX;
        let end = (((boundary.end_x - margin) / spacing) as u32 * CELL_PX).min(width_px);
        let shade = dim(boundary.ecosystem.color(), 0.35);
        for x in start..end {
            for y in 0..height_px {
                img.put_pixel(x, y, Rgb(shade));
            }
        }
    }

    // Exit lines, drawn beneath the vertex dots. World y grows north, image
    // y grows down, so rows are flipped.
    let to_px = |wx: f64, wy: f64| -> (i64, i64) {
        let gx = (wx - margin) / spacing;
        let gy = (wy - margin) / spacing;
        (
            (gx * CELL_PX as f64 + CELL_PX as f64 / 2.0) as i64,
            (height_px as f64 - 1.0 - (gy * CELL_PX as f64 + CELL_PX as f64 / 2.0)) as i64,
        )
    };
    for (place, vertex) in world.places.iter().zip(&world.vertices) {
        for exit in place.exits.values() {
            if let Some(target) = world.vertices.iter().find(|v| v.place_id == exit.to) {
                let (x0, y0) = to_px(vertex.x, vertex.y);
                let (x1, y1) = to_px(target.x, target.y);
                draw_line(&mut img, x0, y0, x1, y1, [230, 230, 230]);
            }
        }
    }

    // Vertex dots.
    for vertex in &world.vertices {
        let (cx, cy) = to_px(vertex.x, vertex.y);
        let color = match vertex.kind {
            crate::vertex::VertexKind::Bridge => [250, 220, 80],
            _ => vertex.ecosystem.color(),
        };
        for dy in -2i64..=2 {
            for dx in -2i64..=2 {
                put_pixel_checked(&mut img, cx + dx, cy + dy, color);
            }
        }
    }

    img.save(path)
}

fn dim(color: [u8; 3], factor: f32) -> [u8; 3] {
    [
        (color[0] as f32 * factor) as u8,
        (color[1] as f32 * factor) as u8,
        (color[2] as f32 * factor) as u8,
    ]
}

fn put_pixel_checked(img: &mut RgbImage, x: i64, y: i64, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
}

/// Bresenham line draw.
fn draw_line(img: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: [u8; 3]) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);
    loop {
        put_pixel_checked(img, x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Map an [`Ecosystem`] to a legend label for CLI summaries.
pub fn legend_entry(ecosystem: Ecosystem) -> String {
    let [r, g, b] = ecosystem.color();
    format!("{} (#{r:02x}{g:02x}{b:02x})", ecosystem.display_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_entry_format() {
        assert_eq!(legend_entry(Ecosystem::JungleTropical), "Tropical Jungle (#006428)");
    }

    #[test]
    fn test_dim_scales_channels() {
        assert_eq!(dim([200, 100, 0], 0.5), [100, 50, 0]);
    }
}
