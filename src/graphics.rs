use crate::loader::FaceImage;
use crate::math::{apply_saturation, edge_function};
use crate::vertex::Vertex;

/// Draws a triangle of the card quad, sampling the face texture per pixel
pub fn draw_textured_triangle(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    pixel_data: &mut [u8],
    width: usize,
    height: usize,
    texture: &FaceImage,
    saturation: f64,
) {
    rasterize(
        &[v0.screen_position, v1.screen_position, v2.screen_position],
        pixel_data,
        width,
        height,
        |w0, w1, w2| {
            let u = v0.uv[0] * w0 + v1.uv[0] * w1 + v2.uv[0] * w2;
            let v = v0.uv[1] * w0 + v1.uv[1] * w1 + v2.uv[1] * w2;
            apply_saturation(texture.sample(u, v), saturation)
        },
    );
}

/// Fills a triangle with a single color; the outline fallback uses this
pub fn fill_triangle(
    p0: [f64; 2],
    p1: [f64; 2],
    p2: [f64; 2],
    pixel_data: &mut [u8],
    width: usize,
    height: usize,
    color: [u8; 3],
) {
    rasterize(&[p0, p1, p2], pixel_data, width, height, |_, _, _| color);
}

/// Shared barycentric fill loop over a triangle's bounding box.
///
/// Weights are normalized by the signed area, which keeps the inside test
/// valid for both windings; the quad's winding reverses once the back face
/// is showing. A degenerate (edge-on) triangle draws nothing.
fn rasterize(
    points: &[[f64; 2]; 3],
    pixel_data: &mut [u8],
    width: usize,
    height: usize,
    mut shade: impl FnMut(f64, f64, f64) -> [u8; 3],
) {
    let [p0, p1, p2] = points;

    // Compute bounding box of the triangle
    let min_x = p0[0].min(p1[0]).min(p2[0]).floor().max(0.0) as usize;
    let max_x = p0[0]
        .max(p1[0])
        .max(p2[0])
        .ceil()
        .min(width as f64 - 1.0)
        .max(0.0) as usize;
    let min_y = p0[1].min(p1[1]).min(p2[1]).floor().max(0.0) as usize;
    let max_y = p0[1]
        .max(p1[1])
        .max(p2[1])
        .ceil()
        .min(height as f64 - 1.0)
        .max(0.0) as usize;

    let area = edge_function(p0, p1, p2);
    if area.abs() < f64::EPSILON {
        return;
    }

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f64 + 0.5;
            let py = y as f64 + 0.5;
            let p = [px, py];

            let w0 = edge_function(p1, p2, &p) / area;
            let w1 = edge_function(p2, p0, &p) / area;
            let w2 = edge_function(p0, p1, &p) / area;

            if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                let [r, g, b] = shade(w0, w1, w2);
                let offset = (y * width + x) * 4;
                pixel_data[offset] = r;
                pixel_data[offset + 1] = g;
                pixel_data[offset + 2] = b;
                pixel_data[offset + 3] = 255;
            }
        }
    }
}

/// Draws a line between two points in the pixel buffer using Bresenham's
/// algorithm; the debug overlay traces the card edges with it
pub fn draw_line(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    pixel_data: &mut [u8],
    width: usize,
    height: usize,
    color: [u8; 3],
) {
    let (mut x0, mut y0, x1, y1) = (
        x0.round() as isize,
        y0.round() as isize,
        x1.round() as isize,
        y1.round() as isize,
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error value e_xy

    loop {
        if x0 >= 0 && x0 < width as isize && y0 >= 0 && y0 < height as isize {
            let offset = (y0 as usize * width + x0 as usize) * 4;
            pixel_data[offset] = color[0];
            pixel_data[offset + 1] = color[1];
            pixel_data[offset + 2] = color[2];
            pixel_data[offset + 3] = 255;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
