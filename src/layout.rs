//! Collision layout core: bit-packed occupancy grid, word sprite
//! rasterization and the Archimedean search spiral.

use fontdue::Font;

/// Bit-packed occupancy grid over the canvas. A set bit means the pixel is
/// taken, either by an already placed word or by the blocked region of a
/// mask. Rows are stored as `u32` blocks, most significant bit first.
pub(crate) struct OccupancyGrid {
    pub width: u32,
    pub height: u32,
    stride: usize,
    data: Vec<u32>,
}

impl OccupancyGrid {
    pub fn new(width: u32, height: u32) -> Self {
        let stride = ((width + 31) >> 5) as usize;
        Self {
            width,
            height,
            stride,
            data: vec![0; stride * height as usize],
        }
    }

    /// Marks a single pixel as occupied. Out-of-range coordinates are
    /// ignored (used while seeding the grid from a mask).
    pub fn set(&mut self, x: i32, y: i32) {
        if x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32 {
            let row_idx = y as usize * self.stride;
            let col_idx = (x as usize) >> 5;
            let bit_idx = 31 - (x & 31);
            self.data[row_idx + col_idx] |= 1 << bit_idx;
        }
    }

    /// Tests whether the sprite, placed with its top-left corner at
    /// (`start_x`, `start_y`), overlaps any occupied pixel. Anything that
    /// sticks out of the canvas counts as a collision.
    ///
    /// The sprite rows are shifted against the grid blocks with a carry so
    /// the whole test runs on `u32` AND operations.
    pub fn check_collision(&self, sprite: &WordSprite, start_x: i32, start_y: i32) -> bool {
        let sprite_w32 = sprite.width_u32;
        let sprite_h = sprite.bbox_height;

        let shift = (start_x & 31).unsigned_abs();
        let r_shift = 32 - shift;

        for sy in 0..sprite_h {
            let gy = start_y + sy as i32;

            if gy < 0 || gy >= self.height as i32 {
                return true;
            }

            let grid_row_idx = gy as usize * self.stride;
            let grid_col_start = (start_x >> 5) as isize;

            let mut carry = 0u32;

            for sx in 0..=sprite_w32 {
                let s_val = if sx < sprite_w32 {
                    sprite.data[sy as usize * sprite_w32 + sx]
                } else {
                    0
                };

                // Shifting a u32 by 32 panics, so shift == 0 is special-cased.
                let mask = if shift == 0 {
                    s_val
                } else {
                    (carry << r_shift) | (s_val >> shift)
                };

                let gx = grid_col_start + sx as isize;

                if mask != 0 {
                    if gx < 0 || gx >= self.stride as isize {
                        return true;
                    }

                    if (self.data[grid_row_idx + gx as usize] & mask) != 0 {
                        return true;
                    }
                }

                carry = s_val;
            }
        }
        false
    }

    /// ORs the sprite bits into the grid at (`start_x`, `start_y`).
    pub fn write_sprite(&mut self, sprite: &WordSprite, start_x: i32, start_y: i32) {
        let sprite_w32 = sprite.width_u32;
        let sprite_h = sprite.bbox_height;
        let shift = (start_x & 31).unsigned_abs();
        let r_shift = 32 - shift;

        for sy in 0..sprite_h {
            let gy = start_y + sy as i32;
            if gy < 0 || gy >= self.height as i32 {
                continue;
            }

            let grid_row_idx = gy as usize * self.stride;
            let grid_col_start = (start_x >> 5) as isize;
            let mut carry = 0u32;

            for sx in 0..=sprite_w32 {
                let s_val = if sx < sprite_w32 {
                    sprite.data[sy as usize * sprite_w32 + sx]
                } else {
                    0
                };

                let mask = if shift == 0 {
                    s_val
                } else {
                    (carry << r_shift) | (s_val >> shift)
                };

                let gx = grid_col_start + sx as isize;
                if mask != 0 && gx >= 0 && gx < self.stride as isize {
                    self.data[grid_row_idx + gx as usize] |= mask;
                }

                carry = s_val;
            }
        }
    }
}

/// Bit-packed bitmap of one rasterized word, rotated and dilated by the
/// layout padding. `anchor_x`/`anchor_y` locate the text baseline origin
/// relative to the sprite's top-left corner, for SVG positioning later.
pub(crate) struct WordSprite {
    pub data: Vec<u32>,
    pub width_u32: usize,
    pub bbox_width: u32,
    pub bbox_height: u32,
    pub anchor_x: f32,
    pub anchor_y: f32,
}

pub(crate) fn rasterize_word(
    text: &str,
    size: f32,
    angle_deg: f32,
    font: &Font,
    padding: u32,
) -> WordSprite {
    let metrics = font
        .horizontal_line_metrics(size)
        .unwrap_or(fontdue::LineMetrics {
            ascent: size * 0.8,
            descent: size * -0.2,
            line_gap: 0.0,
            new_line_size: size,
        });

    let mut glyphs = Vec::new();
    let mut total_width = 0.0f32;

    for ch in text.chars() {
        let (glyph_metrics, bitmap) = font.rasterize(ch, size);
        glyphs.push((total_width, glyph_metrics, bitmap));
        total_width += glyph_metrics.advance_width;
    }

    let padding_f = padding as f32;
    let unrotated_w = total_width.ceil() + padding_f * 2.0;
    let unrotated_h = metrics.new_line_size.ceil() + padding_f * 2.0;

    // Rotation happens around the bitmap center.
    let cx = unrotated_w / 2.0;
    let cy = unrotated_h / 2.0;

    let rad = angle_deg.to_radians();
    let (sin, cos) = rad.sin_cos();

    let transform = |x: f32, y: f32| -> (f32, f32) {
        let dx = x - cx;
        let dy = y - cy;
        (dx * cos - dy * sin + cx, dx * sin + dy * cos + cy)
    };

    // Bounding box of the rotated rectangle.
    let corners = [
        transform(0.0, 0.0),
        transform(unrotated_w, 0.0),
        transform(0.0, unrotated_h),
        transform(unrotated_w, unrotated_h),
    ];

    let min_x = corners.iter().map(|p| p.0).fold(f32::INFINITY, f32::min);
    let max_x = corners
        .iter()
        .map(|p| p.0)
        .fold(f32::NEG_INFINITY, f32::max);
    let min_y = corners.iter().map(|p| p.1).fold(f32::INFINITY, f32::min);
    let max_y = corners
        .iter()
        .map(|p| p.1)
        .fold(f32::NEG_INFINITY, f32::max);

    let bbox_width = (max_x - min_x).ceil() as u32;
    let bbox_height = (max_y - min_y).ceil() as u32;

    let width_u32 = ((bbox_width + 31) >> 5) as usize;

    let mut data = vec![0u32; width_u32 * bbox_height as usize];

    let base_x = padding_f;
    let base_y = padding_f + metrics.ascent;

    // The anchor is the rotated baseline origin relative to the rotated
    // bounding box's top-left corner.
    let (rot_base_x, rot_base_y) = transform(base_x, base_y);
    let anchor_x = rot_base_x - min_x;
    let anchor_y = rot_base_y - min_y;

    for (offset_x, glyph_metrics, bitmap) in &glyphs {
        let char_left = base_x + offset_x + glyph_metrics.xmin as f32;
        let char_top = base_y - glyph_metrics.height as f32 - glyph_metrics.ymin as f32;

        for y in 0..glyph_metrics.height {
            for x in 0..glyph_metrics.width {
                // Coverage threshold; faint anti-aliasing edges don't block.
                if bitmap[y * glyph_metrics.width + x] > 10 {
                    let ox = char_left + x as f32;
                    let oy = char_top + y as f32;
                    let (rx, ry) = transform(ox, oy);

                    let fx = (rx - min_x).round() as i32;
                    let fy = (ry - min_y).round() as i32;

                    // Dilate by the padding so placed words keep a gap.
                    let pad = padding as i32;
                    for py in -pad..=pad {
                        for px in -pad..=pad {
                            let dx = fx + px;
                            let dy = fy + py;

                            if dx >= 0
                                && dy >= 0
                                && dx < bbox_width as i32
                                && dy < bbox_height as i32
                            {
                                let row_idx = dy as usize * width_u32;
                                let col_idx = (dx as usize) >> 5;
                                let bit_idx = 31 - (dx & 31);
                                data[row_idx + col_idx] |= 1 << bit_idx;
                            }
                        }
                    }
                }
            }
        }
    }

    WordSprite {
        data,
        width_u32,
        bbox_width,
        bbox_height,
        anchor_x,
        anchor_y,
    }
}

/// Rectangular Archimedean spiral of candidate offsets around the canvas
/// center, stretched by the canvas aspect ratio.
pub(crate) struct ArchimedeanSpiral {
    t: i32,
    dt: i32,
    dx: f64,
    dy: f64,
    ratio: f64,
    e: f64,
}

impl ArchimedeanSpiral {
    pub fn new(width: i32, height: i32, dt: i32) -> Self {
        let e = 4.0;
        let ratio = e * width as f64 / height as f64;
        Self {
            t: 0,
            dt,
            dx: 0.0,
            dy: 0.0,
            ratio,
            e,
        }
    }
}

impl Iterator for ArchimedeanSpiral {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        self.t += self.dt;
        let sign = if self.t < 0 { -1.0 } else { 1.0 };
        let idx = ((1.0 + 4.0 * sign * self.t as f64).sqrt() - sign) as i32 & 3;
        match idx {
            0 => self.dx += self.ratio,
            1 => self.dy += self.e,
            2 => self.dx -= self.ratio,
            _ => self.dy -= self.e,
        }
        Some((self.dx as i32, self.dy as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_sprite(width: u32, height: u32) -> WordSprite {
        let width_u32 = ((width + 31) >> 5) as usize;
        let mut data = vec![0u32; width_u32 * height as usize];
        for y in 0..height as usize {
            for x in 0..width as usize {
                data[y * width_u32 + (x >> 5)] |= 1 << (31 - (x & 31));
            }
        }
        WordSprite {
            data,
            width_u32,
            bbox_width: width,
            bbox_height: height,
            anchor_x: 0.0,
            anchor_y: 0.0,
        }
    }

    #[test]
    fn empty_grid_has_no_collision() {
        let grid = OccupancyGrid::new(64, 64);
        let sprite = full_sprite(10, 10);
        assert!(!grid.check_collision(&sprite, 5, 5));
    }

    #[test]
    fn set_pixel_collides() {
        let mut grid = OccupancyGrid::new(64, 64);
        grid.set(8, 8);
        let sprite = full_sprite(10, 10);
        assert!(grid.check_collision(&sprite, 5, 5));
        assert!(!grid.check_collision(&sprite, 20, 20));
    }

    #[test]
    fn out_of_bounds_counts_as_collision() {
        let grid = OccupancyGrid::new(32, 32);
        let sprite = full_sprite(10, 10);
        assert!(grid.check_collision(&sprite, -1, 5));
        assert!(grid.check_collision(&sprite, 25, 5));
        assert!(grid.check_collision(&sprite, 5, 28));
    }

    #[test]
    fn written_sprite_blocks_the_same_spot() {
        let mut grid = OccupancyGrid::new(128, 128);
        let sprite = full_sprite(20, 12);
        assert!(!grid.check_collision(&sprite, 37, 50));
        grid.write_sprite(&sprite, 37, 50);
        assert!(grid.check_collision(&sprite, 37, 50));
        // An unaligned overlap is still caught by the shifted test.
        assert!(grid.check_collision(&sprite, 45, 55));
        assert!(!grid.check_collision(&sprite, 70, 50));
    }

    #[test]
    fn spiral_walks_outward() {
        let offsets: Vec<_> = ArchimedeanSpiral::new(400, 400, 1).take(2000).collect();
        let start_max = offsets[..50]
            .iter()
            .map(|(x, y)| x.abs().max(y.abs()))
            .max()
            .unwrap();
        let end_max = offsets
            .iter()
            .map(|(x, y)| x.abs().max(y.abs()))
            .max()
            .unwrap();
        assert!(end_max > start_max);
    }
}
