//! Nearest-neighbour resampling of the render buffer onto the terminal grid
//!
//! The buffer is scaled uniformly to cover the terminal: the larger of the
//! two axis scales wins, so one axis may be cropped but no border is ever
//! left unpainted.

use crate::buffer::{RenderBuffer, BLANK};
use std::fmt;

/// A terminal-sized grid of characters ready to present
#[derive(Debug, Clone, PartialEq)]
pub struct TextGrid {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl TextGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![BLANK; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, x: usize, y: usize) -> char {
        self.cells[y * self.cols + x]
    }

    pub fn set(&mut self, x: usize, y: usize, c: char) {
        self.cells[y * self.cols + x] = c;
    }

    /// Row `y` as a string
    pub fn line(&self, y: usize) -> String {
        self.cells[y * self.cols..(y + 1) * self.cols].iter().collect()
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.rows).map(move |y| self.line(y))
    }
}

impl fmt::Display for TextGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// The window of the buffer that is visible on the terminal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Terminal cells per buffer cell
    pub scale: f32,
    pub view_width: usize,
    pub view_height: usize,
    pub x0: i64,
    pub y0: i64,
    buffer_width: usize,
    buffer_height: usize,
}

impl Viewport {
    /// Cover a `cols` x `rows` terminal with a `width` x `height` buffer.
    ///
    /// Returns `None` when either grid is empty.
    pub fn cover(width: usize, height: usize, cols: usize, rows: usize) -> Option<Self> {
        if width == 0 || height == 0 || cols == 0 || rows == 0 {
            return None;
        }
        let sx = cols as f32 / width as f32;
        let sy = rows as f32 / height as f32;
        let scale = sx.max(sy);

        let view_width = ((cols as f32 / scale).round() as usize).max(1);
        let view_height = ((rows as f32 / scale).round() as usize).max(1);

        Some(Self {
            scale,
            view_width,
            view_height,
            x0: (width as i64 - view_width as i64) / 2,
            y0: (height as i64 - view_height as i64) / 2,
            buffer_width: width,
            buffer_height: height,
        })
    }

    /// Buffer cell sampled for terminal cell `(x, y)`
    pub fn source(&self, x: usize, y: usize) -> (usize, usize) {
        let vx = self.x0 + (x as f32 / self.scale).round() as i64;
        let vy = self.y0 + (y as f32 / self.scale).round() as i64;
        (
            vx.clamp(0, self.buffer_width as i64 - 1) as usize,
            vy.clamp(0, self.buffer_height as i64 - 1) as usize,
        )
    }
}

/// Resample `buffer` onto a `cols` x `rows` terminal grid
pub fn composite(buffer: &RenderBuffer, cols: usize, rows: usize) -> TextGrid {
    let mut grid = TextGrid::new(cols, rows);
    let Some(viewport) = Viewport::cover(buffer.width(), buffer.height(), cols, rows) else {
        return grid;
    };

    for y in 0..rows {
        for x in 0..cols {
            let (vx, vy) = viewport.source(x, y);
            let c = buffer.get(vx, vy);
            grid.set(x, y, if c == '\0' { BLANK } else { c });
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterned(width: usize, height: usize) -> RenderBuffer {
        let glyphs: Vec<char> = "abcdefghijklmnopqrstuvwxyz".chars().collect();
        let mut buffer = RenderBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                buffer.depth_tested_write(
                    x as i64,
                    y as i64,
                    1.0,
                    glyphs[(x + y * width) % glyphs.len()],
                );
            }
        }
        buffer
    }

    #[test]
    fn test_same_size_is_identity() {
        let buffer = patterned(17, 9);
        let grid = composite(&buffer, 17, 9);
        for y in 0..9 {
            for x in 0..17 {
                assert_eq!(grid.get(x, y), buffer.get(x, y));
            }
        }
    }

    #[test]
    fn test_cover_uses_larger_scale() {
        // Wide terminal: horizontal scale 2.0 beats vertical 1.0
        let viewport = Viewport::cover(100, 50, 200, 50).unwrap();
        assert_eq!(viewport.scale, 2.0);
        assert_eq!(viewport.view_width, 100);
        assert_eq!(viewport.view_height, 25);
        // Cropped rows are centred
        assert_eq!(viewport.x0, 0);
        assert_eq!(viewport.y0, 12);
    }

    #[test]
    fn test_view_spans_buffer_on_scaled_axis() {
        for (cols, rows) in [(80, 24), (213, 57), (40, 90), (301, 301)] {
            let viewport = Viewport::cover(184, 103, cols, rows).unwrap();
            let spans_w = (viewport.scale * viewport.view_width as f32 - cols as f32).abs();
            let spans_h = (viewport.scale * viewport.view_height as f32 - rows as f32).abs();
            assert!(spans_w <= viewport.scale && spans_h <= viewport.scale);
            assert!(viewport.view_width <= 184 && viewport.view_height <= 103);
            // One axis is fully used
            assert!(viewport.view_width == 184 || viewport.view_height == 103);
        }
    }

    #[test]
    fn test_sources_stay_in_bounds() {
        let viewport = Viewport::cover(30, 20, 97, 41).unwrap();
        for y in 0..41 {
            for x in 0..97 {
                let (vx, vy) = viewport.source(x, y);
                assert!(vx < 30 && vy < 20);
            }
        }
    }

    #[test]
    fn test_downscale_nearest_neighbour() {
        let mut buffer = RenderBuffer::new(9, 9);
        // Terminal cell 1 maps to buffer cell 1 / (1 / 3) = 3
        buffer.depth_tested_write(3, 3, 1.0, '@');
        let grid = composite(&buffer, 3, 3);
        assert_eq!(grid.to_string(), "   \n @ \n   \n");
    }

    #[test]
    fn test_every_cell_is_painted() {
        let buffer = patterned(20, 10);
        let grid = composite(&buffer, 57, 13);
        assert!(grid.lines().all(|line| line.chars().all(|c| c != BLANK)));
    }

    #[test]
    fn test_null_glyph_is_blank() {
        let mut buffer = RenderBuffer::new(2, 1);
        buffer.depth_tested_write(0, 0, 1.0, '\0');
        buffer.depth_tested_write(1, 0, 1.0, '#');
        assert_eq!(composite(&buffer, 2, 1).line(0), " #");
    }

    #[test]
    fn test_empty_terminal() {
        let buffer = patterned(10, 10);
        let grid = composite(&buffer, 0, 0);
        assert_eq!(grid.rows(), 0);
        assert_eq!(grid.to_string(), "");
        let grid = composite(&buffer, 12, 0);
        assert_eq!(grid.lines().count(), 0);
    }
}
