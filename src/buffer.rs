//! Depth-composited character buffer
//!
//! Each cell holds a glyph and the inverse camera-space depth of the sample
//! that produced it. Larger inverse depth means nearer, so a single
//! comparison per write resolves occlusion.

use crate::config::ViewportConfig;

/// Glyph of a cell nothing has been drawn into
pub const BLANK: char = ' ';

/// Depth of a cell nothing has been drawn into
pub const FAR_DEPTH: f32 = -1e9;

/// Fixed-size glyph grid with a parallel inverse-depth grid
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBuffer {
    width: usize,
    height: usize,
    glyphs: Vec<char>,
    depth: Vec<f32>,
}

impl RenderBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            glyphs: vec![BLANK; width * height],
            depth: vec![FAR_DEPTH; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset every cell to a blank glyph at infinite distance
    pub fn clear(&mut self) {
        self.glyphs.fill(BLANK);
        self.depth.fill(FAR_DEPTH);
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Store `glyph` at `(x, y)` if it is nearer than what the cell holds.
    ///
    /// Out-of-bounds writes are ignored. Returns whether the cell changed.
    pub fn depth_tested_write(&mut self, x: i64, y: i64, inverse_depth: f32, glyph: char) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        if inverse_depth > self.depth[idx] {
            self.depth[idx] = inverse_depth;
            self.glyphs[idx] = glyph;
            true
        } else {
            false
        }
    }

    /// Glyph at `(x, y)`. Callers clip coordinates first.
    pub fn get(&self, x: usize, y: usize) -> char {
        self.glyphs[y * self.width + x]
    }

    /// Inverse depth at `(x, y)`
    #[cfg(test)]
    pub(crate) fn depth_at(&self, x: usize, y: usize) -> f32 {
        self.depth[y * self.width + x]
    }

    /// Count of cells written since the last clear
    #[cfg(test)]
    pub(crate) fn covered_cells(&self) -> usize {
        self.depth.iter().filter(|&&d| d > FAR_DEPTH).count()
    }

    /// Buffer contents as newline-terminated rows
    #[cfg(test)]
    pub(crate) fn to_ascii(&self) -> String {
        let mut result = String::with_capacity(self.width * self.height + self.height);
        for row in self.glyphs.chunks(self.width.max(1)) {
            result.extend(row.iter());
            result.push('\n');
        }
        result
    }
}

/// Virtual buffer size for a terminal of `cols` x `rows` cells.
///
/// The wider axis of the terminal stretches the base resolution so the
/// buffer shares its aspect ratio, then the overscan oversizes both axes.
/// A degenerate terminal (zero rows or columns) is treated as square.
pub fn buffer_dimensions(cols: u16, rows: u16, viewport: &ViewportConfig) -> (usize, usize) {
    let aspect = if rows > 0 && cols > 0 {
        cols as f32 / rows as f32
    } else {
        1.0
    };
    let width = viewport.base_width as f32 * aspect.max(1.0) * viewport.overscan;
    let height = viewport.base_height as f32 * (1.0 / aspect).max(1.0) * viewport.overscan;
    ((width as usize).max(1), (height as usize).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_blank() {
        let buffer = RenderBuffer::new(4, 3);
        assert_eq!(buffer.width(), 4);
        assert_eq!(buffer.height(), 3);
        assert_eq!(buffer.covered_cells(), 0);
        assert_eq!(buffer.get(3, 2), BLANK);
        assert_eq!(buffer.depth_at(0, 0), FAR_DEPTH);
    }

    #[test]
    fn test_nearer_sample_wins_in_either_order() {
        let mut a = RenderBuffer::new(5, 5);
        a.depth_tested_write(2, 2, 0.25, 'f');
        a.depth_tested_write(2, 2, 0.5, 'n');

        let mut b = RenderBuffer::new(5, 5);
        b.depth_tested_write(2, 2, 0.5, 'n');
        b.depth_tested_write(2, 2, 0.25, 'f');

        assert_eq!(a.get(2, 2), 'n');
        assert_eq!(b.get(2, 2), 'n');
        assert_eq!(a.depth_at(2, 2), 0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_equal_depth_keeps_first() {
        let mut buffer = RenderBuffer::new(2, 2);
        assert!(buffer.depth_tested_write(0, 0, 0.3, 'a'));
        assert!(!buffer.depth_tested_write(0, 0, 0.3, 'b'));
        assert_eq!(buffer.get(0, 0), 'a');
    }

    #[test]
    fn test_out_of_bounds_write_is_ignored() {
        let mut buffer = RenderBuffer::new(3, 3);
        assert!(!buffer.depth_tested_write(-1, 0, 1.0, '#'));
        assert!(!buffer.depth_tested_write(0, 3, 1.0, '#'));
        assert!(!buffer.depth_tested_write(3, 0, 1.0, '#'));
        assert_eq!(buffer.covered_cells(), 0);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut buffer = RenderBuffer::new(3, 2);
        buffer.depth_tested_write(1, 1, 0.4, '@');
        buffer.clear();
        let once = buffer.clone();
        buffer.clear();
        assert_eq!(buffer, once);
        assert_eq!(buffer, RenderBuffer::new(3, 2));
    }

    #[test]
    fn test_to_ascii() {
        let mut buffer = RenderBuffer::new(3, 2);
        buffer.depth_tested_write(0, 0, 0.1, '.');
        buffer.depth_tested_write(2, 1, 0.1, '@');
        assert_eq!(buffer.to_ascii(), ".  \n  @\n");
    }

    #[test]
    fn test_dimensions_wide_terminal() {
        let viewport = ViewportConfig::default();
        // aspect 2.0: width doubles, height stays at base
        let (w, h) = buffer_dimensions(160, 80, &viewport);
        assert_eq!(w, (160.0f32 * 2.0 * 1.15) as usize);
        assert_eq!(h, (90.0f32 * 1.15) as usize);
    }

    #[test]
    fn test_dimensions_tall_terminal() {
        let viewport = ViewportConfig::default();
        let (w, h) = buffer_dimensions(40, 80, &viewport);
        assert_eq!(w, (160.0f32 * 1.15) as usize);
        assert_eq!(h, (90.0f32 * 2.0 * 1.15) as usize);
    }

    #[test]
    fn test_dimensions_degenerate_terminal() {
        let viewport = ViewportConfig::default();
        let square = buffer_dimensions(1, 1, &viewport);
        assert_eq!(buffer_dimensions(80, 0, &viewport), square);
        assert_eq!(buffer_dimensions(0, 24, &viewport), square);
        assert_eq!(buffer_dimensions(0, 0, &viewport), square);
    }
}
