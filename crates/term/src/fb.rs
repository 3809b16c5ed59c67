//! Framebuffer and style types for terminal rendering.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    pub const fn styled(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::styled(' ', CellStyle::default())
    }
}

/// 2D framebuffer of styled character cells, stored row-major.
///
/// All writes clip silently at the edges, so drawing code never has to
/// bounds-check against the current terminal size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer, reusing the allocation when it is big
    /// enough. Contents are reset: a row-major buffer reinterpreted at a
    /// new width would scramble every row anyway.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells, or `None` past the bottom edge.
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        Some(&self.cells[start..start + w])
    }

    fn row_mut(&mut self, y: u16) -> Option<&mut [Cell]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        Some(&mut self.cells[start..start + w])
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.row(y)?.get(x as usize).copied()
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.row_mut(y).and_then(|r| r.get_mut(x as usize)) {
            *slot = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell::styled(ch, style));
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let Some(row) = self.row_mut(y) else {
            return;
        };
        let slots = row.iter_mut().skip(x as usize);
        for (slot, ch) in slots.zip(s.chars()) {
            *slot = Cell::styled(ch, style);
        }
    }

    /// Print a number without going through `format!` on the hot path.
    pub fn put_u32(&mut self, x: u16, y: u16, v: u32, style: CellStyle) {
        let mut buf = [0u8; 10];
        let mut n = v;
        let mut i = buf.len();
        loop {
            i -= 1;
            buf[i] = b'0' + (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        let Some(row) = self.row_mut(y) else {
            return;
        };
        let slots = row.iter_mut().skip(x as usize);
        for (slot, &d) in slots.zip(&buf[i..]) {
            *slot = Cell::styled(d as char, style);
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        let cell = Cell::styled(ch, style);
        for dy in 0..h {
            let Some(row) = self.row_mut(y.saturating_add(dy)) else {
                break;
            };
            let end = (x as usize + w as usize).min(row.len());
            if let Some(span) = row.get_mut(x as usize..end) {
                span.fill(cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_char(5, 0, 'X', CellStyle::default());
        fb.put_char(0, 9, 'X', CellStyle::default());
        fb.put_str(0, 9, "off", CellStyle::default());
        assert!(fb.cells().iter().all(|c| c.ch == ' '));
    }

    #[test]
    fn put_str_clips_at_the_right_edge() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(2, 0, "abcdef", CellStyle::default());
        let text: String = fb.cells().iter().map(|c| c.ch).collect();
        assert_eq!(text, "  ab");
    }

    #[test]
    fn put_u32_renders_digits() {
        let mut fb = FrameBuffer::new(8, 1);
        fb.put_u32(0, 0, 1203, CellStyle::default());
        let text: String = fb.cells()[..4].iter().map(|c| c.ch).collect();
        assert_eq!(text, "1203");
    }

    #[test]
    fn rows_expose_row_major_storage() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_char(2, 1, 'Z', CellStyle::default());
        assert_eq!(fb.row(0).map(|r| r.len()), Some(3));
        assert_eq!(fb.row(1).and_then(|r| r.last()).map(|c| c.ch), Some('Z'));
        assert!(fb.row(2).is_none());
    }

    #[test]
    fn resize_resets_contents() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.put_char(0, 0, 'X', CellStyle::default());
        fb.resize(6, 3);
        assert_eq!(fb.width(), 6);
        assert_eq!(fb.height(), 3);
        assert_eq!(fb.cells().len(), 18);
        assert!(fb.cells().iter().all(|c| c.ch == ' '));
    }

    #[test]
    fn fill_rect_clips_to_the_buffer() {
        let mut fb = FrameBuffer::new(4, 3);
        let style = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        fb.fill_rect(2, 1, 5, 5, '#', style);
        let hashes = fb.cells().iter().filter(|c| c.ch == '#').count();
        assert_eq!(hashes, 4);
        assert!(fb.get(2, 1).map(|c| c.style.bold).unwrap_or(false));
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some(' '));
    }
}
