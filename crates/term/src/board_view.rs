//! BoardView: maps a `core::SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::SessionSnapshot;
use crate::fb::{Cell as FbCell, CellStyle, FrameBuffer, Rgb};
use crate::types::{
    Cell, CellState, Coord, GameMode, GamePhase, Quota, SpecialKind, BOARD_SIZE,
};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal view for the match-3 board.
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 4x2 keeps tiles roughly square in typical terminal fonts.
        Self {
            cell_w: 4,
            cell_h: 2,
        }
    }
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the current session state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        cursor: Coord,
        hint: Option<(Coord, Coord)>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(FbCell::default());

        let board_px_w = (BOARD_SIZE as u16) * self.cell_w;
        let board_px_h = (BOARD_SIZE as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + 24) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let at = Coord::new(row, col);
                let cell = snap.grid[row][col];
                let cursor_here = at == cursor;
                let selected_here = snap.selected == Some(at);
                let hint_here = hint.map_or(false, |(a, b)| at == a || at == b);
                self.draw_tile(
                    fb,
                    start_x,
                    start_y,
                    at,
                    cell,
                    cursor_here,
                    selected_here,
                    hint_here,
                );
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        match snap.phase {
            GamePhase::Paused => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED")
            }
            GamePhase::LevelUp => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "LEVEL UP!")
            }
            GamePhase::GameOver => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER")
            }
            _ => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &SessionSnapshot,
        cursor: Coord,
        hint: Option<(Coord, Coord)>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, hint, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        at: Coord,
        cell: Cell,
        cursor_here: bool,
        selected_here: bool,
        hint_here: bool,
    ) {
        let bg = if selected_here {
            Rgb::new(90, 90, 130)
        } else if hint_here {
            Rgb::new(60, 90, 60)
        } else {
            Rgb::new(30, 30, 40)
        };

        let (ch, mut style) = match cell.color {
            None => (
                '·',
                CellStyle {
                    fg: Rgb::new(90, 90, 100),
                    bg,
                    bold: false,
                    dim: true,
                },
            ),
            Some(color) => {
                let fg = color_rgb(color);
                let ch = match cell.special {
                    Some(SpecialKind::Row) => '═',
                    Some(SpecialKind::Col) => '║',
                    Some(SpecialKind::Bomb) => '◉',
                    Some(SpecialKind::Rainbow) => '◆',
                    None => match cell.state {
                        CellState::Locked => '▒',
                        CellState::Frozen => '░',
                        CellState::Normal | CellState::Chained => '█',
                    },
                };
                (
                    ch,
                    CellStyle {
                        fg,
                        bg,
                        bold: cell.special.is_some(),
                        dim: cell.state == CellState::Frozen,
                    },
                )
            }
        };
        if cursor_here {
            style.bg = Rgb::new(130, 130, 60);
        }

        let px = start_x + 1 + (at.col as u16) * self.cell_w;
        let py = start_y + 1 + (at.row as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);

        // Frozen tiles show their remaining layer count in the corner.
        if cell.is_frozen() && cell.frozen_layers > 0 {
            fb.put_u32(px, py, cell.frozen_layers as u32, style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        let dim = CellStyle { dim: true, ..value };

        let mut y = start_y;
        fb.put_str(panel_x, y, "MODE", label);
        fb.put_str(panel_x + 6, y, snap.mode.as_str(), value);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "DIFF", label);
        fb.put_str(panel_x + 6, y, snap.difficulty.as_str(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_u32(panel_x + 6, y, snap.level, value);
        y = y.saturating_add(1);
        if snap.target_score > 0 {
            fb.put_str(panel_x, y, "GOAL", label);
            fb.put_u32(panel_x + 6, y, snap.target_score, value);
        }
        y = y.saturating_add(2);

        if let Quota::Remaining(n) = snap.moves {
            fb.put_str(panel_x, y, "MOVES", label);
            fb.put_u32(panel_x + 6, y, n, value);
            y = y.saturating_add(1);
        }
        if let Quota::Remaining(n) = snap.time_left {
            fb.put_str(panel_x, y, "TIME", label);
            fb.put_u32(panel_x + 6, y, n, value);
            y = y.saturating_add(1);
        }
        if snap.mode == GameMode::GravityFlip {
            fb.put_str(panel_x, y, "GRAV", label);
            fb.put_str(panel_x + 6, y, snap.gravity.as_str(), value);
            y = y.saturating_add(1);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "COMBO", label);
        fb.put_u32(panel_x + 6, y, snap.combo, value);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "BEST", label);
        fb.put_u32(panel_x + 6, y, snap.max_combo, value);
        y = y.saturating_add(1);
        if snap.capped_cascades > 0 {
            fb.put_str(panel_x, y, "CAPPED", dim);
            fb.put_u32(panel_x + 7, y, snap.capped_cascades, dim);
            y = y.saturating_add(1);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "POWER-UPS", label);
        y = y.saturating_add(1);
        for (i, (kind, count)) in snap.power_ups.iter().enumerate() {
            if y >= viewport.height {
                break;
            }
            let style = if *count > 0 { value } else { dim };
            fb.put_u32(panel_x, y, (i as u32) + 1, dim);
            fb.put_str(panel_x + 2, y, kind.as_str(), style);
            fb.put_char(panel_x + 13, y, 'x', style);
            fb.put_u32(panel_x + 14, y, *count as u32, style);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

fn color_rgb(color: u8) -> Rgb {
    match color % 7 {
        0 => Rgb::new(220, 80, 80),
        1 => Rgb::new(255, 165, 0),
        2 => Rgb::new(240, 220, 80),
        3 => Rgb::new(100, 220, 120),
        4 => Rgb::new(80, 120, 220),
        5 => Rgb::new(200, 120, 220),
        _ => Rgb::new(80, 220, 220),
    }
}
