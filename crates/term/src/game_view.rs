//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! Pure (no I/O), so every layout decision is unit-testable.

use crate::core::{ActiveSnapshot, GameSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{ColorId, BOARD_HEIGHT, BOARD_WIDTH};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const BLOCK: char = '█';
const GHOST: char = '░';

/// Minimum free columns right of the board before the panel is drawn
const PANEL_MIN_W: u16 = 12;

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

/// Foreground color for a board color tag.
pub fn palette(color: ColorId) -> Rgb {
    match color {
        ColorId::Cyan => Rgb::new(80, 220, 220),
        ColorId::Yellow => Rgb::new(240, 220, 80),
        ColorId::Purple => Rgb::new(200, 120, 220),
        ColorId::Green => Rgb::new(100, 220, 120),
        ColorId::Red => Rgb::new(220, 80, 80),
        ColorId::Blue => Rgb::new(80, 120, 220),
        ColorId::White => Rgb::new(235, 235, 235),
        ColorId::Ghost => Rgb::new(140, 140, 140),
    }
}

/// Board renderer: bordered playfield, centered, with a stats panel on the right.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns
    cell_w: u16,
    /// Board cell height in terminal rows
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares a cell in most terminal fonts.
        Self { cell_w: 2, cell_h: 1 }
    }
}

/// Top-left of the board frame inside the viewport
#[derive(Debug, Clone, Copy)]
struct Origin {
    x: u16,
    y: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Outer size of the bordered board
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Reusing one framebuffer across frames keeps this allocation-free.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::blank(CellStyle::default()));

        let (frame_w, frame_h) = self.frame_size();
        let origin = Origin {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
        };

        self.draw_border(fb, origin, frame_w, frame_h);
        self.draw_board(fb, origin, snap);

        if let Some(active) = snap.active {
            if let Some(ghost_y) = snap.ghost_y {
                let style = CellStyle::new(palette(ColorId::Ghost), PLAYFIELD_BG).dim();
                self.draw_piece(fb, origin, &active, ghost_y, GHOST, style);
            }
            let style = CellStyle::new(palette(active.color), PLAYFIELD_BG).bold();
            self.draw_piece(fb, origin, &active, active.y, BLOCK, style);
        }

        self.draw_side_panel(fb, snap, viewport, origin, frame_w);

        if snap.game_over {
            self.draw_game_over(fb, origin, frame_w, frame_h);
        }
    }

    /// Convenience wrapper that allocates a fresh framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, o: Origin, w: u16, h: u16) {
        let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let (right, bottom) = (o.x + w - 1, o.y + h - 1);

        fb.put_char(o.x, o.y, '┌', style);
        fb.put_char(right, o.y, '┐', style);
        fb.put_char(o.x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        for x in o.x + 1..right {
            fb.put_char(x, o.y, '─', style);
            fb.put_char(x, bottom, '─', style);
        }
        for y in o.y + 1..bottom {
            fb.put_char(o.x, y, '│', style);
            fb.put_char(right, y, '│', style);
        }
    }

    fn draw_board(&self, fb: &mut FrameBuffer, o: Origin, snap: &GameSnapshot) {
        let empty = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        for (y, row) in snap.board.iter().enumerate() {
            for (x, &tag) in row.iter().enumerate() {
                let (ch, style) = match ColorId::from_u8(tag) {
                    Some(color) => (BLOCK, CellStyle::new(palette(color), PLAYFIELD_BG)),
                    None => ('·', empty),
                };
                self.fill_cell(fb, o, x as i8, y as i8, ch, style);
            }
        }
    }

    /// Draw `piece` with its top row at `top`; cells above the board are skipped.
    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        o: Origin,
        piece: &ActiveSnapshot,
        top: i8,
        ch: char,
        style: CellStyle,
    ) {
        for (x, y) in piece.cells_at(top) {
            self.fill_cell(fb, o, x, y, ch, style);
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, o: Origin, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = o.x + 1 + x as u16 * self.cell_w;
        let py = o.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        o: Origin,
        frame_w: u16,
    ) {
        let panel_x = o.x.saturating_add(frame_w).saturating_add(2);
        if viewport.width.saturating_sub(panel_x) < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let stats = [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("HIGH", snap.high_score),
        ];
        let mut y = o.y;
        for (name, v) in stats {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        let help = value.dim();
        for line in ["←→ move  ↑ rotate", "↓ soft  SPC drop", "q quit"] {
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, o: Origin, frame_w: u16, frame_h: u16) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let mid_y = o.y.saturating_add(frame_h / 2);
        for (i, text) in ["GAME OVER", "press any key"].into_iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = o.x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            fb.put_str(x, mid_y.saturating_add(i as u16), text, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_follows_color_tags() {
        assert_eq!(palette(ColorId::Red), Rgb::new(220, 80, 80));
        assert_ne!(palette(ColorId::Ghost), palette(ColorId::White));
    }

    #[test]
    fn test_frame_size_scales_with_cell() {
        assert_eq!(GameView::default().frame_size(), (22, 22));
        assert_eq!(GameView::new(1, 1).frame_size(), (12, 22));
        assert_eq!(GameView::new(0, 0).frame_size(), (12, 22));
    }
}
