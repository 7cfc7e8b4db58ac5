//! GameView: composes the playfield canvas and HUD into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::canvas::PlayfieldCanvas;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::hud::HudState;
use crate::types::PieceKind;

const PLAYFIELD_BG: Rgb = Rgb::new(0, 0, 0);
const PANEL_WIDTH: u16 = 22;

const HELP_LINES: [&str; 6] = [
    "<- ->  move",
    "down   drop",
    "space  hard drop",
    "up/z   rotate",
    "p/esc  pause",
    "q      quit",
];

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

/// Fill color of a piece kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::T => Rgb::from_hex(0xFF0D72),
        PieceKind::O => Rgb::from_hex(0x0DC2FF),
        PieceKind::L => Rgb::from_hex(0x0DFF72),
        PieceKind::J => Rgb::from_hex(0xF538FF),
        PieceKind::I => Rgb::from_hex(0xFF8E0D),
        PieceKind::S => Rgb::from_hex(0xFFE138),
        PieceKind::Z => Rgb::from_hex(0x3877FF),
    }
}

/// Maps the canvas and HUD onto terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        canvas: &PlayfieldCanvas,
        hud: &HudState,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (canvas.width() as u16).saturating_mul(self.cell_w);
        let board_px_h = (canvas.height() as u16).saturating_mul(self.cell_h);
        let frame_w = board_px_w.saturating_add(2);
        let frame_h = board_px_h.saturating_add(2);

        let total_w = frame_w.saturating_add(2).saturating_add(PANEL_WIDTH);
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle::new(Rgb::new(40, 40, 40), PLAYFIELD_BG);
        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        draw_border(fb, start_x, start_y, frame_w, frame_h, CellStyle::default());

        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if let Some(kind) = canvas.get(x, y) {
                    let style = CellStyle::new(piece_color(kind), PLAYFIELD_BG);
                    self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, '█', style);
                }
            }
        }

        self.draw_side_panel(fb, hud, viewport, start_x.saturating_add(frame_w + 2), start_y);

        let mid_y = start_y.saturating_add(frame_h / 2);
        if hud.pause_banner {
            draw_centered(fb, start_x, frame_w, mid_y, "PAUSED");
        }
        if hud.game_over_banner {
            draw_centered(fb, start_x, frame_w, mid_y.saturating_sub(1), "GAME OVER");
        }
        if hud.restart_banner {
            draw_centered(fb, start_x, frame_w, mid_y.saturating_add(1), "Press R to restart");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        canvas: &PlayfieldCanvas,
        hud: &HudState,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(canvas, hud, viewport, &mut fb);
        fb
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        hud: &HudState,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle::default().bold();
        let dim = CellStyle::default().dim();

        fb.put_str(panel_x, start_y, "SCORE", label);
        fb.put_str(panel_x, start_y + 1, &hud.score.to_string(), CellStyle::default());

        let mut y = start_y.saturating_add(3);
        for line in HELP_LINES {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y += 1;
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

fn draw_centered(fb: &mut FrameBuffer, start_x: u16, frame_w: u16, y: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), PLAYFIELD_BG).bold();
    fb.put_str(x, y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Surface;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    fn canvas() -> PlayfieldCanvas {
        PlayfieldCanvas::new(BOARD_WIDTH, BOARD_HEIGHT)
    }

    #[test]
    fn renders_border_score_and_help() {
        let hud = HudState {
            score: 70,
            ..HudState::default()
        };
        let fb = GameView::default().render(&canvas(), &hud, Viewport::new(80, 24));

        assert!(fb.contains_text("┌────"));
        assert!(fb.contains_text("SCORE"));
        assert!(fb.contains_text("70"));
        assert!(fb.contains_text("hard drop"));
        assert!(!fb.contains_text("PAUSED"));
    }

    #[test]
    fn filled_cell_uses_piece_color() {
        let mut c = canvas();
        c.fill_cell(0, 0, PieceKind::T);
        let view = GameView::default();
        let fb = view.render(&c, &HudState::default(), Viewport::new(80, 24));

        let colored: Vec<_> = fb
            .cells()
            .iter()
            .filter(|cell| cell.ch == '█')
            .map(|cell| cell.style.fg)
            .collect();
        assert_eq!(colored.len(), 2);
        assert!(colored.iter().all(|&fg| fg == Rgb::from_hex(0xFF0D72)));
    }

    #[test]
    fn banners_follow_hud_flags() {
        let view = GameView::default();
        let hud = HudState {
            pause_banner: true,
            ..HudState::default()
        };
        let fb = view.render(&canvas(), &hud, Viewport::new(80, 24));
        assert!(fb.contains_text("PAUSED"));

        let hud = HudState {
            game_over_banner: true,
            restart_banner: true,
            ..HudState::default()
        };
        let fb = view.render(&canvas(), &hud, Viewport::new(80, 24));
        assert!(fb.contains_text("GAME OVER"));
        assert!(fb.contains_text("Press R to restart"));
        assert!(!fb.contains_text("PAUSED"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let fb = GameView::new(0, 0).render(&canvas(), &HudState::default(), Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }

    #[test]
    fn palette_is_distinct_per_kind() {
        let mut colors: Vec<_> = PieceKind::SPAWN_ORDER
            .iter()
            .map(|&k| piece_color(k))
            .map(|c| (c.r, c.g, c.b))
            .collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 7);
    }
}
