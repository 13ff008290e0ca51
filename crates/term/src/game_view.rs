//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{CascadePhase, Color, Pos};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const CURSOR_BG: Rgb = Rgb::new(80, 80, 110);
const SELECTED_BG: Rgb = Rgb::new(150, 140, 40);
const HINT_BG: Rgb = Rgb::new(40, 110, 70);

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

/// Frontend state drawn on top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardOverlay {
    pub cursor: Option<Pos>,
    pub selected: Option<Pos>,
    pub hint: Option<(Pos, Pos)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Tile shape recovered from a snapshot cell code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Plain,
    RocketH,
    RocketV,
    Bomb,
    Rainbow,
}

impl Glyph {
    fn chars(self, marked: bool) -> [char; 2] {
        match self {
            Glyph::Plain if marked => ['▐', '▌'],
            Glyph::Plain => ['█', '█'],
            Glyph::RocketH => ['◄', '►'],
            Glyph::RocketV => ['▲', '▼'],
            Glyph::Bomb => ['◆', '◆'],
            Glyph::Rainbow => ['✦', '✦'],
        }
    }
}

/// Inverse of `Grid::cell_code`: 0 is empty, otherwise `1 + color + 8 * kind`.
pub fn decode_cell(code: u8) -> Option<(Color, Glyph)> {
    let c = code.checked_sub(1)?;
    let color = Color::from_index(c % 8)?;
    let glyph = match c / 8 {
        0 => Glyph::Plain,
        1 => Glyph::RocketH,
        2 => Glyph::RocketV,
        3 => Glyph::Bomb,
        4 => Glyph::Rainbow,
        _ => return None,
    };
    Some((color, glyph))
}

fn color_rgb(color: Color) -> Rgb {
    match color {
        Color::Red => Rgb::new(220, 80, 80),
        Color::Orange => Rgb::new(255, 165, 0),
        Color::Yellow => Rgb::new(240, 220, 80),
        Color::Green => Rgb::new(100, 220, 120),
        Color::Blue => Rgb::new(80, 120, 220),
        Color::Purple => Rgb::new(200, 120, 220),
    }
}

/// A lightweight terminal renderer for the board.
pub struct GameView {
    /// Board cell height in terminal rows. Cells are always 2 columns wide.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    const CELL_W: u16 = 2;

    pub fn new(cell_h: u16) -> Self {
        Self {
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Bordered board size in terminal cells.
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        (
            snap.width as u16 * Self::CELL_W + 2,
            snap.height as u16 * self.cell_h + 2,
        )
    }

    /// Terminal position of the top-left corner of board cell `pos`.
    pub fn cell_origin(&self, snap: &GameSnapshot, viewport: Viewport, pos: Pos) -> (u16, u16) {
        let (start_x, start_y) = self.frame_origin(snap, viewport);
        (
            start_x + 1 + pos.x.max(0) as u16 * Self::CELL_W,
            start_y + 1 + pos.y.max(0) as u16 * self.cell_h,
        )
    }

    fn frame_origin(&self, snap: &GameSnapshot, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size(snap);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (start_x, start_y)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        overlay: &BoardOverlay,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap);
        let (start_x, start_y) = self.frame_origin(snap, viewport);

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::default().on(BOARD_BG),
        );
        self.draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG),
        );

        for y in 0..snap.height {
            for x in 0..snap.width {
                let pos = Pos::new(x as i8, y as i8);
                let bg = marker_bg(overlay, pos);
                self.draw_cell(fb, snap, viewport, pos, snap.cell(x, y), bg);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.paused {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if snap.game_over && snap.won {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "CLEAR");
        } else if snap.game_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        overlay: &BoardOverlay,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
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

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        pos: Pos,
        code: u8,
        marker: Option<Rgb>,
    ) {
        let bg = marker.unwrap_or(BOARD_BG);
        let (chars, style) = match decode_cell(code) {
            None => (
                ['·', '·'],
                CellStyle::new(Rgb::new(90, 90, 100), bg).dim(),
            ),
            Some((_, Glyph::Rainbow)) => (
                Glyph::Rainbow.chars(marker.is_some()),
                CellStyle::new(Rgb::new(255, 255, 255), bg).bold(),
            ),
            Some((color, glyph)) => {
                let style = CellStyle::new(color_rgb(color), bg);
                let style = if glyph == Glyph::Plain { style } else { style.bold() };
                (glyph.chars(marker.is_some()), style)
            }
        };

        let (px, py) = self.cell_origin(snap, viewport, pos);
        for dy in 0..self.cell_h {
            fb.put_char(px, py + dy, chars[0], style);
            fb.put_char(px + 1, py + dy, chars[1], style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "MOVES", label);
        match snap.moves_left {
            Some(left) => {
                let end = fb.put_u32(panel_x, y + 1, left, value);
                fb.put_str(end + 1, y + 1, "left", dim);
            }
            None => {
                fb.put_u32(panel_x, y + 1, snap.moves_made, value);
            }
        }
        y += 3;

        if let Some(target) = snap.target_score {
            fb.put_str(panel_x, y, "TARGET", label);
            fb.put_u32(panel_x, y + 1, target, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "COMBO", label);
        let end = fb.put_u32(panel_x, y + 1, snap.combo, value);
        let end = fb.put_str(end + 1, y + 1, "best", dim);
        fb.put_u32(end + 1, y + 1, snap.best_combo, dim);
        y += 3;

        let phase = CellStyle {
            dim: snap.phase == CascadePhase::Idle,
            ..value
        };
        fb.put_str(panel_x, y, "PHASE", label);
        fb.put_str(panel_x, y + 1, snap.phase.as_str(), phase);
        y += 3;

        if snap.objectives.is_empty() {
            return;
        }
        fb.put_str(panel_x, y, "GOALS", label);
        y += 1;
        for entry in &snap.objectives {
            if y >= viewport.height {
                break;
            }
            let goal = entry.objective.goal();
            let style = if entry.progress >= goal { dim } else { value };
            let end = fb.put_u32(panel_x, y, entry.progress.min(goal), style);
            fb.put_char(end, y, '/', style);
            let end = fb.put_u32(end + 1, y, goal, style);
            fb.put_str(end + 1, y, entry.objective.subject(), style);
            y += 1;
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
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Selection wins over the cursor, the cursor over the hint.
fn marker_bg(overlay: &BoardOverlay, pos: Pos) -> Option<Rgb> {
    if overlay.selected == Some(pos) {
        Some(SELECTED_BG)
    } else if overlay.cursor == Some(pos) {
        Some(CURSOR_BG)
    } else if overlay.hint.is_some_and(|(a, b)| a == pos || b == pos) {
        Some(HINT_BG)
    } else {
        None
    }
}
