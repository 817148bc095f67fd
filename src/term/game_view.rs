//! GameView: maps `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O) and unit-testable. Besides drawing, it owns
//! the screen layout, which the input layer reuses to hit-test pointer
//! events against tiles and panel buttons.

use crate::core::{GameState, Phase};
use crate::term::fb::{FrameBuffer, Rgb, Style};
use crate::types::{GameIntent, Orientation, TilePos, Token};

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

/// Colors for the token palette; palettes larger than the table wrap around.
/// The first four match the classic palette of this game.
const TOKEN_COLORS: [Rgb; 8] = [
    Rgb::new(29, 73, 249),
    Rgb::new(249, 29, 29),
    Rgb::new(249, 242, 29),
    Rgb::new(36, 249, 29),
    Rgb::new(200, 120, 220),
    Rgb::new(80, 220, 220),
    Rgb::new(255, 165, 0),
    Rgb::new(240, 240, 240),
];

const BOARD_BG: Rgb = Rgb::new(24, 24, 32);
const PANEL_FG: Rgb = Rgb::new(220, 220, 220);

fn token_color(token: Token) -> Rgb {
    TOKEN_COLORS[token.0 as usize % TOKEN_COLORS.len()]
}

/// Screen geometry for one frame: where the board and the panel buttons are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Top-left of the board interior (inside the border).
    pub board_x: u16,
    pub board_y: u16,
    pub cell_w: u16,
    pub cell_h: u16,
    pub columns: u8,
    pub rows: u8,
    pub panel_x: u16,
    pub panel_w: u16,
    /// Rows of the New Game / Moves / Assist buttons, top to bottom.
    pub button_y: [u16; 3],
}

impl Layout {
    /// Board tile under a terminal coordinate, if any.
    pub fn tile_at(&self, x: u16, y: u16) -> Option<TilePos> {
        if x < self.board_x || y < self.board_y {
            return None;
        }
        let column = (x - self.board_x) / self.cell_w;
        let row = (y - self.board_y) / self.cell_h;
        if column < self.columns as u16 && row < self.rows as u16 {
            Some(TilePos::new(column as u8, row as u8))
        } else {
            None
        }
    }

    /// Panel button under a terminal coordinate, as the intent it issues.
    pub fn button_at(&self, x: u16, y: u16) -> Option<GameIntent> {
        if x < self.panel_x || x >= self.panel_x + self.panel_w {
            return None;
        }
        if y == self.button_y[0] {
            Some(GameIntent::NewGame)
        } else if y == self.button_y[1] {
            Some(GameIntent::ToggleMovesHint)
        } else if y == self.button_y[2] {
            Some(GameIntent::ToggleAssist)
        } else {
            None
        }
    }

    /// Top-left framebuffer coordinate of a tile.
    fn tile_px(&self, pos: TilePos) -> (i32, i32) {
        (
            self.board_x as i32 + pos.column as i32 * self.cell_w as i32,
            self.board_y as i32 + pos.row as i32 * self.cell_h as i32,
        )
    }

    /// Center of a tile, used for cluster bars and move connectors.
    fn tile_center(&self, pos: TilePos) -> (u16, u16) {
        let (px, py) = self.tile_px(pos);
        (
            px as u16 + self.cell_w / 2,
            py as u16 + self.cell_h / 2,
        )
    }
}

/// A lightweight terminal view for the match-3 board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 4x2 keeps tiles roughly square under typical glyph aspect ratios.
        Self {
            cell_w: 4,
            cell_h: 2,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Compute this frame's geometry.
    pub fn layout(&self, state: &GameState, viewport: Viewport) -> Layout {
        let columns = state.grid().columns();
        let rows = state.grid().rows();
        let board_x = 3;
        let board_y = 2;
        let panel_x = board_x + columns as u16 * self.cell_w + 3;
        let panel_w = viewport.width.saturating_sub(panel_x).min(18);
        let panel_y = board_y;

        Layout {
            board_x,
            board_y,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
            columns,
            rows,
            panel_x,
            panel_w,
            button_y: [panel_y + 3, panel_y + 4, panel_y + 5],
        }
    }

    /// Render the current game state into a framebuffer.
    ///
    /// `selected` is the input layer's currently selected tile, if any.
    pub fn render(
        &self,
        state: &GameState,
        selected: Option<TilePos>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        let layout = self.layout(state, viewport);

        self.draw_board_frame(&mut fb, &layout);
        self.draw_tiles(&mut fb, &layout, state, selected);
        self.draw_cluster_bars(&mut fb, &layout, state);
        self.draw_move_hints(&mut fb, &layout, state);
        self.draw_panel(&mut fb, &layout, state);

        if state.game_over() {
            self.draw_overlay(&mut fb, &layout, "GAME OVER");
        }

        fb
    }

    fn draw_board_frame(&self, fb: &mut FrameBuffer, layout: &Layout) {
        let w = layout.columns as u16 * layout.cell_w;
        let h = layout.rows as u16 * layout.cell_h;
        let x = layout.board_x - 1;
        let y = layout.board_y - 1;
        let border = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(layout.board_x, layout.board_y, w, h, ' ', Style::new(PANEL_FG, BOARD_BG));

        fb.put_char(x, y, '┌', border);
        fb.put_char(x + w + 1, y, '┐', border);
        fb.put_char(x, y + h + 1, '└', border);
        fb.put_char(x + w + 1, y + h + 1, '┘', border);
        fb.hline(x + 1, y, w, '─', border);
        fb.hline(x + 1, y + h + 1, w, '─', border);
        fb.vline(x, y + 1, h, '│', border);
        fb.vline(x + w + 1, y + 1, h, '│', border);
    }

    fn draw_tiles(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        state: &GameState,
        selected: Option<TilePos>,
    ) {
        let pending = state.pending_swap();
        let progress = state.phase_progress();
        let falling = matches!(state.phase(), Phase::ResolvingShift);

        for (pos, tile) in state.grid().tiles() {
            // Swapping tiles are drawn afterwards at interpolated positions.
            if let Some(swap) = pending {
                if pos == swap.a || pos == swap.b {
                    continue;
                }
            }

            let Some(token) = tile.token else {
                self.draw_empty(fb, layout, pos);
                continue;
            };

            let (px, py) = layout.tile_px(pos);
            let py = if falling && tile.shift > 0 {
                // Interpolate the fall in framebuffer rows.
                py + (progress * tile.shift as f32 * layout.cell_h as f32) as i32
            } else {
                py
            };
            self.draw_token(fb, layout, px, py, token, selected == Some(pos));
        }

        if let Some(swap) = pending {
            self.draw_swapping_pair(fb, layout, state, swap.a, swap.b, progress);
        }
    }

    fn draw_swapping_pair(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        state: &GameState,
        a: TilePos,
        b: TilePos,
        progress: f32,
    ) {
        // Black out both resting cells, then slide each token toward the
        // other's cell. During the rewind the tokens are already stored
        // swapped, so the same motion plays the swap backwards.
        let dark = Style::new(Rgb::new(0, 0, 0), Rgb::new(0, 0, 0));
        for pos in [a, b] {
            let (px, py) = layout.tile_px(pos);
            fb.fill_rect(
                px as u16,
                py as u16,
                layout.cell_w,
                layout.cell_h,
                ' ',
                dark,
            );
        }

        let (ax, ay) = layout.tile_px(a);
        let (bx, by) = layout.tile_px(b);
        let lerp = |from: i32, to: i32| from + ((to - from) as f32 * progress) as i32;

        if let Ok(Some(token)) = state.grid().get(a) {
            self.draw_token(fb, layout, lerp(ax, bx), lerp(ay, by), token, false);
        }
        if let Ok(Some(token)) = state.grid().get(b) {
            self.draw_token(fb, layout, lerp(bx, ax), lerp(by, ay), token, false);
        }
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, layout: &Layout, pos: TilePos) {
        let (px, py) = layout.tile_px(pos);
        let style = Style::new(Rgb::new(70, 70, 85), BOARD_BG);
        let (cx, cy) = (
            px as u16 + layout.cell_w / 2,
            py as u16 + layout.cell_h / 2,
        );
        fb.fill_rect(px as u16, py as u16, layout.cell_w, layout.cell_h, ' ', style);
        fb.put_char(cx, cy, '·', style);
    }

    fn draw_token(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        px: i32,
        py: i32,
        token: Token,
        selected: bool,
    ) {
        // Selection inverts the tile: token color as background, like the
        // original's red selection tile but keeping the token readable.
        let style = if selected {
            Style::new(Rgb::new(0, 0, 0), token_color(token)).bold()
        } else {
            Style::new(token_color(token), BOARD_BG)
        };
        for dy in 0..layout.cell_h {
            for dx in 0..layout.cell_w {
                let x = px + dx as i32;
                let y = py + dy as i32;
                if x >= 0 && y >= 0 {
                    let ch = if selected { '▓' } else { '█' };
                    fb.put_char(x as u16, y as u16, ch, style);
                }
            }
        }
    }

    fn draw_cluster_bars(&self, fb: &mut FrameBuffer, layout: &Layout, state: &GameState) {
        // Bars only make sense while the clusters are still on the board.
        if !matches!(state.phase(), Phase::ResolvingClear) {
            return;
        }

        for cluster in state.clusters() {
            let (sx, sy) = layout.tile_center(cluster.origin);
            let span = cluster.length as u16 - 1;
            match cluster.orientation {
                Orientation::Horizontal => {
                    let style = Style::new(Rgb::new(0, 255, 0), BOARD_BG).bold();
                    fb.hline(sx, sy, span * layout.cell_w + 1, '━', style);
                }
                Orientation::Vertical => {
                    let style = Style::new(Rgb::new(60, 60, 255), BOARD_BG).bold();
                    fb.vline(sx, sy, span * layout.cell_h + 1, '┃', style);
                }
            }
        }
    }

    fn draw_move_hints(&self, fb: &mut FrameBuffer, layout: &Layout, state: &GameState) {
        if !state.show_moves()
            || state.game_over()
            || !matches!(state.phase(), Phase::Ready)
            || !state.clusters().is_empty()
        {
            return;
        }

        let style = Style::new(Rgb::new(255, 60, 60), BOARD_BG);
        for mv in state.moves() {
            let (ax, ay) = layout.tile_center(mv.a);
            let (bx, by) = layout.tile_center(mv.b);
            if ay == by {
                fb.hline(ax.min(bx), ay, ax.abs_diff(bx) + 1, '╌', style);
            } else {
                fb.vline(ax, ay.min(by), ay.abs_diff(by) + 1, '╎', style);
            }
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, layout: &Layout, state: &GameState) {
        if layout.panel_w < 12 {
            return;
        }
        let x = layout.panel_x;
        let y = layout.board_y;
        let label = Style::new(PANEL_FG, Rgb::new(0, 0, 0)).bold();
        let value = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.put_str(x, y, "SCORE", label);
        fb.put_str(x, y + 1, &state.score().to_string(), value);

        fb.put_str(x, layout.button_y[0], "[N] New Game", value);
        fb.put_str(
            x,
            layout.button_y[1],
            &format!("[M] Moves: {}", on_off(state.show_moves())),
            value,
        );
        fb.put_str(
            x,
            layout.button_y[2],
            &format!("[A] Assist: {}", on_off(state.assist_enabled())),
            value,
        );
        fb.put_str(x, layout.button_y[2] + 2, "[Q] Quit", value);
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: &Layout, text: &str) {
        let w = layout.columns as u16 * layout.cell_w;
        let h = layout.rows as u16 * layout.cell_h;
        let text_w = text.chars().count() as u16;
        let x = layout.board_x + w.saturating_sub(text_w) / 2;
        let y = layout.board_y + h / 2;
        let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, y, text, style);
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Grid;
    use crate::types::{GameConfig, Token};

    fn test_state() -> GameState {
        let mut grid = Grid::new(3, 3);
        let rows: [[u8; 3]; 3] = [[0, 1, 2], [1, 2, 0], [2, 0, 1]];
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                grid.set(TilePos::new(c as u8, r as u8), Some(Token(v)))
                    .unwrap();
            }
        }
        let config = GameConfig {
            columns: 3,
            rows: 3,
            ..GameConfig::default()
        };
        GameState::with_grid(config, grid, 1)
    }

    #[test]
    fn test_layout_tile_hit_testing() {
        let state = test_state();
        let view = GameView::default();
        let layout = view.layout(&state, Viewport::new(80, 24));

        // Top-left pixel of the board maps to tile (0,0).
        assert_eq!(
            layout.tile_at(layout.board_x, layout.board_y),
            Some(TilePos::new(0, 0))
        );
        // Last pixel of the first tile still maps to (0,0).
        assert_eq!(
            layout.tile_at(
                layout.board_x + layout.cell_w - 1,
                layout.board_y + layout.cell_h - 1
            ),
            Some(TilePos::new(0, 0))
        );
        // One past maps to the neighbor.
        assert_eq!(
            layout.tile_at(layout.board_x + layout.cell_w, layout.board_y),
            Some(TilePos::new(1, 0))
        );
        // Outside the board maps to nothing.
        assert_eq!(layout.tile_at(0, 0), None);
        assert_eq!(
            layout.tile_at(
                layout.board_x + 3 * layout.cell_w,
                layout.board_y
            ),
            None
        );
    }

    #[test]
    fn test_layout_button_hit_testing() {
        let state = test_state();
        let view = GameView::default();
        let layout = view.layout(&state, Viewport::new(80, 24));

        assert_eq!(
            layout.button_at(layout.panel_x, layout.button_y[0]),
            Some(GameIntent::NewGame)
        );
        assert_eq!(
            layout.button_at(layout.panel_x + 2, layout.button_y[1]),
            Some(GameIntent::ToggleMovesHint)
        );
        assert_eq!(
            layout.button_at(layout.panel_x, layout.button_y[2]),
            Some(GameIntent::ToggleAssist)
        );
        assert_eq!(layout.button_at(layout.panel_x, layout.button_y[2] + 1), None);
        assert_eq!(layout.button_at(0, layout.button_y[0]), None);
    }

    #[test]
    fn test_render_paints_tokens_and_panel() {
        let state = test_state();
        let view = GameView::default();
        let viewport = Viewport::new(80, 24);
        let fb = view.render(&state, None, viewport);
        let layout = view.layout(&state, viewport);

        // Tile (0,0) holds token 0: its color fills the cell.
        let cell = fb.get(layout.board_x, layout.board_y).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, TOKEN_COLORS[0]);

        // Panel shows the score label.
        let s = fb.get(layout.panel_x, layout.board_y).unwrap();
        assert_eq!(s.ch, 'S');
    }

    #[test]
    fn test_render_marks_selection() {
        let state = test_state();
        let view = GameView::default();
        let viewport = Viewport::new(80, 24);
        let selected = TilePos::new(1, 1);
        let fb = view.render(&state, Some(selected), viewport);
        let layout = view.layout(&state, viewport);

        let (px, py) = layout.tile_px(selected);
        let cell = fb.get(px as u16, py as u16).unwrap();
        assert_eq!(cell.ch, '▓');
    }

    #[test]
    fn test_render_game_over_overlay() {
        let mut state = test_state();
        // The latin-square board has no moves; one tick flips the flag.
        state.tick(16);
        assert!(state.game_over());

        let view = GameView::default();
        let viewport = Viewport::new(80, 24);
        let fb = view.render(&state, None, viewport);
        let layout = view.layout(&state, viewport);

        let w = layout.columns as u16 * layout.cell_w;
        let y = layout.board_y + layout.rows as u16 * layout.cell_h / 2;
        let x = layout.board_x + w.saturating_sub(9) / 2;
        assert_eq!(fb.get(x, y).unwrap().ch, 'G');
    }

    #[test]
    fn test_render_move_hints_only_when_enabled() {
        let mut state = test_state();
        state.set_show_moves(true);
        // No moves on this board, so nothing to compare; just ensure the
        // render path with the flag on does not panic on any phase.
        let view = GameView::default();
        let _ = view.render(&state, None, Viewport::new(80, 24));
        state.tick(16);
        let _ = view.render(&state, None, Viewport::new(80, 24));
    }
}
