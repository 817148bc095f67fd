//! Pointer and keyboard handling for terminal play.
//!
//! The pointer model follows click-or-drag swapping: clicking a tile selects
//! it, clicking the selected tile again deselects, and clicking or dragging
//! onto a neighbor of the selection issues a swap intent. Clicking outside
//! the board drops the selection. The selection is presentation state, so it
//! lives here rather than in the engine; the view reads it back for
//! highlighting.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::term::Layout;
use crate::types::{GameIntent, TilePos};

/// Tracks the selected tile and drag state between pointer events.
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    selected: Option<TilePos>,
    dragging: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tile currently selected, for the view's highlight.
    pub fn selected(&self) -> Option<TilePos> {
        self.selected
    }

    /// Drop any selection (used when the engine leaves `Ready`).
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Translate a pointer event into at most one intent.
    pub fn handle_mouse(&mut self, event: MouseEvent, layout: &Layout) -> Option<GameIntent> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.dragging = true;

                if let Some(intent) = layout.button_at(event.column, event.row) {
                    self.selected = None;
                    return Some(intent);
                }

                match (self.selected, layout.tile_at(event.column, event.row)) {
                    (_, None) => {
                        self.selected = None;
                        None
                    }
                    (Some(sel), Some(tile)) if sel == tile => {
                        self.selected = None;
                        None
                    }
                    (Some(sel), Some(tile)) if sel.is_adjacent(tile) => {
                        self.selected = None;
                        Some(GameIntent::Swap(sel, tile))
                    }
                    (_, Some(tile)) => {
                        self.selected = Some(tile);
                        None
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if !self.dragging {
                    return None;
                }
                let sel = self.selected?;
                let tile = layout.tile_at(event.column, event.row)?;
                if tile != sel && sel.is_adjacent(tile) {
                    self.selected = None;
                    Some(GameIntent::Swap(sel, tile))
                } else {
                    None
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.dragging = false;
                None
            }
            _ => None,
        }
    }
}

/// Map keyboard input to game intents.
pub fn handle_key_event(key: KeyEvent) -> Option<GameIntent> {
    match key.code {
        KeyCode::Char('n') | KeyCode::Char('N') => Some(GameIntent::NewGame),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(GameIntent::ToggleMovesHint),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(GameIntent::ToggleAssist),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn layout() -> Layout {
        Layout {
            board_x: 3,
            board_y: 2,
            cell_w: 4,
            cell_h: 2,
            columns: 5,
            rows: 5,
            panel_x: 26,
            panel_w: 18,
            button_y: [5, 6, 7],
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn down(column: u16, row: u16) -> MouseEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    /// Terminal coordinate of the center of a tile.
    fn at_tile(layout: &Layout, column: u8, row: u8) -> (u16, u16) {
        (
            layout.board_x + column as u16 * layout.cell_w + 1,
            layout.board_y + row as u16 * layout.cell_h + 1,
        )
    }

    #[test]
    fn test_click_selects_then_adjacent_click_swaps() {
        let layout = layout();
        let mut input = InputHandler::new();

        let (x, y) = at_tile(&layout, 1, 1);
        assert_eq!(input.handle_mouse(down(x, y), &layout), None);
        assert_eq!(input.selected(), Some(TilePos::new(1, 1)));

        let (x2, y2) = at_tile(&layout, 2, 1);
        assert_eq!(
            input.handle_mouse(down(x2, y2), &layout),
            Some(GameIntent::Swap(TilePos::new(1, 1), TilePos::new(2, 1)))
        );
        assert_eq!(input.selected(), None, "swap clears the selection");
    }

    #[test]
    fn test_click_same_tile_deselects() {
        let layout = layout();
        let mut input = InputHandler::new();

        let (x, y) = at_tile(&layout, 0, 0);
        input.handle_mouse(down(x, y), &layout);
        assert!(input.selected().is_some());

        input.handle_mouse(down(x, y), &layout);
        assert_eq!(input.selected(), None);
    }

    #[test]
    fn test_click_distant_tile_reselects() {
        let layout = layout();
        let mut input = InputHandler::new();

        let (x, y) = at_tile(&layout, 0, 0);
        input.handle_mouse(down(x, y), &layout);

        let (x2, y2) = at_tile(&layout, 3, 3);
        assert_eq!(input.handle_mouse(down(x2, y2), &layout), None);
        assert_eq!(input.selected(), Some(TilePos::new(3, 3)));
    }

    #[test]
    fn test_click_outside_board_deselects() {
        let layout = layout();
        let mut input = InputHandler::new();

        let (x, y) = at_tile(&layout, 0, 0);
        input.handle_mouse(down(x, y), &layout);
        input.handle_mouse(down(0, 0), &layout);
        assert_eq!(input.selected(), None);
    }

    #[test]
    fn test_drag_onto_neighbor_swaps() {
        let layout = layout();
        let mut input = InputHandler::new();

        let (x, y) = at_tile(&layout, 2, 2);
        input.handle_mouse(down(x, y), &layout);

        let (x2, y2) = at_tile(&layout, 2, 3);
        let intent = input.handle_mouse(
            mouse(MouseEventKind::Drag(MouseButton::Left), x2, y2),
            &layout,
        );
        assert_eq!(
            intent,
            Some(GameIntent::Swap(TilePos::new(2, 2), TilePos::new(2, 3)))
        );
    }

    #[test]
    fn test_drag_onto_diagonal_does_nothing() {
        let layout = layout();
        let mut input = InputHandler::new();

        let (x, y) = at_tile(&layout, 2, 2);
        input.handle_mouse(down(x, y), &layout);

        let (x2, y2) = at_tile(&layout, 3, 3);
        let intent = input.handle_mouse(
            mouse(MouseEventKind::Drag(MouseButton::Left), x2, y2),
            &layout,
        );
        assert_eq!(intent, None);
        assert_eq!(input.selected(), Some(TilePos::new(2, 2)));
    }

    #[test]
    fn test_button_click_issues_intent_and_drops_selection() {
        let layout = layout();
        let mut input = InputHandler::new();

        let (x, y) = at_tile(&layout, 0, 0);
        input.handle_mouse(down(x, y), &layout);

        let intent = input.handle_mouse(down(layout.panel_x, layout.button_y[0]), &layout);
        assert_eq!(intent, Some(GameIntent::NewGame));
        assert_eq!(input.selected(), None);
    }

    #[test]
    fn test_key_mapping() {
        let key = |code| KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        };

        assert_eq!(
            handle_key_event(key(KeyCode::Char('n'))),
            Some(GameIntent::NewGame)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('M'))),
            Some(GameIntent::ToggleMovesHint)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('a'))),
            Some(GameIntent::ToggleAssist)
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('x'))), None);

        assert!(should_quit(key(KeyCode::Char('q'))));
        assert!(should_quit(key(KeyCode::Esc)));
        assert!(!should_quit(key(KeyCode::Char('c'))));
        assert!(should_quit(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }));
    }
}
