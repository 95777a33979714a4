use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::keymap;
use crate::viewport::ViewportState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollAction {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

/// Keys that scroll the history. None of the defaults overlap with what the input bar
/// consumes (printable characters, Enter, Backspace).
#[derive(Clone, Debug)]
pub struct ScrollBindings {
    pub line_step: i32,
    pub up: Vec<KeyEvent>,
    pub down: Vec<KeyEvent>,
    pub page_up: Vec<KeyEvent>,
    pub page_down: Vec<KeyEvent>,
    pub top: Vec<KeyEvent>,
    pub bottom: Vec<KeyEvent>,
}

impl Default for ScrollBindings {
    fn default() -> Self {
        Self {
            line_step: 1,
            up: vec![keymap::key_ctrl(KeyCode::Up), keymap::key(KeyCode::Up)],
            down: vec![keymap::key_ctrl(KeyCode::Down), keymap::key(KeyCode::Down)],
            page_up: vec![keymap::key(KeyCode::PageUp)],
            page_down: vec![keymap::key(KeyCode::PageDown)],
            top: vec![keymap::key_ctrl(KeyCode::Home)],
            bottom: vec![keymap::key_ctrl(KeyCode::End)],
        }
    }
}

impl ScrollBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<ScrollAction> {
        let table = [
            (&self.up, ScrollAction::Up),
            (&self.down, ScrollAction::Down),
            (&self.page_up, ScrollAction::PageUp),
            (&self.page_down, ScrollAction::PageDown),
            (&self.top, ScrollAction::Top),
            (&self.bottom, ScrollAction::Bottom),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.iter().any(|p| keymap::key_event_matches(p, key)))
            .map(|(_, action)| action)
    }

    pub fn apply(&self, state: &mut ViewportState, action: ScrollAction) {
        match action {
            ScrollAction::Up => state.scroll_y_by(-self.line_step),
            ScrollAction::Down => state.scroll_y_by(self.line_step),
            ScrollAction::PageUp => state.page_up(),
            ScrollAction::PageDown => state.page_down(),
            ScrollAction::Top => state.to_top(),
            ScrollAction::Bottom => state.to_bottom(),
        }
    }
}
