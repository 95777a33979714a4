use crossterm::event as ct;

use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseEvent;

/// Converts the crossterm events a chat view reacts to: key presses (and auto-repeat, so a
/// held key keeps typing), pastes, and wheel scrolling. Everything else maps to `None`.
pub fn input_event_from_crossterm(ev: ct::Event) -> Option<InputEvent> {
    match ev {
        ct::Event::Key(key) if key.kind != ct::KeyEventKind::Release => {
            key_event_from_crossterm(key).map(InputEvent::Key)
        }
        ct::Event::Paste(text) => Some(InputEvent::Paste(text)),
        ct::Event::Mouse(mouse) => mouse_event_from_crossterm(mouse.kind).map(InputEvent::Mouse),
        _ => None,
    }
}

pub fn key_event_from_crossterm(key: ct::KeyEvent) -> Option<KeyEvent> {
    let code = match key.code {
        ct::KeyCode::Char(c) => KeyCode::Char(c),
        ct::KeyCode::Enter => KeyCode::Enter,
        ct::KeyCode::Backspace => KeyCode::Backspace,
        ct::KeyCode::Tab => KeyCode::Tab,
        ct::KeyCode::Esc => KeyCode::Esc,
        ct::KeyCode::Up => KeyCode::Up,
        ct::KeyCode::Down => KeyCode::Down,
        ct::KeyCode::Home => KeyCode::Home,
        ct::KeyCode::End => KeyCode::End,
        ct::KeyCode::PageUp => KeyCode::PageUp,
        ct::KeyCode::PageDown => KeyCode::PageDown,
        _ => return None,
    };
    let m = key.modifiers;
    Some(KeyEvent::new(code).with_modifiers(KeyModifiers {
        shift: m.contains(ct::KeyModifiers::SHIFT),
        ctrl: m.contains(ct::KeyModifiers::CONTROL),
        alt: m.contains(ct::KeyModifiers::ALT),
    }))
}

fn mouse_event_from_crossterm(kind: ct::MouseEventKind) -> Option<MouseEvent> {
    match kind {
        ct::MouseEventKind::ScrollUp => Some(MouseEvent::ScrollUp),
        ct::MouseEventKind::ScrollDown => Some(MouseEvent::ScrollDown),
        _ => None,
    }
}
