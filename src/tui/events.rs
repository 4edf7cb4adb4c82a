use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    ClearInput,
    Submit,
    ToggleKind,
    MoveUp,
    MoveDown,
    RerunSelected,
    RemoveSelected,
    ClearHistory,
    CopyLink,
    InputChar(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind != KeyEventKind::Release
    {
        return Ok(key_to_action(key));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::ClearInput,

        // Search form
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => Action::ToggleKind,

        // History
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::MoveUp,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::MoveDown,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::RerunSelected,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::RemoveSelected,
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => Action::ClearHistory,

        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopyLink,

        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::InputChar(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}
