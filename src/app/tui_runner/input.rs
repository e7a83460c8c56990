use crate::dashboard::{Dashboard, FetchCommand};
use crate::usage_api::Period;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    Fetch(FetchCommand),
    None,
}

impl From<Option<FetchCommand>> for InputAction {
    fn from(command: Option<FetchCommand>) -> Self {
        command.map_or(InputAction::None, InputAction::Fetch)
    }
}

pub fn handle_key(dashboard: &mut Dashboard, key: KeyEvent) -> InputAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => InputAction::Quit,
            _ => InputAction::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Up | KeyCode::Char('k') => dashboard.select_next_service(-1).into(),
        KeyCode::Down | KeyCode::Char('j') => dashboard.select_next_service(1).into(),
        KeyCode::Char('p') => dashboard.cycle_period().into(),
        KeyCode::Char(c @ '1'..='3') => {
            let index = (c as usize) - ('1' as usize);
            match Period::ALL.get(index) {
                Some(period) => dashboard.select_period(*period).into(),
                None => InputAction::None,
            }
        }
        KeyCode::Char('r') => dashboard.refresh().into(),
        KeyCode::Esc => {
            dashboard.dismiss_notice();
            InputAction::None
        }
        _ => InputAction::None,
    }
}

/// Short key name for the event log.
pub fn key_label(key: &KeyEvent) -> String {
    let base = match key.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        other => format!("{:?}", other),
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        format!("Ctrl+{}", base)
    } else {
        base
    }
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod tests;
