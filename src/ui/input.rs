//! Keyboard input handling.

use crate::app::{App, AppEvent};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::loop_runner::Action;

/// Handle a key press.
///
/// Scrolling only applies once cards are on screen; quit, reload and theme
/// keys work in every state.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            return Ok(Action::Quit);
        }
        KeyCode::Char('q') | KeyCode::Esc => return Ok(Action::Quit),

        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),

        KeyCode::Char('r') => {
            let generation = app.mount(event_tx);
            tracing::info!(generation, "Reload requested");
            app.set_status("Recargando noticias...");
        }
        KeyCode::Char('t') => {
            let name = app.cycle_theme();
            app.set_status(format!("Tema: {}", name));
        }
        _ => {}
    }

    Ok(Action::Continue)
}
