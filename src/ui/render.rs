//! Render functions for the TUI.
//!
//! The body of the screen is a pure function of `App::view_state`; the
//! status bar sits on the last row.

use crate::app::{App, ViewState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{cards, status};

/// Shown while the load is in flight.
pub const LOADING_MESSAGE: &str = "Cargando noticias ISOTools...";

/// Shown when the feed loaded but had no articles.
pub const EMPTY_MESSAGE: &str = "No hay noticias disponibles.";

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 8;

/// Main render dispatch function.
///
/// Handles terminal size validation before rendering.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Nothing meaningful fits
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    render_view(f, app, chunks[0]);
    status::render(f, app, chunks[1]);
}

/// Render the news view itself into `area`.
fn render_view(f: &mut Frame, app: &mut App, area: Rect) {
    match &app.view_state {
        ViewState::Loading => {
            render_centered(f, LOADING_MESSAGE, app.style("message"), area);
        }
        ViewState::Error(msg) => {
            render_centered(f, msg, app.style("error"), area);
        }
        ViewState::Ready(articles) if articles.is_empty() => {
            render_centered(f, EMPTY_MESSAGE, app.style("message"), area);
        }
        ViewState::Ready(_) => cards::render(f, app, area),
    }
}

/// Draw `text` centered both ways inside `area`.
fn render_centered(f: &mut Frame, text: &str, style: Style, area: Rect) {
    let top = area.height.saturating_sub(1) / 2;
    let rect = Rect::new(area.x, area.y + top, area.width, area.height - top);

    let paragraph = Paragraph::new(text.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, rect);
}
