use crate::app::{App, ViewState};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Braille spinner frames, advanced by the loop tick while loading.
pub(super) const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

const HINTS: &str = "[j/k] desplazar [g/G] inicio/fin [r] recargar [t] tema [q] salir";

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else {
        match &app.view_state {
            ViewState::Loading => {
                let frame = SPINNER[app.spinner_frame % SPINNER.len()];
                Cow::Owned(format!("{} cargando | [q] salir", frame))
            }
            ViewState::Error(_) => Cow::Borrowed("[r] recargar [q] salir"),
            ViewState::Ready(articles) => {
                Cow::Owned(format!("{} noticias | {}", articles.len(), HINTS))
            }
        }
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
