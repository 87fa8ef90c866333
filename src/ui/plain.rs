//! Plain-text rendition of the news view, for `--plain` and pipes.

use crate::app::ViewState;
use crate::feed::NewsArticle;
use crate::util::strip_control_chars;
use std::fmt::Write;

use super::cards::HEADING;
use super::render::{EMPTY_MESSAGE, LOADING_MESSAGE};

/// Render `state` as text. Cards are separated by blank lines.
pub fn render_plain(state: &ViewState) -> String {
    match state {
        ViewState::Loading => format!("{}\n", LOADING_MESSAGE),
        ViewState::Error(msg) => format!("{}\n", msg),
        ViewState::Ready(articles) if articles.is_empty() => format!("{}\n", EMPTY_MESSAGE),
        ViewState::Ready(articles) => {
            let mut out = format!("{}\n", HEADING);
            for article in articles.iter() {
                out.push('\n');
                write_card(&mut out, article);
            }
            out
        }
    }
}

fn write_card(out: &mut String, article: &NewsArticle) {
    // Writing to a String cannot fail.
    if let Some(image) = article.image() {
        let _ = writeln!(out, "[imagen] {}", strip_control_chars(image));
    }
    let _ = writeln!(out, "{}", strip_control_chars(&article.title));
    if let Some(body) = article.body() {
        let _ = writeln!(out, "{}", strip_control_chars(body));
    }
    if let Some(footer) = article.footer() {
        let _ = writeln!(out, "{}", strip_control_chars(&footer));
    }
    if let Some(link) = article.link() {
        let _ = writeln!(out, "{}", strip_control_chars(link));
    }
}
