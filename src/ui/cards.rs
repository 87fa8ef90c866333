//! Card grid for the `Ready` state.
//!
//! Articles are laid out left to right in rows of up to `columns` cards.
//! Each row is as tall as its tallest card; scrolling moves whole rows.

use crate::app::App;
use crate::feed::NewsArticle;
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Section heading shown above the grid.
pub const HEADING: &str = "Noticias ISOTools";

/// Narrowest a card may get before the grid drops a column.
pub(super) const MIN_CARD_WIDTH: u16 = 28;

/// Label drawn inside the image block.
const IMAGE_LABEL: &str = "[ imagen ]";

/// One laid-out row of cards: `articles[start..end]`, `height` terminal rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRow {
    pub start: usize,
    pub end: usize,
    pub height: u16,
}

/// Number of columns that fit in `width`, capped by `configured`. Never 0.
pub fn column_count(width: u16, configured: u16) -> usize {
    let fit = (width / MIN_CARD_WIDTH).max(1);
    fit.min(configured.max(1)) as usize
}

/// Total height of one card, borders included, at the given inner width.
pub fn card_height(article: &NewsArticle, inner_width: usize, image_height: u16) -> u16 {
    let sections = card_sections(article, inner_width, image_height);
    let inner: u16 = sections.iter().map(|(_, h)| *h).sum();
    inner.saturating_add(2)
}

/// Split the articles into grid rows for a grid `width` columns wide.
pub fn layout_rows(
    articles: &[NewsArticle],
    width: u16,
    columns: usize,
    image_height: u16,
) -> Vec<GridRow> {
    let columns = columns.max(1);
    let inner_width = card_inner_width(width, columns);

    articles
        .chunks(columns)
        .enumerate()
        .map(|(i, chunk)| {
            let start = i * columns;
            let height = chunk
                .iter()
                .map(|a| card_height(a, inner_width, image_height))
                .max()
                .unwrap_or(0);
            GridRow {
                start,
                end: start + chunk.len(),
                height,
            }
        })
        .collect()
}

fn card_inner_width(width: u16, columns: usize) -> usize {
    let column_width = width as usize / columns.max(1);
    column_width.saturating_sub(2).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Image,
    Title,
    Body,
    Footer,
    Link,
}

/// Sections present on a card, with their heights, in draw order.
fn card_sections(article: &NewsArticle, inner_width: usize, image_height: u16) -> Vec<(Section, u16)> {
    let mut sections = Vec::with_capacity(4);

    if article.image().is_some() && image_height > 0 {
        sections.push((Section::Image, image_height));
    }

    let title = strip_control_chars(&article.title).into_owned();
    sections.push((Section::Title, wrapped_rows(title, inner_width).max(1)));

    if let Some(body) = article.body() {
        let body = strip_control_chars(body).into_owned();
        sections.push((Section::Body, wrapped_rows(body, inner_width)));
    }

    if article.footer().is_some() {
        sections.push((Section::Footer, 1));
    }

    if article.link().is_some() {
        sections.push((Section::Link, 1));
    }

    sections
}

/// Rows `text` takes when drawn with the card's word wrapping.
fn wrapped_rows(text: String, inner_width: usize) -> u16 {
    let width = inner_width.min(u16::MAX as usize) as u16;
    let rows = Paragraph::new(Text::from(text))
        .wrap(Wrap { trim: false })
        .line_count(width);
    rows.min(u16::MAX as usize) as u16
}

/// Render the heading and the visible part of the card grid.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let heading = Paragraph::new(HEADING)
        .style(app.style("heading"))
        .alignment(Alignment::Center);
    f.render_widget(heading, chunks[0]);

    let grid_area = chunks[1];
    let columns = column_count(grid_area.width, app.config.columns);
    let image_height = app.config.image_height;
    let rows = layout_rows(app.view_state.articles(), grid_area.width, columns, image_height);

    app.grid_rows = rows.len();
    app.clamp_scroll();

    let articles = app.view_state.articles();
    let column_width = grid_area.width / columns as u16;
    let mut y = grid_area.y;
    let bottom = grid_area.y + grid_area.height;

    for row in rows.iter().skip(app.scroll_row) {
        if y >= bottom {
            break;
        }
        // The last visible row may be cut off at the bottom edge.
        let height = row.height.min(bottom - y);

        for (col, article) in articles[row.start..row.end].iter().enumerate() {
            let rect = Rect::new(
                grid_area.x + col as u16 * column_width,
                y,
                column_width,
                height,
            );
            render_card(f, app, article, rect, image_height);
        }
        y = y.saturating_add(row.height);
    }
}

fn render_card(f: &mut Frame, app: &App, article: &NewsArticle, area: Rect, image_height: u16) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("card_border"));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let sections = card_sections(article, inner.width as usize, image_height);
    let constraints: Vec<Constraint> = sections
        .iter()
        .map(|(_, h)| Constraint::Length(*h))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for ((section, _), chunk) in sections.iter().zip(chunks.iter()) {
        if chunk.height == 0 {
            continue;
        }
        match section {
            Section::Image => render_image(f, app, article, *chunk),
            Section::Title => {
                let title = strip_control_chars(&article.title).into_owned();
                let paragraph = Paragraph::new(title)
                    .style(app.style("card_title"))
                    .wrap(Wrap { trim: false });
                f.render_widget(paragraph, *chunk);
            }
            Section::Body => {
                let body = article.body().unwrap_or_default();
                // Text::from splits on '\n', keeping the feed's line breaks.
                let text = Text::from(strip_control_chars(body).into_owned());
                let paragraph = Paragraph::new(text)
                    .style(app.style("card_body"))
                    .wrap(Wrap { trim: false });
                f.render_widget(paragraph, *chunk);
            }
            Section::Footer => {
                let footer = article.footer().unwrap_or_default();
                let footer = strip_control_chars(&footer).into_owned();
                let line = truncate_to_width(&footer, chunk.width as usize).into_owned();
                f.render_widget(
                    Paragraph::new(line).style(app.style("card_footer")),
                    *chunk,
                );
            }
            Section::Link => {
                let link = strip_control_chars(article.link().unwrap_or_default());
                let line = truncate_to_width(&link, chunk.width as usize).into_owned();
                f.render_widget(
                    Paragraph::new(line).style(app.style("card_link")),
                    *chunk,
                );
            }
        }
    }
}

/// Fixed-height image block. The reference is cut to the block, never wrapped.
fn render_image(f: &mut Frame, app: &App, article: &NewsArticle, area: Rect) {
    let Some(reference) = article.image() else {
        return;
    };
    let width = area.width as usize;
    let reference = strip_control_chars(reference);

    let mut lines = Vec::with_capacity(area.height as usize);
    let middle = area.height.saturating_sub(1) / 2;
    for row in 0..area.height {
        let line = if area.height == 1 {
            truncate_to_width(&reference, width).into_owned()
        } else if row == middle {
            IMAGE_LABEL.to_string()
        } else if row == middle + 1 {
            truncate_to_width(&reference, width).into_owned()
        } else {
            String::new()
        };
        lines.push(Line::from(line));
    }

    let paragraph = Paragraph::new(lines)
        .style(app.style("card_image"))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
