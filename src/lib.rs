//! Terminal viewer for the ISOTools daily news feed.
//!
//! The view loads one JSON document per mount, drops repeated articles and
//! shows the rest as a grid of cards.

pub mod app;
pub mod config;
pub mod feed;
pub mod theme;
pub mod ui;
pub mod util;
