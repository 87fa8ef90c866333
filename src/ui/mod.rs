//! Terminal User Interface module.
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Feed load result processing
//! - `render` - State-based render dispatch
//! - `cards` - Heading and card grid
//! - `status` - Status bar widget
//! - `plain` - Text rendition for non-interactive output

mod cards;
mod events;
mod input;
mod loop_runner;
mod plain;
mod render;
mod status;

pub use cards::HEADING;
pub use loop_runner::{run, Action};
pub use plain::render_plain;
pub use render::{EMPTY_MESSAGE, LOADING_MESSAGE};
