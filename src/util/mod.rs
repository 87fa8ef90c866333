//! Utility functions for common operations.
//!
//! - **Text processing**: Unicode-aware width calculation and truncation,
//!   plus control-character stripping for text that comes from the remote
//!   feed.
//!
//! # Examples
//!
//! ```
//! use isonews::util::{display_width, truncate_to_width};
//!
//! let width = display_width("Hello 世界"); // 10
//! let truncated = truncate_to_width("Long article title", 15);
//! ```

mod text;

pub use text::{display_width, strip_control_chars, truncate_to_width};
