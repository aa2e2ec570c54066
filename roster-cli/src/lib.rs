//! # roster-cli — Interactive front end for The Tower roster
//!
//! Wraps a [`roster_core::RecordStore`] in a numbered text menu:
//!
//! ```text
//! === THE TOWER: CHARACTER ROSTER ===
//! 1. Create character
//! 2. Find character
//! 3. Rename character
//! 4. Delete character
//! 5. List characters
//! 6. Quit
//! ```
//!
//! ## Modules
//!
//! - `session` — the menu loop, generic over its input and output
//! - `render` — all user-facing text
//! - `logging` — activity-log subscriber setup

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]

pub mod logging;
pub mod render;
pub mod session;

pub use session::{MenuChoice, Session};
