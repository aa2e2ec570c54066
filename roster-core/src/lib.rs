//! # Roster Core Library
//!
//! Character records and their persistence for The Tower, a text-menu
//! role-playing game.
//!
//! Every character is a [`CharacterRecord`] held by a [`RecordStore`]:
//!
//! - **Hero** — a playable character with the class stat block
//! - **Enemy** — the same stat block plus a reward value
//!
//! The store keeps records in insertion order, enforces case-insensitive
//! name uniqueness, and rewrites a single pretty-printed JSON file after
//! every successful mutation. Loading is soft: a missing or damaged file
//! starts an empty roster instead of failing.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use config::RosterConfig;
pub use error::{ErrorCategory, Result, RosterError};
pub use store::{RecordStore, Removal, SaveStatus, Saved};
pub use types::*;
