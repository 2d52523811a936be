//! Release menu — review and select pending container image updates in the terminal.
//!
//! This library exposes the core modules for use by the binary and by tests.

pub mod error;
pub mod model;
pub mod view;
pub mod menu;
pub mod config;
pub mod logging;

pub use error::{MenuError, ParseError};
pub use menu::{Menu, Selection};
