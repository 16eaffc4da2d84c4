// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod controller;
pub mod logging;
pub mod model;
pub mod session;
pub mod storage;
pub mod store;
pub mod text;

#[cfg(feature = "tui")]
pub mod tui;
