//! backbar — a terminal client for the bar inventory service.
//!
//! The binary connects to a running bar service, loads an inventory
//! snapshot, and provides client-side search/filter/sort over the bar
//! contents plus the submission flows (add an ingredient to the master
//! list, add an item to the bar, delete an item) against the service's
//! REST endpoints.
//!
//! Modules:
//! - `api` - HTTP client for the service endpoints
//! - `app` - central application state and background-task events
//! - `config` - optional config.toml loading
//! - `inventory` - filter engine, category catalog, lookup, submission
//!   validation
//! - `keybindings` - typed action registry with config overrides
//! - `theme` - semantic style roles for the TUI
//! - `ui` - event loop, input dispatch, rendering
//! - `util` - text and URL helpers

pub mod api;
pub mod app;
pub mod config;
pub mod inventory;
pub mod keybindings;
pub mod theme;
pub mod ui;
pub mod util;
