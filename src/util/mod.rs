//! Utility functions for common operations.
//!
//! - **Text processing**: Unicode-aware width calculation, truncation, and
//!   sanitization of server-supplied strings before terminal rendering.
//! - **Server URL validation**: scheme/host checks for the configured
//!   service base URL.

mod server_url;
mod text;

pub use server_url::{validate_server_url, ServerUrlError};
pub use text::{display_width, sanitize_text, truncate_to_width};

/// Maximum accepted length for the search input.
pub const MAX_SEARCH_LENGTH: usize = 256;
