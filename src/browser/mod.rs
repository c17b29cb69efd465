//! Browser session management
//!
//! Launches or attaches to a Chrome/Chromium instance over the DevTools
//! protocol and captures table subtrees from the active tab.

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;
