//! Paper Feed
//!
//! Client for a ranked paper feed server. Loads the current list of papers,
//! renders each one as an HTML block with save / PDF / copy actions, and
//! performs those actions against the server and the system clipboard.
//!
//! # Features
//!
//! - **Loader**: `GET /papers`, rendered into the page's papers region
//! - **Save**: `POST /save_paper` from the save form or a paper's save button
//! - **Copy link**: the raw paper id onto the clipboard
//! - **Event loop**: every interaction runs as its own async chain
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use paper_feed::{FeedApp, clipboard::SystemClipboard, config::Config, notify::TerminalNotifier};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let app = FeedApp::from_config(&config, Arc::new(SystemClipboard), Arc::new(TerminalNotifier))?;
//!
//!     app.load_papers().await;
//!     println!("{}", paper_feed::page::lock(app.page()).papers_html());
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod notify;
pub mod page;
pub mod render;

pub use app::{FeedApp, LoadOutcome};
pub use client::PaperFeedClient;
pub use config::Config;
pub use error::{ActionError, ClientError, ClipboardError};
pub use events::{EventLoop, UiEvent};
