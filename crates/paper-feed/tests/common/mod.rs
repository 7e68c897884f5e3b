//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;
use wiremock::MockServer;

use paper_feed::client::PaperFeedClient;
use paper_feed::clipboard::MemoryClipboard;
use paper_feed::config::{Config, RenderOptions};
use paper_feed::notify::RecordingNotifier;
use paper_feed::page::Page;
use paper_feed::render::Renderer;
use paper_feed::FeedApp;

/// An app wired to a mock server, an in-memory clipboard and a recorder.
pub struct TestApp {
    pub app: FeedApp,
    pub clipboard: Arc<MemoryClipboard>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn setup_app(mock_server: &MockServer) -> TestApp {
    setup_app_with(mock_server, Page::default(), MemoryClipboard::new())
}

pub fn setup_app_with(mock_server: &MockServer, page: Page, clipboard: MemoryClipboard) -> TestApp {
    let config = Config::for_testing(&mock_server.uri());
    let client = PaperFeedClient::new(&config).unwrap();
    let clipboard = Arc::new(clipboard);
    let notifier = Arc::new(RecordingNotifier::new());

    let app = FeedApp::new(
        client,
        Renderer::new(RenderOptions::utc()),
        page.shared(),
        clipboard.clone(),
        notifier.clone(),
    );

    TestApp { app, clipboard, notifier }
}

/// Sample paper JSON for mocking.
pub fn sample_paper_json(arxiv_id: &str, title: &str, score: f64) -> serde_json::Value {
    json!({
        "id": format!("http://arxiv.org/abs/{arxiv_id}"),
        "title": title,
        "abstract": format!("Abstract for {title}"),
        "published": "2024-10-01T17:59:59+00:00",
        "score": score
    })
}
