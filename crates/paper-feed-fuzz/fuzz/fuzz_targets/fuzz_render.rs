#![no_main]

use libfuzzer_sys::fuzz_target;
use paper_feed::config::RenderOptions;
use paper_feed::models::Paper;
use paper_feed::render::Renderer;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must render, including odd dates and scores
    if let Ok(papers) = serde_json::from_slice::<Vec<Paper>>(data) {
        let blocks = Renderer::new(RenderOptions::utc()).render(&papers);
        assert_eq!(blocks.len(), papers.len());
    }
});
