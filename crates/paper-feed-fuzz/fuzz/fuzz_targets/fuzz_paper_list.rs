#![no_main]

use libfuzzer_sys::fuzz_target;
use paper_feed::models::Paper;

fuzz_target!(|data: &[u8]| {
    // A /papers body: must decode or fail, never panic
    let _ = serde_json::from_slice::<Vec<Paper>>(data);
});
