#![no_main]

use libfuzzer_sys::fuzz_target;
use paper_feed::models::SaveResponse;

fuzz_target!(|data: &[u8]| {
    if let Ok(response) = serde_json::from_slice::<SaveResponse>(data) {
        let _ = response.message();
    }
});
