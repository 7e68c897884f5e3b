//! Data models for the paper feed endpoints.
//!
//! Field names match the server's JSON exactly (snake_case), so no renaming
//! is applied.

mod paper;
mod save;

pub use paper::{Paper, fixed4};
pub use save::{SaveRequest, SaveResponse, SavedPaper};
