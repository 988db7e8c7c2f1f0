//! Club-matching engine behind the campus club finder popup.
//!
//! A user either walks the branching quiz, fills in the flat questionnaire, or uploads a
//! resume. Each path yields a tag set plus an eligibility code, which the matcher runs
//! against the activity catalog.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod matching;
pub mod models;
pub mod quiz;
pub mod resume;
pub mod state;
pub mod taxonomy;
pub mod telemetry;

pub use config::Config;
pub use errors::AppError;
pub use state::AppState;
