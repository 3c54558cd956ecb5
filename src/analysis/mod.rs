//! Merge request analysis.

mod merge_request_url;
mod orchestrator;
mod state;

pub use merge_request_url::MergeRequestUrl;
pub use orchestrator::AnalysisOrchestrator;
pub use state::{AnalysisState, SubmitOutcome};
