// Batch inference over a tuning configuration
//
// One remote call per query, strictly in order. A failed query is logged
// and dropped; the run itself never fails because of one query.

mod results;
mod runner;

pub use results::{results_file_name, save_results, save_results_at};
pub use runner::{
    InferenceResult, InferenceRun, InferenceRunner, QueryOutcome, RunSummary,
    DEFAULT_TEST_PROMPTS,
};
