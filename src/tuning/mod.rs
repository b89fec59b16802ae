// Tuning configuration
//
// "Tuning" here is a bundle of few-shot examples plus generation
// parameters persisted as JSON. No model weights are touched.

mod builder;

pub use builder::{GenerationParameters, TuningConfig, TUNING_TYPE};
