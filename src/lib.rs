// hinglish - few-shot Hinglish generation on Gemini
// Library exports

pub mod cli;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod inference;
pub mod prompt;
pub mod providers;
pub mod tuning;
