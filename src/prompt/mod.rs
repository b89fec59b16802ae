// Few-shot prompt construction

mod composer;

pub use composer::{compose, PromptComposer, DEFAULT_INSTRUCTION};
