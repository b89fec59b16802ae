// Prompt composer
//
// Layout:
//
//   <instruction>
//   User: <input_text>
//   Assistant: <output_text>
//   <blank line>
//   ...
//   User: <query>
//   Assistant:
//
// The model completes from the trailing "Assistant:". Demonstrations are
// emitted in the order given.

use crate::dataset::Example;

/// Persona line used when no instruction override is configured
pub const DEFAULT_INSTRUCTION: &str =
    "You are a helpful assistant that responds in Hinglish, a mix of Hindi and English.\n\nExamples:\n";

/// Build a few-shot prompt from an instruction, demonstrations and a query
pub fn compose(instruction: &str, demonstrations: &[Example], query: &str) -> String {
    let mut prompt = String::from(instruction);

    for example in demonstrations {
        prompt.push_str("User: ");
        prompt.push_str(&example.input_text);
        prompt.push_str("\nAssistant: ");
        prompt.push_str(&example.output_text);
        prompt.push_str("\n\n");
    }

    prompt.push_str("User: ");
    prompt.push_str(query);
    prompt.push_str("\nAssistant:");
    prompt
}

/// Composer bound to one instruction
#[derive(Debug, Clone)]
pub struct PromptComposer {
    instruction: String,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new(DEFAULT_INSTRUCTION)
    }
}

impl PromptComposer {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
        }
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn compose(&self, demonstrations: &[Example], query: &str) -> String {
        compose(&self.instruction, demonstrations, query)
    }
}
