// Few-shot example store
//
// Examples are (input_text, output_text) pairs kept in a JSONL file,
// one object per line. File order is significant: callers slice the
// first N examples as demonstrations.

mod example_store;

pub use example_store::{load_examples, Example};
