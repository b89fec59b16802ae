// CLI module
// Command handlers behind `hinglish tune`, `hinglish infer` and `hinglish models`

mod commands;
mod shell_hint;

pub use commands::{
    gemini_from_settings, read_config_path_from_stdin, resolve_config_path, run_infer,
    run_models, run_tune, InferOptions, TuneOptions,
};
pub use shell_hint::{env_export_hint, env_export_hint_for, Platform};
