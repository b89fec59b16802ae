// Shell instructions for persisting GEMINI_MODEL_CONFIG

use crate::config::constants::MODEL_CONFIG_ENV;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

/// Instructions for the platform this binary was built for
pub fn env_export_hint(config_path: &str) -> String {
    env_export_hint_for(Platform::current(), config_path)
}

pub fn env_export_hint_for(platform: Platform, config_path: &str) -> String {
    match platform {
        Platform::Windows => format!(
            "To set the environment variable permanently on Windows:\n\
             setx {var} \"{path}\"\n\
             Or set it in System Properties > Environment Variables.",
            var = MODEL_CONFIG_ENV,
            path = config_path
        ),
        Platform::Unix => format!(
            "To set the environment variable for future terminal sessions:\n\
             echo 'export {var}=\"{path}\"' >> ~/.bashrc\n\
             echo 'export {var}=\"{path}\"' >> ~/.zshrc  # If using zsh\n\
             Then restart your terminal or run: source ~/.bashrc",
            var = MODEL_CONFIG_ENV,
            path = config_path
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_hint_uses_setx() {
        let hint = env_export_hint_for(Platform::Windows, "gemini_model_config.json");
        assert!(hint.contains("setx GEMINI_MODEL_CONFIG \"gemini_model_config.json\""));
    }

    #[test]
    fn test_unix_hint_mentions_both_shells() {
        let hint = env_export_hint_for(Platform::Unix, "cfg.json");
        assert!(hint.contains("export GEMINI_MODEL_CONFIG=\"cfg.json\"' >> ~/.bashrc"));
        assert!(hint.contains("~/.zshrc"));
    }
}
