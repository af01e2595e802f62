use std::env;
use std::path::PathBuf;

/// Environment variable overriding the API base URL.
pub const API_URL_VAR: &str = "MEDISCAN_API_URL";
/// Environment variable overriding where token and history are stored.
pub const STATE_DIR_VAR: &str = "MEDISCAN_STATE_DIR";

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_STATE_DIR: &str = "mediscan_state";

/// Runtime configuration, resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub state_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::resolve(env::var(API_URL_VAR).ok(), env::var(STATE_DIR_VAR).ok())
    }

    fn resolve(api_base_url: Option<String>, state_dir: Option<String>) -> Self {
        let api_base_url = api_base_url
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let state_dir = state_dir
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_state_dir);
        Self {
            api_base_url,
            state_dir,
        }
    }
}

fn default_state_dir() -> PathBuf {
    env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DEFAULT_STATE_DIR)
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use std::path::PathBuf;

    #[test]
    fn overrides_win_over_defaults() {
        let config = AppConfig::resolve(
            Some("https://api.example.com".to_string()),
            Some("/var/lib/mediscan".to_string()),
        );
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.state_dir, PathBuf::from("/var/lib/mediscan"));
    }

    #[test]
    fn absent_values_fall_back_to_defaults() {
        let config = AppConfig::resolve(None, None);
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert!(config.state_dir.ends_with("mediscan_state"));
    }

    #[test]
    fn blank_overrides_are_treated_as_absent() {
        let config = AppConfig::resolve(Some("  ".to_string()), None);
        assert_eq!(config.api_base_url, "http://localhost:8000");
    }
}
