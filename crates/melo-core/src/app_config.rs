use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Base URL of the storefront REST API, including its path suffix
    /// (e.g. `"https://backoffice.example.com/api"`).
    pub api_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Where the access/refresh token pair is persisted between runs.
    pub token_path: PathBuf,
    /// Optional YAML file with static informational carousel slides.
    pub slides_path: Option<PathBuf>,
    pub autocomplete_debounce_ms: u64,
    /// Phone number used for product inquiry links. Inquiry links are not
    /// offered when unset.
    pub whatsapp_phone: Option<String>,
}

impl AppConfig {
    #[must_use]
    pub fn autocomplete_debounce(&self) -> Duration {
        Duration::from_millis(self.autocomplete_debounce_ms)
    }
}
