use shuttle_runtime::SecretStore;
use tracing::{info, warn};

const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Origin prefixes the CORS fairing will echo back.
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
        }
    }
}

impl AppConfig {
    pub fn from_secrets(secrets: &SecretStore) -> Self {
        Self::from_lookup(|key| secrets.get(key))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let Some(raw) = lookup(CORS_ALLOWED_ORIGINS) else {
            info!("{CORS_ALLOWED_ORIGINS} not set, using default: {DEFAULT_ALLOWED_ORIGIN}");
            return Self::default();
        };

        let allowed_origins: Vec<String> = raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        if allowed_origins.is_empty() {
            warn!("{CORS_ALLOWED_ORIGINS} is blank, using default: {DEFAULT_ALLOWED_ORIGIN}");
            return Self::default();
        }

        Self { allowed_origins }
    }

    pub fn allows_origin(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| origin.starts_with(allowed.as_str()))
    }
}
