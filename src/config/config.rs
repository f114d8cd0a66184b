use serde::Deserialize;
use tracing::warn;

/// Development-only fallback for the transcript endpoint. Operators must set
/// ADMIN_API_KEY (or admin.api_key) in any real deployment.
const DEFAULT_ADMIN_API_KEY: &str =
    "kna_9f2e8b7c1d3a5f6e0d2c4b6a8e0d2c4b6a8e0d2c4b6a8e0d2c4b6a8e0d2c4b6";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenAiConfig {
    pub api_base: String,
    pub api_key: String,
    pub default_model: String,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub openai: Option<OpenAiConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub admin: AdminConfig,
    pub llm: LlmConfig,
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("KNOWALL").separator("__"))
            .build()?;

        let mut app_config: AppConfig = settings.try_deserialize()?;

        // Expand environment variables if present like ${OPENAI_API_KEY}
        app_config.server.host = expand_env(&app_config.server.host);
        app_config.storage.path = expand_env(&app_config.storage.path);
        app_config.admin.api_key = expand_env(&app_config.admin.api_key);

        if let Some(ref mut openai) = app_config.llm.openai {
            openai.api_key = expand_env(&openai.api_key);
        }

        if app_config.admin.api_key.is_empty() {
            warn!("Using default admin API key. Set ADMIN_API_KEY in your environment for better security.");
            app_config.admin.api_key = DEFAULT_ADMIN_API_KEY.to_string();
        }

        Ok(app_config)
    }

    /// Whether a provider credential is configured. Checked per request so a
    /// misconfigured deployment fails the chat endpoint cleanly instead of
    /// sending an unauthenticated call upstream.
    pub fn provider_credential_present(&self) -> bool {
        match self.llm.openai {
            Some(ref openai) => !openai.api_key.is_empty(),
            None => false,
        }
    }
}

fn expand_env(val: &str) -> String {
    if val.starts_with("${") && val.ends_with('}') {
        let var_name = &val[2..val.len() - 1];
        std::env::var(var_name).unwrap_or_else(|_| "".to_string())
    } else {
        val.to_string()
    }
}
