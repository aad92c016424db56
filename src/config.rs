use std::env;
use std::time::Duration;

/// Configuração do serviço, lida do ambiente (e do .env via dotenv) na inicialização
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub supabase_url: Option<String>,
    pub supabase_service_key: Option<String>,
    pub store_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            supabase_url: None,
            supabase_service_key: None,
            store_timeout: Duration::from_secs(10),
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| format!("Invalid PORT '{}': {}", raw, e))?,
            None => defaults.port,
        };

        let store_timeout = match var("STORE_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .map_err(|e| format!("Invalid STORE_TIMEOUT_SECS '{}': {}", raw, e))?,
            ),
            None => defaults.store_timeout,
        };

        let cors_allowed_origins = match var("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            None => defaults.cors_allowed_origins,
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            supabase_url: var("SUPABASE_URL"),
            supabase_service_key: var("SUPABASE_SERVICE_ROLE_KEY"),
            store_timeout,
            cors_allowed_origins,
        })
    }

    /// Variáveis do store que não foram definidas (usado no log de startup e no /api/health)
    pub fn missing_store_vars(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.supabase_url.is_none() {
            missing.push("SUPABASE_URL");
        }
        if self.supabase_service_key.is_none() {
            missing.push("SUPABASE_SERVICE_ROLE_KEY");
        }
        missing
    }
}
