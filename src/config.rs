use secrecy::SecretString;
use std::{env, str::FromStr};

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub openai_api_key: SecretString,
    pub openai_api_base: String,
    pub openai_model: String,
    pub model_timeout_secs: u64,
    pub quiz_page_size: i64,
}

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";
const DEFAULT_OPENAI_API_KEY: &str = "openai_api_key";

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses `key`, falling back to `default` when unset, unparsable or rejected by `accept`.
fn env_parse<T: FromStr>(key: &str, default: T, accept: impl Fn(&T) -> bool) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .filter(|value| accept(value))
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env_or("MONGO_CONN_STRING", "mongodb://localhost:27017"),
            mongo_db_name: env_or("MONGO_DB_NAME", "summary-quiz-local"),
            web_server_host: env_or("WEB_SERVER_HOST", "localhost"),
            web_server_port: env_parse("WEB_SERVER_PORT", 8080, |_| true),
            jwt_secret: SecretString::from(env_or("JWT_SECRET", DEFAULT_JWT_SECRET)),
            jwt_expiration_hours: env_parse("JWT_EXPIRATION_HOURS", 24, |h| *h > 0),
            openai_api_key: SecretString::from(env_or("OPENAI_API_KEY", DEFAULT_OPENAI_API_KEY)),
            openai_api_base: env_or("OPENAI_API_BASE", "https://api.openai.com/v1"),
            openai_model: env_or("OPENAI_MODEL", "gpt-4o-mini"),
            model_timeout_secs: env_parse("MODEL_TIMEOUT_SECS", 120, |s| *s > 0),
            quiz_page_size: env_parse("QUIZ_PAGE_SIZE", 10, |size| *size > 0),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();
        let openai_key = self.openai_api_key.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            panic!(
                "FATAL: JWT_SECRET is using default value! Set JWT_SECRET environment variable to a secure random string."
            );
        }

        if jwt_secret.len() < 32 {
            panic!(
                "FATAL: JWT_SECRET is too short ({}). Must be at least 32 characters for security.",
                jwt_secret.len()
            );
        }

        if openai_key == DEFAULT_OPENAI_API_KEY {
            panic!(
                "FATAL: OPENAI_API_KEY is using default value! Set OPENAI_API_KEY environment variable."
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "summary-quiz-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            openai_api_key: SecretString::from("test-openai-key".to_string()),
            openai_api_base: "http://127.0.0.1:9".to_string(),
            openai_model: "test-model".to_string(),
            model_timeout_secs: 5,
            quiz_page_size: 10,
        }
    }
}
