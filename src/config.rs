use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the policy QA server.
#[derive(Debug)]
pub struct Config {
    /// API key passed to the generative text backend.
    pub gemini_api_key: String,
    /// Model identifier used for generation requests.
    pub gemini_model: String,
    /// Base URL of the generative backend (overridable for tests and proxies).
    pub gemini_base_url: String,
    /// Secret used to sign and verify bearer tokens.
    pub jwt_secret: String,
    /// Port the HTTP server binds to.
    pub server_port: u16,
    /// Maximum characters per chunk submitted to the generative backend.
    pub max_chunk_size: usize,
    /// Characters of overlap between consecutive chunks.
    pub chunk_overlap: usize,
    /// Upper bound on the number of chunks per request.
    pub max_chunks: usize,
    /// Minimum filtered-text length before the prefix fallback kicks in.
    pub min_relevant_len: usize,
    /// Character cap applied to the fallback prefix of the raw document text.
    pub fallback_prefix_len: usize,
    /// Character cap applied to the filtered text before chunking.
    pub max_text_len: usize,
    /// Seconds each generation call may run before the race is lost.
    pub llm_timeout_secs: u64,
    /// Additional attempts after a failed generation call.
    pub llm_retries: usize,
    /// Optional override for the relevance-filter domain vocabulary.
    pub relevance_vocabulary: Option<Vec<String>>,
}

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_MAX_CHUNK_SIZE: usize = 8_000;
const DEFAULT_CHUNK_OVERLAP: usize = 400;
const DEFAULT_MAX_CHUNKS: usize = 3;
const DEFAULT_MIN_RELEVANT_LEN: usize = 500;
const DEFAULT_FALLBACK_PREFIX_LEN: usize = 10_000;
const DEFAULT_MAX_TEXT_LEN: usize = 24_000;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 18;
const DEFAULT_LLM_RETRIES: usize = 1;

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            gemini_api_key: load_env("GEMINI_API_KEY")?,
            gemini_model: load_env_optional("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: load_env_optional("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            jwt_secret: load_env("JWT_SECRET")?,
            server_port: load_parsed_or("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            max_chunk_size: load_parsed_or("QA_MAX_CHUNK_SIZE", DEFAULT_MAX_CHUNK_SIZE)?,
            chunk_overlap: load_parsed_or("QA_CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP)?,
            max_chunks: load_parsed_or("QA_MAX_CHUNKS", DEFAULT_MAX_CHUNKS)?,
            min_relevant_len: load_parsed_or("QA_MIN_RELEVANT_LEN", DEFAULT_MIN_RELEVANT_LEN)?,
            fallback_prefix_len: load_parsed_or(
                "QA_FALLBACK_PREFIX_LEN",
                DEFAULT_FALLBACK_PREFIX_LEN,
            )?,
            max_text_len: load_parsed_or("QA_MAX_TEXT_LEN", DEFAULT_MAX_TEXT_LEN)?,
            llm_timeout_secs: load_parsed_or("QA_LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?,
            llm_retries: load_parsed_or("QA_LLM_RETRIES", DEFAULT_LLM_RETRIES)?,
            relevance_vocabulary: load_env_optional("RELEVANCE_VOCABULARY").map(parse_vocabulary),
        };

        if config.max_chunk_size == 0 {
            return Err(ConfigError::InvalidValue("QA_MAX_CHUNK_SIZE".to_string()));
        }
        if config.max_chunks == 0 {
            return Err(ConfigError::InvalidValue("QA_MAX_CHUNKS".to_string()));
        }

        Ok(config)
    }
}

fn load_env(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVariable(key.to_string()))
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn load_parsed_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    load_env_optional(key)
        .map(|value| {
            value
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
        .map(|parsed| parsed.unwrap_or(default))
}

fn parse_vocabulary(raw: String) -> Vec<String> {
    raw.split(',')
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        model = %config.gemini_model,
        base_url = %config.gemini_base_url,
        server_port = config.server_port,
        max_chunks = config.max_chunks,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}
