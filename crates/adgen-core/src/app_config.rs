use std::net::SocketAddr;

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

/// Process-wide configuration, loaded from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub completion_base_url: String,
    pub completion_api_key: Option<String>,
    pub completion_model: String,
    pub completion_timeout_secs: u64,
    pub completion_max_retries: u32,
    pub completion_backoff_base_ms: u64,
    pub poll_base_delay_ms: u64,
    pub poll_delay_step_ms: u64,
    pub poll_max_delay_ms: u64,
    pub poll_jitter_ms: u64,
    pub job_deadline_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("completion_base_url", &self.completion_base_url)
            .field(
                "completion_api_key",
                &self.completion_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("completion_model", &self.completion_model)
            .field("completion_timeout_secs", &self.completion_timeout_secs)
            .field("completion_max_retries", &self.completion_max_retries)
            .field(
                "completion_backoff_base_ms",
                &self.completion_backoff_base_ms,
            )
            .field("poll_base_delay_ms", &self.poll_base_delay_ms)
            .field("poll_delay_step_ms", &self.poll_delay_step_ms)
            .field("poll_max_delay_ms", &self.poll_max_delay_ms)
            .field("poll_jitter_ms", &self.poll_jitter_ms)
            .field("job_deadline_secs", &self.job_deadline_secs)
            .finish()
    }
}
