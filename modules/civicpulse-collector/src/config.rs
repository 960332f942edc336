use anyhow::{bail, Context, Result};

/// Default polling interval: 5 minutes.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 300_000;

/// Collector configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Post identifiers to poll each cycle, in configured order.
    pub post_ids: Vec<String>,

    // Graph API
    pub graph_base_url: String,
    pub access_token: String,

    // Database
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_user: String,
    pub db_password: String,

    /// Milliseconds between cycle starts.
    pub poll_interval_ms: u64,
}

impl CollectorConfig {
    /// Load configuration from the environment (and `.env` if present).
    /// Missing required variables are a startup error, not a panic deep
    /// in the pipeline.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let post_ids: Vec<String> = required_env("FB_POST_IDS")?
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if post_ids.is_empty() {
            bail!("FB_POST_IDS must contain at least one post identifier");
        }

        let config = Self {
            post_ids,
            graph_base_url: std::env::var("FB_GRAPH_URL")
                .unwrap_or_else(|_| graph_client::DEFAULT_BASE_URL.to_string()),
            access_token: required_env("FB_ACCESS_TOKEN")?,
            db_host: required_env("DB_HOST")?,
            db_port: std::env::var("DB_PORT")
                .unwrap_or_else(|_| "5432".to_string())
                .parse()
                .context("DB_PORT must be a number")?,
            db_name: required_env("DB_NAME")?,
            db_user: required_env("DB_USER")?,
            db_password: required_env("DB_PASSWORD")?,
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS")
                .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL_MS.to_string())
                .parse()
                .context("POLL_INTERVAL_MS must be a number")?,
        };

        config.log_redacted();
        Ok(config)
    }

    fn log_redacted(&self) {
        fn preview(val: &str) -> String {
            let n = val.len().min(5);
            format!("{}...({} chars)", &val[..n], val.len())
        }

        tracing::info!("Config loaded:");
        tracing::info!("  FB_POST_IDS: {} posts", self.post_ids.len());
        tracing::info!("  FB_GRAPH_URL: {}", self.graph_base_url);
        tracing::info!("  FB_ACCESS_TOKEN: {}", preview(&self.access_token));
        tracing::info!(
            "  DB: {}@{}:{}/{}",
            self.db_user,
            self.db_host,
            self.db_port,
            self.db_name
        );
        tracing::info!("  POLL_INTERVAL_MS: {}", self.poll_interval_ms);
    }
}

fn required_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{key} environment variable is required"))
}
