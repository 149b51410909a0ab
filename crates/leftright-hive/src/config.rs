use clap::Parser;
use std::net::{IpAddr, Ipv4Addr};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Community hand-ratio aggregator")]
pub struct HiveConfig {
    /// SQLite URL of the ratio store.
    #[arg(long, env = "LEFTRIGHT_DB", default_value = "sqlite://leftright.db")]
    pub db: String,

    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Maximum accepted request body, in bytes.
    #[arg(long, default_value_t = 16 * 1024)]
    pub body_limit: usize,

    /// `owner/name` of the repository whose stars are shown.
    #[arg(long, default_value = "ahmedkhaleel2004/leftright")]
    pub stars_repo: String,

    #[arg(long, default_value = "https://api.github.com")]
    pub github_api: String,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    #[arg(long, default_value_t = 300)]
    pub stars_ttl_secs: u64,

    /// How long a failed lookup is remembered before retrying upstream.
    #[arg(long, default_value_t = 60)]
    pub stars_failure_ttl_secs: u64,
}

impl Default for HiveConfig {
    fn default() -> Self {
        Self {
            db: "sqlite::memory:".to_string(),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            body_limit: 16 * 1024,
            stars_repo: "ahmedkhaleel2004/leftright".to_string(),
            github_api: "https://api.github.com".to_string(),
            github_token: None,
            stars_ttl_secs: 300,
            stars_failure_ttl_secs: 60,
        }
    }
}
