use clap::{Parser, builder::BoolishValueParser};
use sentiplot_core::forum::{
    DEFAULT_API_BASE,
    DEFAULT_COMMENT_LIMIT,
    DEFAULT_POST_LIMIT,
    DEFAULT_SUBREDDIT,
    DEFAULT_TOKEN_URL,
    DEFAULT_USER_AGENT,
    MAX_LISTING_LIMIT,
};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4020";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Parser, Debug)]
#[command(name = "sentiplot-mcpd", version, about = "Sentiplot MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "REDDIT_CLIENT_ID")]
    reddit_client_id: Option<String>,

    #[arg(long, env = "REDDIT_CLIENT_SECRET", hide_env_values = true)]
    reddit_client_secret: Option<String>,

    #[arg(long, env = "SENTIPLOT_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    #[arg(long, env = "SENTIPLOT_REDDIT_TOKEN_URL", default_value = DEFAULT_TOKEN_URL)]
    token_url: String,

    #[arg(long, env = "SENTIPLOT_REDDIT_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    #[arg(
        long,
        env = "SENTIPLOT_REQUEST_TIMEOUT_SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS
    )]
    request_timeout_secs: u64,

    #[arg(long, env = "SENTIPLOT_SUBREDDIT", default_value = DEFAULT_SUBREDDIT)]
    subreddit: String,

    #[arg(long, env = "SENTIPLOT_POST_LIMIT", default_value_t = DEFAULT_POST_LIMIT)]
    post_limit: usize,

    #[arg(long, env = "SENTIPLOT_COMMENT_LIMIT", default_value_t = DEFAULT_COMMENT_LIMIT)]
    comment_limit: usize,

    #[arg(long, env = "SENTIPLOT_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "SENTIPLOT_OPEN_BROWSER",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    open_browser: bool,

    #[arg(
        long = "stdio",
        env = "SENTIPLOT_ENABLE_STDIO",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(long, env = "SENTIPLOT_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone)]
pub struct SentiplotConfig {
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub user_agent: String,
    pub token_url: String,
    pub api_base: String,
    pub request_timeout: Duration,
    pub subreddit: String,
    pub post_limit: usize,
    pub comment_limit: usize,
    pub output_dir: PathBuf,
    pub open_browser: bool,
    pub enable_stdio: bool,
    pub mcp_http_addr: SocketAddr,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl SentiplotConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

fn http_url(name: &'static str, value: String) -> Result<String, ConfigError> {
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(value),
        _ => Err(ConfigError::InvalidSetting { name, value }),
    }
}

impl TryFrom<CliArgs> for SentiplotConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let reddit_client_id = args.reddit_client_id.filter(|value| !value.trim().is_empty());
        let reddit_client_secret = args
            .reddit_client_secret
            .filter(|value| !value.trim().is_empty());

        if args.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "SENTIPLOT_USER_AGENT",
                value: args.user_agent,
            });
        }
        let token_url = http_url("SENTIPLOT_REDDIT_TOKEN_URL", args.token_url)?;
        let api_base = http_url("SENTIPLOT_REDDIT_API_BASE", args.api_base)?;

        if args.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "SENTIPLOT_REQUEST_TIMEOUT_SECS",
                value: args.request_timeout_secs.to_string(),
            });
        }

        let subreddit = args.subreddit.trim().trim_start_matches("r/").to_string();
        if subreddit.is_empty() || subreddit.contains(['/', ' ']) {
            return Err(ConfigError::InvalidSetting {
                name: "SENTIPLOT_SUBREDDIT",
                value: args.subreddit,
            });
        }

        if !(1..=MAX_LISTING_LIMIT).contains(&args.post_limit) {
            return Err(ConfigError::InvalidSetting {
                name: "SENTIPLOT_POST_LIMIT",
                value: args.post_limit.to_string(),
            });
        }

        let output_dir = args.output_dir.unwrap_or_else(std::env::temp_dir);

        Ok(Self {
            reddit_client_id,
            reddit_client_secret,
            user_agent: args.user_agent,
            token_url,
            api_base,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
            subreddit,
            post_limit: args.post_limit,
            comment_limit: args.comment_limit,
            output_dir,
            open_browser: args.open_browser,
            enable_stdio: args.enable_stdio,
            mcp_http_addr: args.mcp_http_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            reddit_client_id: Some("id".to_string()),
            reddit_client_secret: Some("secret".to_string()),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            subreddit: DEFAULT_SUBREDDIT.to_string(),
            post_limit: DEFAULT_POST_LIMIT,
            comment_limit: DEFAULT_COMMENT_LIMIT,
            output_dir: None,
            open_browser: true,
            enable_stdio: false,
            mcp_http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
        }
    }

    #[test]
    fn defaults_parse() {
        let config = SentiplotConfig::try_from(base_args()).expect("config should parse");

        assert_eq!(config.subreddit, "stocks");
        assert_eq!(config.post_limit, 10);
        assert_eq!(config.comment_limit, 50);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.output_dir, std::env::temp_dir());
        assert!(!config.enable_stdio);
    }

    #[test]
    fn blank_credentials_are_dropped() {
        let mut args = base_args();
        args.reddit_client_id = Some("   ".to_string());
        args.reddit_client_secret = Some(String::new());

        let config = SentiplotConfig::try_from(args).expect("config should parse");

        assert!(config.reddit_client_id.is_none());
        assert!(config.reddit_client_secret.is_none());
    }

    #[test]
    fn subreddit_prefix_is_stripped() {
        let mut args = base_args();
        args.subreddit = "r/investing".to_string();

        let config = SentiplotConfig::try_from(args).expect("config should parse");

        assert_eq!(config.subreddit, "investing");
    }

    #[test]
    fn rejects_out_of_range_post_limit() {
        let mut args = base_args();
        args.post_limit = 0;

        let err = SentiplotConfig::try_from(args).err().expect("limit should be rejected");

        assert_eq!(err.to_string(), "invalid SENTIPLOT_POST_LIMIT value: 0");
    }

    #[test]
    fn rejects_non_http_api_base() {
        let mut args = base_args();
        args.api_base = "ftp://example.com".to_string();

        let err = SentiplotConfig::try_from(args).err().expect("scheme should be rejected");

        assert!(matches!(
            err,
            ConfigError::InvalidSetting { name: "SENTIPLOT_REDDIT_API_BASE", .. }
        ));
    }
}
