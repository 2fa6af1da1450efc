use sentiplot_core::control::{FetchDefaults, SentiplotControlPlane};
use sentiplot_core::display::PlotDisplay;
use sentiplot_core::forum::{ForumConfig, ForumError, RedditClient};
use sentiplot_core::render::{PlotRenderer, RendererConfig};
use tracing::{info, warn};

use crate::config::SentiplotConfig;

pub fn build_control_plane(config: &SentiplotConfig) -> Result<SentiplotControlPlane, ForumError> {
    let forum_config = ForumConfig::new(
        config.reddit_client_id.clone(),
        config.reddit_client_secret.clone(),
    )
    .with_user_agent(config.user_agent.clone())
    .with_token_url(config.token_url.clone())
    .with_api_base(config.api_base.clone())
    .with_timeout(config.request_timeout);
    let forum = RedditClient::new(forum_config)?;
    if !forum.has_credentials() {
        warn!("REDDIT_CLIENT_ID / REDDIT_CLIENT_SECRET not set; fetch tools will report an error");
    }

    let renderer = PlotRenderer::new(RendererConfig::default().for_subreddit(&config.subreddit));
    let display = PlotDisplay::new(config.output_dir.clone()).with_open_browser(config.open_browser);
    info!(
        output_dir = %config.output_dir.display(),
        open_browser = config.open_browser,
        subreddit = %config.subreddit,
        "control plane ready"
    );

    Ok(SentiplotControlPlane::new(forum, renderer, display).with_defaults(FetchDefaults {
        subreddit: config.subreddit.clone(),
        post_limit: config.post_limit,
        comment_limit: config.comment_limit,
    }))
}
