pub const SENTIMENT_MIN: f64 = -1.0;
pub const SENTIMENT_MAX: f64 = 1.0;
pub const PRESENCE_MIN: f64 = 0.0;
pub const PRESENCE_MAX: f64 = 1.0;

/// Upper bound on `summary`, counted in characters.
pub const SUMMARY_MAX_CHARS: usize = 2000;
pub const LINK_TITLE_MIN_CHARS: usize = 1;
pub const LINK_TITLE_MAX_CHARS: usize = 200;
pub const TICKER_MIN_LEN: usize = 1;
pub const TICKER_MAX_LEN: usize = 5;

pub const FIELD_SYMBOL: &str = "symbol";
pub const FIELD_SENTIMENT: &str = "sentiment";
pub const FIELD_PRESENCE: &str = "presence";
pub const FIELD_SUMMARY: &str = "summary";
pub const FIELD_LINKS: &str = "links";
pub const FIELD_URL: &str = "url";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_COLOR: &str = "color";

pub const POINT_RADIUS_MIN: f64 = 5.0;
pub const POINT_RADIUS_MAX: f64 = 20.0;
pub const POINT_RADIUS_SCALE: f64 = 20.0;
pub const POINT_HOVER_EXTRA: f64 = 3.0;
