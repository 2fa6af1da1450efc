use std::fmt::Write;

use sentiplot_model::{AnalysisRecord, Link};

pub const NO_LINKS_PLACEHOLDER: &str = "No links available";

/// Three-way classification of a sentiment value for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentTone {
    Positive,
    Negative,
    Neutral,
}

impl SentimentTone {
    #[must_use]
    pub fn of(sentiment: f64) -> Self {
        if sentiment > 0.0 {
            Self::Positive
        } else if sentiment < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Positive => "#28a745",
            Self::Negative => "#dc3545",
            Self::Neutral => "#6c757d",
        }
    }
}

/// Escapes text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Renders one detail panel per record, concatenated in record order.
#[must_use]
pub fn render_panels(records: &[AnalysisRecord]) -> String {
    let mut html = String::new();
    for record in records {
        render_panel(&mut html, record);
    }
    html
}

fn render_panel(out: &mut String, record: &AnalysisRecord) {
    let tone = SentimentTone::of(record.sentiment());
    let _ = write!(
        out,
        r#"
            <div class="stock-box">
                <div class="stock-header">{symbol}</div>
                <div class="stock-metrics">
                    <div class="metric">
                        <div class="metric-label">Sentiment</div>
                        <div class="metric-value" style="color: {color}">{sentiment:.2}</div>
                    </div>
                    <div class="metric">
                        <div class="metric-label">Presence</div>
                        <div class="metric-value">{presence:.2}</div>
                    </div>
                </div>
                <div class="summary">
                    <h4>Analysis Summary</h4>
                    <p>{summary}</p>
                </div>
                <div class="links">
                    <h4>Related Posts</h4>
                    {links}
                </div>
            </div>
"#,
        symbol = escape_html(record.symbol()),
        color = tone.color(),
        sentiment = record.sentiment(),
        presence = record.presence(),
        summary = escape_html(record.summary()),
        links = render_links(record.links()),
    );
}

fn render_links(links: &[Link]) -> String {
    if links.is_empty() {
        return format!(r#"<p class="no-links">{NO_LINKS_PLACEHOLDER}</p>"#);
    }
    let mut html = String::from("<ul>");
    for link in links {
        let _ = write!(
            html,
            r#"<li><a href="{url}" target="_blank" rel="noopener noreferrer">{title}</a></li>"#,
            url = escape_html(link.url().as_str()),
            title = escape_html(link.title()),
        );
    }
    html.push_str("</ul>");
    html
}

#[cfg(test)]
mod tests {
    use sentiplot_model::{RawLink, RawRecord};

    use super::*;

    fn record(symbol: &str, sentiment: f64, links: Vec<RawLink>) -> AnalysisRecord {
        RawRecord {
            symbol: symbol.to_string(),
            sentiment,
            presence: 0.5,
            summary: "Mixed views on margins.".to_string(),
            links,
        }
        .validate()
        .expect("valid record")
    }

    #[test]
    fn tone_is_three_way() {
        assert_eq!(SentimentTone::of(0.01), SentimentTone::Positive);
        assert_eq!(SentimentTone::of(-0.01), SentimentTone::Negative);
        assert_eq!(SentimentTone::of(0.0), SentimentTone::Neutral);
        assert_eq!(SentimentTone::of(-0.0), SentimentTone::Neutral);
    }

    #[test]
    fn panel_colors_sentiment_by_tone() {
        let html = render_panels(&[
            record("Up (UP)", 0.5, Vec::new()),
            record("Down (DOWN)", -0.5, Vec::new()),
            record("Flat (FLAT)", 0.0, Vec::new()),
        ]);
        assert!(html.contains(r#"style="color: #28a745">0.50<"#));
        assert!(html.contains(r#"style="color: #dc3545">-0.50<"#));
        assert!(html.contains(r#"style="color: #6c757d">0.00<"#));
    }

    #[test]
    fn empty_links_render_placeholder() {
        let html = render_panels(&[record("Apple Inc. (AAPL)", 0.1, Vec::new())]);
        assert!(html.contains(NO_LINKS_PLACEHOLDER));
        assert!(!html.contains("<ul>"));
    }

    #[test]
    fn links_render_in_order() {
        let links = vec![
            RawLink {
                url: "https://example.com/first".to_string(),
                title: "First post".to_string(),
            },
            RawLink {
                url: "https://example.com/second".to_string(),
                title: "Second post".to_string(),
            },
        ];
        let html = render_panels(&[record("Apple Inc. (AAPL)", 0.1, links)]);
        let first = html.find("First post").expect("first link");
        let second = html.find("Second post").expect("second link");
        assert!(first < second);
        assert!(!html.contains(NO_LINKS_PLACEHOLDER));
    }

    #[test]
    fn user_text_is_escaped() {
        let links = vec![RawLink {
            url: "https://example.com/?q=\"><script>".to_string(),
            title: "<b>bold</b> & co".to_string(),
        }];
        let mut raw = RawRecord {
            symbol: "<i>Evil</i> (EVIL)".to_string(),
            sentiment: 0.2,
            presence: 0.2,
            summary: "<script>alert('x')</script>".to_string(),
            links,
        };
        raw.summary.push_str(" & more");
        let html = render_panels(&[raw.validate().expect("valid record")]);
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<i>Evil</i>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; &amp; co"));
    }
}
