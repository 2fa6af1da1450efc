use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::schema::{
    FIELD_COLOR,
    POINT_HOVER_EXTRA,
    POINT_RADIUS_MAX,
    POINT_RADIUS_MIN,
    POINT_RADIUS_SCALE,
};
use crate::validate::{Constraint, ValidationError};

/// Unvalidated link as supplied by a caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawLink {
    pub url: String,
    pub title: String,
}

/// Unvalidated analysis record as supplied by a caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRecord {
    pub symbol: String,
    pub sentiment: f64,
    pub presence: f64,
    pub summary: String,
    #[serde(default)]
    pub links: Vec<RawLink>,
}

/// Reference to a source post where a stock was mentioned.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Link {
    url: Url,
    title: String,
}

impl Link {
    pub(crate) const fn new(url: Url, title: String) -> Self {
        Self { url, title }
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// One stock's aggregated sentiment analysis.
///
/// Only obtainable through [`RawRecord::validate`], so every instance satisfies
/// the symbol pattern, the closed sentiment/presence intervals, and the length
/// bounds on text fields.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisRecord {
    symbol: String,
    #[serde(skip)]
    ticker: String,
    sentiment: f64,
    presence: f64,
    summary: String,
    links: Vec<Link>,
}

impl AnalysisRecord {
    pub(crate) const fn new(
        symbol: String,
        ticker: String,
        sentiment: f64,
        presence: f64,
        summary: String,
        links: Vec<Link>,
    ) -> Self {
        Self {
            symbol,
            ticker,
            sentiment,
            presence,
            summary,
            links,
        }
    }

    /// Display symbol, e.g. `Apple Inc. (AAPL)`.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Ticker extracted from the trailing parentheses of the symbol.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    #[must_use]
    pub const fn sentiment(&self) -> f64 {
        self.sentiment
    }

    #[must_use]
    pub const fn presence(&self) -> f64 {
        self.presence
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Links in the order the caller supplied them.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }
}

/// A `#RRGGBB` color string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Parses a color in `#RRGGBB` form.
    ///
    /// # Errors
    /// Returns `ValidationError` if the value is not `#` followed by 6 hex digits.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let is_hex = value
            .strip_prefix('#')
            .is_some_and(|digits| digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()));
        if is_hex {
            Ok(Self(value.to_string()))
        } else {
            Err(ValidationError::new(FIELD_COLOR, Constraint::HexColor, value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coordinates of a plotted point.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct DatasetPoint {
    /// Sentiment.
    pub x: f64,
    /// Presence.
    pub y: f64,
}

/// Chart dataset derived from one [`AnalysisRecord`].
///
/// Field names serialize to the keys the scatter chart expects.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetDescriptor {
    pub label: String,
    pub data: Vec<DatasetPoint>,
    #[serde(rename = "backgroundColor")]
    pub fill_color: Color,
    #[serde(rename = "borderColor")]
    pub stroke_color: Color,
    #[serde(rename = "pointRadius")]
    pub radius: f64,
    #[serde(rename = "pointHoverRadius")]
    pub hover_radius: f64,
}

impl DatasetDescriptor {
    /// Builds the single-point dataset for a record using one palette color for
    /// both fill and stroke.
    #[must_use]
    pub fn from_record(record: &AnalysisRecord, color: &Color) -> Self {
        let radius = point_radius(record.presence());
        Self {
            label: record.symbol().to_string(),
            data: vec![DatasetPoint {
                x: record.sentiment(),
                y: record.presence(),
            }],
            fill_color: color.clone(),
            stroke_color: color.clone(),
            radius,
            hover_radius: radius + POINT_HOVER_EXTRA,
        }
    }
}

/// Point radius for a presence value: scaled, then clamped to the visible range.
#[must_use]
pub fn point_radius(presence: f64) -> f64 {
    (presence * POINT_RADIUS_SCALE).clamp(POINT_RADIUS_MIN, POINT_RADIUS_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_accepts_mixed_case_hex() {
        assert_eq!(Color::parse("#FF6384").expect("valid").as_str(), "#FF6384");
        assert!(Color::parse("#c9cbcf").is_ok());
    }

    #[test]
    fn color_rejects_malformed_values() {
        for value in ["FF6384", "#FFF", "#GG6384", "#FF63841", ""] {
            let err = Color::parse(value).expect_err("should reject");
            assert_eq!(err.constraint, Constraint::HexColor);
            assert_eq!(err.value, value);
        }
    }

    #[test]
    fn point_radius_is_clamped() {
        assert!((point_radius(0.0) - 5.0).abs() < f64::EPSILON);
        assert!((point_radius(0.25) - 5.0).abs() < f64::EPSILON);
        assert!((point_radius(0.5) - 10.0).abs() < f64::EPSILON);
        assert!((point_radius(1.0) - 20.0).abs() < f64::EPSILON);
    }
}
