//! Plot rendering.
//!
//! Turns an ordered list of validated records into chart datasets, detail
//! panels, and finally one self-contained HTML document. Rendering is pure;
//! writing and opening the document is left to [`crate::display`].

mod document;
pub mod palette;
pub mod panels;

use std::{error::Error, fmt};

use sentiplot_model::{AnalysisRecord, DatasetDescriptor, ValidationError};

pub use palette::{DEFAULT_PALETTE, Palette};
pub use panels::{NO_LINKS_PLACEHOLDER, SentimentTone, escape_html};

pub const DEFAULT_TITLE: &str = "r/Stocks Sentiment Analysis";

#[derive(Debug)]
pub enum RenderError {
    EmptyPalette,
    InvalidColor(ValidationError),
    Serialize(serde_json::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPalette => write!(f, "palette must contain at least one color"),
            Self::InvalidColor(err) => write!(f, "invalid palette entry: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize datasets: {err}"),
        }
    }
}

impl Error for RenderError {}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

/// Renderer settings: dataset colors and the page heading.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    pub palette: Palette,
    pub title: String,
}

impl RendererConfig {
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Uses `r/<subreddit> Sentiment Analysis` as the heading.
    #[must_use]
    pub fn for_subreddit(self, subreddit: &str) -> Self {
        self.with_title(format!("r/{subreddit} Sentiment Analysis"))
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

/// A finished visualization document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotDocument {
    html: String,
    dataset_count: usize,
}

impl PlotDocument {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.html
    }

    #[must_use]
    pub const fn dataset_count(&self) -> usize {
        self.dataset_count
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlotRenderer {
    config: RendererConfig,
}

impl PlotRenderer {
    #[must_use]
    pub const fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// One dataset per record, in record order.
    #[must_use]
    pub fn build_datasets(&self, records: &[AnalysisRecord]) -> Vec<DatasetDescriptor> {
        records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                DatasetDescriptor::from_record(record, self.config.palette.color_for(idx))
            })
            .collect()
    }

    /// Concatenated detail panels, in record order.
    #[must_use]
    pub fn build_detail_panels(&self, records: &[AnalysisRecord]) -> String {
        panels::render_panels(records)
    }

    /// Renders the complete document.
    ///
    /// # Errors
    /// Returns `RenderError::Serialize` if the datasets cannot be serialized.
    pub fn render(&self, records: &[AnalysisRecord]) -> Result<PlotDocument, RenderError> {
        let datasets = self.build_datasets(records);
        let datasets_json = document::script_json(&datasets)?;
        let panels_html = self.build_detail_panels(records);
        let html = document::assemble(
            &escape_html(&self.config.title),
            &datasets_json,
            &panels_html,
        );
        Ok(PlotDocument {
            html,
            dataset_count: datasets.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use sentiplot_model::RawRecord;

    use super::*;

    fn record(symbol: &str, presence: f64) -> AnalysisRecord {
        RawRecord {
            symbol: symbol.to_string(),
            sentiment: 0.1,
            presence,
            summary: String::new(),
            links: Vec::new(),
        }
        .validate()
        .expect("valid record")
    }

    #[test]
    fn radius_follows_presence() {
        let renderer = PlotRenderer::default();
        let datasets = renderer.build_datasets(&[
            record("Zero (Z)", 0.0),
            record("Quarter (Q)", 0.25),
            record("Full (F)", 1.0),
        ]);
        let radii: Vec<f64> = datasets.iter().map(|d| d.radius).collect();
        assert_eq!(radii, [5.0, 5.0, 20.0]);
        for dataset in &datasets {
            assert!((dataset.hover_radius - dataset.radius - 3.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn colors_cycle_past_palette_length() {
        let palette = Palette::parse(["#111111", "#222222"]).expect("valid palette");
        let renderer = PlotRenderer::new(RendererConfig::new(palette));
        let records: Vec<_> = ["A (A)", "B (B)", "C (C)", "D (D)", "E (E)"]
            .into_iter()
            .map(|symbol| record(symbol, 0.5))
            .collect();
        let datasets = renderer.build_datasets(&records);
        for (first, wrapped) in datasets.iter().zip(&datasets[2..]) {
            assert_eq!(first.fill_color, wrapped.fill_color);
            assert_eq!(first.stroke_color, wrapped.stroke_color);
        }
        assert_eq!(datasets[0].fill_color, datasets[0].stroke_color);
        assert_ne!(datasets[0].fill_color, datasets[1].fill_color);
    }

    #[test]
    fn title_is_escaped() {
        let renderer = PlotRenderer::new(RendererConfig::default().with_title("<Stocks>"));
        let document = renderer.render(&[]).expect("render");
        assert!(document.as_str().contains("<title>&lt;Stocks&gt;</title>"));
    }

    #[test]
    fn subreddit_title() {
        let config = RendererConfig::default().for_subreddit("wallstreetbets");
        assert_eq!(config.title, "r/wallstreetbets Sentiment Analysis");
    }
}
