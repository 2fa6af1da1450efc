use sentiplot_model::Color;

use super::RenderError;

/// Colors assigned to datasets in record order.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#FF6384",
    "#36A2EB",
    "#FFCE56",
    "#4BC0C0",
    "#9966FF",
    "#FF9F40",
    "#FF6384",
    "#C9CBCF",
    "#4BC0C0",
    "#FF6384",
];

/// Immutable, non-empty list of dataset colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Creates a palette from already parsed colors.
    ///
    /// # Errors
    /// Returns `RenderError::EmptyPalette` if `colors` is empty.
    pub fn new(colors: Vec<Color>) -> Result<Self, RenderError> {
        if colors.is_empty() {
            return Err(RenderError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Parses a palette from `#RRGGBB` strings.
    ///
    /// # Errors
    /// Returns `RenderError::InvalidColor` for the first malformed entry, or
    /// `RenderError::EmptyPalette` if no values are given.
    pub fn parse<I, S>(values: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let colors = values
            .into_iter()
            .map(|value| Color::parse(value.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(RenderError::InvalidColor)?;
        Self::new(colors)
    }

    /// Color for the dataset at `index`, cycling through the palette.
    #[must_use]
    pub fn color_for(&self, index: usize) -> &Color {
        &self.colors[index % self.colors.len()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; a palette cannot be constructed empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE
                .iter()
                .filter_map(|hex| Color::parse(hex).ok())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_keeps_every_entry() {
        let palette = Palette::default();
        assert_eq!(palette.len(), DEFAULT_PALETTE.len());
        assert_eq!(palette.color_for(1).as_str(), "#36A2EB");
    }

    #[test]
    fn colors_cycle_by_index() {
        let palette = Palette::parse(["#000000", "#111111", "#222222"]).expect("valid palette");
        assert_eq!(palette.color_for(0), palette.color_for(3));
        assert_eq!(palette.color_for(2), palette.color_for(5));
        assert_ne!(palette.color_for(0), palette.color_for(1));
    }

    #[test]
    fn empty_or_malformed_palettes_are_rejected() {
        assert!(matches!(
            Palette::parse(Vec::<String>::new()),
            Err(RenderError::EmptyPalette)
        ));
        assert!(matches!(
            Palette::parse(["#000000", "blue"]),
            Err(RenderError::InvalidColor(err)) if err.value == "blue"
        ));
    }
}
