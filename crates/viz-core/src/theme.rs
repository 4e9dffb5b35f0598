//! Theme value object injected into every renderer
//!
//! Colours are plain CSS colour strings so the SVG layer can write them
//! straight into attributes.

use serde::{Deserialize, Serialize};

use crate::colors;

/// Colours and typography used by the renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    pub background: String,
    /// Gridlines and secondary tick labels
    pub gray_500: String,
    /// Baselines, axis labels, reference lines
    pub gray_700: String,
    /// Highlight-area fill
    pub gray_300: String,
    /// Tooltip background
    pub gray_200: String,
    /// Text drawn on top of filled marks
    pub on_fill: String,
    /// Crosshair drawn at the hovered x position
    pub crosshair: String,
    /// Single-series default colour
    pub primary: String,
    /// Points whose category is missing
    pub graph_gray: String,
    /// Categories outside an explicit domain, unmatched map features
    pub no_data: String,
    pub categorical: Vec<String>,
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light".into(),
            background: "transparent".into(),
            gray_500: "#A9B1B7".into(),
            gray_700: "#55606E".into(),
            gray_300: "#D4D6D8".into(),
            gray_200: "#F7F7F7".into(),
            on_fill: "#FFFFFF".into(),
            crosshair: "#212121".into(),
            primary: colors::BLUE_600.into(),
            graph_gray: colors::GRAPH_GRAY.into(),
            no_data: colors::NO_DATA.into(),
            categorical: colors::CATEGORICAL.iter().map(|c| c.to_string()).collect(),
            font_family: "ProximaNova, proxima-nova, Helvetica Neue, sans-serif".into(),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".into(),
            background: "#141414".into(),
            gray_500: "#5A5A5A".into(),
            gray_700: "#BDBDBD".into(),
            gray_300: "#2A2A2A".into(),
            gray_200: "#1A1A1A".into(),
            on_fill: "#0A0A0A".into(),
            crosshair: "#FAFAFA".into(),
            ..Self::light()
        }
    }

    /// Built-in presets, looked up by name with a light fallback
    pub fn find(name: &str) -> Self {
        [Self::light(), Self::dark()]
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .unwrap_or_else(Self::light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_falls_back_to_light() {
        assert_eq!(Theme::find("DARK").name, "dark");
        assert_eq!(Theme::find("sepia").name, "light");
    }

    #[test]
    fn test_dark_keeps_palette() {
        assert_eq!(Theme::dark().categorical, Theme::light().categorical);
    }
}
