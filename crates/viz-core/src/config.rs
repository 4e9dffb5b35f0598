//! Chart configuration with enumerated defaults
//!
//! `ChartConfig` is what callers write (every field has a default, so an empty
//! JSON object is valid). It is resolved once per render against the chart
//! kind into a `ResolvedConfig`, which is all the renderers ever see.

use serde::{Deserialize, Serialize};

use crate::{ChartError, HighlightArea, ReferenceMarker, Result};

// ============================================================================
// CHART KIND
// ============================================================================

/// Fixed set of chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    MultiLine,
    Bar,
    StackedBar,
    Scatter,
    Area,
    Dumbbell,
    CirclePacking,
    Choropleth,
    DotDensity,
}

impl ChartKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Line => "Line chart",
            Self::MultiLine => "Multi-line chart",
            Self::Bar => "Bar chart",
            Self::StackedBar => "Stacked bar chart",
            Self::Scatter => "Scatter plot",
            Self::Area => "Area chart",
            Self::Dumbbell => "Dumbbell chart",
            Self::CirclePacking => "Circle packing",
            Self::Choropleth => "Choropleth map",
            Self::DotDensity => "Dot density map",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Line => "viz-line",
            Self::MultiLine => "viz-multi-line",
            Self::Bar => "viz-bar",
            Self::StackedBar => "viz-stacked-bar",
            Self::Scatter => "viz-scatter",
            Self::Area => "viz-area",
            Self::Dumbbell => "viz-dumbbell",
            Self::CirclePacking => "viz-circle-packing",
            Self::Choropleth => "viz-choropleth",
            Self::DotDensity => "viz-dot-density",
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Self::Choropleth | Self::DotDensity)
    }

    /// Margins used when the caller does not override a side
    pub fn default_margin(&self) -> ChartMargin {
        match self {
            Self::Line => ChartMargin::new(20.0, 30.0, 25.0, 50.0),
            Self::MultiLine => ChartMargin::new(20.0, 50.0, 25.0, 50.0),
            Self::Area => ChartMargin::new(20.0, 20.0, 25.0, 30.0),
            Self::Bar => ChartMargin::new(25.0, 40.0, 10.0, 100.0),
            Self::StackedBar => ChartMargin::new(20.0, 20.0, 25.0, 20.0),
            Self::Dumbbell => ChartMargin::new(20.0, 40.0, 10.0, 100.0),
            Self::Scatter => ChartMargin::new(20.0, 30.0, 50.0, 60.0),
            Self::CirclePacking | Self::Choropleth | Self::DotDensity => ChartMargin::uniform(0.0),
        }
    }

    /// Size used when the container measures as zero
    pub fn fallback_size(&self) -> (f64, f64) {
        if self.is_map() { (760.0, 570.0) } else { (620.0, 480.0) }
    }
}

// ============================================================================
// MARGINS
// ============================================================================

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        ChartKind::Line.default_margin()
    }
}

/// Per-side overrides; unset sides take the kind's default
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginOverrides {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

impl MarginOverrides {
    pub fn apply(&self, base: ChartMargin) -> ChartMargin {
        ChartMargin {
            top: self.top.unwrap_or(base.top),
            right: self.right.unwrap_or(base.right),
            bottom: self.bottom.unwrap_or(base.bottom),
            left: self.left.unwrap_or(base.left),
        }
    }
}

// ============================================================================
// MAP OPTIONS
// ============================================================================

/// Options specific to choropleth and dot-density maps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapOptions {
    /// Feature property holding the join key
    pub id_property: String,
    /// Choropleth domain is categorical instead of numeric thresholds
    pub categorical: bool,
    /// Numeric thresholds (or category list when `categorical`)
    pub domain: Vec<String>,
    pub border_width: f64,
    pub border_color: Option<String>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            id_property: "ISO3".into(),
            categorical: false,
            domain: Vec::new(),
            border_width: 0.5,
            border_color: None,
        }
    }
}

// ============================================================================
// CHART CONFIG
// ============================================================================

/// Caller-facing chart configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    /// DOM id for the chart root; a random one is generated when unset
    pub id: Option<String>,
    /// Explicit width; skips container measurement
    pub width: Option<f64>,
    /// Explicit height; skips container measurement
    pub height: Option<f64>,
    /// Height as a fraction of width
    pub relative_height: Option<f64>,
    pub margin: MarginOverrides,
    pub colors: Option<Vec<String>>,
    pub color_domain: Option<Vec<String>>,
    /// Tick count requested for time / secondary axes
    pub x_ticks: usize,
    /// Tick count requested for value axes
    pub y_ticks: usize,
    /// Point size, and upper bound of the radius scale
    pub point_radius: f64,
    /// Lower bound of the radius scale
    pub min_point_radius: f64,
    /// Character budget for category labels
    pub truncate_by: usize,
    pub show_ticks: bool,
    pub show_labels: bool,
    pub show_values: bool,
    pub show_legend: bool,
    /// Inner padding between bands, fraction of the step
    pub bar_padding: f64,
    /// chrono format used to parse and print dates
    pub date_format: String,
    pub prefix: String,
    pub suffix: String,
    /// Opacity applied to de-emphasised marks
    pub dim_opacity: f64,
    /// Minimum pixel extent before a value label is drawn
    pub min_label_extent: f64,
    pub reference_lines: Vec<ReferenceMarker>,
    /// Vertical reference line (scatter only)
    pub reference_x: Option<ReferenceMarker>,
    pub highlight_area: HighlightArea,
    pub highlighted_labels: Vec<String>,
    pub x_axis_title: Option<String>,
    pub y_axis_title: Option<String>,
    pub map: MapOptions,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            id: None,
            width: None,
            height: None,
            relative_height: None,
            margin: MarginOverrides::default(),
            colors: None,
            color_domain: None,
            x_ticks: 10,
            y_ticks: 5,
            point_radius: 5.0,
            min_point_radius: 0.25,
            truncate_by: 999,
            show_ticks: true,
            show_labels: true,
            show_values: true,
            show_legend: true,
            bar_padding: 0.25,
            date_format: "%Y".into(),
            prefix: String::new(),
            suffix: String::new(),
            dim_opacity: 0.3,
            min_label_extent: 20.0,
            reference_lines: Vec::new(),
            reference_x: None,
            highlight_area: HighlightArea::default(),
            highlighted_labels: Vec::new(),
            x_axis_title: None,
            y_axis_title: None,
            map: MapOptions::default(),
        }
    }
}

impl ChartConfig {
    /// Compact preset: no ticks, no value labels
    pub fn compact() -> Self {
        Self {
            show_ticks: false,
            show_values: false,
            show_legend: false,
            x_ticks: 4,
            ..Self::default()
        }
    }

    /// Check ranges. Array-length invariants are checked per variant.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(ChartError::config(format!("{name} must be a non-negative number, got {v}")));
                }
            }
        }
        if let Some(r) = self.relative_height {
            if !r.is_finite() || r <= 0.0 {
                return Err(ChartError::config(format!("relative height must be positive, got {r}")));
            }
        }
        if self.min_point_radius < 0.0 || self.point_radius < self.min_point_radius {
            return Err(ChartError::config(format!(
                "radius bounds must satisfy 0 <= min <= max, got [{}, {}]",
                self.min_point_radius, self.point_radius
            )));
        }
        if !(0.0..1.0).contains(&self.bar_padding) {
            return Err(ChartError::config(format!("bar padding must be in [0, 1), got {}", self.bar_padding)));
        }
        if !(0.0..=1.0).contains(&self.dim_opacity) {
            return Err(ChartError::config(format!("dim opacity must be in [0, 1], got {}", self.dim_opacity)));
        }
        if self.y_ticks == 0 || self.x_ticks == 0 {
            return Err(ChartError::config("tick counts must be at least 1"));
        }
        Ok(())
    }

    /// Validate and fill kind-dependent defaults
    pub fn resolved_for(self, kind: ChartKind) -> Result<ResolvedConfig> {
        self.validate()?;
        let margin = self.margin.apply(kind.default_margin());
        let id = self
            .id
            .clone()
            .unwrap_or_else(|| format!("viz-{}", uuid::Uuid::new_v4().simple()));
        Ok(ResolvedConfig {
            kind,
            id,
            margin,
            options: self,
        })
    }
}

/// Configuration after defaults are applied for a given chart kind
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub kind: ChartKind,
    pub id: String,
    pub margin: ChartMargin,
    pub options: ChartConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let cfg: ChartConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ChartConfig::default());
    }

    #[test]
    fn test_margin_override_single_side() {
        let cfg: ChartConfig = serde_json::from_str(r#"{"margin": {"left": 12}}"#).unwrap();
        let resolved = cfg.resolved_for(ChartKind::Bar).unwrap();
        assert_eq!(resolved.margin, ChartMargin::new(25.0, 40.0, 10.0, 12.0));
    }

    #[test]
    fn test_rejects_inverted_radius_bounds() {
        let cfg = ChartConfig {
            point_radius: 0.1,
            min_point_radius: 1.0,
            ..ChartConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ChartError::Config(_))));
    }

    #[test]
    fn test_resolve_keeps_explicit_id() {
        let cfg = ChartConfig {
            id: Some("gdp".into()),
            ..ChartConfig::default()
        };
        assert_eq!(cfg.resolved_for(ChartKind::Line).unwrap().id, "gdp");
    }

    #[test]
    fn test_map_fallback_size() {
        assert_eq!(ChartKind::Choropleth.fallback_size(), (760.0, 570.0));
        assert_eq!(ChartKind::Scatter.fallback_size(), (620.0, 480.0));
    }
}
