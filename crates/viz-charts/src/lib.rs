//! # viz-charts
//!
//! D3.js-style chart pipeline: scales, hit testing, tooltip placement and
//! pure scene rendering. Nothing here touches the DOM; `viz-components`
//! turns a [`Scene`] into SVG.
//!
//! ## Architecture
//!
//! Uses Strategy pattern for:
//! - Scale computation (linear, sqrt, time, band, threshold)
//! - Path generation (linear and monotone curves)
//! - Hit testing (bisection, Voronoi, bands, regions)
//!
//! ## Modules
//!
//! - `chartkit` - Core primitives: scales, paths, text helpers
//! - `scales` - Domain construction from data (zero anchoring, nicing)
//! - `color` - Categorical colour binding
//! - `hit` - Nearest-datum lookup for pointer interaction
//! - `tooltip` - Viewport-safe tooltip placement
//! - `sizing` - Explicit / measured / fallback size resolution
//! - `stack` - Cumulative offsets for stacked bars and areas
//! - `pack` - Front-chain circle packing
//! - `geo` - Geographic collaborator trait and a default projection
//! - `scene` - Drawable primitives with emphasis identities
//! - `interaction` - Pointer and legend event reducer
//! - `render` - One renderer per chart variant, producing a `Scene`

pub mod chartkit;
pub mod color;
pub mod geo;
pub mod hit;
pub mod interaction;
pub mod pack;
pub mod render;
pub mod scales;
pub mod scene;
pub mod sizing;
pub mod stack;
pub mod tooltip;

pub use chartkit::*;
pub use color::*;
pub use geo::*;
pub use hit::*;
pub use interaction::*;
pub use render::*;
pub use scene::*;
pub use sizing::*;
pub use tooltip::*;

// Re-export colors from viz-core for convenience
pub use viz_core::{ChartMargin, colors};

/// Chart dimensions with margin handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::default(),
        }
    }

    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Inner width (excluding margins)
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Inner height (excluding margins)
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// SVG transform for inner chart area
    pub fn inner_transform(&self) -> String {
        format!("translate({}, {})", self.margin.left, self.margin.top)
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    /// Outer (svg) coordinates to plot coordinates
    pub fn to_plot(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.margin.left, y - self.margin.top)
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(620.0, 480.0)
    }
}
