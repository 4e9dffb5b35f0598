//! # viz-components
//!
//! Leptos components for vizkit charts.
//!
//! - `ChartFrame` - measures its container, renders any `ChartVariant` and
//!   routes pointer events through the reducer
//! - `SceneSvg` - draws a `Scene` as SVG with reactive per-mark opacity
//! - `ColorLegend` - clickable legend driving the category selection
//! - `Tooltip` - viewport-anchored tooltip box
//! - `use_container_width` - `ResizeObserver` hook

mod frame;
mod legend;
mod scene_svg;
mod sizing;
mod tooltip;

pub use frame::*;
pub use legend::*;
pub use scene_svg::*;
pub use sizing::*;
pub use tooltip::*;
