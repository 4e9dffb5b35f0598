//! Scene: the renderer's output
//!
//! A flat, draw-ordered list of primitives in plot coordinates, plus the
//! records behind them and the hit index for the same layout. The view layer
//! only has to translate marks into SVG elements and apply opacity.

use viz_core::{ChartKind, Datum};
use viz_state::MarkIdentity;

use crate::{ChartDimensions, HitIndex, LegendEntry};

// ============================================================================
// PRIMITIVES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Geometric primitive, plot coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Path {
        d: String,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        anchor: TextAnchor,
        /// Baseline offset, px
        dy: f64,
    },
}

/// Presentation attributes; `None` leaves the SVG default
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub fill: Option<String>,
    pub fill_opacity: Option<f64>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub dash: Option<String>,
    pub font_size: Option<f64>,
    pub bold: bool,
    pub class: Option<&'static str>,
}

impl Style {
    pub fn fill(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn stroke(color: impl Into<String>, width: f64) -> Self {
        Self {
            fill: Some("none".to_string()),
            stroke: Some(color.into()),
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    pub fn text(color: impl Into<String>, font_size: f64) -> Self {
        Self {
            fill: Some(color.into()),
            font_size: Some(font_size),
            ..Self::default()
        }
    }

    pub fn dashed(mut self, dash: impl Into<String>) -> Self {
        self.dash = Some(dash.into());
        self
    }

    pub fn with_fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = Some(opacity);
        self
    }

    pub fn with_stroke(mut self, color: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(color.into());
        self.stroke_width = Some(width);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }
}

/// A primitive with its style and the record it stands for
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub shape: Shape,
    pub style: Style,
    /// Empty for chrome (axes, gridlines), which is never dimmed
    pub identity: MarkIdentity,
}

impl Mark {
    pub fn new(shape: Shape, style: Style) -> Self {
        Self {
            shape,
            style,
            identity: MarkIdentity::none(),
        }
    }

    pub fn with_identity(mut self, identity: MarkIdentity) -> Self {
        self.identity = identity;
        self
    }
}

// ============================================================================
// HOVER FOCUS
// ============================================================================

/// Focus dot drawn on the hovered sample of bisection charts
#[derive(Debug, Clone, PartialEq)]
pub struct FocusPoint {
    pub x: f64,
    pub y: f64,
    pub color: String,
}

// ============================================================================
// SCENE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub kind: ChartKind,
    pub dims: ChartDimensions,
    /// Draw order: first is bottom-most
    pub marks: Vec<Mark>,
    /// Record behind each datum index used by marks and the hit index
    pub datums: Vec<Datum>,
    pub hit: HitIndex,
    pub legend: Vec<LegendEntry>,
    /// Crosshair colour; `Some` on bisection charts
    pub crosshair: Option<String>,
    /// Focus dots per datum index (bisection charts)
    pub focus: Vec<Vec<FocusPoint>>,
}

impl Scene {
    pub fn new(kind: ChartKind, dims: ChartDimensions) -> Self {
        Self {
            kind,
            dims,
            marks: Vec::new(),
            datums: Vec::new(),
            hit: HitIndex::None,
            legend: Vec::new(),
            crosshair: None,
            focus: Vec::new(),
        }
    }

    /// Nothing to draw: unmeasured, empty or rejected input
    pub fn placeholder(kind: ChartKind, dims: ChartDimensions) -> Self {
        Self::new(kind, dims)
    }

    pub fn is_placeholder(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    pub fn datum(&self, index: usize) -> Option<&Datum> {
        self.datums.get(index)
    }

    /// Crosshair line and focus dots for a hovered datum
    pub fn hover_overlay(&self, hovered: usize) -> Vec<Mark> {
        let mut overlay = Vec::new();
        let (Some(color), Some(x)) = (&self.crosshair, self.hit.crosshair_x(hovered)) else {
            return overlay;
        };
        overlay.push(Mark::new(
            Shape::Line {
                x1: x,
                y1: 0.0,
                x2: x,
                y2: self.dims.inner_height(),
            },
            Style::stroke(color.clone(), 1.0).dashed("4 8").class("crosshair"),
        ));
        for point in self.focus.get(hovered).into_iter().flatten() {
            overlay.push(Mark::new(
                Shape::Circle {
                    cx: point.x,
                    cy: point.y,
                    r: 5.0,
                },
                Style::fill(point.color.clone()).with_stroke("#FFFFFF", 2.0),
            ));
        }
        overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chartkit::LinearScale;
    use crate::hit::Bisector;

    #[test]
    fn test_placeholder_has_no_marks() {
        let scene = Scene::placeholder(ChartKind::Line, ChartDimensions::default());
        assert!(scene.is_placeholder());
        assert!(scene.hover_overlay(0).is_empty());
    }

    #[test]
    fn test_hover_overlay_draws_crosshair_and_focus() {
        let dims = ChartDimensions::new(200.0, 100.0).with_margin(viz_core::ChartMargin::uniform(0.0));
        let mut scene = Scene::new(ChartKind::Line, dims);
        let scale = LinearScale::new().domain(0.0, 1.0).range(0.0, 200.0);
        scene.hit = HitIndex::Bisect(Bisector::new(vec![(0.0, 0), (1.0, 1)], scale));
        scene.crosshair = Some("#212121".to_string());
        scene.focus = vec![
            vec![],
            vec![FocusPoint {
                x: 200.0,
                y: 40.0,
                color: "#006EB5".to_string(),
            }],
        ];

        let overlay = scene.hover_overlay(1);
        assert_eq!(overlay.len(), 2);
        assert_eq!(
            overlay[0].shape,
            Shape::Line {
                x1: 200.0,
                y1: 0.0,
                x2: 200.0,
                y2: 100.0
            }
        );
    }
}
