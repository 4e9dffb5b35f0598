//! Shared chrome: gridlines, tick labels, zero baselines, reference lines
//! and highlight areas.

use viz_core::{ChartConfig, ReferenceMarker, Theme, format_tick, format_timestamp};

use crate::chartkit::{LinearScale, Scale, TimeScale, finite_or};
use crate::{ChartDimensions, ColorBinding, LegendEntry, Mark, Scene, Shape, Style, TextAnchor};

/// Font size of tick and data labels, px
pub(crate) const LABEL_SIZE: f64 = 12.0;
/// Gridlines start this far left of the plot, px
const GRID_OVERHANG: f64 = 20.0;

/// Per-render context handed to every variant renderer
pub(crate) struct Frame<'a> {
    pub dims: ChartDimensions,
    pub options: &'a ChartConfig,
    pub theme: &'a Theme,
    /// Plot width, px
    pub width: f64,
    /// Plot height, px
    pub height: f64,
}

impl<'a> Frame<'a> {
    pub fn new(dims: ChartDimensions, options: &'a ChartConfig, theme: &'a Theme) -> Self {
        Self {
            dims,
            options,
            theme,
            width: dims.inner_width(),
            height: dims.inner_height(),
        }
    }

    pub fn text(&self, x: f64, y: f64, text: impl Into<String>, anchor: TextAnchor, dy: f64) -> Shape {
        Shape::Text {
            x: finite_or(x, 0.0),
            y: finite_or(y, 0.0),
            text: text.into(),
            anchor,
            dy,
        }
    }

    /// Value with the configured prefix and suffix
    pub fn format_value(&self, value: Option<f64>) -> String {
        viz_core::format_number(value, &self.options.prefix, &self.options.suffix)
    }

    /// Whether a value label fits a primitive of `extent` px
    pub fn label_fits(&self, extent: f64) -> bool {
        self.options.show_values && extent > self.options.min_label_extent
    }

    /// Colour binding for per-point categories. Without any category every
    /// point gets the first configured colour, or the theme's primary.
    pub fn bind_colors<'k>(&self, keys: impl IntoIterator<Item = Option<&'k str>> + Clone) -> ColorBinding {
        if keys.clone().into_iter().all(|k| k.is_none()) {
            let color = self
                .options
                .colors
                .as_ref()
                .and_then(|c| c.first().cloned())
                .unwrap_or_else(|| self.theme.primary.clone());
            return ColorBinding::constant(color, self.theme);
        }
        ColorBinding::bind(
            keys,
            self.options.color_domain.as_deref(),
            self.options.colors.as_deref(),
            self.theme,
        )
    }

    /// Legend rows when the legend is enabled
    pub fn legend(&self, binding: &ColorBinding) -> Vec<LegendEntry> {
        if self.options.show_legend { binding.legend() } else { Vec::new() }
    }
}

// ============================================================================
// VALUE AXES
// ============================================================================

/// Horizontal gridlines with tick labels on the left, and the zero line
pub(crate) fn value_axis_y(scene: &mut Scene, frame: &Frame<'_>, y: &LinearScale) {
    for tick in y.ticks(frame.options.y_ticks) {
        if tick == 0.0 {
            continue;
        }
        let py = y.scale(tick);
        scene.push(Mark::new(
            Shape::Line {
                x1: -GRID_OVERHANG,
                y1: py,
                x2: frame.width,
                y2: py,
            },
            Style::stroke(frame.theme.gray_500.clone(), 1.0).dashed("4,8").class("gridline"),
        ));
        if frame.options.show_ticks {
            scene.push(Mark::new(
                frame.text(-GRID_OVERHANG - 5.0, py, format_tick(tick), TextAnchor::End, 3.0),
                Style::text(frame.theme.gray_500.clone(), LABEL_SIZE).class("y-axis-text"),
            ));
        }
    }
    zero_line_y(scene, frame, y);
}

/// Explicit zero baseline on a vertical value axis
pub(crate) fn zero_line_y(scene: &mut Scene, frame: &Frame<'_>, y: &LinearScale) {
    let py = finite_or(y.scale(0.0), frame.height);
    scene.push(Mark::new(
        Shape::Line {
            x1: -GRID_OVERHANG,
            y1: py,
            x2: frame.width,
            y2: py,
        },
        Style::stroke(frame.theme.gray_700.clone(), 1.0).class("zero-line"),
    ));
    if frame.options.show_ticks {
        scene.push(Mark::new(
            frame.text(-GRID_OVERHANG - 5.0, py, format_tick(0.0), TextAnchor::End, 3.0),
            Style::text(frame.theme.gray_700.clone(), LABEL_SIZE).class("y-axis-text"),
        ));
    }
}

/// Vertical gridlines with tick labels at `label_y`, and the zero line
pub(crate) fn value_axis_x(scene: &mut Scene, frame: &Frame<'_>, x: &LinearScale, label_y: f64, label_dy: f64) {
    for tick in x.ticks(frame.options.x_ticks) {
        let px = x.scale(tick);
        if tick != 0.0 {
            scene.push(Mark::new(
                Shape::Line {
                    x1: px,
                    y1: 0.0,
                    x2: px,
                    y2: frame.height,
                },
                Style::stroke(frame.theme.gray_500.clone(), 1.0).dashed("4,8").class("gridline"),
            ));
        }
        if frame.options.show_ticks {
            scene.push(Mark::new(
                frame.text(px, label_y, format_tick(tick), TextAnchor::Middle, label_dy),
                Style::text(frame.theme.gray_500.clone(), LABEL_SIZE).class("x-axis-text"),
            ));
        }
    }
    let px = finite_or(x.scale(0.0), 0.0);
    scene.push(Mark::new(
        Shape::Line {
            x1: px,
            y1: 0.0,
            x2: px,
            y2: frame.height,
        },
        Style::stroke(frame.theme.gray_700.clone(), 1.0).class("zero-line"),
    ));
}

/// Date labels under the plot
pub(crate) fn time_axis_x(scene: &mut Scene, frame: &Frame<'_>, x: &TimeScale) {
    if !frame.options.show_ticks {
        return;
    }
    for tick in x.ticks(frame.options.x_ticks) {
        scene.push(Mark::new(
            frame.text(
                x.scale(tick),
                frame.height,
                format_timestamp(tick, &frame.options.date_format),
                TextAnchor::Middle,
                15.0,
            ),
            Style::text(frame.theme.gray_700.clone(), LABEL_SIZE).class("x-axis-text"),
        ));
    }
}

/// Axis titles, when configured
pub(crate) fn axis_titles(scene: &mut Scene, frame: &Frame<'_>) {
    if let Some(title) = &frame.options.x_axis_title {
        scene.push(Mark::new(
            frame.text(frame.width / 2.0, frame.height, title.clone(), TextAnchor::Middle, 40.0),
            Style::text(frame.theme.gray_700.clone(), LABEL_SIZE).bold().class("axis-title"),
        ));
    }
    if let Some(title) = &frame.options.y_axis_title {
        scene.push(Mark::new(
            frame.text(-frame.dims.margin.left + 5.0, -5.0, title.clone(), TextAnchor::Start, 0.0),
            Style::text(frame.theme.gray_700.clone(), LABEL_SIZE).bold().class("axis-title"),
        ));
    }
}

// ============================================================================
// ANNOTATIONS
// ============================================================================

fn reference_style(frame: &Frame<'_>) -> Style {
    Style::stroke(frame.theme.gray_700.clone(), 1.5).dashed("4,4").class("reference-line")
}

/// Horizontal reference lines across the plot, labelled at the right end.
/// Drawn on the given scale only; markers never widen a domain.
pub(crate) fn reference_lines_y(scene: &mut Scene, frame: &Frame<'_>, y: &LinearScale, markers: &[ReferenceMarker]) {
    let right = frame.width + frame.dims.margin.right;
    for marker in markers {
        let py = y.scale(marker.value);
        if !py.is_finite() {
            continue;
        }
        scene.push(Mark::new(
            Shape::Line {
                x1: -GRID_OVERHANG,
                y1: py,
                x2: right,
                y2: py,
            },
            reference_style(frame),
        ));
        scene.push(Mark::new(
            frame.text(right, py, marker.label.clone(), TextAnchor::End, -5.0),
            Style::text(frame.theme.gray_700.clone(), LABEL_SIZE).bold(),
        ));
    }
}

/// Vertical reference line, labelled at the top. The label flips to the
/// left of the line near the right edge.
pub(crate) fn reference_line_x(scene: &mut Scene, frame: &Frame<'_>, x: &LinearScale, marker: &ReferenceMarker) {
    let px = x.scale(marker.value);
    if !px.is_finite() {
        return;
    }
    scene.push(Mark::new(
        Shape::Line {
            x1: px,
            y1: 0.0,
            x2: px,
            y2: frame.height,
        },
        reference_style(frame),
    ));
    let (anchor, dx) = if px > frame.width * 0.75 {
        (TextAnchor::End, -5.0)
    } else {
        (TextAnchor::Start, 5.0)
    };
    scene.push(Mark::new(
        frame.text(px + dx, 0.0, marker.label.clone(), anchor, 10.0),
        Style::text(frame.theme.gray_700.clone(), LABEL_SIZE).bold(),
    ));
}

/// Shaded rectangle behind the marks
pub(crate) fn highlight_rect(scene: &mut Scene, frame: &Frame<'_>, x0: f64, x1: f64, y0: f64, y1: f64) {
    let (left, right) = (x0.min(x1), x0.max(x1));
    let (top, bottom) = (y0.min(y1), y0.max(y1));
    if !(right - left).is_finite() || !(bottom - top).is_finite() {
        return;
    }
    scene.push(Mark::new(
        Shape::Rect {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        },
        Style::fill(frame.theme.gray_300.clone()).class("highlight-area"),
    ));
}
