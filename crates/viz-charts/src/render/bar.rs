//! Bar charts: horizontal simple bars and vertical stacked columns

use viz_core::{ChartKind, DataPoint, Datum, Result, SeriesCollection};
use viz_state::MarkIdentity;

use super::Frame;
use super::axis::{LABEL_SIZE, axis_titles, reference_line_x, reference_lines_y, value_axis_x, value_axis_y};
use crate::chartkit::{BandScale, Scale, finite_or, truncate};
use crate::scales::ScaleBuilder;
use crate::stack::{stack_extent, stack_points};
use crate::{BandAxis, HitIndex, LegendEntry, Mark, Scene, Shape, Style, TextAnchor, series_colors};

// ============================================================================
// SIMPLE (HORIZONTAL)
// ============================================================================

pub(super) fn render_simple(frame: &Frame<'_>, data: &[DataPoint]) -> Result<Scene> {
    let options = frame.options;
    let mut scene = Scene::new(ChartKind::Bar, frame.dims);
    scene.datums = data.iter().enumerate().map(|(i, p)| Datum::from_point(i, p)).collect();

    let band = BandScale::new(data.len())
        .range(0.0, frame.height)
        .padding(options.bar_padding, 0.0);
    let x = ScaleBuilder::new(0.0, frame.width).linear(data.iter().filter_map(|p| p.value));
    let binding = frame.bind_colors(data.iter().map(|p| p.category.as_deref()));
    let zero = x.scale(0.0);

    value_axis_x(&mut scene, frame, &x, 0.0, -5.0);
    axis_titles(&mut scene, frame);

    for (i, point) in data.iter().enumerate() {
        let top = band.scale(i);
        let center = top + band.bandwidth() / 2.0;
        let identity = MarkIdentity::point(i)
            .with_label(point.label.clone())
            .with_category(point.category.clone());

        if let Some(value) = point.value.filter(|v| v.is_finite()) {
            let end = x.scale(value);
            let extent = (end - zero).abs();
            scene.push(
                Mark::new(
                    Shape::Rect {
                        x: finite_or(zero.min(end), 0.0),
                        y: top,
                        width: finite_or(extent, 0.0),
                        height: band.bandwidth(),
                    },
                    Style::fill(binding.color_for(point.category.as_deref())).class("bar"),
                )
                .with_identity(identity.clone()),
            );
            if frame.label_fits(extent) {
                let (label_x, anchor) = if value >= 0.0 {
                    (end - 5.0, TextAnchor::End)
                } else {
                    (end + 5.0, TextAnchor::Start)
                };
                scene.push(
                    Mark::new(
                        frame.text(label_x, center, frame.format_value(Some(value)), anchor, 4.0),
                        Style::text(frame.theme.on_fill.clone(), LABEL_SIZE).class("value-label"),
                    )
                    .with_identity(identity.clone()),
                );
            }
        }

        if options.show_labels {
            if let Some(label) = &point.label {
                scene.push(
                    Mark::new(
                        frame.text(-5.0, center, truncate(label, options.truncate_by), TextAnchor::End, 4.0),
                        Style::text(frame.theme.gray_700.clone(), LABEL_SIZE).class("bar-label"),
                    )
                    .with_identity(identity),
                );
            }
        }
    }

    for marker in &options.reference_lines {
        reference_line_x(&mut scene, frame, &x, marker);
    }

    scene.legend = frame.legend(&binding);
    scene.hit = HitIndex::Band {
        scale: band,
        axis: BandAxis::Y,
        ids: (0..data.len()).collect(),
    };
    Ok(scene)
}

// ============================================================================
// STACKED (VERTICAL)
// ============================================================================

pub(super) fn render_stacked(frame: &Frame<'_>, data: &SeriesCollection) -> Result<Scene> {
    let options = frame.options;
    let mut scene = Scene::new(ChartKind::StackedBar, frame.dims);
    scene.datums = data
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| Datum::from_composite(i, p))
        .collect();

    let stacks = stack_points(&data.points);
    let band = BandScale::new(data.points.len())
        .range(0.0, frame.width)
        .padding(options.bar_padding, 0.0);
    let (lo, hi) = stack_extent(&stacks);
    let y = ScaleBuilder::new(frame.height, 0.0).linear_domain(lo, hi);
    let colors = series_colors(data.labels.len(), options.colors.as_deref(), frame.theme)?;

    value_axis_y(&mut scene, frame, &y);
    axis_titles(&mut scene, frame);

    for (i, (point, row)) in data.points.iter().zip(&stacks).enumerate() {
        let left = band.scale(i);
        let center = left + band.bandwidth() / 2.0;
        let column = MarkIdentity::point(i).with_label(Some(point.label.clone()));

        for segment in row.iter().filter(|s| s.defined) {
            let (top, bottom) = (y.scale(segment.upper), y.scale(segment.lower));
            let height = (bottom - top).abs();
            let identity = column
                .clone()
                .with_category(data.labels.get(segment.component).cloned());
            scene.push(
                Mark::new(
                    Shape::Rect {
                        x: left,
                        y: finite_or(top.min(bottom), 0.0),
                        width: band.bandwidth(),
                        height: finite_or(height, 0.0),
                    },
                    Style::fill(colors[segment.component].clone()).class("bar-segment"),
                )
                .with_identity(identity.clone()),
            );
            if frame.label_fits(height) {
                let value = point.values.get(segment.component).copied().flatten();
                scene.push(
                    Mark::new(
                        frame.text(center, y.scale(segment.midpoint()), frame.format_value(value), TextAnchor::Middle, 5.0),
                        Style::text(frame.theme.on_fill.clone(), LABEL_SIZE).class("value-label"),
                    )
                    .with_identity(identity),
                );
            }
        }

        if options.show_values {
            let total = point.total();
            scene.push(
                Mark::new(
                    frame.text(center, y.scale(total), frame.format_value(Some(total)), TextAnchor::Middle, -10.0),
                    Style::text(frame.theme.gray_700.clone(), LABEL_SIZE).bold().class("total-label"),
                )
                .with_identity(column.clone()),
            );
        }
        if options.show_labels {
            scene.push(
                Mark::new(
                    frame.text(center, y.scale(0.0), truncate(&point.label, options.truncate_by), TextAnchor::Middle, 15.0),
                    Style::text(frame.theme.gray_700.clone(), LABEL_SIZE).class("bar-label"),
                )
                .with_identity(column),
            );
        }
    }

    reference_lines_y(&mut scene, frame, &y, &options.reference_lines);

    if options.show_legend {
        scene.legend = data
            .labels
            .iter()
            .zip(&colors)
            .map(|(key, color)| LegendEntry {
                key: key.clone(),
                color: color.clone(),
            })
            .collect();
    }
    scene.hit = HitIndex::Band {
        scale: band,
        axis: BandAxis::X,
        ids: (0..data.points.len()).collect(),
    };
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::test_support::render_variant;
    use crate::render::{BarData, ChartVariant};
    use viz_core::{ChartConfig, CompositePoint};

    fn rects(scene: &Scene, class: &str) -> Vec<(f64, f64, f64, f64)> {
        scene
            .marks
            .iter()
            .filter(|m| m.style.class == Some(class))
            .filter_map(|m| match m.shape {
                Shape::Rect { x, y, width, height } => Some((x, y, width, height)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_stacked_missing_component_draws_nothing() {
        let data = SeriesCollection::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![CompositePoint::new("2020", vec![Some(10.0), None, Some(5.0)])],
        );
        let variant = ChartVariant::Bar {
            data: BarData::Stacked(data),
        };
        let scene = render_variant(&variant, ChartConfig::default(), (400.0, 300.0)).unwrap();
        let segments = rects(&scene, "bar-segment");
        assert_eq!(segments.len(), 2);

        // third segment starts where the first ends
        let (_, first_top, _, _) = segments[0];
        let (_, third_top, _, third_height) = segments[1];
        assert!((third_top + third_height - first_top).abs() < 1e-9);
    }

    #[test]
    fn test_negative_component_stays_inside_plot() {
        let data = SeriesCollection::new(
            vec!["up".into(), "down".into()],
            vec![
                CompositePoint::new("2020", vec![Some(10.0), Some(-5.0)]),
                CompositePoint::new("2021", vec![Some(4.0), Some(2.0)]),
            ],
        );
        let variant = ChartVariant::Bar {
            data: BarData::Stacked(data),
        };
        let scene = render_variant(&variant, ChartConfig::default(), (400.0, 300.0)).unwrap();
        let plot_height = scene.dims.inner_height();
        let segments = rects(&scene, "bar-segment");
        assert_eq!(segments.len(), 4);
        for (_, top, _, height) in segments {
            assert!(top >= -1e-9);
            assert!(top + height <= plot_height + 1e-9);
        }
    }

    #[test]
    fn test_small_segment_has_no_value_label() {
        let data = SeriesCollection::new(
            vec!["big".into(), "tiny".into()],
            vec![CompositePoint::new("x", vec![Some(100.0), Some(1.0)])],
        );
        let variant = ChartVariant::Bar {
            data: BarData::Stacked(data),
        };
        let scene = render_variant(&variant, ChartConfig::default(), (400.0, 300.0)).unwrap();
        let value_labels: Vec<_> = scene
            .marks
            .iter()
            .filter(|m| m.style.class == Some("value-label"))
            .collect();
        assert_eq!(value_labels.len(), 1);
        assert_eq!(value_labels[0].identity.category.as_deref(), Some("big"));
    }

    #[test]
    fn test_simple_bars_hit_by_row() {
        let data = vec![
            DataPoint::new(5.0).with_label("alpha"),
            DataPoint::new(-3.0).with_label("beta"),
            DataPoint::new(8.0).with_label("gamma"),
        ];
        let variant = ChartVariant::Bar {
            data: BarData::Simple(data),
        };
        let scene = render_variant(&variant, ChartConfig::default(), (500.0, 335.0)).unwrap();
        let h = scene.dims.inner_height();
        assert_eq!(scene.hit.find(10.0, h / 6.0), Some(0));
        assert_eq!(scene.hit.find(10.0, h * 5.0 / 6.0), Some(2));

        // the negative bar ends left of zero
        let bars = rects(&scene, "bar");
        let zero_x = bars[0].0;
        assert!(bars[1].0 < zero_x);
        assert!((bars[1].0 + bars[1].2 - zero_x).abs() < 1e-9);
    }

    #[test]
    fn test_labels_truncated() {
        let data = vec![DataPoint::new(5.0).with_label("a very long label")];
        let config = ChartConfig {
            truncate_by: 6,
            ..ChartConfig::default()
        };
        let variant = ChartVariant::Bar {
            data: BarData::Simple(data),
        };
        let scene = render_variant(&variant, config, (500.0, 300.0)).unwrap();
        let label = scene
            .marks
            .iter()
            .find(|m| m.style.class == Some("bar-label"))
            .and_then(|m| match &m.shape {
                Shape::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(label, "a very...");
    }

    #[test]
    fn test_categories_build_legend() {
        let data = vec![
            DataPoint::new(1.0).with_category("x"),
            DataPoint::new(2.0).with_category("y"),
            DataPoint::new(3.0).with_category("x"),
        ];
        let variant = ChartVariant::Bar {
            data: BarData::Simple(data),
        };
        let scene = render_variant(&variant, ChartConfig::default(), (500.0, 300.0)).unwrap();
        let keys: Vec<&str> = scene.legend.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["x", "y"]);
    }
}
