//! Several series over a shared time axis

use viz_core::{ChartKind, Datum, Result, SeriesCollection};
use viz_state::MarkIdentity;

use super::Frame;
use super::axis::{LABEL_SIZE, axis_titles, reference_lines_y, time_axis_x, value_axis_y};
use super::line::marker_radius;
use crate::chartkit::{Curve, LinearScale, Scale, line_path};
use crate::scales::ScaleBuilder;
use crate::{Bisector, FocusPoint, HitIndex, LegendEntry, Mark, Scene, Shape, Style, TextAnchor, series_colors};

pub(super) fn render(frame: &Frame<'_>, data: &SeriesCollection) -> Result<Scene> {
    let options = frame.options;
    let mut scene = Scene::new(ChartKind::MultiLine, frame.dims);
    scene.datums = data
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| Datum::from_composite(i, p))
        .collect();

    let mut rows = Vec::with_capacity(data.points.len());
    for (i, point) in data.points.iter().enumerate() {
        let t = viz_core::parse_date(&point.label, &options.date_format)?;
        rows.push((i, t));
    }
    rows.sort_by_key(|&(_, t)| t);

    let x = ScaleBuilder::new(0.0, frame.width).time(rows.iter().map(|r| r.1));
    let y = ScaleBuilder::new(frame.height, 0.0).linear(data.points.iter().flat_map(|p| p.defined()));
    let colors = series_colors(data.labels.len(), options.colors.as_deref(), frame.theme)?;

    value_axis_y(&mut scene, frame, &y);
    time_axis_x(&mut scene, frame, &x);
    axis_titles(&mut scene, frame);

    let radius = marker_radius(frame.width, rows.len());
    scene.focus = vec![Vec::new(); data.points.len()];

    for (series, label) in data.labels.iter().enumerate() {
        let color = &colors[series];
        let identity = MarkIdentity::none().with_category(Some(label.clone()));

        // Missing components are skipped; the line joins the defined neighbours
        let points: Vec<(usize, f64, f64)> = rows
            .iter()
            .filter_map(|&(i, t)| {
                let v = data.points[i].values.get(series).copied().flatten()?;
                v.is_finite().then(|| (i, x.scale(t), y.scale(v)))
            })
            .collect();
        let Some(&(_, last_x, last_y)) = points.last() else {
            continue;
        };

        let path: Vec<(f64, f64)> = points.iter().map(|&(_, px, py)| (px, py)).collect();
        scene.push(
            Mark::new(
                Shape::Path {
                    d: line_path(&path, Curve::MonotoneX),
                },
                Style::stroke(color.clone(), 2.0).class("line"),
            )
            .with_identity(identity.clone()),
        );

        for &(i, px, py) in &points {
            if radius > 0.0 {
                scene.push(
                    Mark::new(Shape::Circle { cx: px, cy: py, r: radius }, Style::fill(color.clone()))
                        .with_identity(identity.clone()),
                );
            }
            scene.focus[i].push(FocusPoint {
                x: px,
                y: py,
                color: color.clone(),
            });
        }

        if !options.show_legend {
            scene.push(
                Mark::new(
                    frame.text(last_x + 5.0, last_y, label.clone(), TextAnchor::Start, 4.0),
                    Style::text(color.clone(), LABEL_SIZE).bold().class("series-label"),
                )
                .with_identity(identity),
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

    let (lo, hi) = x.domain_bounds();
    let bisect_scale = LinearScale::new().domain(lo as f64, hi as f64).range(0.0, frame.width);
    scene.hit = HitIndex::Bisect(Bisector::new(
        rows.iter().map(|&(i, t)| (t as f64, i)).collect(),
        bisect_scale,
    ));
    scene.crosshair = Some(frame.theme.crosshair.clone());
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ChartVariant;
    use crate::render::test_support::render_variant;
    use viz_core::{ChartConfig, CompositePoint};

    fn collection() -> SeriesCollection {
        SeriesCollection::new(
            vec!["North".into(), "South".into()],
            vec![
                CompositePoint::new("2021", vec![Some(3.0), Some(1.0)]),
                CompositePoint::new("2020", vec![Some(2.0), None]),
                CompositePoint::new("2022", vec![Some(4.0), Some(6.0)]),
            ],
        )
    }

    #[test]
    fn test_rows_sorted_by_date_for_hit() {
        let scene = render_variant(
            &ChartVariant::MultiLine { data: collection() },
            ChartConfig::default(),
            (600.0, 400.0),
        )
        .unwrap();
        // 2020 is datum 1 and sits at the left edge
        assert_eq!(scene.hit.find(0.0, 0.0), Some(1));
        assert_eq!(scene.focus[1].len(), 1);
        assert_eq!(scene.focus[2].len(), 2);
        assert_eq!(scene.legend.len(), 2);
    }

    #[test]
    fn test_end_labels_without_legend() {
        let config = ChartConfig {
            show_legend: false,
            ..ChartConfig::default()
        };
        let scene = render_variant(&ChartVariant::MultiLine { data: collection() }, config, (600.0, 400.0)).unwrap();
        let labels: Vec<&str> = scene
            .marks
            .iter()
            .filter(|m| m.style.class == Some("series-label"))
            .filter_map(|m| match &m.shape {
                Shape::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["North", "South"]);
        assert!(scene.legend.is_empty());
    }

    #[test]
    fn test_series_marks_carry_category() {
        let scene = render_variant(
            &ChartVariant::MultiLine { data: collection() },
            ChartConfig::default(),
            (600.0, 400.0),
        )
        .unwrap();
        let lines: Vec<_> = scene.marks.iter().filter(|m| m.style.class == Some("line")).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].identity.category.as_deref(), Some("South"));
        assert!(lines[1].identity.index.is_none());
    }
}
