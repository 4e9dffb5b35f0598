//! Stacked area over time

use viz_core::{ChartKind, Datum, Result, SeriesCollection};
use viz_state::MarkIdentity;

use super::Frame;
use super::axis::{axis_titles, reference_lines_y, time_axis_x, value_axis_y};
use crate::chartkit::{Curve, LinearScale, Scale, band_path};
use crate::scales::ScaleBuilder;
use crate::stack::{StackSegment, layers, stack_values};
use crate::{Bisector, FocusPoint, HitIndex, LegendEntry, Mark, Scene, Shape, Style, series_colors};

pub(super) fn render(frame: &Frame<'_>, data: &SeriesCollection) -> Result<Scene> {
    let options = frame.options;
    let mut scene = Scene::new(ChartKind::Area, frame.dims);
    scene.datums = data
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| Datum::from_composite(i, p))
        .collect();

    let mut rows = Vec::with_capacity(data.points.len());
    for (i, point) in data.points.iter().enumerate() {
        let t = viz_core::parse_date(&point.label, &options.date_format)?;
        rows.push((i, t, stack_values(&point.values)));
    }
    rows.sort_by_key(|r| r.1);

    let x = ScaleBuilder::new(0.0, frame.width).time(rows.iter().map(|r| r.1));
    let y = ScaleBuilder::new(frame.height, 0.0)
        .linear(rows.iter().flat_map(|r| r.2.iter().flat_map(|s| [s.lower, s.upper])));
    let colors = series_colors(data.labels.len(), options.colors.as_deref(), frame.theme)?;

    value_axis_y(&mut scene, frame, &y);
    time_axis_x(&mut scene, frame, &x);
    axis_titles(&mut scene, frame);

    // rows are validated to carry one component per label, so layers stay aligned with rows
    let stacks: Vec<Vec<StackSegment>> = rows.iter().map(|r| r.2.clone()).collect();
    let layers = layers(&stacks, data.labels.len());

    scene.focus = vec![Vec::new(); data.points.len()];
    for ((label, color), layer) in data.labels.iter().zip(&colors).zip(&layers) {
        let upper: Vec<(f64, f64)> = rows.iter().zip(layer).map(|(r, s)| (x.scale(r.1), y.scale(s.upper))).collect();
        let lower: Vec<(f64, f64)> = rows.iter().zip(layer).map(|(r, s)| (x.scale(r.1), y.scale(s.lower))).collect();

        scene.push(
            Mark::new(
                Shape::Path {
                    d: band_path(&upper, &lower, Curve::MonotoneX),
                },
                Style::fill(color.clone()).class("area"),
            )
            .with_identity(MarkIdentity::none().with_category(Some(label.clone()))),
        );

        for ((row, segment), &(px, py)) in rows.iter().zip(layer).zip(&upper) {
            if segment.defined {
                scene.focus[row.0].push(FocusPoint {
                    x: px,
                    y: py,
                    color: color.clone(),
                });
            }
        }
    }

    reference_lines_y(&mut scene, frame, &y, &options.reference_lines);

    scene.legend = data
        .labels
        .iter()
        .zip(&colors)
        .map(|(key, color)| LegendEntry {
            key: key.clone(),
            color: color.clone(),
        })
        .collect();

    let (lo, hi) = x.domain_bounds();
    let bisect_scale = LinearScale::new().domain(lo as f64, hi as f64).range(0.0, frame.width);
    scene.hit = HitIndex::Bisect(Bisector::new(
        rows.iter().map(|r| (r.1 as f64, r.0)).collect(),
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

    #[test]
    fn test_one_band_per_series_and_focus_on_tops() {
        let data = SeriesCollection::new(
            vec!["a".into(), "b".into()],
            vec![
                CompositePoint::new("2020", vec![Some(1.0), Some(2.0)]),
                CompositePoint::new("2021", vec![Some(2.0), None]),
            ],
        );
        let scene = render_variant(&ChartVariant::Area { data }, ChartConfig::default(), (500.0, 300.0)).unwrap();
        let bands = scene.marks.iter().filter(|m| m.style.class == Some("area")).count();
        assert_eq!(bands, 2);
        assert_eq!(scene.focus[0].len(), 2);
        // the missing component has no focus dot
        assert_eq!(scene.focus[1].len(), 1);
        // the top of the first column sits above the top of the second layer's base
        assert!(scene.focus[0][1].y < scene.focus[0][0].y);
    }
}
