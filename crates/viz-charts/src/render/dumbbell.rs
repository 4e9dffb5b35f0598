//! Dumbbell rows: one dot per colour-domain entry, joined min to max

use viz_core::{ChartKind, Datum, Result, SeriesCollection};
use viz_state::MarkIdentity;

use super::Frame;
use super::axis::{LABEL_SIZE, axis_titles, reference_line_x, value_axis_x};
use crate::chartkit::{BandScale, Scale, truncate};
use crate::scales::{ScaleBuilder, extent};
use crate::{BandAxis, HitIndex, LegendEntry, Mark, Scene, Shape, Style, TextAnchor, series_colors};

pub(super) fn render(frame: &Frame<'_>, data: &SeriesCollection) -> Result<Scene> {
    let options = frame.options;
    let mut scene = Scene::new(ChartKind::Dumbbell, frame.dims);
    scene.datums = data
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| Datum::from_composite(i, p))
        .collect();

    let domain: Vec<String> = options.color_domain.clone().unwrap_or_else(|| data.labels.clone());
    let colors = series_colors(domain.len(), options.colors.as_deref(), frame.theme)?;

    let band = BandScale::new(data.points.len())
        .range(0.0, frame.height)
        .padding(options.bar_padding, 0.0);
    let x = ScaleBuilder::new(0.0, frame.width).linear(data.points.iter().flat_map(|p| p.defined()));

    value_axis_x(&mut scene, frame, &x, 0.0, -5.0);
    axis_titles(&mut scene, frame);

    for (i, point) in data.points.iter().enumerate() {
        let center = band.scale_center(i);
        let row = MarkIdentity::point(i).with_label(Some(point.label.clone()));

        if let Some((lo, hi)) = extent(point.defined()) {
            scene.push(
                Mark::new(
                    Shape::Line {
                        x1: x.scale(lo),
                        y1: center,
                        x2: x.scale(hi),
                        y2: center,
                    },
                    Style::stroke(frame.theme.gray_500.clone(), 1.0).class("connector"),
                )
                .with_identity(row.clone()),
            );
        }

        for (j, value) in point.values.iter().enumerate() {
            let Some(value) = value.filter(|v| v.is_finite()) else {
                continue;
            };
            let Some(color) = colors.get(j) else { continue };
            let identity = row.clone().with_category(domain.get(j).cloned());
            let px = x.scale(value);
            scene.push(
                Mark::new(
                    Shape::Circle {
                        cx: px,
                        cy: center,
                        r: options.point_radius,
                    },
                    Style::fill(color.clone()).class("dot"),
                )
                .with_identity(identity.clone()),
            );
            if frame.label_fits(band.bandwidth()) {
                scene.push(
                    Mark::new(
                        frame.text(px, center, frame.format_value(Some(value)), TextAnchor::Middle, -options.point_radius - 4.0),
                        Style::text(color.clone(), LABEL_SIZE).bold().class("value-label"),
                    )
                    .with_identity(identity),
                );
            }
        }

        if options.show_labels {
            scene.push(
                Mark::new(
                    frame.text(-5.0, center, truncate(&point.label, options.truncate_by), TextAnchor::End, 4.0),
                    Style::text(frame.theme.gray_700.clone(), LABEL_SIZE).class("row-label"),
                )
                .with_identity(row),
            );
        }
    }

    for marker in &options.reference_lines {
        reference_line_x(&mut scene, frame, &x, marker);
    }

    if options.show_legend {
        scene.legend = domain
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
        axis: BandAxis::Y,
        ids: (0..data.points.len()).collect(),
    };
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ChartVariant;
    use crate::render::test_support::render_variant;
    use viz_core::{ChartConfig, CompositePoint};

    fn rows() -> SeriesCollection {
        SeriesCollection::new(
            vec!["2000".into(), "2020".into()],
            vec![
                CompositePoint::new("Kenya", vec![Some(30.0), Some(60.0)]),
                CompositePoint::new("Peru", vec![Some(50.0), None]),
            ],
        )
    }

    #[test]
    fn test_connector_spans_min_to_max() {
        let scene = render_variant(&ChartVariant::Dumbbell { data: rows() }, ChartConfig::default(), (600.0, 300.0)).unwrap();
        let connectors: Vec<_> = scene.marks.iter().filter(|m| m.style.class == Some("connector")).collect();
        assert_eq!(connectors.len(), 2);
        let dots: Vec<f64> = scene
            .marks
            .iter()
            .filter(|m| m.style.class == Some("dot") && m.identity.index == Some(0))
            .filter_map(|m| match m.shape {
                Shape::Circle { cx, .. } => Some(cx),
                _ => None,
            })
            .collect();
        match connectors[0].shape {
            Shape::Line { x1, x2, .. } => assert_eq!((x1, x2), (dots[0], dots[1])),
            ref other => panic!("expected line, got {other:?}"),
        }
        // single defined value: a zero-length connector and one dot
        let peru_dots = scene
            .marks
            .iter()
            .filter(|m| m.style.class == Some("dot") && m.identity.index == Some(1))
            .count();
        assert_eq!(peru_dots, 1);
    }

    #[test]
    fn test_dots_take_domain_categories() {
        let scene = render_variant(&ChartVariant::Dumbbell { data: rows() }, ChartConfig::default(), (600.0, 300.0)).unwrap();
        let categories: Vec<_> = scene
            .marks
            .iter()
            .filter(|m| m.style.class == Some("dot"))
            .map(|m| m.identity.category.clone().unwrap_or_default())
            .collect();
        assert_eq!(categories, vec!["2000", "2020", "2000"]);
        assert_eq!(scene.legend.len(), 2);
    }
}
