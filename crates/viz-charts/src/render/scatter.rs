//! Scatter / bubble plot

use std::sync::Arc;

use viz_core::{ChartKind, DataPoint, Datum};
use viz_state::MarkIdentity;

use super::Frame;
use super::axis::{LABEL_SIZE, axis_titles, highlight_rect, reference_line_x, reference_lines_y, value_axis_x, value_axis_y};
use crate::chartkit::{Scale, finite_or};
use crate::scales::ScaleBuilder;
use crate::{HitIndex, Mark, Scene, Shape, Style, TessellationCache, TextAnchor};

/// Fill opacity of bubbles, so overlaps stay readable
const BUBBLE_OPACITY: f64 = 0.6;

pub(super) fn render(frame: &Frame<'_>, data: &[DataPoint], revision: u64, cache: &mut TessellationCache) -> Scene {
    let options = frame.options;
    let mut scene = Scene::new(ChartKind::Scatter, frame.dims);
    scene.datums = data.iter().enumerate().map(|(i, p)| Datum::from_point(i, p)).collect();

    // (datum, x, y) for points with both coordinates
    let plotted: Vec<(usize, f64, f64)> = data
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            let x = p.x_number().filter(|v| v.is_finite())?;
            let y = p.value.filter(|v| v.is_finite())?;
            Some((i, x, y))
        })
        .collect();

    let x = ScaleBuilder::new(0.0, frame.width).linear(plotted.iter().map(|p| p.1));
    let y = ScaleBuilder::new(frame.height, 0.0).linear(plotted.iter().map(|p| p.2));
    let radius = ScaleBuilder::new(options.min_point_radius, options.point_radius)
        .sqrt(plotted.iter().map(|&(i, _, _)| data[i].radius));
    let radius_of = |i: usize| match (&radius, data[i].radius) {
        (Some(scale), Some(r)) => finite_or(scale.scale(r), options.min_point_radius),
        (Some(_), None) => options.min_point_radius,
        (None, _) => options.point_radius,
    };
    let binding = frame.bind_colors(data.iter().map(|p| p.category.as_deref()));

    let area = &options.highlight_area;
    if !area.is_empty() {
        let (x_lo, x_hi) = x.domain_bounds();
        let (y_lo, y_hi) = y.domain_bounds();
        highlight_rect(
            &mut scene,
            frame,
            x.scale(area.x_start.unwrap_or(x_lo)),
            x.scale(area.x_end.unwrap_or(x_hi)),
            y.scale(area.y_start.unwrap_or(y_lo)),
            y.scale(area.y_end.unwrap_or(y_hi)),
        );
    }

    value_axis_y(&mut scene, frame, &y);
    value_axis_x(&mut scene, frame, &x, frame.height, 15.0);
    axis_titles(&mut scene, frame);

    // Largest first, so small bubbles stay on top
    let mut order = plotted.clone();
    order.sort_by(|a, b| radius_of(b.0).total_cmp(&radius_of(a.0)));

    for &(i, dx, dy) in &order {
        let point = &data[i];
        let (px, py, r) = (x.scale(dx), y.scale(dy), radius_of(i));
        let color = binding.color_for(point.category.as_deref());
        let identity = MarkIdentity::point(i)
            .with_label(point.label.clone())
            .with_category(point.category.clone());

        scene.push(
            Mark::new(
                Shape::Circle { cx: px, cy: py, r },
                Style::fill(color.clone()).with_fill_opacity(BUBBLE_OPACITY).with_stroke(color.clone(), 1.0),
            )
            .with_identity(identity.clone()),
        );

        if let Some(label) = &point.label {
            let highlighted = options.highlighted_labels.contains(label);
            if options.show_labels || highlighted {
                scene.push(
                    Mark::new(
                        frame.text(px + r + 2.0, py, label.clone(), TextAnchor::Start, 4.0),
                        Style::text(color, LABEL_SIZE - 2.0).class("point-label"),
                    )
                    .with_identity(identity),
                );
            }
        }
    }

    reference_lines_y(&mut scene, frame, &y, &options.reference_lines);
    if let Some(marker) = &options.reference_x {
        reference_line_x(&mut scene, frame, &x, marker);
    }

    scene.legend = frame.legend(&binding);

    let sites = || plotted.iter().map(|&(_, dx, dy)| (x.scale(dx), y.scale(dy))).collect();
    let voronoi = cache.get_or_build(revision, frame.width, frame.height, sites);
    scene.hit = HitIndex::Voronoi {
        voronoi: Arc::clone(&voronoi),
        ids: plotted.iter().map(|p| p.0).collect(),
    };
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::test_support::resolved;
    use crate::render::{ChartVariant, RenderInput, render};
    use viz_core::{ChartConfig, Theme};

    fn points() -> Vec<DataPoint> {
        vec![
            DataPoint::new(10.0).with_x(1.0).with_radius(1.0).with_label("small"),
            DataPoint::new(20.0).with_x(2.0).with_radius(100.0).with_label("big"),
            DataPoint::new(30.0).with_x(3.0).with_label("none"),
            DataPoint {
                value: Some(5.0),
                ..DataPoint::default()
            },
        ]
    }

    fn render_with(config: ChartConfig, cache: &mut TessellationCache, revision: u64) -> Scene {
        let variant = ChartVariant::Scatter { data: points() };
        let config = resolved(ChartKind::Scatter, config);
        let theme = Theme::light();
        let input = RenderInput {
            variant: &variant,
            config: &config,
            theme: &theme,
            size: (600.0, 400.0),
            revision,
            geo: None,
        };
        render(&input, cache).unwrap()
    }

    fn circles(scene: &Scene) -> Vec<(usize, f64)> {
        scene
            .marks
            .iter()
            .filter_map(|m| match m.shape {
                Shape::Circle { r, .. } => m.identity.index.map(|i| (i, r)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_drawn_largest_first_and_unsized_kept() {
        let scene = render_with(ChartConfig::default(), &mut TessellationCache::new(), 1);
        let drawn = circles(&scene);
        assert_eq!(drawn.iter().map(|c| c.0).collect::<Vec<_>>(), vec![1, 0, 2]);
        assert!(drawn[0].1 > drawn[1].1);
    }

    #[test]
    fn test_hit_skips_points_without_x() {
        let scene = render_with(ChartConfig::default(), &mut TessellationCache::new(), 1);
        match &scene.hit {
            HitIndex::Voronoi { ids, voronoi } => {
                assert_eq!(ids, &vec![0, 1, 2]);
                assert_eq!(voronoi.len(), 3);
            }
            other => panic!("expected voronoi, got {other:?}"),
        }
    }

    #[test]
    fn test_tessellation_reused_across_renders() {
        let mut cache = TessellationCache::new();
        render_with(ChartConfig::default(), &mut cache, 7);
        render_with(ChartConfig::compact(), &mut cache, 7);
        assert_eq!(cache.builds(), 1);
        render_with(ChartConfig::default(), &mut cache, 8);
        assert_eq!(cache.builds(), 2);
    }

    #[test]
    fn test_highlighted_label_shown_when_labels_off() {
        let config = ChartConfig {
            show_labels: false,
            highlighted_labels: vec!["big".into()],
            ..ChartConfig::default()
        };
        let scene = render_with(config, &mut TessellationCache::new(), 1);
        let labels: Vec<_> = scene
            .marks
            .iter()
            .filter(|m| m.style.class == Some("point-label"))
            .collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].identity.label.as_deref(), Some("big"));
    }
}
