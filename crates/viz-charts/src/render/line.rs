//! Single-series line over time

use viz_core::{DataPoint, Datum, Result};

use super::Frame;
use super::axis::{LABEL_SIZE, axis_titles, highlight_rect, reference_lines_y, time_axis_x, value_axis_y};
use crate::chartkit::{Curve, LinearScale, Scale, line_path_defined};
use crate::scales::ScaleBuilder;
use crate::{Bisector, FocusPoint, HitIndex, Mark, Scene, Shape, Style, TextAnchor};

/// Marker radius from the horizontal room each sample gets
pub(crate) fn marker_radius(plot_width: f64, samples: usize) -> f64 {
    if samples == 0 {
        return 0.0;
    }
    let room = plot_width / samples as f64;
    if room < 5.0 {
        0.0
    } else if room < 20.0 {
        2.0
    } else {
        4.0
    }
}

pub(super) fn render(frame: &Frame<'_>, data: &[DataPoint]) -> Result<Scene> {
    let options = frame.options;
    let mut scene = Scene::new(viz_core::ChartKind::Line, frame.dims);
    scene.datums = data.iter().enumerate().map(|(i, p)| Datum::from_point(i, p)).collect();

    // (datum, timestamp, value), chronological
    let mut samples = Vec::with_capacity(data.len());
    for (i, point) in data.iter().enumerate() {
        let Some(x) = &point.x else {
            tracing::debug!(index = i, "line point without x skipped");
            continue;
        };
        samples.push((i, x.timestamp_ms(&options.date_format)?, point.value.filter(|v| v.is_finite())));
    }
    samples.sort_by_key(|&(_, t, _)| t);

    let x = ScaleBuilder::new(0.0, frame.width).time(samples.iter().map(|s| s.1));
    let y = ScaleBuilder::new(frame.height, 0.0).linear(samples.iter().filter_map(|s| s.2));
    let color = options
        .colors
        .as_ref()
        .and_then(|c| c.first().cloned())
        .unwrap_or_else(|| frame.theme.primary.clone());

    let area = &options.highlight_area;
    if area.x_start.is_some() || area.x_end.is_some() {
        let start = area.x_start.unwrap_or(0.0) * frame.width;
        let end = area.x_end.map_or(frame.width, |e| e * frame.width);
        highlight_rect(&mut scene, frame, start, end, 0.0, frame.height);
    }

    value_axis_y(&mut scene, frame, &y);
    time_axis_x(&mut scene, frame, &x);
    axis_titles(&mut scene, frame);

    let positions: Vec<Option<(f64, f64)>> = samples
        .iter()
        .map(|&(_, t, v)| v.map(|v| (x.scale(t), y.scale(v))))
        .collect();
    scene.push(Mark::new(
        Shape::Path {
            d: line_path_defined(&positions, Curve::MonotoneX),
        },
        Style::stroke(color.clone(), 2.0).class("line"),
    ));

    let radius = marker_radius(frame.width, samples.len());
    let room = if samples.is_empty() { 0.0 } else { frame.width / samples.len() as f64 };
    scene.focus = vec![Vec::new(); data.len()];
    for (&(index, _, value), position) in samples.iter().zip(&positions) {
        let Some((px, py)) = *position else { continue };
        if radius > 0.0 {
            scene.push(Mark::new(Shape::Circle { cx: px, cy: py, r: radius }, Style::fill(color.clone())));
        }
        if frame.label_fits(room) {
            scene.push(Mark::new(
                frame.text(px, py, frame.format_value(value), TextAnchor::Middle, -8.0),
                Style::text(frame.theme.gray_700.clone(), LABEL_SIZE).bold().class("value-label"),
            ));
        }
        scene.focus[index].push(FocusPoint {
            x: px,
            y: py,
            color: color.clone(),
        });
    }

    reference_lines_y(&mut scene, frame, &y, &options.reference_lines);

    let (lo, hi) = x.domain_bounds();
    let bisect_scale = LinearScale::new().domain(lo as f64, hi as f64).range(0.0, frame.width);
    scene.hit = HitIndex::Bisect(Bisector::new(
        samples.iter().map(|&(i, t, _)| (t as f64, i)).collect(),
        bisect_scale,
    ));
    scene.crosshair = Some(frame.theme.crosshair.clone());
    Ok(scene)
}
