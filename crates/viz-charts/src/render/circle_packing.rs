//! Packed bubbles sized by value

use viz_core::{ChartKind, DataPoint, Datum};
use viz_state::MarkIdentity;

use super::Frame;
use super::axis::LABEL_SIZE;
use crate::chartkit::truncate;
use crate::pack::pack_into;
use crate::{HitIndex, Mark, Region, Regions, Scene, Shape, Style, TextAnchor};

/// Pixel gap between packed circles
const PACK_PADDING: f64 = 2.0;

pub(super) fn render(frame: &Frame<'_>, data: &[DataPoint]) -> Scene {
    let options = frame.options;
    let mut scene = Scene::new(ChartKind::CirclePacking, frame.dims);
    scene.datums = data.iter().enumerate().map(|(i, p)| Datum::from_point(i, p)).collect();

    let values: Vec<Option<f64>> = data.iter().map(|p| p.radius.or(p.value)).collect();
    let packed = pack_into(&values, frame.width, frame.height, PACK_PADDING);
    let binding = frame.bind_colors(data.iter().map(|p| p.category.as_deref()));
    let mut regions = Regions::new();

    for circle in &packed {
        let point = &data[circle.index];
        let identity = MarkIdentity::point(circle.index)
            .with_label(point.label.clone())
            .with_category(point.category.clone());

        scene.push(
            Mark::new(
                Shape::Circle {
                    cx: circle.x,
                    cy: circle.y,
                    r: circle.r,
                },
                Style::fill(binding.color_for(point.category.as_deref())).class("bubble"),
            )
            .with_identity(identity.clone()),
        );
        regions.push(
            Region::Circle {
                cx: circle.x,
                cy: circle.y,
                r: circle.r,
            },
            circle.index,
        );

        if !(options.show_labels && circle.r > options.min_label_extent) {
            continue;
        }
        // roughly one character per 7px of diameter
        let budget = ((circle.r * 2.0 / 7.0) as usize).min(options.truncate_by);
        if let Some(label) = &point.label {
            scene.push(
                Mark::new(
                    frame.text(circle.x, circle.y, truncate(label, budget), TextAnchor::Middle, 0.0),
                    Style::text(frame.theme.on_fill.clone(), LABEL_SIZE).class("bubble-label"),
                )
                .with_identity(identity.clone()),
            );
        }
        if options.show_values {
            scene.push(
                Mark::new(
                    frame.text(circle.x, circle.y, frame.format_value(values[circle.index]), TextAnchor::Middle, 15.0),
                    Style::text(frame.theme.on_fill.clone(), LABEL_SIZE).bold().class("value-label"),
                )
                .with_identity(identity),
            );
        }
    }

    scene.legend = frame.legend(&binding);
    scene.hit = HitIndex::Regions(regions);
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ChartVariant;
    use crate::render::test_support::render_variant;
    use viz_core::ChartConfig;

    #[test]
    fn test_each_circle_is_hittable() {
        let data = vec![
            DataPoint::new(10.0).with_label("a"),
            DataPoint::new(40.0).with_label("b"),
            DataPoint::new(90.0).with_label("c").with_category("x"),
        ];
        let scene = render_variant(&ChartVariant::CirclePacking { data }, ChartConfig::default(), (400.0, 400.0)).unwrap();
        for mark in scene.marks.iter().filter(|m| m.style.class == Some("bubble")) {
            if let Shape::Circle { cx, cy, .. } = mark.shape {
                assert_eq!(scene.hit.find(cx, cy), mark.identity.index);
            }
        }
        assert_eq!(scene.hit.find(0.0, 0.0), None);
    }

    #[test]
    fn test_small_circles_unlabelled() {
        let mut data = vec![DataPoint::new(10_000.0).with_label("huge")];
        data.push(DataPoint::new(1.0).with_label("speck"));
        let scene = render_variant(&ChartVariant::CirclePacking { data }, ChartConfig::default(), (400.0, 400.0)).unwrap();
        let labelled: Vec<_> = scene
            .marks
            .iter()
            .filter(|m| m.style.class == Some("bubble-label"))
            .filter_map(|m| m.identity.label.clone())
            .collect();
        assert_eq!(labelled, vec!["huge".to_string()]);
    }
}
