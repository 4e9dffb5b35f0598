//! Choropleth and dot-density maps over a GeoJSON FeatureCollection

use std::collections::HashMap;

use serde_json::Value;
use viz_core::{ChartError, ChartKind, ChoroplethDatum, Datum, GeoPoint, MapValue, Result, colors};
use viz_state::MarkIdentity;

use super::axis::LABEL_SIZE;
use super::{Frame, MapData};
use crate::chartkit::{Scale, ThresholdScale, finite_or};
use crate::geo::features;
use crate::scales::ScaleBuilder;
use crate::{ColorBinding, GeoCollaborator, HitIndex, LegendEntry, Mark, Region, Regions, Scene, Shape, Style, TextAnchor};

pub(super) fn render(frame: &Frame<'_>, data: &MapData, topology: &Value, geo: &dyn GeoCollaborator) -> Result<Scene> {
    let features = features(topology)?;
    match data {
        MapData::Choropleth(data) => choropleth(frame, data, features, geo),
        MapData::DotDensity(data) => Ok(dot_density(frame, data, features, geo)),
    }
}

fn border(frame: &Frame<'_>, fill: String) -> Style {
    let map = &frame.options.map;
    let stroke = map.border_color.clone().unwrap_or_else(|| frame.theme.gray_500.clone());
    Style::fill(fill).with_stroke(stroke, map.border_width).class("feature")
}

// ============================================================================
// CHOROPLETH
// ============================================================================

/// Colour classes of a choropleth: categories or numeric thresholds
enum Classes {
    Categorical(ColorBinding),
    Threshold(ThresholdScale),
}

impl Classes {
    fn build(frame: &Frame<'_>, data: &[ChoroplethDatum]) -> Result<Self> {
        let map = &frame.options.map;
        if map.categorical {
            let keys = data.iter().map(|d| match &d.value {
                Some(MapValue::Category(c)) => Some(c.as_str()),
                _ => None,
            });
            let domain = (!map.domain.is_empty()).then_some(map.domain.as_slice());
            return Ok(Self::Categorical(ColorBinding::bind(
                keys,
                domain,
                frame.options.colors.as_deref(),
                frame.theme,
            )));
        }

        let thresholds = map
            .domain
            .iter()
            .map(|t| {
                t.trim()
                    .parse::<f64>()
                    .map_err(|_| ChartError::config(format!("threshold {t:?} is not a number")))
            })
            .collect::<Result<Vec<f64>>>()?;
        let palette = match &frame.options.colors {
            Some(colors) if !colors.is_empty() => colors.clone(),
            _ => colors::SEQUENTIAL.iter().map(|c| c.to_string()).collect(),
        };
        Ok(Self::Threshold(ThresholdScale::new(thresholds, palette)?))
    }

    /// `(legend key, colour)` of a value; `None` means no data
    fn classify(&self, value: Option<&MapValue>) -> Option<(String, String)> {
        match (self, value?) {
            (Self::Categorical(binding), MapValue::Category(key)) => binding
                .index_of(key)
                .map(|_| (key.clone(), binding.color_for(Some(key.as_str())))),
            (Self::Threshold(scale), MapValue::Number(v)) if v.is_finite() => {
                let class = scale.class_of(*v);
                Some((threshold_key(scale.thresholds(), class), scale.color(*v).to_string()))
            }
            _ => None,
        }
    }

    fn legend(&self) -> Vec<LegendEntry> {
        match self {
            Self::Categorical(binding) => binding.legend(),
            Self::Threshold(scale) => scale
                .colors()
                .iter()
                .enumerate()
                .map(|(class, color)| LegendEntry {
                    key: threshold_key(scale.thresholds(), class),
                    color: color.clone(),
                })
                .collect(),
        }
    }
}

/// Legend text of threshold class `class`
fn threshold_key(thresholds: &[f64], class: usize) -> String {
    let fmt = viz_core::format_tick;
    match (class.checked_sub(1).and_then(|i| thresholds.get(i)), thresholds.get(class)) {
        (None, Some(hi)) => format!("<{}", fmt(*hi)),
        (Some(lo), Some(hi)) => format!("{}-{}", fmt(*lo), fmt(*hi)),
        (Some(lo), None) => format!(">={}", fmt(*lo)),
        (None, None) => "all".to_string(),
    }
}

fn choropleth(frame: &Frame<'_>, data: &[ChoroplethDatum], features: &[Value], geo: &dyn GeoCollaborator) -> Result<Scene> {
    let options = frame.options;
    let viewport = (frame.width, frame.height);
    let classes = Classes::build(frame, data)?;
    let mut scene = Scene::new(ChartKind::Choropleth, frame.dims);

    let by_id: HashMap<&str, usize> = data.iter().enumerate().map(|(i, d)| (d.id.as_str(), i)).collect();
    let class_of_datum: Vec<Option<(String, String)>> = data.iter().map(|d| classes.classify(d.value.as_ref())).collect();

    scene.datums = data
        .iter()
        .enumerate()
        .map(|(i, d)| Datum {
            index: i,
            label: Some(d.id.clone()),
            category: class_of_datum[i].as_ref().map(|(key, _)| key.clone()),
            x: None,
            values: vec![match d.value {
                Some(MapValue::Number(v)) => Some(v),
                _ => None,
            }],
            payload: d.payload.clone(),
        })
        .collect();

    let mut regions = Regions::new();
    for feature in features {
        let Some(d) = geo.feature_path(feature, viewport) else {
            continue;
        };
        let datum = geo
            .feature_id(feature, &options.map.id_property)
            .and_then(|id| by_id.get(id.as_str()).copied());

        let Some(index) = datum else {
            scene.push(Mark::new(Shape::Path { d }, border(frame, frame.theme.no_data.clone())));
            continue;
        };
        let class = class_of_datum[index].clone();
        let fill = class.as_ref().map_or_else(|| frame.theme.no_data.clone(), |(_, c)| c.clone());
        scene.push(
            Mark::new(Shape::Path { d }, border(frame, fill)).with_identity(
                MarkIdentity::point(index)
                    .with_label(Some(data[index].id.clone()))
                    .with_category(class.map(|(key, _)| key)),
            ),
        );
        regions.push(
            Region::Polygon {
                rings: geo.feature_rings(feature, viewport),
            },
            index,
        );
    }

    if options.show_legend {
        scene.legend = classes.legend();
    }
    scene.hit = HitIndex::Regions(regions);
    Ok(scene)
}

// ============================================================================
// DOT DENSITY
// ============================================================================

fn dot_density(frame: &Frame<'_>, data: &[GeoPoint], features: &[Value], geo: &dyn GeoCollaborator) -> Scene {
    let options = frame.options;
    let viewport = (frame.width, frame.height);
    let mut scene = Scene::new(ChartKind::DotDensity, frame.dims);
    scene.datums = data
        .iter()
        .enumerate()
        .map(|(i, p)| Datum {
            index: i,
            label: p.label.clone(),
            category: p.category.clone(),
            x: None,
            values: vec![p.radius],
            payload: p.payload.clone(),
        })
        .collect();

    for feature in features {
        if let Some(d) = geo.feature_path(feature, viewport) {
            scene.push(Mark::new(Shape::Path { d }, border(frame, frame.theme.gray_300.clone())));
        }
    }

    let radius = ScaleBuilder::new(options.min_point_radius, options.point_radius).sqrt(data.iter().map(|p| p.radius));
    let binding = frame.bind_colors(data.iter().map(|p| p.category.as_deref()));
    let mut regions = Regions::new();

    for (i, point) in data.iter().enumerate() {
        let Some((cx, cy)) = geo.project(point.lon, point.lat, viewport) else {
            continue;
        };
        let r = match (&radius, point.radius) {
            (Some(scale), Some(v)) => finite_or(scale.scale(v), options.min_point_radius),
            (Some(_), None) => options.min_point_radius,
            (None, _) => options.point_radius,
        };
        let color = binding.color_for(point.category.as_deref());
        let identity = MarkIdentity::point(i)
            .with_label(point.label.clone())
            .with_category(point.category.clone());

        scene.push(
            Mark::new(Shape::Circle { cx, cy, r }, Style::fill(color.clone()).with_fill_opacity(0.8).class("dot"))
                .with_identity(identity.clone()),
        );
        regions.push(Region::Circle { cx, cy, r }, i);

        if let (true, Some(label)) = (options.show_labels, &point.label) {
            scene.push(
                Mark::new(
                    frame.text(cx + r + 2.0, cy, label.clone(), TextAnchor::Start, 4.0),
                    Style::text(color, LABEL_SIZE - 2.0).class("dot-label"),
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
    use serde_json::json;
    use viz_core::{ChartConfig, MapOptions};

    fn square(id: &str, lon: f64) -> Value {
        json!({
            "type": "Feature",
            "properties": { "ISO3": id },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[lon, 0.0], [lon + 10.0, 0.0], [lon + 10.0, 10.0], [lon, 10.0], [lon, 0.0]]]
            }
        })
    }

    fn topology() -> Value {
        json!({ "type": "FeatureCollection", "features": [square("AAA", 0.0), square("BBB", 20.0), square("CCC", 40.0)] })
    }

    fn datum(id: &str, value: MapValue) -> ChoroplethDatum {
        ChoroplethDatum {
            id: id.into(),
            value: Some(value),
            payload: None,
        }
    }

    #[test]
    fn test_threshold_classes_and_no_data() {
        let config = ChartConfig {
            map: MapOptions {
                domain: vec!["10".into(), "20".into()],
                ..MapOptions::default()
            },
            ..ChartConfig::default()
        };
        let variant = ChartVariant::Map {
            data: MapData::Choropleth(vec![datum("AAA", MapValue::Number(5.0)), datum("BBB", MapValue::Number(25.0))]),
            topology: topology(),
        };
        let scene = render_variant(&variant, config, (760.0, 570.0)).unwrap();
        let fills: Vec<String> = scene
            .marks
            .iter()
            .filter_map(|m| m.style.fill.clone())
            .collect();
        assert_eq!(fills[0], colors::SEQUENTIAL[0]);
        assert_eq!(fills[1], colors::SEQUENTIAL[2]);
        assert_eq!(fills[2], colors::NO_DATA);

        let keys: Vec<&str> = scene.legend.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["<10", "10-20", ">=20"]);
        assert_eq!(scene.datums[1].category.as_deref(), Some(">=20"));
    }

    #[test]
    fn test_feature_hit_resolves_datum() {
        let variant = ChartVariant::Map {
            data: MapData::Choropleth(vec![datum("BBB", MapValue::Number(1.0))]),
            topology: topology(),
        };
        let scene = render_variant(&variant, ChartConfig::default(), (760.0, 570.0)).unwrap();
        let projection = crate::Equirectangular::default();
        let viewport = (scene.dims.inner_width(), scene.dims.inner_height());
        let (x, y) = projection.project(25.0, 5.0, viewport).unwrap();
        assert_eq!(scene.hit.find(x, y), Some(0));
        let (x, y) = projection.project(5.0, 5.0, viewport).unwrap();
        assert_eq!(scene.hit.find(x, y), None);
    }

    #[test]
    fn test_categorical_outside_domain_is_no_data() {
        let config = ChartConfig {
            map: MapOptions {
                categorical: true,
                domain: vec!["low".into(), "high".into()],
                ..MapOptions::default()
            },
            ..ChartConfig::default()
        };
        let variant = ChartVariant::Map {
            data: MapData::Choropleth(vec![
                datum("AAA", MapValue::Category("high".into())),
                datum("BBB", MapValue::Category("other".into())),
            ]),
            topology: topology(),
        };
        let scene = render_variant(&variant, config, (760.0, 570.0)).unwrap();
        assert_eq!(scene.marks[1].style.fill.as_deref(), Some(colors::NO_DATA));
        assert_eq!(scene.legend.len(), 2);
    }

    #[test]
    fn test_dots_projected_over_base_map() {
        let data = vec![
            GeoPoint {
                lat: 5.0,
                lon: 5.0,
                radius: Some(100.0),
                category: Some("x".into()),
                ..GeoPoint::default()
            },
            GeoPoint {
                lat: 5.0,
                lon: 25.0,
                ..GeoPoint::default()
            },
        ];
        let variant = ChartVariant::Map {
            data: MapData::DotDensity(data),
            topology: topology(),
        };
        let scene = render_variant(&variant, ChartConfig::default(), (760.0, 570.0)).unwrap();
        let features = scene.marks.iter().filter(|m| m.style.class == Some("feature")).count();
        let dots: Vec<_> = scene.marks.iter().filter(|m| m.style.class == Some("dot")).collect();
        assert_eq!(features, 3);
        assert_eq!(dots.len(), 2);
        if let Shape::Circle { cx, cy, .. } = dots[0].shape {
            assert_eq!(scene.hit.find(cx, cy), Some(0));
        }
    }

    #[test]
    fn test_missing_collaborator_is_an_error() {
        let variant = ChartVariant::Map {
            data: MapData::DotDensity(vec![GeoPoint::default()]),
            topology: topology(),
        };
        let config = crate::render::test_support::resolved(variant.kind(), ChartConfig::default());
        let theme = viz_core::Theme::light();
        let input = crate::render::RenderInput {
            variant: &variant,
            config: &config,
            theme: &theme,
            size: (760.0, 570.0),
            revision: 0,
            geo: None,
        };
        let err = crate::render::render(&input, &mut crate::TessellationCache::new()).unwrap_err();
        assert!(matches!(err, ChartError::Geo(_)));
    }
}
