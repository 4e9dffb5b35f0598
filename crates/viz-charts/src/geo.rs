//! Geographic collaborator
//!
//! Projection maths and topology loading live outside this crate. Map
//! renderers only need a way to project lon/lat to pixels and to outline a
//! GeoJSON feature; [`GeoCollaborator`] is that seam. The default methods
//! walk `Polygon` / `MultiPolygon` geometries through `project`, so a
//! collaborator only has to supply the projection itself.

use std::fmt::Debug;

use serde_json::Value;
use viz_core::{ChartError, Result};

use crate::chartkit::PathBuilder;

pub type Ring = Vec<(f64, f64)>;

/// Projection and feature outlines for map charts
pub trait GeoCollaborator: Debug + Send + Sync {
    /// Pixel position of `(lon, lat)` in a `viewport` of `(width, height)`
    fn project(&self, lon: f64, lat: f64, viewport: (f64, f64)) -> Option<(f64, f64)>;

    /// Projected rings of a feature, outer rings and holes alike
    fn feature_rings(&self, feature: &Value, viewport: (f64, f64)) -> Vec<Ring> {
        let Some(geometry) = feature.get("geometry") else {
            return Vec::new();
        };
        let polygons: Vec<&Value> = match geometry.get("type").and_then(Value::as_str) {
            Some("Polygon") => geometry.get("coordinates").into_iter().collect(),
            Some("MultiPolygon") => geometry
                .get("coordinates")
                .and_then(Value::as_array)
                .map(|polys| polys.iter().collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        };

        polygons
            .into_iter()
            .filter_map(Value::as_array)
            .flatten()
            .filter_map(Value::as_array)
            .map(|ring| {
                ring.iter()
                    .filter_map(|pos| {
                        let lon = pos.get(0)?.as_f64()?;
                        let lat = pos.get(1)?.as_f64()?;
                        self.project(lon, lat, viewport)
                    })
                    .collect::<Ring>()
            })
            .filter(|ring| ring.len() >= 3)
            .collect()
    }

    /// SVG path of a feature, `None` when it has no drawable geometry
    fn feature_path(&self, feature: &Value, viewport: (f64, f64)) -> Option<String> {
        let rings = self.feature_rings(feature, viewport);
        if rings.is_empty() {
            return None;
        }
        let mut builder = PathBuilder::new();
        for ring in &rings {
            let mut points = ring.iter();
            if let Some(&(x, y)) = points.next() {
                builder = builder.move_to(x, y);
            }
            for &(x, y) in points {
                builder = builder.line_to(x, y);
            }
            builder = builder.close();
        }
        Some(builder.build())
    }

    /// Feature identifier read from `properties[property]`
    fn feature_id(&self, feature: &Value, property: &str) -> Option<String> {
        match feature.get("properties")?.get(property)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Features of a GeoJSON `FeatureCollection`
pub fn features(topology: &Value) -> Result<&[Value]> {
    topology
        .get("features")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| ChartError::Geo("topology is not a FeatureCollection".to_string()))
}

// ============================================================================
// EQUIRECTANGULAR
// ============================================================================

/// Plate carrée projection centred in the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equirectangular {
    /// Pixels per radian
    pub scale: f64,
    /// `(lon, lat)` placed at the viewport centre
    pub center: (f64, f64),
}

impl Default for Equirectangular {
    fn default() -> Self {
        Self {
            scale: 190.0,
            center: (10.0, 10.0),
        }
    }
}

impl Equirectangular {
    pub fn new(scale: f64, center: (f64, f64)) -> Self {
        Self { scale, center }
    }
}

impl GeoCollaborator for Equirectangular {
    fn project(&self, lon: f64, lat: f64, viewport: (f64, f64)) -> Option<(f64, f64)> {
        if !(lon.is_finite() && lat.is_finite()) {
            return None;
        }
        let x = viewport.0 / 2.0 + self.scale * (lon - self.center.0).to_radians();
        let y = viewport.1 / 2.0 - self.scale * (lat - self.center.1).to_radians();
        Some((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square(id: &str) -> Value {
        json!({
            "type": "Feature",
            "properties": { "ISO3": id },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]]]
            }
        })
    }

    #[test]
    fn test_center_projects_to_viewport_middle() {
        let projection = Equirectangular::new(100.0, (5.0, 5.0));
        assert_eq!(projection.project(5.0, 5.0, (400.0, 200.0)), Some((200.0, 100.0)));
        let (x, y) = projection.project(6.0, 6.0, (400.0, 200.0)).unwrap();
        assert!(x > 200.0 && y < 100.0);
    }

    #[test]
    fn test_feature_path_and_id() {
        let projection = Equirectangular::default();
        let feature = square("KEN");
        assert_eq!(projection.feature_id(&feature, "ISO3").as_deref(), Some("KEN"));
        let rings = projection.feature_rings(&feature, (760.0, 570.0));
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 5);
        let path = projection.feature_path(&feature, (760.0, 570.0)).unwrap();
        assert!(path.starts_with('M') && path.ends_with('Z'));
    }

    #[test]
    fn test_features_requires_collection() {
        let collection = json!({ "type": "FeatureCollection", "features": [square("A"), square("B")] });
        assert_eq!(features(&collection).unwrap().len(), 2);
        assert!(features(&json!({ "type": "Feature" })).is_err());
    }
}
