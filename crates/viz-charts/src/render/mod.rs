//! Variant renderers
//!
//! `render` dispatches on [`ChartVariant`] and returns a [`Scene`]. Every
//! renderer is a pure function of data, resolved config, theme and size; the
//! only state carried between calls is the Voronoi [`TessellationCache`].

mod area;
mod axis;
mod bar;
mod circle_packing;
mod dumbbell;
mod line;
mod map;
mod multi_line;
mod scatter;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use viz_core::{
    ChartError, ChartKind, ChoroplethDatum, DataPoint, GeoPoint, ResolvedConfig, Result, SeriesCollection, Theme,
};

use crate::{ChartDimensions, GeoCollaborator, Scene, TessellationCache};

pub(crate) use axis::Frame;

// ============================================================================
// VARIANTS
// ============================================================================

/// Bar chart data: one value per row, or stacked components per column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", content = "data", rename_all = "camelCase")]
pub enum BarData {
    /// Horizontal bars, one per point
    Simple(Vec<DataPoint>),
    /// Vertical stacked columns
    Stacked(SeriesCollection),
}

/// Map chart data, joined to the topology's features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", content = "data", rename_all = "camelCase")]
pub enum MapData {
    Choropleth(Vec<ChoroplethDatum>),
    DotDensity(Vec<GeoPoint>),
}

/// The chart to draw and its data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChartVariant {
    Line { data: Vec<DataPoint> },
    MultiLine { data: SeriesCollection },
    Bar { data: BarData },
    Scatter { data: Vec<DataPoint> },
    Area { data: SeriesCollection },
    Dumbbell { data: SeriesCollection },
    CirclePacking { data: Vec<DataPoint> },
    Map { data: MapData, topology: serde_json::Value },
}

impl ChartVariant {
    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Line { .. } => ChartKind::Line,
            Self::MultiLine { .. } => ChartKind::MultiLine,
            Self::Bar { data: BarData::Simple(_) } => ChartKind::Bar,
            Self::Bar { data: BarData::Stacked(_) } => ChartKind::StackedBar,
            Self::Scatter { .. } => ChartKind::Scatter,
            Self::Area { .. } => ChartKind::Area,
            Self::Dumbbell { .. } => ChartKind::Dumbbell,
            Self::CirclePacking { .. } => ChartKind::CirclePacking,
            Self::Map {
                data: MapData::Choropleth(_),
                ..
            } => ChartKind::Choropleth,
            Self::Map {
                data: MapData::DotDensity(_),
                ..
            } => ChartKind::DotDensity,
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        match self {
            Self::Line { data } | Self::Scatter { data } | Self::CirclePacking { data } => data.len(),
            Self::Bar {
                data: BarData::Simple(data),
            } => data.len(),
            Self::MultiLine { data }
            | Self::Area { data }
            | Self::Dumbbell { data }
            | Self::Bar {
                data: BarData::Stacked(data),
            } => data.points.len(),
            Self::Map {
                data: MapData::Choropleth(data),
                ..
            } => data.len(),
            Self::Map {
                data: MapData::DotDensity(data),
                ..
            } => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Structural checks that depend on both data and config
    pub fn validate(&self, config: &ResolvedConfig) -> Result<()> {
        let options = &config.options;
        match self {
            Self::MultiLine { data } | Self::Area { data } | Self::Bar {
                data: BarData::Stacked(data),
            } => {
                data.validate()?;
                check_colors(options.colors.as_deref(), data.labels.len())
            }
            Self::Dumbbell { data } => {
                data.validate()?;
                let domain = options.color_domain.as_ref().map_or(data.labels.len(), Vec::len);
                check_colors(options.colors.as_deref(), domain)
            }
            Self::Scatter { data } | Self::CirclePacking { data } => {
                if let Some(r) = data.iter().filter_map(|p| p.radius).find(|r| *r < 0.0) {
                    return Err(ChartError::config(format!("radius must be non-negative, got {r}")));
                }
                Ok(())
            }
            Self::Map { topology, data } => {
                crate::geo::features(topology)?;
                if let MapData::Choropleth(_) = data {
                    if !options.map.categorical {
                        if let Some(colors) = &options.colors {
                            let thresholds = options.map.domain.len();
                            if colors.len() < thresholds + 1 {
                                return Err(ChartError::Mismatch {
                                    what: "colours vs threshold classes",
                                    expected: thresholds + 1,
                                    actual: colors.len(),
                                });
                            }
                        }
                    }
                }
                Ok(())
            }
            Self::Line { .. } | Self::Bar { .. } => Ok(()),
        }
    }
}

/// An explicit colour list must cover a fixed colour domain
fn check_colors(colors: Option<&[String]>, domain: usize) -> Result<()> {
    match colors {
        Some(colors) if !colors.is_empty() && colors.len() < domain => Err(ChartError::Mismatch {
            what: "colours vs colour domain",
            expected: domain,
            actual: colors.len(),
        }),
        _ => Ok(()),
    }
}

// ============================================================================
// RENDER
// ============================================================================

/// Everything a renderer needs
#[derive(Debug, Clone)]
pub struct RenderInput<'a> {
    pub variant: &'a ChartVariant,
    pub config: &'a ResolvedConfig,
    pub theme: &'a Theme,
    /// Resolved outer size; `(0, 0)` before measurement
    pub size: (f64, f64),
    /// Bumped whenever the data changes; keys the tessellation cache
    pub revision: u64,
    pub geo: Option<Arc<dyn GeoCollaborator>>,
}

/// Build the scene for `input`.
///
/// Unmeasured size or empty data give a placeholder scene; rejected
/// configuration is an error.
pub fn render(input: &RenderInput<'_>, cache: &mut TessellationCache) -> Result<Scene> {
    let kind = input.variant.kind();
    let dims = ChartDimensions::new(input.size.0, input.size.1).with_margin(input.config.margin);

    input.variant.validate(input.config)?;

    if crate::is_placeholder(input.size) || input.variant.is_empty() {
        return Ok(Scene::placeholder(kind, dims));
    }

    let frame = Frame::new(dims, &input.config.options, input.theme);
    let scene = match input.variant {
        ChartVariant::Line { data } => line::render(&frame, data)?,
        ChartVariant::MultiLine { data } => multi_line::render(&frame, data)?,
        ChartVariant::Bar {
            data: BarData::Simple(data),
        } => bar::render_simple(&frame, data)?,
        ChartVariant::Bar {
            data: BarData::Stacked(data),
        } => bar::render_stacked(&frame, data)?,
        ChartVariant::Scatter { data } => scatter::render(&frame, data, input.revision, cache),
        ChartVariant::Area { data } => area::render(&frame, data)?,
        ChartVariant::Dumbbell { data } => dumbbell::render(&frame, data)?,
        ChartVariant::CirclePacking { data } => circle_packing::render(&frame, data),
        ChartVariant::Map { data, topology } => {
            let geo = input
                .geo
                .as_deref()
                .ok_or_else(|| ChartError::Geo("map chart without a geographic collaborator".to_string()))?;
            map::render(&frame, data, topology, geo)?
        }
    };

    tracing::debug!(kind = kind.label(), marks = scene.marks.len(), "scene rendered");
    Ok(scene)
}

/// [`render`], logging rejected input and falling back to a placeholder
pub fn render_or_placeholder(input: &RenderInput<'_>, cache: &mut TessellationCache) -> Scene {
    render(input, cache).unwrap_or_else(|err| {
        tracing::warn!(chart = %input.config.id, error = %err, "chart rejected, rendering placeholder");
        let dims = ChartDimensions::new(input.size.0, input.size.1).with_margin(input.config.margin);
        Scene::placeholder(input.variant.kind(), dims)
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use viz_core::ChartConfig;

    pub fn resolved(kind: ChartKind, config: ChartConfig) -> ResolvedConfig {
        config.resolved_for(kind).unwrap()
    }

    pub fn render_variant(variant: &ChartVariant, config: ChartConfig, size: (f64, f64)) -> Result<Scene> {
        let config = resolved(variant.kind(), config);
        let theme = Theme::light();
        let input = RenderInput {
            variant,
            config: &config,
            theme: &theme,
            size,
            revision: 1,
            geo: Some(Arc::new(crate::Equirectangular::default())),
        };
        render(&input, &mut TessellationCache::new())
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use viz_core::{ChartConfig, CompositePoint};

    #[test]
    fn test_unmeasured_renders_placeholder() {
        let variant = ChartVariant::Line {
            data: vec![DataPoint::new(1.0).with_x("2020")],
        };
        let scene = render_variant(&variant, ChartConfig::default(), (0.0, 0.0)).unwrap();
        assert!(scene.is_placeholder());
    }

    #[test]
    fn test_empty_data_renders_placeholder() {
        let variant = ChartVariant::Scatter { data: Vec::new() };
        let scene = render_variant(&variant, ChartConfig::default(), (600.0, 400.0)).unwrap();
        assert!(scene.is_placeholder());
        assert_eq!(scene.hit, crate::HitIndex::None);
    }

    #[test]
    fn test_series_longer_than_labels_is_rejected() {
        let variant = ChartVariant::MultiLine {
            data: SeriesCollection::new(
                vec!["a".into()],
                vec![CompositePoint::new("2020", vec![Some(1.0), Some(2.0)])],
            ),
        };
        let err = render_variant(&variant, ChartConfig::default(), (600.0, 400.0)).unwrap_err();
        assert!(matches!(err, ChartError::Mismatch { .. }));
    }

    #[test]
    fn test_short_colour_list_is_rejected() {
        let variant = ChartVariant::Bar {
            data: BarData::Stacked(SeriesCollection::new(
                vec!["a".into(), "b".into(), "c".into()],
                vec![CompositePoint::new("x", vec![Some(1.0), Some(2.0), Some(3.0)])],
            )),
        };
        let config = ChartConfig {
            colors: Some(vec!["#000".into()]),
            ..ChartConfig::default()
        };
        assert!(render_variant(&variant, config, (600.0, 400.0)).is_err());
    }

    #[test]
    fn test_negative_radius_is_rejected() {
        let variant = ChartVariant::Scatter {
            data: vec![DataPoint::new(1.0).with_x(1.0).with_radius(-2.0)],
        };
        assert!(render_variant(&variant, ChartConfig::default(), (600.0, 400.0)).is_err());
    }

    #[test]
    fn test_placeholder_on_rejection() {
        let variant = ChartVariant::Scatter {
            data: vec![DataPoint::new(1.0).with_x(1.0).with_radius(-2.0)],
        };
        let config = resolved(variant.kind(), ChartConfig::default());
        let theme = Theme::light();
        let input = RenderInput {
            variant: &variant,
            config: &config,
            theme: &theme,
            size: (600.0, 400.0),
            revision: 0,
            geo: None,
        };
        assert!(render_or_placeholder(&input, &mut TessellationCache::new()).is_placeholder());
    }
}
