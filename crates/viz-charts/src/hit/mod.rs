//! Nearest-datum lookup for pointer interaction
//!
//! Every scene carries one `HitIndex` built for its layout. Coordinates are
//! plot coordinates (margins already removed).

pub mod bisect;
pub mod region;
pub mod voronoi;

pub use bisect::*;
pub use region::*;
pub use voronoi::*;

use std::sync::Arc;

use crate::chartkit::BandScale;

/// Which pointer coordinate a band scale reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandAxis {
    /// Vertical bars: bands run along x
    X,
    /// Horizontal bars, dumbbell rows: bands run along y
    Y,
}

/// Strategy for resolving a pointer position to a datum
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HitIndex {
    /// Nothing to hit (empty data, unmeasured)
    #[default]
    None,
    /// Ordered / temporal x
    Bisect(Bisector),
    /// Scattered 2-D points; `ids[i]` is the datum of Voronoi site `i`
    Voronoi { voronoi: Arc<Voronoi>, ids: Vec<usize> },
    /// Categorical slot; band `i` is datum `ids[i]`
    Band { scale: BandScale, axis: BandAxis, ids: Vec<usize> },
    /// Drawn shapes, topmost first
    Regions(Regions),
}

impl HitIndex {
    pub fn find(&self, x: f64, y: f64) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Bisect(bisector) => bisector.find(x),
            Self::Voronoi { voronoi, ids } => voronoi.find(x, y).and_then(|i| ids.get(i).copied()),
            Self::Band { scale, axis, ids } => {
                let coord = match axis {
                    BandAxis::X => x,
                    BandAxis::Y => y,
                };
                scale.index_at(coord).and_then(|i| ids.get(i).copied())
            }
            Self::Regions(regions) => regions.find(x, y),
        }
    }

    /// Bisection charts draw a crosshair at the hovered sample
    pub fn crosshair_x(&self, datum: usize) -> Option<f64> {
        match self {
            Self::Bisect(bisector) => bisector.pixel_of(datum),
            _ => None,
        }
    }

    /// Voronoi cell outlines, for debugging overlays
    pub fn cell_paths(&self) -> Vec<String> {
        match self {
            Self::Voronoi { voronoi, .. } => (0..voronoi.len()).filter_map(|i| voronoi.cell_path(i)).collect(),
            _ => Vec::new(),
        }
    }
}
