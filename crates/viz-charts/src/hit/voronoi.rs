//! Voronoi partition over scattered points
//!
//! Built from a Delaunay triangulation: `find` walks the Delaunay graph
//! greedily towards the query, which lands on the exact nearest site; cell
//! polygons are the plot bounds clipped by the bisector of each Delaunay
//! neighbour.

use std::sync::Arc;

use delaunator::{Point, triangulate};

use crate::chartkit::polygon_path;

type Xy = (f64, f64);

fn dist2(a: Xy, b: Xy) -> f64 {
    let (dx, dy) = (a.0 - b.0, a.1 - b.1);
    dx * dx + dy * dy
}

/// Voronoi diagram of a point set, clipped to a bounding box
#[derive(Debug, Clone, PartialEq)]
pub struct Voronoi {
    points: Vec<Xy>,
    neighbors: Vec<Vec<usize>>,
    /// Coincident points resolve to the one kept in the triangulation
    representative: Vec<usize>,
    /// `(x0, y0, x1, y1)`
    bounds: (f64, f64, f64, f64),
    triangulated: bool,
}

impl Voronoi {
    pub fn new(points: Vec<Xy>, bounds: (f64, f64, f64, f64)) -> Self {
        let sites: Vec<Point> = points.iter().map(|&(x, y)| Point { x, y }).collect();
        let triangulation = triangulate(&sites);

        let n = points.len();
        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];
        for tri in triangulation.triangles.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                neighbors[a].push(b);
                neighbors[b].push(a);
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        let triangulated = !triangulation.triangles.is_empty();
        let representative = (0..n)
            .map(|i| {
                if !triangulated || !neighbors[i].is_empty() {
                    return i;
                }
                (0..n)
                    .filter(|&j| !neighbors[j].is_empty())
                    .min_by(|&a, &b| dist2(points[i], points[a]).total_cmp(&dist2(points[i], points[b])))
                    .unwrap_or(i)
            })
            .collect();

        tracing::debug!(sites = n, triangles = triangulation.len(), "voronoi built");

        Self {
            points,
            neighbors,
            representative,
            bounds,
            triangulated,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.bounds
    }

    /// Index of the site nearest to `(x, y)`; `None` outside the bounds
    pub fn find(&self, x: f64, y: f64) -> Option<usize> {
        self.find_from(x, y, 0)
    }

    /// As [`find`](Self::find), starting the walk at `start` (e.g. the last hit)
    pub fn find_from(&self, x: f64, y: f64, start: usize) -> Option<usize> {
        let (x0, y0, x1, y1) = self.bounds;
        if self.points.is_empty() || !(x0..=x1).contains(&x) || !(y0..=y1).contains(&y) {
            return None;
        }
        let query = (x, y);

        if !self.triangulated {
            return (0..self.points.len())
                .min_by(|&a, &b| dist2(query, self.points[a]).total_cmp(&dist2(query, self.points[b])));
        }

        let mut current = self.representative[start.min(self.points.len() - 1)];
        loop {
            let mut best = current;
            let mut best_d = dist2(query, self.points[current]);
            for &nb in &self.neighbors[current] {
                let d = dist2(query, self.points[nb]);
                if d < best_d {
                    best = nb;
                    best_d = d;
                }
            }
            if best == current {
                return Some(current);
            }
            current = best;
        }
    }

    /// Cell polygon of site `i`; empty for coincident duplicates
    pub fn cell_polygon(&self, i: usize) -> Vec<Xy> {
        if i >= self.points.len() || self.representative[i] != i {
            return Vec::new();
        }
        let (x0, y0, x1, y1) = self.bounds;
        let mut polygon = vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)];
        let site = self.points[i];

        let others: Vec<usize> = if self.triangulated {
            self.neighbors[i].clone()
        } else {
            (0..self.points.len())
                .filter(|&j| j != i && self.points[j] != site)
                .collect()
        };

        for j in others {
            polygon = clip_half_plane(&polygon, site, self.points[j]);
            if polygon.is_empty() {
                break;
            }
        }
        polygon
    }

    /// SVG path of cell `i`, `None` when the cell is empty
    pub fn cell_path(&self, i: usize) -> Option<String> {
        let polygon = self.cell_polygon(i);
        (polygon.len() >= 3).then(|| polygon_path(&polygon))
    }
}

/// Keep the part of `polygon` closer to `site` than to `other`
fn clip_half_plane(polygon: &[Xy], site: Xy, other: Xy) -> Vec<Xy> {
    let (dx, dy) = (other.0 - site.0, other.1 - site.1);
    let mid = ((site.0 + other.0) / 2.0, (site.1 + other.1) / 2.0);
    let side = |q: Xy| (q.0 - mid.0) * dx + (q.1 - mid.1) * dy;

    let mut out = Vec::with_capacity(polygon.len() + 1);
    for k in 0..polygon.len() {
        let current = polygon[k];
        let previous = polygon[(k + polygon.len() - 1) % polygon.len()];
        let (sc, sp) = (side(current), side(previous));
        let crossing = || {
            let t = sp / (sp - sc);
            (
                previous.0 + t * (current.0 - previous.0),
                previous.1 + t * (current.1 - previous.1),
            )
        };
        if sc <= 0.0 {
            if sp > 0.0 {
                out.push(crossing());
            }
            out.push(current);
        } else if sp <= 0.0 {
            out.push(crossing());
        }
    }
    out
}

// ============================================================================
// TESSELLATION CACHE
// ============================================================================

/// Keeps the last Voronoi and rebuilds only when the data revision or the
/// plot size changes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TessellationCache {
    key: Option<(u64, u64, u64)>,
    voronoi: Option<Arc<Voronoi>>,
    builds: usize,
}

impl TessellationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(
        &mut self,
        revision: u64,
        width: f64,
        height: f64,
        sites: impl FnOnce() -> Vec<Xy>,
    ) -> Arc<Voronoi> {
        let key = (revision, width.to_bits(), height.to_bits());
        if self.key == Some(key) {
            if let Some(voronoi) = &self.voronoi {
                return Arc::clone(voronoi);
            }
        }
        let voronoi = Arc::new(Voronoi::new(sites(), (0.0, 0.0, width.max(0.0), height.max(0.0))));
        self.key = Some(key);
        self.voronoi = Some(Arc::clone(&voronoi));
        self.builds += 1;
        voronoi
    }

    /// Number of rebuilds so far
    pub fn builds(&self) -> usize {
        self.builds
    }
}
