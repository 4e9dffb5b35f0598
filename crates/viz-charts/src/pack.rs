//! Circle packing
//!
//! Front-chain sibling packing (Wang et al., as d3 `packSiblings` does it):
//! each circle is placed tangent to two neighbours on the front chain, and
//! the chain is repaired whenever the new circle would overlap it. The packed
//! cluster is then scaled and centred to fit the plot.

/// A packed circle in plot coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedCircle {
    /// Index into the input values
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct Circle {
    x: f64,
    y: f64,
    r: f64,
}

/// Place `c` tangent to both `a` and `b`
fn place(b: Circle, a: Circle, c: &mut Circle) {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let d2 = dx * dx + dy * dy;
    if d2 > 0.0 {
        let a2 = (a.r + c.r).powi(2);
        let b2 = (b.r + c.r).powi(2);
        if a2 > b2 {
            let x = (d2 + b2 - a2) / (2.0 * d2);
            let y = (b2 / d2 - x * x).max(0.0).sqrt();
            c.x = b.x - x * dx - y * dy;
            c.y = b.y - x * dy + y * dx;
        } else {
            let x = (d2 + a2 - b2) / (2.0 * d2);
            let y = (a2 / d2 - x * x).max(0.0).sqrt();
            c.x = a.x + x * dx - y * dy;
            c.y = a.y + x * dy + y * dx;
        }
    } else {
        c.x = a.x + c.r;
        c.y = a.y;
    }
}

fn intersects(a: Circle, b: Circle) -> bool {
    let dr = a.r + b.r - 1e-6;
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    dr > 0.0 && dr * dr > dx * dx + dy * dy
}

/// Distance from the origin of the weighted tangent point of `a` and `b`
fn score(a: Circle, b: Circle) -> f64 {
    let ab = a.r + b.r;
    let dx = (a.x * b.r + b.x * a.r) / ab;
    let dy = (a.y * b.r + b.y * a.r) / ab;
    dx * dx + dy * dy
}

/// Pack circles of the given radii around the origin; returns centres in
/// input order
pub fn pack_siblings(radii: &[f64]) -> Vec<(f64, f64)> {
    let n = radii.len();
    let mut circles: Vec<Circle> = radii
        .iter()
        .map(|&r| Circle {
            r: if r.is_finite() { r.max(0.0) } else { 0.0 },
            ..Circle::default()
        })
        .collect();

    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![(0.0, 0.0)];
    }

    circles[0].x = -circles[1].r;
    circles[1].x = circles[0].r;
    if n > 2 {
        let (a, b) = (circles[0], circles[1]);
        place(b, a, &mut circles[2]);

        // Front chain as a doubly linked ring over circle indices
        let mut next = vec![usize::MAX; n];
        let mut prev = vec![usize::MAX; n];
        let (mut a, mut b) = (0usize, 1usize);
        next[a] = b;
        prev[b] = a;
        next[b] = 2;
        prev[2] = b;
        next[2] = a;
        prev[a] = 2;

        let mut i = 3;
        'pack: while i < n {
            let (ca, cb) = (circles[a], circles[b]);
            place(ca, cb, &mut circles[i]);
            let c = i;

            let (mut j, mut k) = (next[b], prev[a]);
            let (mut sj, mut sk) = (circles[b].r, circles[a].r);
            loop {
                if sj <= sk {
                    if intersects(circles[j], circles[c]) {
                        b = j;
                        next[a] = b;
                        prev[b] = a;
                        continue 'pack;
                    }
                    sj += circles[j].r;
                    j = next[j];
                } else {
                    if intersects(circles[k], circles[c]) {
                        a = k;
                        next[a] = b;
                        prev[b] = a;
                        continue 'pack;
                    }
                    sk += circles[k].r;
                    k = prev[k];
                }
                if j == next[k] {
                    break;
                }
            }

            // Insert c between a and b
            prev[c] = a;
            next[c] = b;
            next[a] = c;
            prev[b] = c;
            b = c;

            // Move the chain start to the pair closest to the origin
            let mut best = score(circles[a], circles[next[a]]);
            let mut cursor = next[c];
            while cursor != b {
                let s = score(circles[cursor], circles[next[cursor]]);
                if s < best {
                    a = cursor;
                    best = s;
                }
                cursor = next[cursor];
            }
            b = next[a];
            i += 1;
        }
    }

    circles.iter().map(|c| (c.x, c.y)).collect()
}

/// A circle enclosing every input circle: centred on the area-weighted
/// centroid, radius reaching the farthest rim
fn enclose(circles: &[Circle]) -> Circle {
    let weight: f64 = circles.iter().map(|c| c.r * c.r).sum();
    let (cx, cy) = if weight > 0.0 {
        (
            circles.iter().map(|c| c.x * c.r * c.r).sum::<f64>() / weight,
            circles.iter().map(|c| c.y * c.r * c.r).sum::<f64>() / weight,
        )
    } else {
        (0.0, 0.0)
    };
    let r = circles
        .iter()
        .map(|c| ((c.x - cx).powi(2) + (c.y - cy).powi(2)).sqrt() + c.r)
        .fold(0.0, f64::max);
    Circle { x: cx, y: cy, r }
}

/// Pack circles whose areas follow `values` into a `width × height` plot.
///
/// Larger values are placed first. `padding` is the pixel gap kept between
/// neighbouring circles after scaling. Non-positive or missing values get no
/// circle.
pub fn pack_into(values: &[Option<f64>], width: f64, height: f64, padding: f64) -> Vec<PackedCircle> {
    let mut order: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|v| v.is_finite() && *v > 0.0).map(|v| (i, v.sqrt())))
        .collect();
    if order.is_empty() || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }
    order.sort_by(|a, b| b.1.total_cmp(&a.1));

    let radii: Vec<f64> = order.iter().map(|&(_, r)| r).collect();
    let centres = pack_siblings(&radii);
    let circles: Vec<Circle> = centres
        .iter()
        .zip(&radii)
        .map(|(&(x, y), &r)| Circle { x, y, r })
        .collect();
    let bounds = enclose(&circles);

    let available = (width.min(height) / 2.0 - padding).max(0.0);
    let k = if bounds.r > 0.0 { available / bounds.r } else { 0.0 };
    let (ox, oy) = (width / 2.0, height / 2.0);

    let packed: Vec<PackedCircle> = order
        .iter()
        .zip(&circles)
        .map(|(&(index, _), c)| PackedCircle {
            index,
            x: ox + (c.x - bounds.x) * k,
            y: oy + (c.y - bounds.y) * k,
            r: (c.r * k - padding / 2.0).max(0.0),
        })
        .collect();

    tracing::debug!(circles = packed.len(), scale = k, "circles packed");
    packed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn overlap(a: &PackedCircle, b: &PackedCircle) -> f64 {
        let d = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
        a.r + b.r - d
    }

    #[test]
    fn test_two_circles_touch() {
        let centres = pack_siblings(&[2.0, 3.0]);
        let d = (centres[1].0 - centres[0].0).abs();
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_third_circle_is_tangent_to_both() {
        let centres = pack_siblings(&[1.0, 1.0, 1.0]);
        for (i, j) in [(0, 2), (1, 2)] {
            let d = ((centres[i].0 - centres[j].0).powi(2) + (centres[i].1 - centres[j].1).powi(2)).sqrt();
            assert!((d - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_packed_circles_do_not_overlap_and_fit() {
        let mut rng = StdRng::seed_from_u64(3);
        let values: Vec<Option<f64>> = (0..60).map(|_| Some(1.0 + rng.r#gen::<f64>() * 100.0)).collect();
        let packed = pack_into(&values, 600.0, 400.0, 2.0);
        assert_eq!(packed.len(), 60);

        for (i, a) in packed.iter().enumerate() {
            assert!(a.x - a.r >= -1e-6 && a.x + a.r <= 600.0 + 1e-6);
            assert!(a.y - a.r >= -1e-6 && a.y + a.r <= 400.0 + 1e-6);
            for b in &packed[i + 1..] {
                assert!(overlap(a, b) < 1e-6, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_missing_values_get_no_circle() {
        let packed = pack_into(&[Some(4.0), None, Some(0.0), Some(9.0)], 100.0, 100.0, 0.0);
        let mut indices: Vec<usize> = packed.iter().map(|c| c.index).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 3]);
        // the larger value is drawn larger
        let big = packed.iter().find(|c| c.index == 3).unwrap();
        let small = packed.iter().find(|c| c.index == 0).unwrap();
        assert!(big.r > small.r);
    }
}
