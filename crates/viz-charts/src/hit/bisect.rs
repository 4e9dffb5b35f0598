//! Nearest sample on an ordered axis

use crate::chartkit::{LinearScale, Scale};

/// Index of the first value `>= x` in ascending `values`
pub fn bisect_left(values: &[f64], x: f64) -> usize {
    values.partition_point(|&v| v < x)
}

/// Index of the value closest to `x` in ascending `values`.
///
/// On an exact midpoint the later sample wins; past either end the nearest
/// end wins. `None` only for empty input.
pub fn bisect_center(values: &[f64], x: f64) -> Option<usize> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    let i = bisect_left(values, x).min(n - 1);
    if i > 0 && x - values[i - 1] < values[i] - x {
        Some(i - 1)
    } else {
        Some(i)
    }
}

/// Ordered-axis hit index: pointer x is inverted through the scale and
/// matched against sorted sample positions
#[derive(Debug, Clone, PartialEq)]
pub struct Bisector {
    /// Sample positions in domain units, ascending
    values: Vec<f64>,
    /// Datum index for each position
    order: Vec<usize>,
    scale: LinearScale,
}

impl Bisector {
    /// `samples` are `(domain x, datum index)` in any order
    pub fn new(mut samples: Vec<(f64, usize)>, scale: LinearScale) -> Self {
        samples.retain(|(x, _)| x.is_finite());
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (values, order) = samples.into_iter().unzip();
        Self { values, order, scale }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn find(&self, px: f64) -> Option<usize> {
        let x = self.scale.invert(px);
        bisect_center(&self.values, x).map(|i| self.order[i])
    }

    /// Pixel x of a datum, for the crosshair
    pub fn pixel_of(&self, datum: usize) -> Option<f64> {
        self.order
            .iter()
            .position(|&d| d == datum)
            .map(|i| self.scale.scale(self.values[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_distance_sample() {
        let xs = [0.0, 10.0, 20.0, 35.0];
        assert_eq!(bisect_center(&xs, 3.0), Some(0));
        assert_eq!(bisect_center(&xs, 7.0), Some(1));
        assert_eq!(bisect_center(&xs, 26.0), Some(2));
        assert_eq!(bisect_center(&xs, 29.0), Some(3));
    }

    #[test]
    fn test_midpoint_goes_to_later_sample() {
        let xs = [0.0, 10.0, 20.0];
        assert_eq!(bisect_center(&xs, 5.0), Some(1));
        assert_eq!(bisect_center(&xs, 15.0), Some(2));
    }

    #[test]
    fn test_out_of_range() {
        let xs = [0.0, 10.0, 20.0];
        assert_eq!(bisect_center(&xs, -50.0), Some(0));
        assert_eq!(bisect_center(&xs, 500.0), Some(2));
        assert_eq!(bisect_center(&[], 1.0), None);
        assert_eq!(bisect_center(&[4.0], 1.0), Some(0));
    }

    #[test]
    fn test_bisector_maps_back_to_datum() {
        let scale = LinearScale::new().domain(0.0, 100.0).range(0.0, 200.0);
        // datums given out of order
        let bisector = Bisector::new(vec![(50.0, 0), (0.0, 1), (100.0, 2)], scale);
        assert_eq!(bisector.find(10.0), Some(1));
        assert_eq!(bisector.find(95.0), Some(0));
        assert_eq!(bisector.find(190.0), Some(2));
        assert_eq!(bisector.pixel_of(0), Some(100.0));
    }
}
