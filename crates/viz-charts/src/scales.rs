//! Scale construction from data
//!
//! Value axes are anchored at zero so bars and areas never start mid-air;
//! time axes use the chronological extent as is.

use crate::chartkit::{LinearScale, SqrtScale, TimeScale};

/// Tick count used when nicing a domain (d3's default)
const NICE_COUNT: usize = 10;

/// `(min, max)` over the finite values, `None` when there are none
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// `(min(0, min), max(0, max))`; `(0, 0)` for empty input
pub fn zero_anchored_extent(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    extent(values).map_or((0.0, 0.0), |(lo, hi)| (lo.min(0.0), hi.max(0.0)))
}

/// Builds scales onto one pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBuilder {
    range: (f64, f64),
    nice: bool,
}

impl ScaleBuilder {
    pub fn new(range_start: f64, range_end: f64) -> Self {
        Self {
            range: (range_start, range_end),
            nice: true,
        }
    }

    /// Keep the raw extent instead of rounding it outward
    pub fn exact(mut self) -> Self {
        self.nice = false;
        self
    }

    /// Zero-anchored linear scale
    pub fn linear(&self, values: impl IntoIterator<Item = f64>) -> LinearScale {
        let (lo, hi) = zero_anchored_extent(values);
        self.linear_domain(lo, hi)
    }

    /// Linear scale over an explicit domain
    pub fn linear_domain(&self, lo: f64, hi: f64) -> LinearScale {
        let mut scale = LinearScale::new().domain(lo, hi).range(self.range.0, self.range.1);
        if self.nice {
            scale = scale.nice(NICE_COUNT);
        }
        tracing::debug!(domain = ?scale.domain_bounds(), range = ?self.range, "linear scale built");
        scale
    }

    /// Time scale over the chronological extent
    pub fn time(&self, timestamps: impl IntoIterator<Item = i64>) -> TimeScale {
        let (lo, hi) = timestamps
            .into_iter()
            .fold(None, |acc: Option<(i64, i64)>, t| match acc {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            })
            .unwrap_or((0, 0));
        tracing::debug!(lo, hi, "time scale built");
        TimeScale::new().domain(lo, hi).range(self.range.0, self.range.1)
    }

    /// Area-true radius scale `[0, max] -> range`; `None` when no radius is given
    pub fn sqrt(&self, radii: impl IntoIterator<Item = Option<f64>>) -> Option<SqrtScale> {
        let mut any = false;
        let max = radii
            .into_iter()
            .flatten()
            .inspect(|_| any = true)
            .filter(|r| r.is_finite())
            .fold(0.0_f64, f64::max);
        if !any {
            return None;
        }
        let mut scale = SqrtScale::new().domain(0.0, max).range(self.range.0, self.range.1);
        if self.nice {
            scale = scale.nice(NICE_COUNT);
        }
        Some(scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chartkit::Scale;

    #[test]
    fn test_zero_anchored_extent_exact() {
        assert_eq!(zero_anchored_extent([3.0, 7.5, 12.25]), (0.0, 12.25));
        assert_eq!(zero_anchored_extent([-4.0, -1.0]), (-4.0, 0.0));
        assert_eq!(zero_anchored_extent([-2.5, 9.0]), (-2.5, 9.0));
        assert_eq!(zero_anchored_extent([]), (0.0, 0.0));
        assert_eq!(zero_anchored_extent([f64::NAN, 2.0]), (0.0, 2.0));
    }

    #[test]
    fn test_linear_scale_is_inverted_for_value_axis() {
        let y = ScaleBuilder::new(300.0, 0.0).linear([12.0, 87.0]);
        assert_eq!(y.domain_bounds(), (0.0, 90.0));
        assert_eq!(y.scale(0.0), 300.0);
        assert_eq!(y.scale(90.0), 0.0);
    }

    #[test]
    fn test_empty_input_is_degenerate_not_panicking() {
        let y = ScaleBuilder::new(0.0, 100.0).linear(Vec::new());
        assert_eq!(y.domain_bounds(), (0.0, 0.0));
        assert_eq!(y.scale(42.0), 50.0);

        let t = ScaleBuilder::new(0.0, 100.0).time(Vec::new());
        assert_eq!(t.scale(5), 50.0);
    }

    #[test]
    fn test_sqrt_absent_without_radii() {
        assert!(ScaleBuilder::new(0.25, 5.0).sqrt([None, None]).is_none());
        let r = ScaleBuilder::new(0.25, 5.0).sqrt([Some(100.0), None]).unwrap();
        assert_eq!(r.scale(0.0), 0.25);
        assert_eq!(r.scale(100.0), 5.0);
    }
}
