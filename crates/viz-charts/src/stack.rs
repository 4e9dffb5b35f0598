//! Stack layout for composite points
//!
//! Each component sits on the running total of the defined components before
//! it. Absent components add zero and produce an empty segment.

use viz_core::CompositePoint;

use crate::scales::zero_anchored_extent;

/// One stacked segment in domain units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackSegment {
    /// Component index within the composite point
    pub component: usize,
    /// Cumulative total below this segment
    pub lower: f64,
    /// Cumulative total including this segment
    pub upper: f64,
    /// `false` for an absent component
    pub defined: bool,
}

impl StackSegment {
    pub fn extent(&self) -> f64 {
        (self.upper - self.lower).abs()
    }

    pub fn midpoint(&self) -> f64 {
        (self.upper + self.lower) / 2.0
    }
}

/// Running totals for one row of components
pub fn stack_values(values: &[Option<f64>]) -> Vec<StackSegment> {
    let mut total = 0.0;
    values
        .iter()
        .enumerate()
        .map(|(component, value)| {
            let lower = total;
            let defined = value.is_some_and(f64::is_finite);
            if defined {
                total += value.unwrap_or(0.0);
            }
            StackSegment {
                component,
                lower,
                upper: total,
                defined,
            }
        })
        .collect()
}

/// Stack every point, one row of segments per point
pub fn stack_points(points: &[CompositePoint]) -> Vec<Vec<StackSegment>> {
    points.iter().map(|p| stack_values(&p.values)).collect()
}

/// Largest cumulative total across all rows
pub fn stack_extent(stacks: &[Vec<StackSegment>]) -> (f64, f64) {
    zero_anchored_extent(stacks.iter().flatten().flat_map(|s| [s.lower, s.upper]))
}

/// Per-component layers across points, the shape area charts draw
pub fn layers(stacks: &[Vec<StackSegment>], components: usize) -> Vec<Vec<StackSegment>> {
    (0..components)
        .map(|j| stacks.iter().filter_map(|row| row.get(j).copied()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_component_adds_zero() {
        let segments = stack_values(&[Some(10.0), None, Some(5.0)]);
        let cumulative: Vec<f64> = segments.iter().map(|s| s.upper).collect();
        assert_eq!(cumulative, vec![10.0, 10.0, 15.0]);
        assert!(!segments[1].defined);
        assert_eq!(segments[1].extent(), 0.0);
        assert_eq!(segments[2].lower, 10.0);
    }

    #[test]
    fn test_extent_and_layers() {
        let points = vec![
            CompositePoint::new("a", vec![Some(1.0), Some(2.0)]),
            CompositePoint::new("b", vec![Some(4.0), None]),
        ];
        let stacks = stack_points(&points);
        assert_eq!(stack_extent(&stacks), (0.0, 4.0));

        let layers = layers(&stacks, 2);
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[1][0].upper, 3.0);
        assert_eq!(layers[1][1].upper, 4.0);
    }

    #[test]
    fn test_extent_covers_intermediate_peaks() {
        let points = vec![
            CompositePoint::new("a", vec![Some(10.0), Some(-5.0)]),
            CompositePoint::new("b", vec![Some(-3.0), Some(1.0)]),
        ];
        assert_eq!(stack_extent(&stack_points(&points)), (-3.0, 10.0));
    }

    #[test]
    fn test_non_finite_treated_as_absent() {
        let segments = stack_values(&[Some(f64::NAN), Some(2.0)]);
        assert!(!segments[0].defined);
        assert_eq!(segments[1].upper, 2.0);
    }
}
