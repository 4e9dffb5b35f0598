//! Responsive size resolution
//!
//! Explicit sizes win; otherwise width comes from the measured container and
//! height from `relative_height` or the per-variant fallback. The container's
//! own height is never read back: it holds the chart, so it would grow with it.

use viz_core::ChartKind;

/// Requested size and the last measurement of the container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeRequest {
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// Height as a fraction of width
    pub relative_height: Option<f64>,
    /// Container width; `None` before the first measurement
    pub measured_width: Option<f64>,
}

/// Resolved chart size; `(0, 0)` means "not measured yet, draw a placeholder"
pub fn resolve_size(request: SizeRequest, kind: ChartKind) -> (f64, f64) {
    let (fallback_w, fallback_h) = kind.fallback_size();

    let explicit = |v: Option<f64>| v.filter(|v| v.is_finite() && *v > 0.0);

    let width = match (explicit(request.width), request.measured_width) {
        (Some(w), _) => w,
        (None, Some(mw)) if mw.is_finite() && mw > 0.0 => mw,
        (None, Some(_)) => fallback_w,
        (None, None) => return (0.0, 0.0),
    };

    let height = match (explicit(request.height), explicit(request.relative_height)) {
        (Some(h), _) => h,
        (None, Some(relative)) => width * relative,
        (None, None) => fallback_h,
    };

    (width, height)
}

/// Whether a resolved size can hold marks
pub fn is_placeholder(size: (f64, f64)) -> bool {
    size.0 <= 0.0 || size.1 <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmeasured_is_placeholder() {
        let size = resolve_size(SizeRequest::default(), ChartKind::Line);
        assert_eq!(size, (0.0, 0.0));
        assert!(is_placeholder(size));
    }

    #[test]
    fn test_zero_measurement_falls_back_per_kind() {
        let request = SizeRequest {
            measured_width: Some(0.0),
            ..Default::default()
        };
        assert_eq!(resolve_size(request, ChartKind::Bar), (620.0, 480.0));
        assert_eq!(resolve_size(request, ChartKind::Choropleth), (760.0, 570.0));
    }

    #[test]
    fn test_explicit_and_relative() {
        let request = SizeRequest {
            width: Some(400.0),
            relative_height: Some(0.5),
            measured_width: Some(900.0),
            ..Default::default()
        };
        assert_eq!(resolve_size(request, ChartKind::Line), (400.0, 200.0));

        let explicit_only = SizeRequest {
            width: Some(300.0),
            height: Some(100.0),
            ..Default::default()
        };
        assert_eq!(resolve_size(explicit_only, ChartKind::Line), (300.0, 100.0));
    }

    #[test]
    fn test_measured_width_used() {
        let request = SizeRequest {
            measured_width: Some(800.0),
            ..Default::default()
        };
        assert_eq!(resolve_size(request, ChartKind::Scatter), (800.0, 480.0));

        let relative = SizeRequest {
            relative_height: Some(0.25),
            ..request
        };
        assert_eq!(resolve_size(relative, ChartKind::Scatter), (800.0, 200.0));
    }

    #[test]
    fn test_height_settles_while_container_grows() {
        // The container holds the chart plus a legend, so each render would
        // report a taller box; the resolved size must not follow it
        let mut heights = Vec::new();
        let mut container_height = 0.0;
        for _ in 0..5 {
            let request = SizeRequest {
                measured_width: Some(800.0),
                ..Default::default()
            };
            let (_, height) = resolve_size(request, ChartKind::Bar);
            heights.push(height);
            container_height = height + 32.0;
        }
        assert!(container_height > 480.0);
        assert!(heights.iter().all(|&h| h == 480.0));
    }
}
