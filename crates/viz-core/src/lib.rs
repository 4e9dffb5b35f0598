//! # viz-core
//!
//! Core data model for the vizkit chart library: input records, chart
//! configuration, theme and colour constants, and the error type.
//! Implements Strategy pattern for number formatting.

pub mod config;
pub mod datum;
pub mod error;
pub mod theme;

pub use config::*;
pub use datum::*;
pub use error::*;
pub use theme::*;

// ============================================================================
// STRATEGY PATTERN: Formatters
// ============================================================================

/// Strategy trait for axis and label number formatting
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

const SI_SUFFIXES: [&str; 5] = ["", "k", "M", "B", "T"];

/// SI-prefix formatter (`1.20k`, `3.4M`); billions use `B`, not `G`
#[derive(Debug, Clone)]
pub struct SiFormatter {
    /// Significant digits
    pub precision: usize,
    /// Drop trailing zeros after the decimal point
    pub trim: bool,
}

impl Default for SiFormatter {
    fn default() -> Self {
        Self { precision: 3, trim: true }
    }
}

impl SiFormatter {
    pub fn fixed(precision: usize) -> Self {
        Self { precision, trim: false }
    }
}

impl ValueFormatter for SiFormatter {
    fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return "NA".into();
        }
        if value == 0.0 {
            return "0".into();
        }
        let precision = self.precision.max(1) as i32;
        let sign = if value < 0.0 { "-" } else { "" };
        let rounded = round_significant(value.abs(), precision);
        let exponent = rounded.log10().floor() as i32;
        let tier = exponent.div_euclid(3).clamp(0, SI_SUFFIXES.len() as i32 - 1);
        let scaled = rounded / 1000f64.powi(tier);
        let decimals = (precision - 1 - (exponent - 3 * tier)).max(0) as usize;

        let mut digits = format!("{:.prec$}", scaled, prec = decimals);
        if self.trim {
            digits = trim_zeros(digits);
        }
        format!("{}{}{}", sign, digits, SI_SUFFIXES[tier as usize])
    }
}

/// Axis tick text: magnitudes below one are printed as they are, everything
/// else goes through the SI formatter
pub fn format_tick(value: f64) -> String {
    if value.abs() < 1.0 {
        trim_zeros(format!("{:.6}", round_significant(value, 6)))
    } else {
        SiFormatter::default().format(value)
    }
}

/// Label / tooltip text for a possibly-missing value
pub fn format_number(value: Option<f64>, prefix: &str, suffix: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}{}{}", prefix, format_tick(v), suffix),
        _ => "NA".into(),
    }
}

fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = 10f64.powi(value.abs().log10().floor() as i32 - digits + 1);
    (value / magnitude).round() * magnitude
}

fn trim_zeros(digits: String) -> String {
    if !digits.contains('.') {
        return digits;
    }
    digits.trim_end_matches('0').trim_end_matches('.').to_string()
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const BLUE_600: &str = "#006EB5";
    pub const GRAPH_GRAY: &str = "#A9B1B7";
    pub const NO_DATA: &str = "#D4D6D8";

    /// Default categorical palette, assigned positionally
    pub const CATEGORICAL: [&str; 6] = [
        "#006EB5", "#5DD4F0", "#02A38A", "#E78625", "#E0529E", "#757AF0",
    ];

    /// Sequential blues for threshold (choropleth) scales
    pub const SEQUENTIAL: [&str; 6] = [
        "#CCE4F4", "#99C9E9", "#66ADDE", "#3392D3", "#006EB5", "#00497A",
    ];
}
