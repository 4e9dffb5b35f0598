//! # chartkit
//!
//! Core chart primitives: scales, path builders, text helpers.
//! Implements Strategy pattern for flexible scale and rendering behaviors.

use std::fmt::Write;

use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc};
use viz_core::{ChartError, Result};

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;

    /// Inverse scale (range to domain)
    fn invert(&self, value: f64) -> f64;

    /// Generate tick values
    fn ticks(&self, count: usize) -> Vec<f64>;
}

// ============================================================================
// TICK ARITHMETIC (d3-array)
// ============================================================================

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// `(i1, i2, inc)`; a negative `inc` means ticks are `i / -inc`
fn tick_layout(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inverse = 10f64.powf(-power) / factor;
        i1 = (start * inverse).round();
        i2 = (stop * inverse).round();
        if i1 / inverse < start {
            i1 += 1.0;
        }
        if i2 / inverse > stop {
            i2 -= 1.0;
        }
        inc = -inverse;
    } else {
        inc = 10f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_layout(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Signed tick increment: positive is a step, negative is an inverse step
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    if !(start.is_finite() && stop.is_finite()) || stop <= start || count == 0 {
        return 0.0;
    }
    tick_layout(start, stop, count as f64).2
}

/// Absolute distance between adjacent ticks
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    let inc = tick_increment(lo, hi, count);
    if inc < 0.0 { 1.0 / -inc } else { inc }
}

/// Round, evenly spaced values inside `[start, stop]`
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !(start.is_finite() && stop.is_finite()) {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_layout(lo, hi, count as f64);
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1 + 1.0) as usize;
    let mut ticks: Vec<f64> = (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect();
    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Extend `[start, stop]` outward to round tick boundaries
pub fn nice_domain(start: f64, stop: f64, count: usize) -> (f64, f64) {
    if !(start.is_finite() && stop.is_finite()) || start == stop {
        return (start, stop);
    }
    let reverse = stop < start;
    let (mut lo, mut hi) = if reverse { (stop, start) } else { (start, stop) };

    let mut previous = None;
    for _ in 0..10 {
        let step = tick_increment(lo, hi, count);
        if previous == Some(step) {
            break;
        }
        if step > 0.0 {
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
        } else if step < 0.0 {
            lo = (lo * step).ceil() / step;
            hi = (hi * step).floor() / step;
        } else {
            break;
        }
        previous = Some(step);
    }

    if reverse { (hi, lo) } else { (lo, hi) }
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale (D3-style continuous scale)
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Round the domain outward so the ends land on ticks
    pub fn nice(mut self, count: usize) -> Self {
        self.domain = nice_domain(self.domain.0, self.domain.1, count);
        self
    }

    /// Get domain bounds
    pub fn domain_bounds(&self) -> (f64, f64) {
        self.domain
    }

    /// Get range bounds
    pub fn is_degenerate(&self) -> bool {
        (self.domain.1 - self.domain.0).abs() < f64::EPSILON
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if self.is_degenerate() {
            return (r_min + r_max) / 2.0;
        }

        let mut normalized = (value - d_min) / (d_max - d_min);

        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }

        r_min + normalized * (r_max - r_min)
    }

    fn invert(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return (d_min + d_max) / 2.0;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        d_min + normalized * (d_max - d_min)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

// ============================================================================
// SQRT SCALE
// ============================================================================

/// Power scale with exponent 0.5, so that circle *area* tracks the value
#[derive(Debug, Clone, PartialEq)]
pub struct SqrtScale {
    domain: (f64, f64),
    range: (f64, f64),
}

fn signed_sqrt(v: f64) -> f64 {
    v.signum() * v.abs().sqrt()
}

impl SqrtScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn nice(mut self, count: usize) -> Self {
        self.domain = nice_domain(self.domain.0, self.domain.1, count);
        self
    }

    pub fn domain_bounds(&self) -> (f64, f64) {
        self.domain
    }
}

impl Default for SqrtScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for SqrtScale {
    fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = (signed_sqrt(self.domain.0), signed_sqrt(self.domain.1));
        let (r0, r1) = self.range;
        if (d1 - d0).abs() < f64::EPSILON {
            return (r0 + r1) / 2.0;
        }
        r0 + (signed_sqrt(value) - d0) / (d1 - d0) * (r1 - r0)
    }

    fn invert(&self, value: f64) -> f64 {
        let (d0, d1) = (signed_sqrt(self.domain.0), signed_sqrt(self.domain.1));
        let (r0, r1) = self.range;
        if (r1 - r0).abs() < f64::EPSILON {
            return (self.domain.0 + self.domain.1) / 2.0;
        }
        let t = d0 + (value - r0) / (r1 - r0) * (d1 - d0);
        t.signum() * t * t
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

// ============================================================================
// TIME SCALE
// ============================================================================

const SECOND: i64 = 1_000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Calendar unit a time tick is aligned to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

const TICK_INTERVALS: [(TimeUnit, i64, i64); 18] = [
    (TimeUnit::Second, 1, SECOND),
    (TimeUnit::Second, 5, 5 * SECOND),
    (TimeUnit::Second, 15, 15 * SECOND),
    (TimeUnit::Second, 30, 30 * SECOND),
    (TimeUnit::Minute, 1, MINUTE),
    (TimeUnit::Minute, 5, 5 * MINUTE),
    (TimeUnit::Minute, 15, 15 * MINUTE),
    (TimeUnit::Minute, 30, 30 * MINUTE),
    (TimeUnit::Hour, 1, HOUR),
    (TimeUnit::Hour, 3, 3 * HOUR),
    (TimeUnit::Hour, 6, 6 * HOUR),
    (TimeUnit::Hour, 12, 12 * HOUR),
    (TimeUnit::Day, 1, DAY),
    (TimeUnit::Day, 2, 2 * DAY),
    (TimeUnit::Week, 1, WEEK),
    (TimeUnit::Month, 1, MONTH),
    (TimeUnit::Month, 3, 3 * MONTH),
    (TimeUnit::Year, 1, YEAR),
];

/// A calendar interval: every `step` units, aligned to the unit's field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub unit: TimeUnit,
    pub step: i64,
}

impl TimeInterval {
    /// Interval giving roughly `count` ticks over `[start, stop]`
    pub fn for_span(start: i64, stop: i64, count: usize) -> Self {
        let count = count.max(1);
        let target = (stop - start).abs() as f64 / count as f64;
        let i = TICK_INTERVALS.partition_point(|&(_, _, d)| (d as f64) <= target);

        if i == TICK_INTERVALS.len() {
            let step = tick_step(start as f64 / YEAR as f64, stop as f64 / YEAR as f64, count);
            return Self {
                unit: TimeUnit::Year,
                step: (step.round() as i64).max(1),
            };
        }
        if i == 0 {
            let step = tick_step(start as f64, stop as f64, count);
            return Self {
                unit: TimeUnit::Millisecond,
                step: (step.round() as i64).max(1),
            };
        }

        let (prev, next) = (TICK_INTERVALS[i - 1], TICK_INTERVALS[i]);
        let (unit, step, _) = if target / (prev.2 as f64) < (next.2 as f64) / target {
            prev
        } else {
            next
        };
        Self { unit, step }
    }

    /// Aligned boundaries inside `[start, stop]`
    pub fn ticks(&self, start: i64, stop: i64) -> Vec<i64> {
        let (start, stop) = if stop < start { (stop, start) } else { (start, stop) };
        let fixed = match self.unit {
            TimeUnit::Millisecond => Some(1),
            TimeUnit::Second => Some(SECOND),
            TimeUnit::Minute => Some(MINUTE),
            TimeUnit::Hour => Some(HOUR),
            _ => None,
        };
        if let Some(unit_ms) = fixed {
            let width = unit_ms * self.step.max(1);
            let first = -(-start).div_euclid(width) * width;
            return (0..)
                .map(|k| first + k * width)
                .take_while(|&t| t <= stop)
                .collect();
        }

        let Some(mut date) = date_of(start) else {
            return Vec::new();
        };
        if midnight_ms(date) < start {
            date = date + Duration::days(1);
        }

        let mut ticks = Vec::new();
        match self.unit {
            TimeUnit::Day => {
                while midnight_ms(date) <= stop {
                    if i64::from(date.day0()) % self.step == 0 {
                        ticks.push(midnight_ms(date));
                    }
                    date = date + Duration::days(1);
                }
            }
            TimeUnit::Week => {
                let to_sunday = (7 - date.weekday().num_days_from_sunday()) % 7;
                date = date + Duration::days(i64::from(to_sunday));
                while midnight_ms(date) <= stop {
                    ticks.push(midnight_ms(date));
                    date = date + Duration::weeks(self.step.max(1));
                }
            }
            TimeUnit::Month => {
                let (mut year, mut month0) = (date.year(), date.month0());
                if date.day() != 1 {
                    (year, month0) = next_month(year, month0);
                }
                while let Some(first) = NaiveDate::from_ymd_opt(year, month0 + 1, 1) {
                    if midnight_ms(first) > stop {
                        break;
                    }
                    if i64::from(month0) % self.step == 0 {
                        ticks.push(midnight_ms(first));
                    }
                    (year, month0) = next_month(year, month0);
                }
            }
            TimeUnit::Year => {
                let mut year = date.year();
                if date.ordinal() != 1 {
                    year += 1;
                }
                while let Some(first) = NaiveDate::from_ymd_opt(year, 1, 1) {
                    if midnight_ms(first) > stop {
                        break;
                    }
                    if i64::from(year).rem_euclid(self.step.max(1)) == 0 {
                        ticks.push(midnight_ms(first));
                    }
                    year += 1;
                }
            }
            _ => {}
        }
        ticks
    }
}

fn date_of(ms: i64) -> Option<NaiveDate> {
    Utc.timestamp_millis_opt(ms).single().map(|dt| dt.date_naive())
}

fn midnight_ms(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(i64::MAX)
}

fn next_month(year: i32, month0: u32) -> (i32, u32) {
    if month0 == 11 { (year + 1, 0) } else { (year, month0 + 1) }
}

/// Time scale (maps timestamps to pixel positions)
#[derive(Debug, Clone, PartialEq)]
pub struct TimeScale {
    domain: (i64, i64), // Unix timestamps in milliseconds
    range: (f64, f64),
}

impl TimeScale {
    pub fn new() -> Self {
        Self {
            domain: (0, 1),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: i64, max: i64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn domain_bounds(&self) -> (i64, i64) {
        self.domain
    }

    /// Scale timestamp to pixel position
    pub fn scale(&self, timestamp: i64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if d_max == d_min {
            return (r_min + r_max) / 2.0;
        }

        let normalized = (timestamp - d_min) as f64 / (d_max - d_min) as f64;
        r_min + normalized * (r_max - r_min)
    }

    /// Inverse scale (pixel to timestamp)
    pub fn invert(&self, value: f64) -> i64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return d_min + (d_max - d_min) / 2;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        (d_min as f64 + normalized * (d_max - d_min) as f64).round() as i64
    }

    /// Calendar-aligned ticks, roughly `count` of them
    pub fn ticks(&self, count: usize) -> Vec<i64> {
        let (start, stop) = self.domain;
        if start == stop {
            return vec![start];
        }
        TimeInterval::for_span(start, stop, count).ticks(start, stop)
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// BAND SCALE (for categorical data like bars and dumbbell rows)
// ============================================================================

/// Band scale for categorical data (d3 `scaleBand`, centre aligned)
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain_count: usize,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    pub fn new(count: usize) -> Self {
        Self {
            domain_count: count,
            range: (0.0, 1.0),
            padding_inner: 0.0,
            padding_outer: 0.0,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    pub fn len(&self) -> usize {
        self.domain_count
    }

    pub fn is_empty(&self) -> bool {
        self.domain_count == 0
    }

    fn bounds(&self) -> (f64, f64) {
        let (r0, r1) = self.range;
        if r1 < r0 { (r1, r0) } else { (r0, r1) }
    }

    /// Distance between the starts of adjacent bands
    pub fn step(&self) -> f64 {
        let (start, stop) = self.bounds();
        let n = self.domain_count as f64;
        (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0)
    }

    /// Get band width (width of each bar)
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    fn first_start(&self) -> f64 {
        let (start, stop) = self.bounds();
        let n = self.domain_count as f64;
        start + (stop - start - self.step() * (n - self.padding_inner)) * 0.5
    }

    /// Get position for index
    pub fn scale(&self, index: usize) -> f64 {
        if self.domain_count == 0 {
            return self.range.0;
        }
        let slot = if self.range.1 < self.range.0 {
            self.domain_count - 1 - index.min(self.domain_count - 1)
        } else {
            index
        };
        self.first_start() + self.step() * slot as f64
    }

    /// Get center position for index
    pub fn scale_center(&self, index: usize) -> f64 {
        self.scale(index) + self.bandwidth() / 2.0
    }

    /// Band whose slot (band plus half the gap on each side) contains `px`
    pub fn index_at(&self, px: f64) -> Option<usize> {
        let (start, stop) = self.bounds();
        if self.domain_count == 0 || !(start..=stop).contains(&px) {
            return None;
        }
        let step = self.step();
        if step <= 0.0 {
            return None;
        }
        let gap = step * self.padding_inner / 2.0;
        let slot = ((px - self.first_start() + gap) / step).floor();
        let slot = slot.clamp(0.0, (self.domain_count - 1) as f64) as usize;
        Some(if self.range.1 < self.range.0 {
            self.domain_count - 1 - slot
        } else {
            slot
        })
    }
}

impl Default for BandScale {
    fn default() -> Self {
        Self::new(10)
    }
}

// ============================================================================
// THRESHOLD SCALE (choropleth classes)
// ============================================================================

/// `n` ascending thresholds map values onto `n + 1` outputs
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdScale {
    thresholds: Vec<f64>,
    colors: Vec<String>,
}

impl ThresholdScale {
    pub fn new(thresholds: Vec<f64>, colors: Vec<String>) -> Result<Self> {
        if colors.len() < thresholds.len() + 1 {
            return Err(ChartError::Mismatch {
                what: "threshold colours",
                expected: thresholds.len() + 1,
                actual: colors.len(),
            });
        }
        if thresholds.windows(2).any(|w| w[1] < w[0]) {
            return Err(ChartError::config("thresholds must be ascending"));
        }
        Ok(Self { thresholds, colors })
    }

    /// Class index; a value equal to a threshold falls in the upper class
    pub fn class_of(&self, value: f64) -> usize {
        self.thresholds.partition_point(|&t| t <= value)
    }

    pub fn color(&self, value: f64) -> &str {
        &self.colors[self.class_of(value)]
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn colors(&self) -> &[String] {
        &self.colors[..=self.thresholds.len()]
    }
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(256),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "M{:.2},{:.2}", x, y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "L{:.2},{:.2}", x, y);
        self
    }

    pub fn cubic_to(mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> Self {
        let _ = write!(
            self.commands,
            "C{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            x1, y1, x2, y2, x, y
        );
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push('Z');
        self
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn build(self) -> String {
        self.commands
    }
}

// ============================================================================
// STRATEGY PATTERN: Curves
// ============================================================================

/// How consecutive points are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Curve {
    Linear,
    /// Monotone in x (d3 `curveMonotoneX`): no overshoot between samples
    #[default]
    MonotoneX,
}

impl Curve {
    /// Continue `builder` (already positioned at `points[0]`) through the rest
    pub fn extend(&self, mut builder: PathBuilder, points: &[(f64, f64)]) -> PathBuilder {
        if points.len() < 2 {
            return builder;
        }
        if *self == Curve::Linear || points.len() == 2 {
            for &(x, y) in &points[1..] {
                builder = builder.line_to(x, y);
            }
            return builder;
        }

        let tangents = monotone_tangents(points);
        for (i, pair) in points.windows(2).enumerate() {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            let dx = (x1 - x0) / 3.0;
            builder = builder.cubic_to(
                x0 + dx,
                y0 + dx * tangents[i],
                x1 - dx,
                y1 - dx * tangents[i + 1],
                x1,
                y1,
            );
        }
        builder
    }
}

fn sign(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Steffen tangents, as d3's monotoneX computes them
fn monotone_tangents(points: &[(f64, f64)]) -> Vec<f64> {
    let n = points.len();
    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        let (x0, y0) = points[i - 1];
        let (x1, y1) = points[i];
        let (x2, y2) = points[i + 1];
        let (h0, h1) = (x1 - x0, x2 - x1);
        let s0 = (y1 - y0) / h0;
        let s1 = (y2 - y1) / h1;
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
        tangents[i] = finite_or(t, 0.0);
    }

    let end_slope = |a: (f64, f64), b: (f64, f64), t: f64| {
        let h = b.0 - a.0;
        if h == 0.0 { t } else { finite_or((3.0 * (b.1 - a.1) / h - t) / 2.0, 0.0) }
    };
    tangents[0] = end_slope(points[0], points[1], tangents[1]);
    tangents[n - 1] = end_slope(points[n - 2], points[n - 1], tangents[n - 2]);
    tangents
}

// ============================================================================
// PATH GENERATORS
// ============================================================================

/// Open line through `points`
pub fn line_path(points: &[(f64, f64)], curve: Curve) -> String {
    let Some(&(x, y)) = points.first() else {
        return String::new();
    };
    curve.extend(PathBuilder::new().move_to(x, y), points).build()
}

/// Line with gaps: each run of defined points becomes its own sub-path
pub fn line_path_defined(points: &[Option<(f64, f64)>], curve: Curve) -> String {
    let mut path = String::new();
    for run in points.split(|p| p.is_none()) {
        let run: Vec<(f64, f64)> = run.iter().flatten().copied().collect();
        path.push_str(&line_path(&run, curve));
    }
    path
}

/// Closed band between an upper and a lower line (stacked layers)
pub fn band_path(upper: &[(f64, f64)], lower: &[(f64, f64)], curve: Curve) -> String {
    let Some(&(x, y)) = upper.first() else {
        return String::new();
    };
    let builder = curve.extend(PathBuilder::new().move_to(x, y), upper);

    let reversed: Vec<(f64, f64)> = lower.iter().rev().copied().collect();
    let builder = match reversed.first() {
        Some(&(lx, ly)) => curve.extend(builder.line_to(lx, ly), &reversed),
        None => builder,
    };
    builder.close().build()
}

/// Closed polygon
pub fn polygon_path(points: &[(f64, f64)]) -> String {
    let Some(&(x, y)) = points.first() else {
        return String::new();
    };
    let mut builder = PathBuilder::new().move_to(x, y);
    for &(x, y) in &points[1..] {
        builder = builder.line_to(x, y);
    }
    builder.close().build()
}

// ============================================================================
// NUMERIC & TEXT HELPERS
// ============================================================================

/// Replace NaN / infinity before it reaches an SVG attribute
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Cut `text` longer than `budget` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let head: String = text.chars().take(budget).collect();
    format!("{head}...")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> i64 {
        midnight_ms(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new().domain(0.0, 100.0).range(0.0, 500.0);

        assert_eq!(scale.scale(0.0), 0.0);
        assert_eq!(scale.scale(50.0), 250.0);
        assert_eq!(scale.scale(100.0), 500.0);
        assert_eq!(scale.invert(250.0), 50.0);
    }

    #[test]
    fn test_degenerate_domain_maps_to_midpoint() {
        let scale = LinearScale::new().domain(3.0, 3.0).range(0.0, 200.0);
        assert_eq!(scale.scale(3.0), 100.0);
        assert_eq!(scale.scale(-7.0), 100.0);
        assert_eq!(scale.ticks(5), vec![3.0]);
    }

    #[test]
    fn test_nice_domain() {
        assert_eq!(nice_domain(0.0, 97.3, 10), (0.0, 100.0));
        assert_eq!(nice_domain(-13.0, 42.0, 10), (-15.0, 45.0));
        assert_eq!(nice_domain(0.0, 0.96, 10), (0.0, 1.0));
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(0.0, 100.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(nice_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(nice_ticks(-10.0, 10.0, 4), vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
    }

    #[test]
    fn test_sqrt_scale() {
        let scale = SqrtScale::new().domain(0.0, 100.0).range(0.0, 10.0);
        assert_eq!(scale.scale(25.0), 5.0);
        assert_eq!(scale.scale(100.0), 10.0);
        assert!((scale.invert(5.0) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_yearly_time_ticks() {
        let scale = TimeScale::new()
            .domain(ymd(2000, 1, 1), ymd(2020, 1, 1))
            .range(0.0, 600.0);
        let ticks = scale.ticks(10);
        assert_eq!(ticks.first(), Some(&ymd(2000, 1, 1)));
        assert_eq!(ticks.get(1), Some(&ymd(2002, 1, 1)));
        assert_eq!(ticks.last(), Some(&ymd(2020, 1, 1)));
        assert_eq!(ticks.len(), 11);
    }

    #[test]
    fn test_monthly_time_ticks() {
        let ticks = TimeInterval::for_span(ymd(2021, 1, 15), ymd(2021, 12, 31), 4)
            .ticks(ymd(2021, 1, 15), ymd(2021, 12, 31));
        assert_eq!(ticks, vec![ymd(2021, 4, 1), ymd(2021, 7, 1), ymd(2021, 10, 1)]);
    }

    #[test]
    fn test_hourly_time_ticks() {
        let start = ymd(2022, 3, 1) + 30 * MINUTE;
        let interval = TimeInterval::for_span(start, start + 12 * HOUR, 4);
        assert_eq!(interval, TimeInterval { unit: TimeUnit::Hour, step: 3 });
        let ticks = interval.ticks(start, start + 12 * HOUR);
        assert_eq!(ticks[0], ymd(2022, 3, 1) + 3 * HOUR);
    }

    #[test]
    fn test_band_scale_matches_d3() {
        let scale = BandScale::new(4).range(0.0, 100.0).padding(0.2, 0.0);
        // step = 100 / (4 - 0.2) ; start offset = (100 - step * 3.8) / 2 = 0
        let step = 100.0 / 3.8;
        assert!((scale.step() - step).abs() < 1e-9);
        assert!((scale.bandwidth() - step * 0.8).abs() < 1e-9);
        assert!(scale.scale(0).abs() < 1e-9);
        assert!((scale.scale(3) - 3.0 * step).abs() < 1e-9);
    }

    #[test]
    fn test_band_scale_outer_padding_centres() {
        let scale = BandScale::new(2).range(0.0, 100.0).padding(0.0, 0.5);
        assert_eq!(scale.step(), 100.0 / 3.0);
        assert!((scale.scale(0) - 100.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_band_index_at() {
        let scale = BandScale::new(4).range(0.0, 100.0).padding(0.2, 0.0);
        assert_eq!(scale.index_at(1.0), Some(0));
        assert_eq!(scale.index_at(scale.scale_center(2)), Some(2));
        assert_eq!(scale.index_at(99.9), Some(3));
        assert_eq!(scale.index_at(120.0), None);
        assert_eq!(BandScale::new(0).range(0.0, 10.0).index_at(5.0), None);
    }

    #[test]
    fn test_threshold_scale() {
        let colors: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let scale = ThresholdScale::new(vec![10.0, 20.0], colors).unwrap();
        assert_eq!(scale.color(5.0), "a");
        assert_eq!(scale.color(10.0), "b");
        assert_eq!(scale.color(25.0), "c");
    }

    #[test]
    fn test_threshold_scale_needs_enough_colors() {
        let result = ThresholdScale::new(vec![1.0, 2.0], vec!["a".into()]);
        assert!(matches!(result, Err(ChartError::Mismatch { .. })));
    }

    #[test]
    fn test_path_builder() {
        let path = PathBuilder::new()
            .move_to(0.0, 0.0)
            .line_to(100.0, 100.0)
            .close()
            .build();

        assert_eq!(path, "M0.00,0.00L100.00,100.00Z");
    }

    #[test]
    fn test_monotone_curve_stays_flat_on_plateau() {
        let path = line_path(&[(0.0, 10.0), (10.0, 10.0), (20.0, 10.0)], Curve::MonotoneX);
        assert!(path.starts_with("M0.00,10.00C"));
        assert!(!path.contains("NaN"));
        // every control point stays on y = 10
        assert_eq!(path.matches("10.00").count(), 8);
    }

    #[test]
    fn test_line_path_defined_splits_runs() {
        let path = line_path_defined(
            &[Some((0.0, 0.0)), Some((1.0, 1.0)), None, Some((3.0, 3.0)), Some((4.0, 4.0))],
            Curve::Linear,
        );
        assert_eq!(path, "M0.00,0.00L1.00,1.00M3.00,3.00L4.00,4.00");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Brazil", 10), "Brazil");
        assert_eq!(truncate("Switzerland", 5), "Switz...");
        assert_eq!(truncate("abcde", 5), "abcde");
        assert_eq!(truncate("abcdef", 5), "abcde...");
    }
}
