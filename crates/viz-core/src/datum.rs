//! Chart input records: single points, composite (multi-value) points, map data
//!
//! Everything here is plain data. Records are `serde` deserialisable so hosts
//! can feed JSON straight in; field aliases accept the short names the data
//! files use (`y`, `color`, `data`).

use crate::{ChartError, Result};
use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// X VALUES
// ============================================================================

/// Independent variable of a point: a number or a date string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XValue {
    Number(f64),
    Text(String),
}

impl XValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Resolve to a timestamp (ms) using `format` for text values.
    /// Numbers are taken as timestamps already.
    pub fn timestamp_ms(&self, format: &str) -> Result<i64> {
        match self {
            Self::Number(n) => Ok(*n as i64),
            Self::Text(s) => parse_date(s, format),
        }
    }
}

impl From<f64> for XValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for XValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl std::fmt::Display for XValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

// ============================================================================
// DATA POINT
// ============================================================================

/// One observation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataPoint {
    /// Primary value
    #[serde(default, alias = "y")]
    pub value: Option<f64>,
    /// Independent variable (numeric or date-like)
    #[serde(default)]
    pub x: Option<XValue>,
    /// Key into the colour domain
    #[serde(default, alias = "color")]
    pub category: Option<String>,
    /// Non-negative weight for area-encoded size
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub label: Option<String>,
    /// Opaque payload forwarded to tooltips and callbacks
    #[serde(default, alias = "data")]
    pub payload: Option<serde_json::Value>,
}

impl DataPoint {
    pub fn new(value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn with_x(mut self, x: impl Into<XValue>) -> Self {
        self.x = Some(x.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Numeric x, if present and numeric
    pub fn x_number(&self) -> Option<f64> {
        self.x.as_ref().and_then(XValue::as_number)
    }
}

// ============================================================================
// COMPOSITE POINTS
// ============================================================================

/// A point holding several component values aligned to a shared label list
/// (multi-line, stacked bar, stacked area, dumbbell rows)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompositePoint {
    /// Row label, or the date string for time series
    #[serde(alias = "date")]
    pub label: String,
    /// Component values; `None` means missing, never zero
    #[serde(alias = "y", alias = "size", alias = "x")]
    pub values: Vec<Option<f64>>,
    #[serde(default, alias = "data")]
    pub payload: Option<serde_json::Value>,
}

impl CompositePoint {
    pub fn new(label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            label: label.into(),
            values,
            payload: None,
        }
    }

    /// Defined components only
    pub fn defined(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().flatten().copied()
    }

    /// Sum of defined components
    pub fn total(&self) -> f64 {
        self.defined().sum()
    }
}

/// Ordered composite points sharing one component label list
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesCollection {
    /// One label per component (series name, stack segment name, ...)
    pub labels: Vec<String>,
    pub points: Vec<CompositePoint>,
}

impl SeriesCollection {
    pub fn new(labels: Vec<String>, points: Vec<CompositePoint>) -> Self {
        Self { labels, points }
    }

    /// Number of component series (widest point)
    pub fn series_count(&self) -> usize {
        self.points.iter().map(|p| p.values.len()).max().unwrap_or(0)
    }

    /// Every point must fit inside the label list
    pub fn validate(&self) -> Result<()> {
        let actual = self.series_count();
        if actual > self.labels.len() {
            return Err(ChartError::Mismatch {
                what: "series values vs labels",
                expected: self.labels.len(),
                actual,
            });
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ============================================================================
// REFERENCE MARKERS & HIGHLIGHT AREAS
// ============================================================================

/// Fixed value drawn as a dashed line, independent of the data domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMarker {
    pub value: f64,
    #[serde(default, alias = "text")]
    pub label: String,
}

impl ReferenceMarker {
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Shaded band behind the marks; open ends extend to the plot edge
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HighlightArea {
    #[serde(default)]
    pub x_start: Option<f64>,
    #[serde(default)]
    pub x_end: Option<f64>,
    #[serde(default)]
    pub y_start: Option<f64>,
    #[serde(default)]
    pub y_end: Option<f64>,
}

impl HighlightArea {
    pub fn is_empty(&self) -> bool {
        self.x_start.is_none() && self.x_end.is_none() && self.y_start.is_none() && self.y_end.is_none()
    }
}

// ============================================================================
// MAP DATA
// ============================================================================

/// Choropleth value: numeric (threshold coloured) or categorical
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapValue {
    Number(f64),
    Category(String),
}

/// Value joined to a map feature by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethDatum {
    #[serde(alias = "countryCode")]
    pub id: String,
    #[serde(default, alias = "x")]
    pub value: Option<MapValue>,
    #[serde(default, alias = "data")]
    pub payload: Option<serde_json::Value>,
}

/// A located point for dot-density maps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    #[serde(alias = "long")]
    pub lon: f64,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default, alias = "color")]
    pub category: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, alias = "data")]
    pub payload: Option<serde_json::Value>,
}

// ============================================================================
// DATUM (what tooltips and callbacks receive)
// ============================================================================

/// Flattened view of the record behind a mark, handed to tooltip and
/// series-hover callbacks
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Datum {
    /// Index into the caller's data
    pub index: usize,
    pub label: Option<String>,
    pub category: Option<String>,
    pub x: Option<XValue>,
    pub values: Vec<Option<f64>>,
    pub payload: Option<serde_json::Value>,
}

impl Datum {
    pub fn from_point(index: usize, point: &DataPoint) -> Self {
        Self {
            index,
            label: point.label.clone(),
            category: point.category.clone(),
            x: point.x.clone(),
            values: vec![point.value],
            payload: point.payload.clone(),
        }
    }

    pub fn from_composite(index: usize, point: &CompositePoint) -> Self {
        Self {
            index,
            label: Some(point.label.clone()),
            category: None,
            x: Some(XValue::Text(point.label.clone())),
            values: point.values.clone(),
            payload: point.payload.clone(),
        }
    }

    /// First value, the common case for single-series charts
    pub fn value(&self) -> Option<f64> {
        self.values.first().copied().flatten()
    }
}

// ============================================================================
// DATES
// ============================================================================

/// Parse a date string with a chrono format, to epoch milliseconds (UTC).
///
/// Partial formats such as `%Y` or `%Y-%m` are accepted; the missing fields
/// default to the first month / day.
pub fn parse_date(raw: &str, format: &str) -> Result<i64> {
    let raw = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
        return Ok(dt.and_utc().timestamp_millis());
    }

    let candidates = [
        (raw.to_string(), format.to_string()),
        (format!("{raw}|01"), format!("{format}|%d")),
        (format!("{raw}|01|01"), format!("{format}|%m|%d")),
    ];

    for (value, fmt) in &candidates {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp_millis());
            }
        }
    }

    Err(ChartError::DateParse {
        raw: raw.to_string(),
        format: format.to_string(),
    })
}

/// Format epoch milliseconds with a chrono format (UTC)
pub fn format_timestamp(timestamp_ms: i64, format: &str) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format(format).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year_only() {
        let ms = parse_date("2020", "%Y").unwrap();
        assert_eq!(format_timestamp(ms, "%Y-%m-%d"), "2020-01-01");
    }

    #[test]
    fn test_parse_year_month() {
        let ms = parse_date("2021-07", "%Y-%m").unwrap();
        assert_eq!(format_timestamp(ms, "%Y-%m-%d"), "2021-07-01");
    }

    #[test]
    fn test_parse_full_date() {
        let ms = parse_date("03/02/2019", "%d/%m/%Y").unwrap();
        assert_eq!(format_timestamp(ms, "%Y-%m-%d"), "2019-02-03");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_date("not a date", "%Y"),
            Err(ChartError::DateParse { .. })
        ));
    }

    #[test]
    fn test_data_point_aliases() {
        let json = r#"{"y": 4.5, "x": "2001", "color": "Asia", "label": "A", "data": {"k": 1}}"#;
        let point: DataPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.value, Some(4.5));
        assert_eq!(point.category.as_deref(), Some("Asia"));
        assert_eq!(point.x, Some(XValue::Text("2001".into())));
        assert!(point.payload.is_some());
    }

    #[test]
    fn test_composite_total_skips_missing() {
        let point = CompositePoint::new("a", vec![Some(10.0), None, Some(5.0)]);
        assert_eq!(point.total(), 15.0);
    }

    #[test]
    fn test_series_validate_label_mismatch() {
        let series = SeriesCollection::new(
            vec!["one".into()],
            vec![CompositePoint::new("2020", vec![Some(1.0), Some(2.0)])],
        );
        assert!(matches!(series.validate(), Err(ChartError::Mismatch { .. })));
    }
}
