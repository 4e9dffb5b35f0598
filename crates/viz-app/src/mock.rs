//! Mock data for the gallery

use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};

use viz_core::{ChoroplethDatum, CompositePoint, DataPoint, GeoPoint, MapValue, SeriesCollection};

const REGIONS: [&str; 4] = ["Africa", "Asia", "Europe", "Americas"];
const COUNTRIES: [&str; 10] = [
    "Kenya", "Peru", "Nepal", "Ghana", "Chile", "Laos", "Spain", "Egypt", "India", "Canada",
];

/// Random walk with drift
struct Walk {
    value: f64,
    volatility: f64,
    drift: f64,
}

impl Walk {
    fn new(start: f64, volatility: f64) -> Self {
        Self {
            value: start,
            volatility,
            drift: 0.0,
        }
    }

    fn step(&mut self) -> f64 {
        let mut rng = rand::thread_rng();
        if rng.r#gen::<f64>() < 0.1 {
            self.drift = (rng.r#gen::<f64>() - 0.4) * self.volatility;
        }
        let noise = (rng.r#gen::<f64>() - 0.5) * 2.0 * self.volatility;
        self.value = (self.value + self.drift + noise).max(0.0);
        self.value
    }
}

fn years(start: i32, count: usize) -> impl Iterator<Item = String> {
    (0..count as i32).map(move |i| (start + i).to_string())
}

/// Yearly values with an occasional missing year
pub fn yearly_series(count: usize) -> Vec<DataPoint> {
    let mut rng = rand::thread_rng();
    let mut walk = Walk::new(50.0, 4.0);
    years(1990, count)
        .map(|year| {
            let value = walk.step();
            let mut point = DataPoint::new(value).with_x(year.as_str()).with_label(year.clone());
            if rng.r#gen::<f64>() < 0.05 {
                point.value = None;
            }
            point
        })
        .collect()
}

/// One walk per label over shared years
pub fn yearly_collection(labels: &[&str], count: usize) -> SeriesCollection {
    let mut walks: Vec<Walk> = labels
        .iter()
        .enumerate()
        .map(|(i, _)| Walk::new(20.0 + 15.0 * i as f64, 3.0))
        .collect();
    let points = years(2000, count)
        .map(|year| CompositePoint::new(year, walks.iter_mut().map(|w| Some(w.step())).collect()))
        .collect();
    SeriesCollection::new(labels.iter().map(|l| l.to_string()).collect(), points)
}

/// Country bars, a few negative
pub fn ranked_bars() -> Vec<DataPoint> {
    let mut rng = rand::thread_rng();
    let mut points: Vec<DataPoint> = COUNTRIES
        .iter()
        .map(|country| {
            let region = REGIONS.choose(&mut rng).copied().unwrap_or(REGIONS[0]);
            DataPoint::new(rng.gen_range(-20.0..100.0))
                .with_label(*country)
                .with_category(region)
                .with_payload(json!({ "source": "mock" }))
        })
        .collect();
    points.sort_by(|a, b| b.value.unwrap_or(0.0).total_cmp(&a.value.unwrap_or(0.0)));
    points
}

/// Stacked shares per year, with gaps
pub fn stacked_columns(labels: &[&str], count: usize) -> SeriesCollection {
    let mut rng = rand::thread_rng();
    let points = years(2015, count)
        .map(|year| {
            let values = labels
                .iter()
                .map(|_| (rng.r#gen::<f64>() > 0.1).then(|| rng.gen_range(5.0..40.0)))
                .collect();
            CompositePoint::new(year, values)
        })
        .collect();
    SeriesCollection::new(labels.iter().map(|l| l.to_string()).collect(), points)
}

/// Income against life expectancy, sized by population
pub fn scatter_points(count: usize) -> Vec<DataPoint> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let income: f64 = rng.gen_range(500.0..60_000.0);
            let life = 50.0 + 8.0 * income.ln() / 2.0 + rng.gen_range(-5.0..5.0);
            let region = REGIONS[i % REGIONS.len()];
            DataPoint::new(life)
                .with_x(income)
                .with_radius(rng.gen_range(1.0..1_400.0))
                .with_category(region)
                .with_label(format!("Country {i}"))
        })
        .collect()
}

/// Two observations per country
pub fn dumbbell_rows() -> SeriesCollection {
    let mut rng = rand::thread_rng();
    let points = COUNTRIES
        .iter()
        .take(6)
        .map(|country| {
            let before = rng.gen_range(10.0..60.0);
            let after = before + rng.gen_range(-10.0..30.0);
            CompositePoint::new(*country, vec![Some(before), Some(after)])
        })
        .collect();
    SeriesCollection::new(vec!["2000".into(), "2020".into()], points)
}

/// Bubbles for circle packing
pub fn bubbles(count: usize) -> Vec<DataPoint> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            DataPoint::new(rng.gen_range(1.0..500.0))
                .with_label(format!("Item {i}"))
                .with_category(REGIONS[i % REGIONS.len()])
        })
        .collect()
}

// ============================================================================
// GEODATA
// ============================================================================

fn cell_id(col: usize, row: usize) -> String {
    format!("C{row}{col}")
}

/// FeatureCollection of `cols` x `rows` square cells covering the globe
pub fn grid_topology(cols: usize, rows: usize) -> Value {
    let width = 360.0 / cols as f64;
    let height = 160.0 / rows as f64;
    let features: Vec<Value> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (col, row)))
        .map(|(col, row)| {
            let lon = -180.0 + col as f64 * width;
            let lat = 80.0 - (row + 1) as f64 * height;
            json!({
                "type": "Feature",
                "properties": { "ISO3": cell_id(col, row) },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [lon, lat],
                        [lon + width, lat],
                        [lon + width, lat + height],
                        [lon, lat + height],
                        [lon, lat]
                    ]]
                }
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

/// Values for most grid cells
pub fn choropleth_values(cols: usize, rows: usize) -> Vec<ChoroplethDatum> {
    let mut rng = rand::thread_rng();
    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (col, row)))
        .filter_map(|(col, row)| {
            (rng.r#gen::<f64>() > 0.15).then(|| ChoroplethDatum {
                id: cell_id(col, row),
                value: Some(MapValue::Number(rng.gen_range(0.0..100.0))),
                payload: None,
            })
        })
        .collect()
}

/// Random located dots
pub fn geo_points(count: usize) -> Vec<GeoPoint> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| GeoPoint {
            lat: rng.gen_range(-60.0..75.0),
            lon: rng.gen_range(-170.0..170.0),
            radius: Some(rng.gen_range(1.0..100.0)),
            category: Some(REGIONS[i % REGIONS.len()].to_string()),
            label: None,
            payload: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collections_are_well_formed() {
        assert!(yearly_collection(&["a", "b", "c"], 12).validate().is_ok());
        assert!(stacked_columns(&["x", "y"], 5).validate().is_ok());
        assert!(dumbbell_rows().validate().is_ok());
    }

    #[test]
    fn test_grid_ids_match_values() {
        let topology = grid_topology(4, 3);
        let features = topology["features"].as_array().map_or(0, Vec::len);
        assert_eq!(features, 12);
        for datum in choropleth_values(4, 3) {
            assert!(datum.id.starts_with('C'));
        }
    }
}
