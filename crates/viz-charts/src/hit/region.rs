//! Containment hit testing for drawn shapes (packed circles, map dots,
//! map features)

/// A hit region tied to a datum
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Circle { cx: f64, cy: f64, r: f64 },
    /// One or more rings, even-odd fill
    Polygon { rings: Vec<Vec<(f64, f64)>> },
}

impl Region {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            Self::Circle { cx, cy, r } => {
                let (dx, dy) = (x - cx, y - cy);
                dx * dx + dy * dy <= r * r
            }
            Self::Polygon { rings } => {
                rings.iter().filter(|ring| ring_contains(ring, x, y)).count() % 2 == 1
            }
        }
    }
}

/// Crossing-number test
fn ring_contains(ring: &[(f64, f64)], x: f64, y: f64) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Regions in draw order; the last drawn (topmost) containing region wins
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Regions {
    regions: Vec<(Region, usize)>,
}

impl Regions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, region: Region, datum: usize) {
        self.regions.push((region, datum));
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn find(&self, x: f64, y: f64) -> Option<usize> {
        self.regions
            .iter()
            .rev()
            .find(|(region, _)| region.contains(x, y))
            .map(|&(_, datum)| datum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topmost_circle_wins() {
        let mut regions = Regions::new();
        regions.push(Region::Circle { cx: 0.0, cy: 0.0, r: 10.0 }, 0);
        regions.push(Region::Circle { cx: 5.0, cy: 0.0, r: 3.0 }, 1);
        assert_eq!(regions.find(5.0, 1.0), Some(1));
        assert_eq!(regions.find(-5.0, 0.0), Some(0));
        assert_eq!(regions.find(50.0, 0.0), None);
    }

    #[test]
    fn test_polygon_with_hole() {
        let outer = vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        let hole = vec![(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0)];
        let region = Region::Polygon { rings: vec![outer, hole] };
        assert!(region.contains(1.0, 1.0));
        assert!(!region.contains(5.0, 5.0));
        assert!(!region.contains(11.0, 5.0));
    }
}
