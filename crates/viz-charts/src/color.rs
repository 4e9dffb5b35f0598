//! Categorical colour binding
//!
//! Maps category keys onto a palette positionally. The binding is rebuilt
//! every render, so a key keeps its colour for as long as the domain order
//! does.

use viz_core::{ChartError, Result, Theme};

/// One legend row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub key: String,
    pub color: String,
}

/// Resolved category → colour mapping for one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBinding {
    domain: Vec<String>,
    palette: Vec<String>,
    /// Set when no datum carries a category
    single: Option<String>,
    no_data: String,
    neutral: String,
}

impl ColorBinding {
    /// Bind `keys` (in data order) to colours.
    ///
    /// An explicit domain fixes the order; keys outside it get the no-data
    /// colour. Without one, the domain is the distinct keys in first-seen order.
    pub fn bind<'a>(
        keys: impl IntoIterator<Item = Option<&'a str>>,
        explicit_domain: Option<&[String]>,
        explicit_colors: Option<&[String]>,
        theme: &Theme,
    ) -> Self {
        let mut seen: Vec<String> = Vec::new();
        let mut any = false;
        for key in keys.into_iter().flatten() {
            any = true;
            if !seen.iter().any(|k| k == key) {
                seen.push(key.to_string());
            }
        }

        let palette: Vec<String> = match explicit_colors {
            Some(colors) if !colors.is_empty() => colors.to_vec(),
            _ => theme.categorical.clone(),
        };

        let single = if any {
            None
        } else {
            Some(palette.first().cloned().unwrap_or_else(|| theme.primary.clone()))
        };

        let domain = explicit_domain.map(<[String]>::to_vec).unwrap_or(seen);

        Self {
            domain,
            palette,
            single,
            no_data: theme.no_data.clone(),
            neutral: theme.graph_gray.clone(),
        }
    }

    /// Constant colour, no categories
    pub fn constant(color: impl Into<String>, theme: &Theme) -> Self {
        Self {
            domain: Vec::new(),
            palette: Vec::new(),
            single: Some(color.into()),
            no_data: theme.no_data.clone(),
            neutral: theme.graph_gray.clone(),
        }
    }

    pub fn is_categorical(&self) -> bool {
        self.single.is_none()
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.domain.iter().position(|k| k == key)
    }

    fn palette_color(&self, index: usize) -> String {
        if self.palette.is_empty() {
            return self.neutral.clone();
        }
        self.palette[index % self.palette.len()].clone()
    }

    pub fn color_for(&self, category: Option<&str>) -> String {
        if let Some(color) = &self.single {
            return color.clone();
        }
        match category {
            None => self.neutral.clone(),
            Some(key) => match self.index_of(key) {
                Some(i) => self.palette_color(i),
                None => self.no_data.clone(),
            },
        }
    }

    /// Legend rows; empty when the chart has no categories
    pub fn legend(&self) -> Vec<LegendEntry> {
        if !self.is_categorical() {
            return Vec::new();
        }
        self.domain
            .iter()
            .enumerate()
            .map(|(i, key)| LegendEntry {
                key: key.clone(),
                color: self.palette_color(i),
            })
            .collect()
    }
}

/// One colour per series index. An explicit list must cover every series;
/// the default palette wraps.
pub fn series_colors(count: usize, explicit: Option<&[String]>, theme: &Theme) -> Result<Vec<String>> {
    match explicit {
        Some(colors) if !colors.is_empty() => {
            if colors.len() < count {
                return Err(ChartError::Mismatch {
                    what: "colours vs series",
                    expected: count,
                    actual: colors.len(),
                });
            }
            Ok(colors[..count].to_vec())
        }
        _ => {
            let palette = &theme.categorical;
            if palette.is_empty() {
                return Ok(vec![theme.primary.clone(); count]);
            }
            Ok((0..count).map(|i| palette[i % palette.len()].clone()).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_seen_order() {
        let theme = Theme::default();
        let binding = ColorBinding::bind(
            [Some("B"), Some("A"), Some("B"), None, Some("C")],
            None,
            None,
            &theme,
        );
        assert_eq!(binding.domain(), strings(&["B", "A", "C"]).as_slice());
        assert_eq!(binding.color_for(Some("B")), theme.categorical[0]);
        assert_eq!(binding.color_for(Some("A")), theme.categorical[1]);
        assert_eq!(binding.color_for(None), theme.graph_gray);
    }

    #[test]
    fn test_explicit_domain_and_no_data() {
        let theme = Theme::default();
        let domain = strings(&["Low", "High"]);
        let binding = ColorBinding::bind([Some("High"), Some("Other")], Some(&domain), None, &theme);
        assert_eq!(binding.color_for(Some("High")), theme.categorical[1]);
        assert_eq!(binding.color_for(Some("Other")), theme.no_data);
    }

    #[test]
    fn test_palette_wraps() {
        let theme = Theme::default();
        let colors = strings(&["#111", "#222"]);
        let binding = ColorBinding::bind([Some("a"), Some("b"), Some("c")], None, Some(&colors), &theme);
        assert_eq!(binding.color_for(Some("c")), "#111");
    }

    #[test]
    fn test_no_categories_is_constant() {
        let theme = Theme::default();
        let binding = ColorBinding::bind([None, None], None, None, &theme);
        assert!(!binding.is_categorical());
        assert!(binding.legend().is_empty());
        assert_eq!(binding.color_for(None), theme.categorical[0]);
    }

    #[test]
    fn test_series_colors_rejects_short_list() {
        let theme = Theme::default();
        let colors = strings(&["#111"]);
        assert!(matches!(
            series_colors(3, Some(&colors), &theme),
            Err(ChartError::Mismatch { expected: 3, actual: 1, .. })
        ));
        assert_eq!(series_colors(2, None, &theme).unwrap().len(), 2);
    }
}
