//! Framework-free highlight state and the per-mark opacity rule

use serde::{Deserialize, Serialize};

/// Opacity of marks that are not emphasised
pub const DIM_OPACITY: f64 = 0.3;

// ============================================================================
// MARK IDENTITY
// ============================================================================

/// What a drawn mark stands for, used to decide its emphasis.
///
/// Marks with an empty identity (axes, gridlines, whole series paths) are
/// never dimmed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarkIdentity {
    pub index: Option<usize>,
    pub label: Option<String>,
    pub category: Option<String>,
}

impl MarkIdentity {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn point(index: usize) -> Self {
        Self {
            index: Some(index),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_none() && self.label.is_none() && self.category.is_none()
    }
}

// ============================================================================
// HIGHLIGHT STATE
// ============================================================================

/// The point under the pointer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoveredPoint {
    pub index: usize,
    pub label: Option<String>,
    pub category: Option<String>,
}

impl HoveredPoint {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            label: None,
            category: None,
        }
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }
}

/// At most one selected category and at most one hovered point
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighlightState {
    pub selected_category: Option<String>,
    pub hovered: Option<HoveredPoint>,
}

impl HighlightState {
    /// Legend click: select, or deselect when already selected
    pub fn toggle_category(&mut self, category: &str) {
        if self.selected_category.as_deref() == Some(category) {
            self.selected_category = None;
        } else {
            self.selected_category = Some(category.to_string());
        }
    }

    pub fn clear_category(&mut self) {
        self.selected_category = None;
    }

    pub fn hover(&mut self, point: HoveredPoint) {
        self.hovered = Some(point);
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered.as_ref().map(|h| h.index)
    }
}

// ============================================================================
// SELECTION STATE
// ============================================================================

/// Highlight state plus the standing settings that feed the opacity rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub highlight: HighlightState,
    /// Labels emphasised when nothing is hovered or selected
    pub highlighted_labels: Vec<String>,
    pub dim_opacity: f64,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            highlight: HighlightState::default(),
            highlighted_labels: Vec::new(),
            dim_opacity: DIM_OPACITY,
        }
    }
}

impl SelectionState {
    pub fn new(highlighted_labels: Vec<String>, dim_opacity: f64) -> Self {
        Self {
            highlight: HighlightState::default(),
            highlighted_labels,
            dim_opacity,
        }
    }

    pub fn with_highlight(mut self, highlight: HighlightState) -> Self {
        self.highlight = highlight;
        self
    }

    /// Opacity for a mark. Hover wins over selection, selection wins over
    /// standing highlighted labels.
    ///
    /// Hover only concerns point marks (an index or a label); series-level
    /// marks that carry just a category follow the selection.
    pub fn opacity(&self, mark: &MarkIdentity) -> f64 {
        if mark.is_empty() {
            return 1.0;
        }
        let point_mark = mark.index.is_some() || mark.label.is_some();
        let hovered = self.highlight.hovered.as_ref().filter(|_| point_mark);
        let emphasised = if let Some(hovered) = hovered {
            mark.index == Some(hovered.index)
                || (hovered.label.is_some() && mark.label == hovered.label)
        } else if let Some(selected) = &self.highlight.selected_category {
            mark.category.as_deref() == Some(selected.as_str())
        } else if !self.highlighted_labels.is_empty() {
            mark.label
                .as_ref()
                .is_some_and(|l| self.highlighted_labels.contains(l))
        } else {
            true
        };

        if emphasised { 1.0 } else { self.dim_opacity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(index: usize, label: &str, category: &str) -> MarkIdentity {
        MarkIdentity::point(index)
            .with_label(Some(label.into()))
            .with_category(Some(category.into()))
    }

    #[test]
    fn test_select_then_clear() {
        let marks = [mark(0, "a", "A"), mark(1, "b", "B"), mark(2, "c", "C")];
        let mut state = SelectionState::default();

        state.highlight.toggle_category("A");
        let opacities: Vec<f64> = marks.iter().map(|m| state.opacity(m)).collect();
        assert_eq!(opacities, vec![1.0, 0.3, 0.3]);

        state.highlight.toggle_category("A");
        assert!(marks.iter().all(|m| state.opacity(m) == 1.0));
    }

    #[test]
    fn test_hover_wins_over_selection() {
        let mut state = SelectionState::default();
        state.highlight.toggle_category("A");
        state.highlight.hover(HoveredPoint::new(1));

        assert_eq!(state.opacity(&mark(1, "b", "B")), 1.0);
        assert_eq!(state.opacity(&mark(0, "a", "A")), 0.3);
    }

    #[test]
    fn test_hover_shares_label() {
        let mut state = SelectionState::default();
        state
            .highlight
            .hover(HoveredPoint::new(4).with_label(Some("2020".into())));

        // other segments of the same stacked column
        assert_eq!(state.opacity(&mark(9, "2020", "B")), 1.0);
        assert_eq!(state.opacity(&mark(10, "2021", "B")), 0.3);
    }

    #[test]
    fn test_highlighted_labels_standing() {
        let state = SelectionState::new(vec!["b".into()], 0.3);
        assert_eq!(state.opacity(&mark(0, "a", "A")), 0.3);
        assert_eq!(state.opacity(&mark(1, "b", "A")), 1.0);
    }

    #[test]
    fn test_series_marks_follow_selection_under_hover() {
        let series = |c: &str| MarkIdentity::none().with_category(Some(c.into()));
        let mut state = SelectionState::default();
        state.highlight.hover(HoveredPoint::new(3));
        assert_eq!(state.opacity(&series("A")), 1.0);

        state.highlight.toggle_category("A");
        assert_eq!(state.opacity(&series("A")), 1.0);
        assert_eq!(state.opacity(&series("B")), 0.3);
    }

    #[test]
    fn test_empty_identity_never_dims() {
        let mut state = SelectionState::default();
        state.highlight.toggle_category("A");
        assert_eq!(state.opacity(&MarkIdentity::none()), 1.0);
    }
}
