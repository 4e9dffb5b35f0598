//! # viz-state
//!
//! Interaction state for vizkit charts.
//! The rules live in plain structs (`selection`); `ChartInteraction` wraps
//! them in Leptos signals so only the marks whose opacity changes re-render.

pub mod selection;

pub use selection::*;

use leptos::prelude::*;

// ============================================================================
// POINTER
// ============================================================================

/// Last pointer position, in viewport (client) coordinates, plus the
/// viewport size it was measured against
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub client_x: f64,
    pub client_y: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

// ============================================================================
// CHART INTERACTION
// ============================================================================

/// Reactive interaction state owned by one chart
#[derive(Clone, Copy)]
pub struct ChartInteraction {
    /// Selected category and hovered point
    pub highlight: RwSignal<HighlightState>,
    /// Standing emphasis, from configuration
    pub highlighted_labels: RwSignal<Vec<String>>,
    pub dim_opacity: RwSignal<f64>,
    /// Pointer position while a point is hovered
    pub pointer: RwSignal<Option<PointerPosition>>,
}

impl ChartInteraction {
    pub fn new() -> Self {
        Self {
            highlight: RwSignal::new(HighlightState::default()),
            highlighted_labels: RwSignal::new(Vec::new()),
            dim_opacity: RwSignal::new(DIM_OPACITY),
            pointer: RwSignal::new(None),
        }
    }

    pub fn with_settings(highlighted_labels: Vec<String>, dim_opacity: f64) -> Self {
        let state = Self::new();
        state.highlighted_labels.set(highlighted_labels);
        state.dim_opacity.set(dim_opacity);
        state
    }

    // ========================================================================
    // Highlight
    // ========================================================================

    /// Replace the highlight state with a reducer result; no-op when unchanged
    pub fn apply(&self, next: HighlightState) {
        if self.highlight.with_untracked(|current| *current != next) {
            tracing::trace!(hovered = ?next.hovered_index(), selected = ?next.selected_category, "highlight changed");
            self.highlight.set(next);
        }
    }

    pub fn toggle_category(&self, category: &str) {
        self.highlight.update(|h| h.toggle_category(category));
    }

    pub fn selected_category(&self) -> Option<String> {
        self.highlight.with(|h| h.selected_category.clone())
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.highlight.with(|h| h.hovered_index())
    }

    /// Tracked opacity for one mark
    pub fn opacity(&self, mark: &MarkIdentity) -> f64 {
        self.snapshot().opacity(mark)
    }

    /// Current state as a plain `SelectionState`
    pub fn snapshot(&self) -> SelectionState {
        SelectionState::new(self.highlighted_labels.get(), self.dim_opacity.get())
            .with_highlight(self.highlight.get())
    }

    // ========================================================================
    // Pointer
    // ========================================================================

    pub fn set_pointer(&self, pointer: Option<PointerPosition>) {
        self.pointer.set(pointer);
    }
}

impl Default for ChartInteraction {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replaces_highlight() {
        let state = ChartInteraction::new();
        state.toggle_category("A");
        state.apply(HighlightState {
            selected_category: Some("A".into()),
            hovered: Some(HoveredPoint::new(3)),
        });
        assert_eq!(state.hovered_index(), Some(3));

        let mut next = state.highlight.get_untracked();
        next.clear_hover();
        state.apply(next);
        assert_eq!(state.hovered_index(), None);
        assert_eq!(state.selected_category().as_deref(), Some("A"));
    }

    #[test]
    fn test_snapshot_carries_settings() {
        let state = ChartInteraction::with_settings(vec!["x".into()], 0.5);
        let snapshot = state.snapshot();
        let other = MarkIdentity::point(0).with_label(Some("y".into()));
        assert_eq!(snapshot.opacity(&other), 0.5);
    }
}
