//! Pointer reducer
//!
//! Turns pointer and legend events into the next `HighlightState`, using the
//! scene's hit index. Framework-free: the Leptos frame converts DOM events
//! into [`PointerEvent`]s and stores the result in signals.

use viz_core::Datum;
use viz_state::{HighlightState, HoveredPoint};

use crate::{ChartDimensions, HitIndex};

#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved, plot coordinates
    Move { plot_x: f64, plot_y: f64 },
    /// Pointer left the plot
    Leave,
    /// Legend entry clicked
    LegendClick(String),
    /// Legend "show all" / reset
    LegendClear,
}

impl PointerEvent {
    /// Pointer at svg coordinates `(x, y)`. Over the margins it counts as
    /// leaving: only the plot area hovers.
    pub fn pointer_at(dims: &ChartDimensions, x: f64, y: f64) -> Self {
        let (plot_x, plot_y) = dims.to_plot(x, y);
        let inside = (0.0..=dims.inner_width()).contains(&plot_x) && (0.0..=dims.inner_height()).contains(&plot_y);
        if inside { Self::Move { plot_x, plot_y } } else { Self::Leave }
    }
}

/// Next highlight state for `event`
pub fn reduce(state: &HighlightState, event: &PointerEvent, hit: &HitIndex, datums: &[Datum]) -> HighlightState {
    let mut next = state.clone();
    match event {
        PointerEvent::Move { plot_x, plot_y } => match hit.find(*plot_x, *plot_y) {
            Some(index) => {
                let datum = datums.get(index);
                next.hover(
                    HoveredPoint::new(index)
                        .with_label(datum.and_then(|d| d.label.clone()))
                        .with_category(datum.and_then(|d| d.category.clone())),
                );
            }
            None => next.clear_hover(),
        },
        PointerEvent::Leave => next.clear_hover(),
        PointerEvent::LegendClick(category) => next.toggle_category(category),
        PointerEvent::LegendClear => next.clear_category(),
    }
    tracing::trace!(?event, hovered = ?next.hovered_index(), "pointer event reduced");
    next
}
