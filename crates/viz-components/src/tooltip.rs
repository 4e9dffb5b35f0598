//! Pointer-anchored tooltip

use leptos::prelude::*;
use viz_charts::TooltipAnchor;

#[component]
pub fn Tooltip(anchor: TooltipAnchor, #[prop(into)] content: String, #[prop(into)] background: String) -> impl IntoView {
    let style = format!(
        "{} background: {}; max-width: 24rem; padding: 0.5rem 0.75rem; pointer-events: none; z-index: 10;",
        anchor.style(),
        background
    );

    view! {
        <div class="viz-tooltip" role="tooltip" style=style>
            {content}
        </div>
    }
}
