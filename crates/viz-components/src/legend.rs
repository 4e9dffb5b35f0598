//! Clickable colour legend

use leptos::prelude::*;
use viz_charts::LegendEntry;
use viz_state::ChartInteraction;

/// Legend rows; clicking one toggles that category's selection
#[component]
pub fn ColorLegend(
    #[prop(into)] entries: Signal<Vec<LegendEntry>>,
    interaction: ChartInteraction,
    on_toggle: Callback<String>,
    on_clear: Callback<()>,
) -> impl IntoView {
    let selected = move || interaction.selected_category();

    view! {
        <div class="viz-legend" role="list">
            <For
                each=move || entries.get()
                key=|entry| entry.key.clone()
                children=move |entry: LegendEntry| {
                    let key = entry.key.clone();
                    let is_selected = {
                        let key = key.clone();
                        move || selected().as_deref() == Some(key.as_str())
                    };
                    let dimmed = {
                        let is_selected = is_selected.clone();
                        move || selected().is_some() && !is_selected()
                    };
                    view! {
                        <button
                            class="legend-item"
                            class:selected=is_selected
                            role="listitem"
                            style:opacity=move || if dimmed() { "0.3" } else { "1" }
                            on:click=move |_| on_toggle.run(key.clone())
                        >
                            <span
                                class="legend-swatch"
                                style=format!("background-color: {};", entry.color)
                            />
                            <span class="legend-label">{entry.key.clone()}</span>
                        </button>
                    }
                }
            />

            {move || {
                selected()
                    .map(|_| {
                        view! {
                            <button class="legend-clear" on:click=move |_| on_clear.run(())>
                                "Show all"
                            </button>
                        }
                    })
            }}
        </div>
    }
}
