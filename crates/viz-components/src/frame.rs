//! Generic chart frame
//!
//! Measures its container, renders the variant into a memoised [`Scene`],
//! and feeds pointer and legend events through the pure reducer.

use std::sync::Arc;

use leptos::html::Div;
use leptos::prelude::*;
use viz_charts::{
    ChartDimensions, ChartVariant, GeoCollaborator, HitIndex, PointerEvent, RenderInput, Scene, SizeRequest,
    TessellationCache, position, reduce, render_or_placeholder, resolve_size,
};
use viz_core::{ChartConfig, Datum, Theme};
use viz_state::{ChartInteraction, PointerPosition};
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

use crate::{ColorLegend, SceneSvg, Tooltip, use_container_width};

/// Chart of any kind
#[component]
pub fn ChartFrame(
    #[prop(into)] variant: Signal<ChartVariant>,
    #[prop(optional)] config: Option<ChartConfig>,
    #[prop(optional)] theme: Option<Theme>,
    /// Projection and feature paths, required by map variants
    #[prop(optional)]
    geo: Option<Arc<dyn GeoCollaborator>>,
    /// Tooltip text for a hovered datum; no tooltip when unset
    #[prop(optional, into)]
    tooltip: Option<Callback<Datum, String>>,
    /// Called with the hovered datum, and `None` when hover ends
    #[prop(optional, into)]
    on_series_hover: Option<Callback<Option<Datum>>>,
    /// Interaction state to use instead of a fresh one
    #[prop(optional)]
    interaction: Option<ChartInteraction>,
    #[prop(default = false)] show_voronoi: bool,
) -> impl IntoView {
    let mut options = config.unwrap_or_default();
    let chart_id = options
        .id
        .get_or_insert_with(|| format!("viz-{}", uuid::Uuid::new_v4().simple()))
        .clone();
    let theme = theme.unwrap_or_default();
    let interaction = interaction
        .unwrap_or_else(|| ChartInteraction::with_settings(options.highlighted_labels.clone(), options.dim_opacity));

    // Plot-only wrapper; the legend and tooltip sit outside it
    let container = NodeRef::<Div>::new();
    let measured_width = use_container_width(container);
    let cache = StoredValue::new(TessellationCache::new());

    // Bumped on every data change; keys the tessellation cache
    let revision = Memo::new(move |previous: Option<&u64>| {
        variant.track();
        previous.map_or(0, |r| r + 1)
    });

    let scene = {
        let options = options.clone();
        let theme = theme.clone();
        Memo::new(move |_| {
            variant.with(|variant| {
                let kind = variant.kind();
                let size = resolve_size(
                    SizeRequest {
                        width: options.width,
                        height: options.height,
                        relative_height: options.relative_height,
                        measured_width: measured_width.get(),
                    },
                    kind,
                );
                let placeholder = || Scene::placeholder(kind, ChartDimensions::new(size.0, size.1));

                let config = match options.clone().resolved_for(kind) {
                    Ok(config) => config,
                    Err(err) => {
                        tracing::warn!(chart = ?options.id, error = %err, "invalid chart configuration");
                        return placeholder();
                    }
                };
                let input = RenderInput {
                    variant,
                    config: &config,
                    theme: &theme,
                    size,
                    revision: revision.get(),
                    geo: geo.clone(),
                };
                cache
                    .try_update_value(|cache| render_or_placeholder(&input, cache))
                    .unwrap_or_else(placeholder)
            })
        })
    };

    // ========================================================================
    // Pointer handling
    // ========================================================================

    let notify_hover = move |previous: Option<usize>, scene: &Scene| {
        let current = interaction.highlight.with_untracked(|h| h.hovered_index());
        if previous == current {
            return;
        }
        if let Some(callback) = on_series_hover {
            callback.run(current.and_then(|i| scene.datum(i).cloned()));
        }
    };

    let on_move = move |ev: MouseEvent| {
        let Some(target) = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
            return;
        };
        let rect = target.get_bounding_client_rect();
        let (client_x, client_y) = (f64::from(ev.client_x()), f64::from(ev.client_y()));

        scene.with_untracked(|scene| {
            if scene.is_placeholder() {
                return;
            }
            let scale_x = if rect.width() > 0.0 { scene.dims.width / rect.width() } else { 1.0 };
            let scale_y = if rect.height() > 0.0 { scene.dims.height / rect.height() } else { 1.0 };
            let event = PointerEvent::pointer_at(
                &scene.dims,
                (client_x - rect.left()) * scale_x,
                (client_y - rect.top()) * scale_y,
            );

            let previous = interaction.highlight.with_untracked(|h| h.hovered_index());
            let next = interaction
                .highlight
                .with_untracked(|state| reduce(state, &event, &scene.hit, &scene.datums));
            let hovering = next.hovered.is_some();
            interaction.apply(next);

            let (viewport_width, viewport_height) = viewport_size();
            interaction.set_pointer(hovering.then_some(PointerPosition {
                client_x,
                client_y,
                viewport_width,
                viewport_height,
            }));
            notify_hover(previous, scene);
        });
    };

    let on_leave = move |_: MouseEvent| {
        scene.with_untracked(|scene| {
            let previous = interaction.highlight.with_untracked(|h| h.hovered_index());
            let next = interaction
                .highlight
                .with_untracked(|state| reduce(state, &PointerEvent::Leave, &scene.hit, &scene.datums));
            interaction.apply(next);
            interaction.set_pointer(None);
            notify_hover(previous, scene);
        });
    };

    let legend_event = move |event: PointerEvent| {
        let next = interaction
            .highlight
            .with_untracked(|state| reduce(state, &event, &HitIndex::None, &[]));
        interaction.apply(next);
    };
    let on_toggle = Callback::new(move |key: String| legend_event(PointerEvent::LegendClick(key)));
    let on_clear = Callback::new(move |_: ()| legend_event(PointerEvent::LegendClear));

    let legend = Signal::derive(move || scene.with(|s| s.legend.clone()));
    let tooltip_background = theme.gray_200.clone();

    view! {
        <div id=chart_id class="viz-frame" style="position: relative; width: 100%;">
            <div
                class="viz-plot"
                node_ref=container
                style="width: 100%; line-height: 0;"
                on:mousemove=on_move
                on:mouseleave=on_leave
            >
                <SceneSvg
                    scene=scene
                    interaction=interaction
                    font_family=theme.font_family.clone()
                    show_voronoi=show_voronoi
                />
            </div>

            {move || {
                (!legend.with(Vec::is_empty))
                    .then(|| {
                        view! {
                            <ColorLegend
                                entries=legend
                                interaction=interaction
                                on_toggle=on_toggle
                                on_clear=on_clear
                            />
                        }
                    })
            }}

            {move || {
                let tooltip = tooltip?;
                let pointer = interaction.pointer.get()?;
                let index = interaction.hovered_index()?;
                let datum = scene.with(|s| s.datum(index).cloned())?;
                let anchor = position(
                    pointer.client_x,
                    pointer.client_y,
                    pointer.viewport_width,
                    pointer.viewport_height,
                );
                Some(view! {
                    <Tooltip anchor=anchor content=tooltip.run(datum) background=tooltip_background.clone() />
                })
            }}
        </div>
    }
}

/// Browser viewport size, zero outside a window
fn viewport_size() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}
