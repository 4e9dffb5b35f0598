//! SVG view of a rendered [`Scene`]
//!
//! Marks are drawn in scene order inside the margin transform. Each mark's
//! opacity is its own reactive attribute, so a hover only touches the marks
//! whose emphasis changes.

use leptos::prelude::*;
use viz_charts::{Mark, Scene, Shape};
use viz_state::ChartInteraction;

#[component]
pub fn SceneSvg(
    scene: Memo<Scene>,
    interaction: ChartInteraction,
    #[prop(into)] font_family: String,
    /// Outline Voronoi cells (scatter hit regions)
    #[prop(default = false)]
    show_voronoi: bool,
) -> impl IntoView {
    let dims = move || scene.with(|s| s.dims);

    view! {
        <svg
            class=move || format!("viz-chart {}", scene.with(|s| s.kind.css_class()))
            width=move || dims().width
            height=move || dims().height
            viewBox=move || dims().viewbox()
            font-family=font_family
            role="img"
        >
            <g transform=move || dims().inner_transform()>
                // Marks
                {move || {
                    scene.with(|s| {
                        s.marks
                            .iter()
                            .cloned()
                            .map(|mark| mark_view(mark, Some(interaction)))
                            .collect_view()
                    })
                }}

                // Crosshair and focus dots
                {move || {
                    let hovered = interaction.hovered_index()?;
                    let overlay = scene.with(|s| s.hover_overlay(hovered));
                    Some(
                        view! {
                            <g class="hover-overlay" pointer-events="none">
                                {overlay.into_iter().map(|mark| mark_view(mark, None)).collect_view()}
                            </g>
                        },
                    )
                }}

                {move || {
                    show_voronoi
                        .then(|| {
                            scene.with(|s| {
                                s.hit
                                    .cell_paths()
                                    .into_iter()
                                    .map(|d| {
                                        view! {
                                            <path
                                                class="voronoi-cell"
                                                d=d
                                                fill="none"
                                                stroke="#FF00FF"
                                                stroke-width="0.5"
                                                pointer-events="none"
                                            />
                                        }
                                    })
                                    .collect_view()
                            })
                        })
                }}
            </g>
        </svg>
    }
}

/// One primitive. `interaction` is `None` for overlay marks, which are
/// never dimmed.
fn mark_view(mark: Mark, interaction: Option<ChartInteraction>) -> AnyView {
    let Mark { shape, style, identity } = mark;
    let opacity = move || interaction.map_or(1.0, |state| state.opacity(&identity));
    let class = style.class.unwrap_or_default();
    let weight = style.bold.then_some("bold");

    match shape {
        Shape::Rect { x, y, width, height } => view! {
            <rect
                class=class
                x=x
                y=y
                width=width
                height=height
                fill=style.fill
                fill-opacity=style.fill_opacity
                stroke=style.stroke
                stroke-width=style.stroke_width
                opacity=opacity
            />
        }
        .into_any(),
        Shape::Line { x1, y1, x2, y2 } => view! {
            <line
                class=class
                x1=x1
                y1=y1
                x2=x2
                y2=y2
                stroke=style.stroke
                stroke-width=style.stroke_width
                stroke-dasharray=style.dash
                opacity=opacity
            />
        }
        .into_any(),
        Shape::Path { d } => view! {
            <path
                class=class
                d=d
                fill=style.fill
                fill-opacity=style.fill_opacity
                stroke=style.stroke
                stroke-width=style.stroke_width
                stroke-dasharray=style.dash
                opacity=opacity
            />
        }
        .into_any(),
        Shape::Circle { cx, cy, r } => view! {
            <circle
                class=class
                cx=cx
                cy=cy
                r=r
                fill=style.fill
                fill-opacity=style.fill_opacity
                stroke=style.stroke
                stroke-width=style.stroke_width
                opacity=opacity
            />
        }
        .into_any(),
        Shape::Text { x, y, text, anchor, dy } => view! {
            <text
                class=class
                x=x
                y=y
                dy=dy
                text-anchor=anchor.as_str()
                fill=style.fill
                font-size=style.font_size
                font-weight=weight
                opacity=opacity
            >
                {text}
            </text>
        }
        .into_any(),
    }
}
