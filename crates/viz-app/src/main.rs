//! vizkit gallery - WASM entry point
//!
//! Renders every chart kind from mock data.

mod mock;

use std::sync::Arc;

use leptos::prelude::*;
use viz_charts::{BarData, ChartVariant, Equirectangular, GeoCollaborator, MapData};
use viz_components::ChartFrame;
use viz_core::{ChartConfig, Datum, HighlightArea, MapOptions, ReferenceMarker, Theme, format_number};

const JSON_SAMPLE: &str = r#"{
    "kind": "line",
    "data": [
        { "x": "2016", "y": 3.1 },
        { "x": "2017", "y": 4.6 },
        { "x": "2018", "y": null },
        { "x": "2019", "y": 5.2 },
        { "x": "2020", "y": -1.4 },
        { "x": "2021", "y": 2.9 }
    ]
}"#;

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    tracing::info!("Starting vizkit gallery");

    leptos::mount::mount_to_body(App);
}

#[component]
fn App() -> impl IntoView {
    let theme = RwSignal::new(Theme::light());

    view! {
        <div class="gallery">
            <header class="gallery-header">
                <span class="gallery-title">"vizkit"</span>
                <button on:click=move |_| {
                    theme.update(|t| *t = Theme::find(if t.name == "light" { "dark" } else { "light" }))
                }>
                    {move || format!("Theme: {}", theme.with(|t| t.name.clone()))}
                </button>
            </header>

            // Charts take the theme at construction; rebuild them on switch
            {move || {
                let theme = theme.get();
                view! { <Gallery theme=theme /> }
            }}
        </div>
    }
}

/// Tooltip text shared by every panel
fn describe(datum: Datum) -> String {
    let label = datum.label.clone().unwrap_or_else(|| format!("#{}", datum.index));
    let value = format_number(datum.value(), "", "");
    match datum.category {
        Some(category) => format!("{label} ({category}): {value}"),
        None => format!("{label}: {value}"),
    }
}

#[component]
fn Gallery(theme: Theme) -> impl IntoView {
    let tooltip = Callback::new(describe);
    let on_hover = Callback::new(|datum: Option<Datum>| {
        tracing::debug!(hovered = ?datum.map(|d| d.index), "series hover");
    });
    let geo: Arc<dyn GeoCollaborator> = Arc::new(Equirectangular::new(120.0, (0.0, 10.0)));

    let scatter = RwSignal::new(ChartVariant::Scatter {
        data: mock::scatter_points(80),
    });

    let json_line = match serde_json::from_str::<ChartVariant>(JSON_SAMPLE) {
        Ok(variant) => variant,
        Err(err) => {
            tracing::warn!(error = %err, "sample chart did not parse");
            ChartVariant::Line { data: Vec::new() }
        }
    };

    let line_config = ChartConfig {
        reference_lines: vec![ReferenceMarker::new(60.0, "Target")],
        highlight_area: HighlightArea {
            x_start: Some(0.25),
            x_end: Some(0.5),
            ..HighlightArea::default()
        },
        ..ChartConfig::default()
    };
    let multi_config = ChartConfig {
        show_legend: false,
        relative_height: Some(0.6),
        ..ChartConfig::default()
    };
    let scatter_config = ChartConfig {
        point_radius: 20.0,
        min_point_radius: 2.0,
        show_labels: false,
        highlighted_labels: vec!["Country 3".into(), "Country 7".into()],
        reference_x: Some(ReferenceMarker::new(20_000.0, "High income")),
        x_axis_title: Some("Income".into()),
        y_axis_title: Some("Life expectancy".into()),
        ..ChartConfig::default()
    };
    let choropleth_config = ChartConfig {
        map: MapOptions {
            domain: vec!["20".into(), "40".into(), "60".into(), "80".into()],
            ..MapOptions::default()
        },
        ..ChartConfig::default()
    };

    let theme_0 = theme.clone();
    let theme_1 = theme.clone();
    let theme_2 = theme.clone();
    let theme_3 = theme.clone();
    let theme_4 = theme.clone();
    let theme_5 = theme.clone();
    let theme_6 = theme.clone();
    let theme_7 = theme.clone();
    let theme_8 = theme.clone();
    let theme_9 = theme.clone();
    let theme_10 = theme;
    let geo_0 = Arc::clone(&geo);
    let geo_1 = geo;

    view! {
        <main class="gallery-grid">
            <Panel title="Line">
                <ChartFrame
                    variant=ChartVariant::Line { data: mock::yearly_series(30) }
                    config=line_config
                    theme=theme_0
                    tooltip=tooltip
                    on_series_hover=on_hover
                />
            </Panel>

            <Panel title="Line (from JSON)">
                <ChartFrame variant=json_line config=ChartConfig::compact() theme=theme_1 tooltip=tooltip />
            </Panel>

            <Panel title="Multi-line">
                <ChartFrame
                    variant=ChartVariant::MultiLine {
                        data: mock::yearly_collection(&["Coal", "Gas", "Solar"], 20),
                    }
                    config=multi_config
                    theme=theme_2
                    tooltip=tooltip
                />
            </Panel>

            <Panel title="Bar">
                <ChartFrame
                    variant=ChartVariant::Bar { data: BarData::Simple(mock::ranked_bars()) }
                    theme=theme_3
                    tooltip=tooltip
                />
            </Panel>

            <Panel title="Stacked bar">
                <ChartFrame
                    variant=ChartVariant::Bar {
                        data: BarData::Stacked(mock::stacked_columns(&["Urban", "Rural", "Other"], 8)),
                    }
                    theme=theme_4
                    tooltip=tooltip
                />
            </Panel>

            <Panel title="Scatter">
                <button on:click=move |_| scatter.set(ChartVariant::Scatter { data: mock::scatter_points(80) })>
                    "Regenerate"
                </button>
                <ChartFrame
                    variant=scatter
                    config=scatter_config
                    theme=theme_5
                    tooltip=tooltip
                    on_series_hover=on_hover
                />
            </Panel>

            <Panel title="Area">
                <ChartFrame
                    variant=ChartVariant::Area {
                        data: mock::yearly_collection(&["North", "South", "East", "West"], 15),
                    }
                    theme=theme_6
                    tooltip=tooltip
                />
            </Panel>

            <Panel title="Dumbbell">
                <ChartFrame variant=ChartVariant::Dumbbell { data: mock::dumbbell_rows() } theme=theme_7 tooltip=tooltip />
            </Panel>

            <Panel title="Circle packing">
                <ChartFrame
                    variant=ChartVariant::CirclePacking { data: mock::bubbles(40) }
                    config=ChartConfig { height: Some(480.0), ..ChartConfig::default() }
                    theme=theme_8
                    tooltip=tooltip
                />
            </Panel>

            <Panel title="Choropleth">
                <ChartFrame
                    variant=ChartVariant::Map {
                        data: MapData::Choropleth(mock::choropleth_values(12, 6)),
                        topology: mock::grid_topology(12, 6),
                    }
                    config=choropleth_config
                    theme=theme_9
                    geo=geo_0
                    tooltip=tooltip
                />
            </Panel>

            <Panel title="Dot density">
                <ChartFrame
                    variant=ChartVariant::Map {
                        data: MapData::DotDensity(mock::geo_points(150)),
                        topology: mock::grid_topology(12, 6),
                    }
                    theme=theme_10
                    geo=geo_1
                    tooltip=tooltip
                />
            </Panel>
        </main>
    }
}

#[component]
fn Panel(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <section class="panel">
            <div class="panel-header">
                <span class="panel-title">{title}</span>
            </div>
            <div class="panel-content">{children()}</div>
        </section>
    }
}
