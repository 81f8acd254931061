//! Herbal garden explorer: a map with area labels and plant markers.

use leptos::prelude::*;

use super::layout::Shell;
use crate::catalog::{MapArea, MapMarker};
use crate::services::session::SessionUser;

const GARDEN_MAP_SVG: &str = include_str!("../../static/garden_map.svg");

#[component]
pub fn ExplorerPage(areas: Vec<MapArea>, markers: Vec<MapMarker>, viewer: Option<SessionUser>) -> impl IntoView {
    let labels = areas
        .into_iter()
        .map(|area| {
            let style = format!("left: {}%; top: {}%;", area.x, area.y);
            view! {
                <div class="explorer__area" style=style>
                    <span>{area.name}</span>
                </div>
            }
        })
        .collect_view();

    let pins = markers
        .into_iter()
        .map(|marker| {
            let style = format!("left: {}%; top: {}%;", marker.x, marker.y);
            let href = format!("/plants/{}", marker.slug);
            let MapMarker { common_name: name, image_url, image_hint, .. } = marker;
            let title = name.clone();
            let alt = name.clone();
            view! {
                <a class="explorer__marker" href=href style=style title=title>
                    <img src=image_url alt=alt data-ai-hint=image_hint/>
                    <span class="explorer__tooltip">{name}</span>
                </a>
            }
        })
        .collect_view();

    view! {
        <Shell title="Explorer" active="/explorer" viewer=viewer>
            <section class="page-header page-header--center">
                <h1>"Herbal Garden Explorer"</h1>
                <p>"Hover over a plant to discover its name, and click to learn more about its story and uses."</p>
            </section>
            <div class="explorer">
                <div class="explorer__map" inner_html=GARDEN_MAP_SVG></div>
                <div class="explorer__overlay">{labels} {pins}</div>
            </div>
        </Shell>
    }
}

#[cfg(test)]
#[path = "explorer_test.rs"]
mod tests;
