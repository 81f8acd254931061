//! Plant detail page.

use leptos::prelude::*;

use super::garden::PlantCardData;
use super::layout::Shell;
use crate::services::session::SessionUser;

#[component]
pub fn PlantPage(data: PlantCardData, viewer: Option<SessionUser>) -> impl IntoView {
    let PlantCardData { plant, image } = data;
    let picture = image.map(|img| {
        view! { <img class="plant-detail__image" src=img.url alt=plant.common_name.clone() data-ai-hint=img.hint/> }
    });
    let family = plant
        .family
        .map(|family| view! { <p class="plant-detail__family">{format!("Family: {family}")}</p> });
    let uses = plant
        .uses
        .into_iter()
        .map(|u| view! { <li>{u}</li> })
        .collect_view();
    let parts = plant
        .parts_used
        .into_iter()
        .map(|p| view! { <span class="badge">{p}</span> })
        .collect_view();

    let title = plant.common_name.clone();

    view! {
        <Shell title=title active="/garden" viewer=viewer>
            <article class="plant-detail">
                {picture}
                <div class="plant-detail__body">
                    <h1>{plant.common_name}</h1>
                    <p class="plant-detail__scientific">{plant.scientific_name}</p>
                    {family}
                    <p>{plant.description}</p>
                    <h2>"Traditional uses"</h2>
                    <ul class="plant-detail__uses">{uses}</ul>
                    <h2>"Parts used"</h2>
                    <div class="badges">{parts}</div>
                    <a class="button button--ghost" href="/garden">"Back to the garden"</a>
                </div>
            </article>
        </Shell>
    }
}
