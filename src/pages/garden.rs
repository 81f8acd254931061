//! Virtual garden grid.

use leptos::prelude::*;

use super::layout::Shell;
use crate::catalog::{Catalog, Plant, PlantImage};
use crate::services::session::SessionUser;

/// A plant with its resolved image, ready for a card.
#[derive(Debug, Clone)]
pub struct PlantCardData {
    pub plant: Plant,
    pub image: Option<PlantImage>,
}

impl PlantCardData {
    #[must_use]
    pub fn new(catalog: &Catalog, plant: &Plant) -> Self {
        Self { plant: plant.clone(), image: catalog.plant_image(plant).cloned() }
    }
}

#[component]
pub fn GardenPage(plants: Vec<PlantCardData>, viewer: Option<SessionUser>) -> impl IntoView {
    let cards = plants
        .into_iter()
        .map(|data| view! { <PlantCard data=data/> })
        .collect_view();

    view! {
        <Shell title="Garden" active="/garden" viewer=viewer>
            <section class="page-header page-header--center">
                <h1>"Explore the Virtual Garden"</h1>
                <p>
                    "Discover the rich world of medicinal plants used in AYUSH. Click on a plant to learn more about its properties and traditional uses."
                </p>
            </section>
            <div class="plant-grid">{cards}</div>
        </Shell>
    }
}

#[component]
fn PlantCard(data: PlantCardData) -> impl IntoView {
    let PlantCardData { plant, image } = data;
    let href = format!("/plants/{}", plant.slug);
    let picture = image.map(|img| {
        view! { <img class="plant-card__image" src=img.url alt=plant.common_name.clone() data-ai-hint=img.hint/> }
    });

    view! {
        <a class="card plant-card" href=href>
            {picture}
            <div class="plant-card__body">
                <h2 class="plant-card__name">{plant.common_name}</h2>
                <p class="plant-card__scientific">{plant.scientific_name}</p>
            </div>
        </a>
    }
}

#[cfg(test)]
#[path = "garden_test.rs"]
mod tests;
