use super::*;
use crate::catalog::Catalog;
use crate::pages::plant::PlantPage;
use crate::pages::render_document;

fn cards(catalog: &Catalog) -> Vec<PlantCardData> {
    catalog
        .plants()
        .iter()
        .map(|plant| PlantCardData::new(catalog, plant))
        .collect()
}

#[test]
fn garden_links_every_plant() {
    let catalog = Catalog::load().unwrap();
    let plants = cards(&catalog);
    let html = render_document(|| view! { <GardenPage plants=plants viewer=None/> });

    assert!(html.contains("Explore the Virtual Garden"));
    for plant in catalog.plants() {
        assert!(html.contains(&format!("href=\"/plants/{}\"", plant.slug)), "missing {}", plant.slug);
    }
}

#[test]
fn plant_page_shows_details() {
    let catalog = Catalog::load().unwrap();
    let tulsi = cards(&catalog).into_iter().find(|c| c.plant.slug == "tulsi").unwrap();
    let html = render_document(|| view! { <PlantPage data=tulsi viewer=None/> });

    assert!(html.contains("<h1>Tulsi</h1>"));
    assert!(html.contains("Ocimum tenuiflorum"));
    assert!(html.contains("Traditional uses"));
}

#[test]
fn plant_without_image_renders_without_img() {
    let catalog = Catalog::load().unwrap();
    let mut data = cards(&catalog).remove(0);
    data.image = None;
    let html = render_document(|| view! { <PlantPage data=data viewer=None/> });
    assert!(!html.contains("plant-detail__image"));
}
