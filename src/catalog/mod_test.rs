use super::*;

fn bundled() -> Catalog {
    Catalog::load().expect("bundled catalog should parse")
}

const SMALL: &str = r#"
plants:
  - id: "a"
    slug: "alpha"
    common_name: "Alpha"
    scientific_name: "Alpha officinalis"
    image_id: "img-a"
    map_position: { x: 10, y: 20 }
  - id: "b"
    slug: "beta"
    common_name: "Beta"
    scientific_name: "Beta vulgaris"
    image_id: "img-b"
  - id: "c"
    slug: "gamma"
    common_name: "Gamma"
    scientific_name: "Gamma minor"
    image_id: "img-missing"
    map_position: { x: 50, y: 50 }
images:
  - { id: "img-a", url: "https://img.test/a.jpg", hint: "alpha leaf" }
  - { id: "img-b", url: "https://img.test/b.jpg", hint: "beta root" }
"#;

// =============================================================================
// bundled dataset
// =============================================================================

#[test]
fn bundled_catalog_has_four_announcements() {
    let catalog = bundled();
    assert_eq!(catalog.announcements().len(), 4);
    for item in catalog.announcements() {
        assert!(!item.title.is_empty());
        assert!(!item.date.is_empty());
        assert!(!item.location.is_empty());
        assert!(!item.tags.is_empty());
    }
}

#[test]
fn bundled_catalog_has_four_map_areas() {
    let catalog = bundled();
    let names: Vec<&str> = catalog
        .map_areas()
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(names, vec!["Herb Garden", "Medicinal Grove", "Wetland Patch", "Spice Corner"]);
}

#[test]
fn bundled_plants_all_have_images() {
    let catalog = bundled();
    for plant in catalog.plants() {
        assert!(catalog.plant_image(plant).is_some(), "missing image for {}", plant.slug);
    }
}

#[test]
fn bundled_markers_skip_plants_without_position() {
    let catalog = bundled();
    let markers = catalog.map_markers();
    let positioned = catalog
        .plants()
        .iter()
        .filter(|p| p.map_position.is_some())
        .count();
    assert_eq!(markers.len(), positioned);
    assert!(markers.iter().all(|m| m.slug != "amla" && m.slug != "shatavari"));
}

// =============================================================================
// markers
// =============================================================================

#[test]
fn markers_require_position_and_image() {
    let catalog = Catalog::from_yaml(SMALL).unwrap();
    let markers = catalog.map_markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].slug, "alpha");
    assert!((markers[0].x - 10.0).abs() < f64::EPSILON);
    assert!((markers[0].y - 20.0).abs() < f64::EPSILON);
    assert_eq!(markers[0].image_url, "https://img.test/a.jpg");
    assert_eq!(markers[0].image_hint, "alpha leaf");
}

#[test]
fn plant_image_missing_returns_none() {
    let catalog = Catalog::from_yaml(SMALL).unwrap();
    let gamma = catalog.plant_by_slug("gamma").unwrap();
    assert!(catalog.plant_image(gamma).is_none());
}

// =============================================================================
// lookups
// =============================================================================

#[test]
fn plant_by_slug_finds_and_misses() {
    let catalog = Catalog::from_yaml(SMALL).unwrap();
    assert_eq!(catalog.plant_by_slug("beta").map(|p| p.id.as_str()), Some("b"));
    assert!(catalog.plant_by_slug("delta").is_none());
}

#[test]
fn find_by_name_is_case_insensitive_and_trimmed() {
    let catalog = bundled();
    assert_eq!(catalog.find_by_name("  TULSI ").map(|p| p.slug.as_str()), Some("tulsi"));
    assert_eq!(catalog.find_by_name("withania somnifera").map(|p| p.slug.as_str()), Some("ashwagandha"));
    assert_eq!(catalog.find_by_name("aloe-vera").map(|p| p.slug.as_str()), Some("aloe-vera"));
    assert!(catalog.find_by_name("Mandrake").is_none());
    assert!(catalog.find_by_name("   ").is_none());
}

// =============================================================================
// validation
// =============================================================================

#[test]
fn duplicate_slug_rejected() {
    let raw = r#"
plants:
  - { id: "a", slug: "same", common_name: "A", scientific_name: "A a", image_id: "x" }
  - { id: "b", slug: "same", common_name: "B", scientific_name: "B b", image_id: "y" }
"#;
    let err = Catalog::from_yaml(raw).unwrap_err();
    assert!(matches!(err, CatalogError::Duplicate { field: "slug", .. }));
}

#[test]
fn duplicate_id_rejected() {
    let raw = r#"
plants:
  - { id: "a", slug: "one", common_name: "A", scientific_name: "A a", image_id: "x" }
  - { id: "a", slug: "two", common_name: "B", scientific_name: "B b", image_id: "y" }
"#;
    let err = Catalog::from_yaml(raw).unwrap_err();
    assert!(matches!(err, CatalogError::Duplicate { field: "id", .. }));
}

#[test]
fn out_of_range_position_rejected() {
    let raw = r#"
plants:
  - { id: "a", slug: "a", common_name: "A", scientific_name: "A a", image_id: "x", map_position: { x: 120, y: 5 } }
"#;
    let err = Catalog::from_yaml(raw).unwrap_err();
    assert!(matches!(err, CatalogError::PositionOutOfRange { .. }));
}

#[test]
fn malformed_yaml_is_parse_error() {
    let err = Catalog::from_yaml("plants: [ { id: ").unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[test]
fn plant_serializes_camel_case() {
    let catalog = Catalog::from_yaml(SMALL).unwrap();
    let json = serde_json::to_value(catalog.plant_by_slug("alpha").unwrap()).unwrap();
    assert_eq!(json["commonName"], "Alpha");
    assert_eq!(json["scientificName"], "Alpha officinalis");
    assert_eq!(json["mapPosition"]["x"], 10.0);
}
