//! Catalog: the bundled, read-only garden dataset.
//!
//! DESIGN
//! ======
//! Plants, plant images, explorer map areas and announcements ship inside the
//! binary as `data/catalog.yaml`. `Catalog::load` parses and validates it
//! once at startup; every page and API handler reads the shared
//! `Arc<Catalog>` from `AppState`.
//!
//! Images are looked up by `Plant::image_id`. A plant whose image is missing
//! still shows in the garden grid, but has no explorer marker.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.yaml");

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog parse failed: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("duplicate plant {field}: {value}")]
    Duplicate { field: &'static str, value: String },
    #[error("map position out of range for {slug}: ({x}, {y})")]
    PositionOutOfRange { slug: String, x: f64, y: f64 },
}

/// Position on the explorer map, in percent of width/height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Plant {
    pub id: String,
    pub slug: String,
    pub common_name: String,
    pub scientific_name: String,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub uses: Vec<String>,
    #[serde(default)]
    pub parts_used: Vec<String>,
    pub image_id: String,
    #[serde(default)]
    pub map_position: Option<MapPosition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct PlantImage {
    pub id: String,
    #[serde(rename(serialize = "imageUrl"))]
    pub url: String,
    #[serde(rename(serialize = "imageHint"))]
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapArea {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub title: String,
    pub date: String,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One plant icon on the explorer map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub slug: String,
    pub common_name: String,
    pub x: f64,
    pub y: f64,
    pub image_url: String,
    pub image_hint: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    plants: Vec<Plant>,
    #[serde(default)]
    images: Vec<PlantImage>,
    #[serde(default)]
    map_areas: Vec<MapArea>,
    #[serde(default)]
    announcements: Vec<Announcement>,
}

// =============================================================================
// LOADING
// =============================================================================

impl Catalog {
    /// Parse and validate the dataset bundled with the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or violates catalog invariants.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_yaml(BUNDLED_CATALOG)
    }

    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed YAML, duplicate plant ids/slugs, or map
    /// positions outside `0..=100`.
    pub fn from_yaml(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_yaml::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();
        for plant in &self.plants {
            if !ids.insert(plant.id.as_str()) {
                return Err(CatalogError::Duplicate { field: "id", value: plant.id.clone() });
            }
            if !slugs.insert(plant.slug.as_str()) {
                return Err(CatalogError::Duplicate { field: "slug", value: plant.slug.clone() });
            }
            if let Some(pos) = plant.map_position {
                if !(0.0..=100.0).contains(&pos.x) || !(0.0..=100.0).contains(&pos.y) {
                    return Err(CatalogError::PositionOutOfRange { slug: plant.slug.clone(), x: pos.x, y: pos.y });
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// QUERIES
// =============================================================================

impl Catalog {
    #[must_use]
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    #[must_use]
    pub fn plant_by_slug(&self, slug: &str) -> Option<&Plant> {
        self.plants.iter().find(|p| p.slug == slug)
    }

    #[must_use]
    pub fn plant_image(&self, plant: &Plant) -> Option<&PlantImage> {
        self.images.iter().find(|img| img.id == plant.image_id)
    }

    #[must_use]
    pub fn announcements(&self) -> &[Announcement] {
        &self.announcements
    }

    #[must_use]
    pub fn map_areas(&self) -> &[MapArea] {
        &self.map_areas
    }

    /// Explorer markers: plants with both a map position and an image.
    #[must_use]
    pub fn map_markers(&self) -> Vec<MapMarker> {
        self.plants
            .iter()
            .filter_map(|plant| {
                let pos = plant.map_position?;
                let image = self.plant_image(plant)?;
                Some(MapMarker {
                    slug: plant.slug.clone(),
                    common_name: plant.common_name.clone(),
                    x: pos.x,
                    y: pos.y,
                    image_url: image.url.clone(),
                    image_hint: image.hint.clone(),
                })
            })
            .collect()
    }

    /// Match a plant by common name, scientific name, or slug (case-insensitive).
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Plant> {
        let needle = name.trim();
        if needle.is_empty() {
            return None;
        }
        self.plants.iter().find(|p| {
            p.common_name.eq_ignore_ascii_case(needle)
                || p.scientific_name.eq_ignore_ascii_case(needle)
                || p.slug.eq_ignore_ascii_case(needle)
        })
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
