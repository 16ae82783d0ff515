// Static destination catalog
// The fixed, read-only data set every renderer and the estimator reads from.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Duplicate destination id: {0}")]
    DuplicateId(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub name: String,
    pub rating: f64,
    pub price: u32,
}

// A point of interest belonging to a destination. `kind` is an open set of
// category tags ("attractions", "restaurants", "parks", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub kind: String,
    pub name: String,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub description: String,
    pub hotels: Vec<Hotel>,
    pub places: Vec<Place>,
}

// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    destinations: Vec<Destination>,
}

impl Catalog {
    // Ids must be unique and stable; every lookup relies on it.
    pub fn new(destinations: Vec<Destination>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for dest in &destinations {
            if !seen.insert(dest.id.clone()) {
                return Err(CatalogError::DuplicateId(dest.id.clone()));
            }
        }
        Ok(Self { destinations })
    }

    pub fn find(&self, id: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    // (id, display name) pairs in catalog order, for a city selector control.
    pub fn city_options(&self) -> Vec<(String, String)> {
        self.destinations
            .iter()
            .map(|d| (d.id.clone(), d.name.clone()))
            .collect()
    }

    pub fn first_id(&self) -> Option<&str> {
        self.destinations.first().map(|d| d.id.as_str())
    }

    // The demo data set.
    pub fn demo() -> Self {
        let destinations = vec![
            Destination {
                id: "nyc".to_string(),
                name: "New York City, NY".to_string(),
                image_url: "https://images.unsplash.com/photo-1549921296-3f2f0a3d2b0b?auto=format&fit=crop&w=1200&q=80".to_string(),
                description: "Iconic skyline, museums, Broadway shows.".to_string(),
                hotels: vec![
                    hotel("Central Boutique", 4.5, 240),
                    hotel("Midtown Budget Inn", 3.4, 120),
                    hotel("Riverside Luxury", 5.0, 560),
                ],
                places: vec![
                    place("attractions", "Statue of Liberty", 4.8),
                    place("restaurants", "Famous Pizza", 4.5),
                    place("parks", "Central Park", 4.9),
                ],
            },
            Destination {
                id: "gc".to_string(),
                name: "Grand Canyon, AZ".to_string(),
                image_url: "https://images.unsplash.com/photo-1501785888041-af3ef285b470?auto=format&fit=crop&w=1200&q=80".to_string(),
                description: "Vast canyon vistas and hiking.".to_string(),
                hotels: vec![hotel("Rim Lodge", 4.2, 180), hotel("Canyon Camp", 3.9, 90)],
                places: vec![
                    place("attractions", "South Rim Viewpoints", 4.9),
                    place("parks", "Grand Canyon National Park", 5.0),
                ],
            },
            Destination {
                id: "sf".to_string(),
                name: "San Francisco, CA".to_string(),
                image_url: "https://images.unsplash.com/photo-1501594907352-04cda38ebc29?auto=format&fit=crop&w=1200&q=80".to_string(),
                description: "Golden Gate, cable cars, lively neighborhoods.".to_string(),
                hotels: vec![
                    hotel("Bayview Hotel", 4.3, 220),
                    hotel("Cozy Wharf Inn", 4.0, 160),
                ],
                places: vec![
                    place("attractions", "Golden Gate Bridge", 4.9),
                    place("restaurants", "Fisherman's Wharf Eats", 4.4),
                ],
            },
            Destination {
                id: "ys".to_string(),
                name: "Yellowstone, WY".to_string(),
                image_url: "https://images.unsplash.com/photo-1511537190424-bbbab87ac5eb?auto=format&fit=crop&w=1200&q=80".to_string(),
                description: "Geysers, wildlife, and wilderness.".to_string(),
                hotels: vec![
                    hotel("Old Faithful Inn", 4.7, 210),
                    hotel("Parkside Cabin", 4.1, 130),
                ],
                places: vec![
                    place("attractions", "Old Faithful", 4.9),
                    place("parks", "Yellowstone National Park", 5.0),
                ],
            },
            Destination {
                id: "miami".to_string(),
                name: "Miami, FL".to_string(),
                image_url: "https://images.unsplash.com/photo-1483729558449-99ef09a8c325?auto=format&fit=crop&w=1200&q=80".to_string(),
                description: "Beaches, nightlife, and Art Deco architecture.".to_string(),
                hotels: vec![
                    hotel("Oceanfront Suites", 4.4, 280),
                    hotel("Miami Budget Stay", 3.8, 110),
                ],
                places: vec![
                    place("attractions", "South Beach", 4.7),
                    place("restaurants", "Cuban Corner", 4.6),
                ],
            },
        ];

        // The demo ids are distinct by construction.
        Self { destinations }
    }
}

fn hotel(name: &str, rating: f64, price: u32) -> Hotel {
    Hotel {
        name: name.to_string(),
        rating,
        price,
    }
}

fn place(kind: &str, name: &str, rating: f64) -> Place {
    Place {
        kind: kind.to_string(),
        name: name.to_string(),
        rating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_contents() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.destinations().len(), 5);

        let nyc = catalog.find("nyc").expect("nyc should exist");
        assert_eq!(nyc.name, "New York City, NY");
        assert_eq!(nyc.hotels.len(), 3);
        assert_eq!(nyc.places.len(), 3);
        assert_eq!(nyc.hotels[2].price, 560);

        let gc = catalog.find("gc").expect("gc should exist");
        assert_eq!(gc.places[1].kind, "parks");
        assert_eq!(gc.places[1].rating, 5.0);

        assert!(catalog.find("mars").is_none());
    }

    #[test]
    fn test_city_options_preserve_order() {
        let catalog = Catalog::demo();
        let options = catalog.city_options();
        let ids: Vec<&str> = options.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["nyc", "gc", "sf", "ys", "miami"]);
        assert_eq!(options[4].1, "Miami, FL");
        assert_eq!(catalog.first_id(), Some("nyc"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let dests = vec![
            Destination {
                id: "dup".to_string(),
                name: "First".to_string(),
                image_url: String::new(),
                description: String::new(),
                hotels: vec![],
                places: vec![],
            },
            Destination {
                id: "dup".to_string(),
                name: "Second".to_string(),
                image_url: String::new(),
                description: String::new(),
                hotels: vec![],
                places: vec![],
            },
        ];

        let result = Catalog::new(dests);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "dup"));
    }

    #[test]
    fn test_destination_serde_round_trip() {
        let catalog = Catalog::demo();
        let nyc = catalog.find("nyc").unwrap();

        let json = serde_json::to_string(nyc).unwrap();
        let back: Destination = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, nyc);
    }
}
