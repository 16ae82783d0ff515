// Page wiring
// Ties the catalog, renderers, estimator, itinerary store and decorations to
// a named control surface. Controls are optional: a missing control degrades
// its feature (skip, default, or prompt) and never fails startup. Filter and
// sort state is reconstructed from the current control values on every
// interaction, never stored durably.

use rand::Rng;
use tracing::debug;

use crate::catalog::Catalog;
use crate::decor::{Decorator, MotionPreference, Scene};
use crate::estimate::{estimate, EstimateOutcome, TransportMode};
use crate::gallery::{render_gallery, PlaceThumb, SortKey, TypeFilter};
use crate::hotels::{render_hotels, select_hotel};
use crate::itinerary::{render_itinerary, ItineraryForm, ItineraryStore, StorageBackend, StoreError};
use crate::placeholder::PlaceholderError;
use crate::render::{broadcast, escape_html, FragmentBuffer, RenderTarget};

// Current values of the named input controls. `None` means the control is
// absent from the page; `Some("")` means present but empty.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    pub city: Option<String>,
    pub min_rating: Option<String>,
    pub max_price: Option<String>,
    pub type_filter: Option<String>,
    pub sort_by: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub pax: Option<String>,
    pub transport: Option<String>,
}

// Ephemeral filter/sort state, rebuilt from the controls per interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub city_id: Option<String>,
    pub min_rating: f64,
    pub max_price: u32,
    pub type_filter: TypeFilter,
    pub sort: Option<SortKey>,
}

impl FilterState {
    pub fn from_controls(controls: &Controls) -> Self {
        Self {
            city_id: controls.city.clone(),
            min_rating: controls
                .min_rating
                .as_deref()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.0),
            max_price: controls
                .max_price
                .as_deref()
                .and_then(|v| v.parse().ok())
                .unwrap_or(9999),
            type_filter: TypeFilter::parse(controls.type_filter.as_deref().unwrap_or("all")),
            sort: controls.sort_by.as_deref().and_then(SortKey::parse),
        }
    }
}

pub struct Page<S: StorageBackend> {
    catalog: Catalog,
    pub controls: Controls,
    store: ItineraryStore<S>,
    decorator: Decorator,
    pub scene: Scene,
    // Render mounts. The hotels list legitimately has several.
    pub city_select: FragmentBuffer,
    pub gallery: FragmentBuffer,
    pub hotel_mounts: Vec<FragmentBuffer>,
    pub estimate_outputs: Vec<FragmentBuffer>,
    pub itinerary_card: Option<FragmentBuffer>,
    thumbs: Vec<PlaceThumb>,
}

impl<S: StorageBackend> Page<S> {
    pub fn new(catalog: Catalog, store: ItineraryStore<S>, controls: Controls) -> Self {
        Self {
            catalog,
            controls,
            store,
            decorator: Decorator::new(),
            scene: Scene::default(),
            city_select: FragmentBuffer::new(),
            gallery: FragmentBuffer::new(),
            hotel_mounts: vec![FragmentBuffer::new()],
            estimate_outputs: vec![FragmentBuffer::new()],
            itinerary_card: Some(FragmentBuffer::new()),
            thumbs: Vec::new(),
        }
    }

    // Everything the DOM-ready hook did: populate the city selector, select
    // the first destination, render the initial gallery/hotels/itinerary and
    // inject the decorations once.
    pub fn startup(&mut self, motion: MotionPreference, rng: &mut impl Rng) {
        self.populate_cities();

        if let Some(city) = self.controls.city.as_mut() {
            if city.is_empty() {
                if let Some(first) = self.catalog.first_id() {
                    *city = first.to_string();
                }
            }
            self.render_gallery_now();
            self.render_hotels_now();
        }

        self.render_itinerary_now();
        self.decorator.inject(&mut self.scene, motion, rng);
        debug!("page started");
    }

    fn populate_cities(&mut self) {
        let options: String = self
            .catalog
            .city_options()
            .iter()
            .map(|(id, name)| {
                format!(
                    "<option value=\"{}\">{}</option>",
                    escape_html(id),
                    escape_html(name)
                )
            })
            .collect();
        self.city_select.replace(&options);
    }

    fn render_gallery_now(&mut self) {
        let state = FilterState::from_controls(&self.controls);
        let Some(dest) = state.city_id.as_deref().and_then(|id| self.catalog.find(id)) else {
            self.gallery.replace("");
            self.thumbs.clear();
            return;
        };
        self.thumbs = render_gallery(dest, &state.type_filter, state.sort, &mut self.gallery);
    }

    fn render_hotels_now(&mut self) {
        let state = FilterState::from_controls(&self.controls);
        let city_id = state.city_id.as_deref().unwrap_or("");
        render_hotels(
            &self.catalog,
            city_id,
            state.min_rating,
            state.max_price,
            &mut self.hotel_mounts,
        );
    }

    fn render_itinerary_now(&mut self) {
        if let Some(card) = self.itinerary_card.as_mut() {
            render_itinerary(&self.store, card);
        }
    }

    // City selector changed: both the gallery and the hotels list follow it.
    pub fn city_changed(&mut self, city_id: &str) {
        self.controls.city = Some(city_id.to_string());
        self.render_gallery_now();
        self.render_hotels_now();
    }

    pub fn find_hotels(&mut self) {
        self.render_hotels_now();
    }

    pub fn type_filter_changed(&mut self, value: &str) {
        self.controls.type_filter = Some(value.to_string());
        self.render_gallery_now();
    }

    pub fn sort_changed(&mut self, value: &str) {
        self.controls.sort_by = Some(value.to_string());
        self.render_gallery_now();
    }

    // Estimate button: write the outcome to every estimate output.
    pub fn run_estimate(&mut self) -> EstimateOutcome {
        let mode = TransportMode::parse(self.controls.transport.as_deref().unwrap_or("flight"));
        let outcome = estimate(&self.catalog, self.controls.city.as_deref(), mode);
        broadcast(&mut self.estimate_outputs, &outcome.to_string());
        outcome
    }

    pub fn save_itinerary(&mut self) -> Result<(), StoreError> {
        let form = ItineraryForm {
            city_id: self.controls.city.clone(),
            from: self.controls.from.clone(),
            to: self.controls.to.clone(),
            pax: self.controls.pax.clone(),
            transport: self.controls.transport.clone(),
        };
        self.store.save(&form, &self.catalog)?;
        self.render_itinerary_now();
        Ok(())
    }

    pub fn clear_itinerary(&mut self) -> Result<(), StoreError> {
        self.store.clear()?;
        self.render_itinerary_now();
        Ok(())
    }

    pub fn select_hotel(&self, name: &str) -> String {
        select_hotel(name)
    }

    // An image in the gallery failed to load: swap in the placeholder for
    // that thumb (once) and refresh the gallery from the existing thumbs.
    pub fn image_failed(&mut self, index: usize) -> Result<bool, PlaceholderError> {
        let Some(thumb) = self.thumbs.get_mut(index) else {
            return Ok(false);
        };
        let substituted = thumb.image.mark_failed()?;
        if substituted {
            let html: String = self.thumbs.iter().map(PlaceThumb::html).collect();
            self.gallery.replace(&html);
        }
        Ok(substituted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::PROMPT_MSG;
    use crate::hotels::NO_MATCH_MSG;
    use crate::itinerary::{ItineraryStore, MemoryStorage, NO_ITINERARY_MSG};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn page_with_controls(controls: Controls) -> Page<MemoryStorage> {
        Page::new(
            Catalog::demo(),
            ItineraryStore::new(MemoryStorage::new()),
            controls,
        )
    }

    fn full_controls() -> Controls {
        Controls {
            city: Some(String::new()),
            min_rating: Some("0".to_string()),
            max_price: Some("9999".to_string()),
            type_filter: Some("all".to_string()),
            sort_by: Some(String::new()),
            from: Some(String::new()),
            to: Some(String::new()),
            pax: Some(String::new()),
            transport: Some("flight".to_string()),
        }
    }

    #[test]
    fn test_startup_renders_initial_state() {
        let mut page = page_with_controls(full_controls());
        let mut rng = StdRng::seed_from_u64(1);
        page.startup(MotionPreference::Full, &mut rng);

        // City selector populated, first destination selected.
        assert!(page.city_select.contents().contains("value=\"nyc\""));
        assert_eq!(page.controls.city.as_deref(), Some("nyc"));

        assert!(page.gallery.contents().contains("Statue of Liberty"));
        assert!(page.hotel_mounts[0].contents().contains("Central Boutique"));
        assert_eq!(
            page.itinerary_card.as_ref().unwrap().contents(),
            NO_ITINERARY_MSG
        );
        assert!(page.scene.backdrop);
    }

    #[test]
    fn test_startup_twice_injects_decorations_once() {
        let mut page = page_with_controls(full_controls());
        let mut rng = StdRng::seed_from_u64(1);

        page.startup(MotionPreference::Full, &mut rng);
        let ornaments = page.scene.ornaments.len();
        page.startup(MotionPreference::Full, &mut rng);
        assert_eq!(page.scene.ornaments.len(), ornaments);
    }

    #[test]
    fn test_missing_controls_degrade_gracefully() {
        // No controls at all: startup must still work.
        let mut page = page_with_controls(Controls::default());
        let mut rng = StdRng::seed_from_u64(1);
        page.startup(MotionPreference::Reduced, &mut rng);

        assert!(page.gallery.is_empty());
        assert_eq!(page.run_estimate(), EstimateOutcome::Prompt);
        assert_eq!(page.estimate_outputs[0].contents(), PROMPT_MSG);
    }

    #[test]
    fn test_city_change_rerenders_gallery_and_hotels() {
        let mut page = page_with_controls(full_controls());
        let mut rng = StdRng::seed_from_u64(1);
        page.startup(MotionPreference::Full, &mut rng);

        page.city_changed("gc");
        assert!(page.gallery.contents().contains("South Rim Viewpoints"));
        assert!(page.hotel_mounts[0].contents().contains("Rim Lodge"));
        assert!(!page.hotel_mounts[0].contents().contains("Central Boutique"));
    }

    #[test]
    fn test_filter_state_reconstructed_from_controls() {
        let mut controls = full_controls();
        controls.min_rating = Some("4.2".to_string());
        controls.max_price = Some("not a number".to_string());
        controls.sort_by = Some("rating".to_string());

        let state = FilterState::from_controls(&controls);
        assert_eq!(state.min_rating, 4.2);
        assert_eq!(state.max_price, 9999);
        assert_eq!(state.type_filter, TypeFilter::All);
        assert_eq!(state.sort, Some(SortKey::Rating));
    }

    #[test]
    fn test_find_hotels_applies_current_thresholds() {
        let mut page = page_with_controls(full_controls());
        let mut rng = StdRng::seed_from_u64(1);
        page.startup(MotionPreference::Full, &mut rng);

        page.controls.min_rating = Some("5".to_string());
        page.controls.max_price = Some("100".to_string());
        page.find_hotels();
        assert_eq!(page.hotel_mounts[0].contents(), NO_MATCH_MSG);
    }

    #[test]
    fn test_estimate_writes_to_every_output() {
        let mut page = page_with_controls(full_controls());
        page.estimate_outputs.push(FragmentBuffer::new());
        let mut rng = StdRng::seed_from_u64(1);
        page.startup(MotionPreference::Full, &mut rng);

        page.city_changed("gc");
        page.run_estimate();
        let expected = "Estimate: approx 4h, from $336 per passenger (mock).";
        assert_eq!(page.estimate_outputs[0].contents(), expected);
        assert_eq!(page.estimate_outputs[1].contents(), expected);
    }

    #[test]
    fn test_save_and_clear_itinerary_round_trip() {
        let mut page = page_with_controls(full_controls());
        let mut rng = StdRng::seed_from_u64(1);
        page.startup(MotionPreference::Full, &mut rng);

        page.controls.from = Some("A".to_string());
        page.controls.to = Some("B".to_string());
        page.controls.pax = Some("2".to_string());
        page.controls.transport = Some("train".to_string());
        page.save_itinerary().unwrap();

        let card = page.itinerary_card.as_ref().unwrap().contents().to_string();
        assert!(card.contains("New York City, NY"));
        assert!(card.contains("From: A"));
        assert!(card.contains("Pax: 2"));
        assert!(card.contains("Transport: train"));

        page.clear_itinerary().unwrap();
        assert_eq!(
            page.itinerary_card.as_ref().unwrap().contents(),
            NO_ITINERARY_MSG
        );
    }

    #[test]
    fn test_sort_and_type_filter_changes() {
        let mut page = page_with_controls(full_controls());
        let mut rng = StdRng::seed_from_u64(1);
        page.startup(MotionPreference::Full, &mut rng);

        page.type_filter_changed("parks");
        assert!(page.gallery.contents().contains("Central Park"));
        assert!(!page.gallery.contents().contains("Famous Pizza"));

        page.type_filter_changed("all");
        page.sort_changed("distance");
        let contents = page.gallery.contents();
        let park = contents.find("Central Park").unwrap();
        let statue = contents.find("Statue of Liberty").unwrap();
        assert!(park < statue);
    }

    #[test]
    fn test_image_failure_swaps_placeholder_once() {
        let mut page = page_with_controls(full_controls());
        let mut rng = StdRng::seed_from_u64(1);
        page.startup(MotionPreference::Full, &mut rng);

        assert!(page.image_failed(0).unwrap());
        assert!(page.gallery.contents().contains("data:image/svg+xml"));

        // A repeated failure on the same slot does nothing further.
        assert!(!page.image_failed(0).unwrap());
        // Out-of-range indexes are tolerated.
        assert!(!page.image_failed(99).unwrap());
    }

    #[test]
    fn test_select_hotel_is_stateless_ack() {
        let mut page = page_with_controls(full_controls());
        let mut rng = StdRng::seed_from_u64(1);
        page.startup(MotionPreference::Full, &mut rng);
        let before = page.hotel_mounts[0].contents().to_string();

        let ack = page.select_hotel("Central Boutique");
        assert_eq!(ack, "Selected hotel: Central Boutique (mock).");
        assert_eq!(page.hotel_mounts[0].contents(), before);
    }
}
