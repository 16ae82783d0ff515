// Places gallery renderer
// Maps a destination plus an optional type filter and sort key onto a list of
// place thumbs, replacing the gallery target's contents wholesale.

use tracing::debug;

use crate::catalog::{Destination, Place};
use crate::placeholder::ImageSlot;
use crate::render::{escape_html, RenderTarget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFilter {
    All,
    Kind(String),
}

impl TypeFilter {
    // Control value "all" (or nothing selected) means unfiltered.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            TypeFilter::All
        } else {
            TypeFilter::Kind(value.to_string())
        }
    }

    fn matches(&self, place: &Place) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Kind(kind) => place.kind == *kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Rating,
    // "Distance" is a reversal of the current order, not a real distance
    // computation. Preserved as documented behavior.
    Distance,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rating" => Some(SortKey::Rating),
            "distance" => Some(SortKey::Distance),
            _ => None,
        }
    }
}

// Filter then sort. The result is always a subset or permutation of
// `dest.places`, order-preserving when no sort applies.
pub fn select_places<'a>(
    dest: &'a Destination,
    filter: &TypeFilter,
    sort: Option<SortKey>,
) -> Vec<&'a Place> {
    let mut places: Vec<&Place> = dest.places.iter().filter(|p| filter.matches(p)).collect();

    match sort {
        Some(SortKey::Rating) => {
            places.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        }
        Some(SortKey::Distance) => places.reverse(),
        None => {}
    }

    places
}

// One gallery entry: the place plus its image slot, kept around after the
// render so a later load failure can swap in the placeholder.
#[derive(Debug, Clone)]
pub struct PlaceThumb {
    pub place: Place,
    pub image: ImageSlot,
    destination_name: String,
}

impl PlaceThumb {
    pub fn new(dest: &Destination, place: &Place) -> Self {
        Self {
            place: place.clone(),
            image: ImageSlot::new(&dest.image_url, &place.name),
            destination_name: dest.name.clone(),
        }
    }

    pub fn html(&self) -> String {
        format!(
            "<div class=\"thumb\" role=\"listitem\">\
             <img src=\"{}\" alt=\"{} — {}\"/>\
             <div class=\"meta\"><strong>{}</strong>\
             <div class=\"muted\">{} • Rating: {}</div></div></div>",
            escape_html(self.image.src()),
            escape_html(&self.place.name),
            escape_html(&self.destination_name),
            escape_html(&self.place.name),
            escape_html(&self.place.kind),
            self.place.rating,
        )
    }
}

// Clear and repopulate the gallery target. Returns the thumbs so the caller
// can route image-load failures back to their slots.
pub fn render_gallery(
    dest: &Destination,
    filter: &TypeFilter,
    sort: Option<SortKey>,
    target: &mut impl RenderTarget,
) -> Vec<PlaceThumb> {
    let thumbs: Vec<PlaceThumb> = select_places(dest, filter, sort)
        .into_iter()
        .map(|place| PlaceThumb::new(dest, place))
        .collect();

    debug!(destination = %dest.id, count = thumbs.len(), "rendering places gallery");

    let html: String = thumbs.iter().map(PlaceThumb::html).collect();
    target.replace(&html);
    thumbs
}
