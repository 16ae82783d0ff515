// Hotels list renderer
// Filters a destination's hotels by minimum rating and maximum price, then
// repopulates every registered hotels target identically.

use tracing::debug;

use crate::catalog::{Catalog, Destination, Hotel};
use crate::render::{broadcast, escape_html, RenderTarget};

pub const NO_DESTINATION_MSG: &str = "No hotels for this destination.";
pub const NO_MATCH_MSG: &str = "No hotels match filters.";

// Keep a hotel iff rating >= min_rating and price <= max_price, both bounds
// inclusive. Order-preserving.
pub fn filter_hotels<'a>(dest: &'a Destination, min_rating: f64, max_price: u32) -> Vec<&'a Hotel> {
    dest.hotels
        .iter()
        .filter(|h| h.rating >= min_rating && h.price <= max_price)
        .collect()
}

fn hotel_row(hotel: &Hotel) -> String {
    format!(
        "<div class=\"item\"><div style=\"flex:1\">\
         <strong>{}</strong><div class=\"muted\">Rating: {} • ${}/night</div>\
         </div><div><button class=\"btn small\" data-name=\"{}\">Select</button></div></div>",
        escape_html(&hotel.name),
        hotel.rating,
        hotel.price,
        escape_html(&hotel.name),
    )
}

// Clear and repopulate every hotels target. An unknown destination and an
// empty filter result show distinct empty-state messages.
pub fn render_hotels<T: RenderTarget>(
    catalog: &Catalog,
    city_id: &str,
    min_rating: f64,
    max_price: u32,
    targets: &mut [T],
) {
    let Some(dest) = catalog.find(city_id) else {
        debug!(city = %city_id, "hotels render for unknown destination");
        broadcast(targets, NO_DESTINATION_MSG);
        return;
    };

    let filtered = filter_hotels(dest, min_rating, max_price);
    debug!(
        city = %city_id,
        min_rating,
        max_price,
        matches = filtered.len(),
        "rendering hotels list"
    );

    if filtered.is_empty() {
        broadcast(targets, NO_MATCH_MSG);
        return;
    }

    let html: String = filtered.into_iter().map(hotel_row).collect();
    broadcast(targets, &html);
}

// Mock booking: acknowledge the selection, change no state.
pub fn select_hotel(name: &str) -> String {
    format!("Selected hotel: {name} (mock).")
}
