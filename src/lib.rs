// Travel explorer core: static catalog browsing, filtering and sorting,
// a mock price estimator, itinerary persistence, and a standalone
// search-with-suggestions demo widget.

pub mod catalog;
pub mod decor;
pub mod estimate;
pub mod gallery;
pub mod hotels;
pub mod itinerary;
pub mod page;
pub mod placeholder;
pub mod render;
pub mod search;

// Re-export key types for convenience
pub use catalog::{Catalog, CatalogError, Destination, Hotel, Place};
pub use decor::{Decorator, MotionPreference, Scene};
pub use estimate::{estimate, EstimateOutcome, TransportMode};
pub use gallery::{render_gallery, select_places, PlaceThumb, SortKey, TypeFilter};
pub use hotels::{filter_hotels, render_hotels, select_hotel};
pub use itinerary::{
    render_itinerary, Itinerary, ItineraryForm, ItineraryStore, JsonFileStorage, MemoryStorage,
    StorageBackend, StoreError,
};
pub use page::{Controls, FilterState, Page};
pub use placeholder::{placeholder_data_url, ImageSlot, PlaceholderError};
pub use render::{FragmentBuffer, RenderTarget};
pub use search::{suggest, ResultCard, SavedCards, SearchSession, SearchStatus};
