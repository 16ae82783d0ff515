// Itinerary persistence
// One serialized record under a fixed key; absence means "no itinerary". Save
// always fully replaces, Clear deletes, and a render step re-reads the store.
// The storage seam mirrors a browser local-storage surface so an in-memory
// and a file-backed implementation can stand in for it.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::render::{escape_html, RenderTarget};

pub const ITINERARY_KEY: &str = "itinerary";
pub const NO_ITINERARY_MSG: &str = "No saved itinerary yet.";

// Placeholder for fields the user left blank.
const FIELD_PLACEHOLDER: &str = "—";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// String key/value storage with local-storage semantics.
pub trait StorageBackend: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).map(|v| v.value().clone())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

// One JSON object file holding all keys, read-modify-written on each change.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> HashMap<String, String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "storage file unreadable, treating as empty");
                return HashMap::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "storage file malformed, treating as empty");
                HashMap::new()
            }
        }
    }

    fn write_all(&self, items: &HashMap<String, String>) -> Result<(), StoreError> {
        let raw = serde_json::to_string(items)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl StorageBackend for JsonFileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.read_all().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.read_all();
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut items = self.read_all();
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

// The single user-saved trip plan. All fields are populated on save, with
// placeholders standing in for anything the form left blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub city: String,
    pub from: String,
    pub to: String,
    pub pax: String,
    pub transport: String,
}

// Raw form field values; `None` or empty both mean "not filled in".
#[derive(Debug, Clone, Default)]
pub struct ItineraryForm {
    pub city_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub pax: Option<String>,
    pub transport: Option<String>,
}

fn field_or(value: &Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.clone(),
        _ => default.to_string(),
    }
}

pub struct ItineraryStore<S: StorageBackend> {
    backend: S,
}

impl<S: StorageBackend> ItineraryStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    // Overwrite the stored record with the current form values. No merge.
    pub fn save(&self, form: &ItineraryForm, catalog: &Catalog) -> Result<Itinerary, StoreError> {
        let city = form
            .city_id
            .as_deref()
            .and_then(|id| catalog.find(id))
            .map(|d| d.name.clone())
            .unwrap_or_else(|| FIELD_PLACEHOLDER.to_string());

        let itinerary = Itinerary {
            city,
            from: field_or(&form.from, FIELD_PLACEHOLDER),
            to: field_or(&form.to, FIELD_PLACEHOLDER),
            pax: field_or(&form.pax, "1"),
            transport: field_or(&form.transport, "flight"),
        };

        let raw = serde_json::to_string(&itinerary)?;
        self.backend.set_item(ITINERARY_KEY, &raw)?;
        debug!(city = %itinerary.city, "itinerary saved");
        Ok(itinerary)
    }

    // A malformed stored record is treated as "no itinerary", never an error.
    pub fn load(&self) -> Option<Itinerary> {
        let raw = self.backend.get_item(ITINERARY_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(itinerary) => Some(itinerary),
            Err(e) => {
                warn!(error = %e, "stored itinerary malformed, ignoring");
                None
            }
        }
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.backend.remove_item(ITINERARY_KEY)
    }
}

// Re-read the store and show either the record or the empty-state message.
pub fn render_itinerary<S: StorageBackend>(
    store: &ItineraryStore<S>,
    target: &mut impl RenderTarget,
) {
    match store.load() {
        Some(it) => {
            let html = format!(
                "<strong>{}</strong><div class=\"muted\">From: {} • To: {} • Pax: {}</div>\
                 <div style=\"margin-top:6px\">Transport: {}</div>",
                escape_html(&it.city),
                escape_html(&it.from),
                escape_html(&it.to),
                escape_html(&it.pax),
                escape_html(&it.transport),
            );
            target.replace(&html);
        }
        None => target.replace(NO_ITINERARY_MSG),
    }
}
