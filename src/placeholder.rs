// Placeholder graphics
// When a remote image fails to load, the slot degrades to a generated inline
// SVG data URL carrying the item's name as visible text. Fully offline, no
// second network round-trip, and the substitution happens exactly once.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 480;
const BACKGROUND: &str = "#ddebf5";
const FOREGROUND: &str = "#0f1724";

#[derive(Error, Debug)]
pub enum PlaceholderError {
    #[error("SVG build error: {0}")]
    Svg(String),

    #[error("SVG encoding error: {0}")]
    Encoding(String),
}

// Deterministic data URL for a labeled placeholder graphic.
pub fn placeholder_data_url(text: &str) -> Result<String, PlaceholderError> {
    let mut writer = Writer::new(Vec::new());

    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
    svg.push_attribute(("width", WIDTH.to_string().as_str()));
    svg.push_attribute(("height", HEIGHT.to_string().as_str()));
    writer
        .write_event(Event::Start(svg))
        .map_err(|e| PlaceholderError::Svg(e.to_string()))?;

    let mut rect = BytesStart::new("rect");
    rect.push_attribute(("width", "100%"));
    rect.push_attribute(("height", "100%"));
    rect.push_attribute(("fill", BACKGROUND));
    writer
        .write_event(Event::Empty(rect))
        .map_err(|e| PlaceholderError::Svg(e.to_string()))?;

    let mut label = BytesStart::new("text");
    label.push_attribute(("x", "50%"));
    label.push_attribute(("y", "50%"));
    label.push_attribute(("font-family", "Inter,Arial,sans-serif"));
    label.push_attribute(("font-size", "28"));
    label.push_attribute(("fill", FOREGROUND));
    label.push_attribute(("text-anchor", "middle"));
    label.push_attribute(("dominant-baseline", "central"));
    writer
        .write_event(Event::Start(label))
        .map_err(|e| PlaceholderError::Svg(e.to_string()))?;
    // BytesText escapes markup characters in the label on write.
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(|e| PlaceholderError::Svg(e.to_string()))?;
    writer
        .write_event(Event::End(BytesEnd::new("text")))
        .map_err(|e| PlaceholderError::Svg(e.to_string()))?;

    writer
        .write_event(Event::End(BytesEnd::new("svg")))
        .map_err(|e| PlaceholderError::Svg(e.to_string()))?;

    let svg = String::from_utf8(writer.into_inner())
        .map_err(|e| PlaceholderError::Encoding(e.to_string()))?;

    Ok(format!(
        "data:image/svg+xml;charset=utf-8,{}",
        urlencoding::encode(&svg)
    ))
}

// An image mount: a primary URL plus a one-shot fallback to a generated
// placeholder labeled with `fallback_label`.
#[derive(Debug, Clone)]
pub struct ImageSlot {
    src: String,
    fallback_label: String,
    fallback_used: bool,
}

impl ImageSlot {
    pub fn new(primary_url: impl Into<String>, fallback_label: impl Into<String>) -> Self {
        Self {
            src: primary_url.into(),
            fallback_label: fallback_label.into(),
            fallback_used: false,
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    // Load failure: substitute the placeholder once. Reports whether the
    // source changed; repeated failures leave the slot alone.
    pub fn mark_failed(&mut self) -> Result<bool, PlaceholderError> {
        if self.fallback_used {
            return Ok(false);
        }
        self.src = placeholder_data_url(&self.fallback_label)?;
        self.fallback_used = true;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_embeds_text() {
        let url = placeholder_data_url("Central Park").unwrap();
        assert!(url.starts_with("data:image/svg+xml;charset=utf-8,"));

        let encoded = url.trim_start_matches("data:image/svg+xml;charset=utf-8,");
        let svg = urlencoding::decode(encoded).unwrap();
        assert!(svg.contains("Central Park"));
        assert!(svg.contains("<svg"));
        assert!(svg.contains("width=\"800\""));
    }

    #[test]
    fn test_placeholder_escapes_markup_in_label() {
        let url = placeholder_data_url("Fisherman's <Wharf>").unwrap();
        let encoded = url.trim_start_matches("data:image/svg+xml;charset=utf-8,");
        let svg = urlencoding::decode(encoded).unwrap();
        assert!(svg.contains("&lt;Wharf&gt;"));
        assert!(!svg.contains("<Wharf>"));
    }

    #[test]
    fn test_placeholder_is_deterministic() {
        let a = placeholder_data_url("Old Faithful").unwrap();
        let b = placeholder_data_url("Old Faithful").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fallback_substitutes_exactly_once() {
        let mut slot = ImageSlot::new("https://example.com/broken.jpg", "South Beach");
        assert_eq!(slot.src(), "https://example.com/broken.jpg");

        assert!(slot.mark_failed().unwrap());
        let fallback = slot.src().to_string();
        assert!(fallback.starts_with("data:image/svg+xml"));

        // A second failure must not swap the source again.
        assert!(!slot.mark_failed().unwrap());
        assert_eq!(slot.src(), fallback);
    }
}
