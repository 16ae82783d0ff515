// Render targets
// Renderers replace the full contents of a target on every pass; there is no
// diffing. A logical slot may have several targets registered (the hotels list
// is mounted in more than one spot), so writes broadcast to a target set.

use quick_xml::escape::escape;

pub trait RenderTarget {
    // Replace the target's entire contents with the given fragment.
    fn replace(&mut self, html: &str);
}

// In-memory target backing a single mount point.
#[derive(Debug, Default, Clone)]
pub struct FragmentBuffer {
    contents: String,
}

impl FragmentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

impl RenderTarget for FragmentBuffer {
    fn replace(&mut self, html: &str) {
        self.contents.clear();
        self.contents.push_str(html);
    }
}

// Write one fragment to every target registered for a slot.
pub fn broadcast<T: RenderTarget>(targets: &mut [T], html: &str) {
    for target in targets.iter_mut() {
        target.replace(html);
    }
}

// Markup-safe text. Fragments interpolate catalog strings and user field
// values, so everything user-visible goes through here.
pub fn escape_html(text: &str) -> String {
    escape(text).into_owned()
}
