use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

/// Id of the optional inline JSON block that overrides the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Timing and count knobs for the page behaviours.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub particle_count: usize,
    pub carousel_interval_ms: u32,
    pub notification_visible_ms: u32,
    pub notification_exit_ms: u32,
    /// Added to `scrollY + navbarHeight` before testing which section is current.
    pub section_probe_offset: f64,
    pub navbar_scrolled_after: f64,
    pub reveal_threshold: f64,
    pub reveal_stagger_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            particle_count: 50,
            carousel_interval_ms: 4000,
            notification_visible_ms: 4000,
            notification_exit_ms: 300,
            section_probe_offset: 100.0,
            navbar_scrolled_after: 50.0,
            reveal_threshold: 0.1,
            reveal_stagger_ms: 100,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads `<script type="application/json" id="site-config">` when the page has one.
    pub fn from_document(document: &Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(err) => {
                warn!("Ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, err);
                Self::default()
            }
        }
    }
}
