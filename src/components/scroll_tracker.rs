use crate::config::SiteConfig;
use crate::dom::{Element, ACTIVE};

/// The two fixed navbar presentations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarLook {
    Resting,
    Scrolled,
}

impl NavbarLook {
    pub fn for_scroll(scroll_y: f64, threshold: f64) -> Self {
        if scroll_y > threshold {
            NavbarLook::Scrolled
        } else {
            NavbarLook::Resting
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            NavbarLook::Resting => "rgba(255, 255, 255, 0.96)",
            NavbarLook::Scrolled => "rgba(255, 255, 255, 0.98)",
        }
    }

    pub fn box_shadow(self) -> &'static str {
        match self {
            NavbarLook::Resting => "none",
            NavbarLook::Scrolled => "0 2px 20px rgba(74, 144, 217, 0.1)",
        }
    }

    pub fn apply<E: Element>(self, navbar: &E) {
        navbar.set_style("background", self.background());
        navbar.set_style("box-shadow", self.box_shadow());
    }
}

/// Marks the nav link whose `href` equals `href` and clears the rest.
pub fn highlight_link<E: Element>(links: &[E], href: &str) {
    for link in links {
        link.set_class(ACTIVE, link.attribute("href").as_deref() == Some(href));
    }
}

/// Keeps the nav highlight and navbar style in step with the scroll position.
pub struct ScrollTracker<E> {
    navbar: Option<E>,
    links: Vec<E>,
    sections: Vec<E>,
    probe_offset: f64,
    scrolled_after: f64,
    current: Option<String>,
}

impl<E: Element> ScrollTracker<E> {
    pub fn new(navbar: Option<E>, links: Vec<E>, sections: Vec<E>, config: &SiteConfig) -> Self {
        Self {
            navbar,
            links,
            sections,
            probe_offset: config.section_probe_offset,
            scrolled_after: config.navbar_scrolled_after,
            current: None,
        }
    }

    #[cfg(test)]
    pub fn current_section(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Id of the section spanning `probe`, read from live layout.
    fn section_at(&self, probe: f64) -> Option<String> {
        self.sections
            .iter()
            .filter(|section| {
                let top = section.layout_top();
                probe >= top && probe < top + section.layout_height()
            })
            .filter_map(|section| section.attribute("id"))
            .last()
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        let navbar_height = self.navbar.as_ref().map_or(0.0, Element::layout_height);
        let probe = scroll_y + navbar_height + self.probe_offset;

        // Between sections the last highlight stays
        if let Some(id) = self.section_at(probe) {
            if self.current.as_deref() != Some(id.as_str()) {
                highlight_link(&self.links, &format!("#{id}"));
                self.current = Some(id);
            }
        }

        if let Some(navbar) = &self.navbar {
            NavbarLook::for_scroll(scroll_y, self.scrolled_after).apply(navbar);
        }
    }
}
